pub use super::entry::Entity as Entry;
pub use super::room::Entity as Room;
pub use super::user::Entity as User;
