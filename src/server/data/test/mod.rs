mod entry;
mod room;
mod user;
