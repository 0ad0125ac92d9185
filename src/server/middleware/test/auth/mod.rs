use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::{AuthSession, AuthSource},
    },
};
use entity::user::{UserRole, UserStatus};
use test_utils::{builder::TestBuilder, factory};

mod require;
