//! HTTP handlers.
//!
//! Handlers authenticate through `AuthGuard`, call into the service layer and convert domain
//! models to DTOs. Business rules live in the services.

pub mod admin;
pub mod auth;
pub mod entry;
pub mod index;
pub mod room;
pub mod user;

#[cfg(test)]
mod test;

use axum::{
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};

use crate::server::error::AppError;

pub static ROOM_TAG: &str = "room";
pub static ENTRY_TAG: &str = "entry";
pub static AUTH_TAG: &str = "auth";
pub static USER_TAG: &str = "user";
pub static ADMIN_TAG: &str = "admin";

/// Parses a Discord id submitted by a client.
///
/// Unlike ids read from storage, a malformed client id is the client's fault.
fn parse_client_id(field: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a numeric Discord id", field)))
}

/// `Content-Disposition` value offering `filename` as a download.
fn attachment_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", header_safe_filename(filename))
}

/// Replaces characters that cannot appear inside a quoted header value.
fn header_safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' || !(c.is_ascii_graphic() || c == ' ') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Url-encoded form extractor whose rejections answer through `AppError`.
///
/// A missing or malformed field becomes a 400 with an `ErrorDto` body instead of axum's
/// plain-text 422.
pub struct ApiForm<T>(pub T);

impl<T, S> FromRequest<S> for ApiForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
