use axum::http::{Method, StatusCode};
use entity::user::UserStatus;
use test_utils::factory::user::UserFactory;

use super::{body_json, form, get, test_app};
use crate::{
    model::user::{RoleDto, StatusDto, UserDto},
    server::service::test::{ADMIN, MEMBER},
};

/// Expected: an application admin lists, approves and denies pending registrations
#[tokio::test]
async fn admin_reviews_pending_requests() {
    let app = test_app().await;
    let cookie = app.dev_login(ADMIN).await;

    let db = app.test.db.as_ref().unwrap();
    for id in ["70", "71"] {
        UserFactory::new(db)
            .discord_id(id)
            .status(UserStatus::Pending)
            .build()
            .await
            .unwrap();
    }

    let pending: Vec<UserDto> =
        body_json(app.send(get("/api/admin/requests", Some(&cookie))).await).await;
    assert_eq!(pending.len(), 2);

    let response = app
        .send(form(
            Method::POST,
            "/api/admin/approve",
            Some(&cookie),
            "discordId=70&role=ADMIN",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let approved: UserDto = body_json(response).await;
    assert_eq!(approved.status, StatusDto::Approved);
    assert_eq!(approved.role, RoleDto::Admin);

    let response = app
        .send(form(Method::POST, "/api/admin/deny", Some(&cookie), "discordId=71"))
        .await;
    let denied: UserDto = body_json(response).await;
    assert_eq!(denied.status, StatusDto::Denied);

    let pending: Vec<UserDto> =
        body_json(app.send(get("/api/admin/requests", Some(&cookie))).await).await;
    assert!(pending.is_empty());
}

#[tokio::test]
async fn admin_endpoints_validate_input() {
    let app = test_app().await;
    let cookie = app.dev_login(ADMIN).await;

    let cases = [
        ("/api/admin/approve", "discordId=abc&role=USER", StatusCode::BAD_REQUEST),
        ("/api/admin/approve", "discordId=5&role=NONE", StatusCode::BAD_REQUEST),
        ("/api/admin/deny", "discordId=404", StatusCode::NOT_FOUND),
    ];

    for (uri, body, expected) in cases {
        let response = app.send(form(Method::POST, uri, Some(&cookie), body)).await;
        assert_eq!(response.status(), expected, "{} {}", uri, body);
    }
}

#[tokio::test]
async fn regular_users_cannot_review_requests() {
    let app = test_app().await;
    app.dev_login(ADMIN).await;
    let cookie = app.dev_login(MEMBER).await;

    let response = app.send(get("/api/admin/requests", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
