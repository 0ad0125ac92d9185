//! Router level tests driving the full middleware stack with `oneshot`.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use test_utils::{builder::TestBuilder, context::TestContext};
use tower::ServiceExt;

use crate::server::{
    router::build_app,
    service::test::dev_discord,
    startup,
    state::AppState,
    storage::UploadStore,
};

mod admin;

const DEV_PASSWORD: &str = "secret";

struct TestApp {
    app: Router,
    uploads: UploadStore,
    test: TestContext,
}

async fn test_app() -> TestApp {
    let test = TestBuilder::new().with_room_tables().build().await.unwrap();
    let db = test.db.clone().unwrap();
    let session_layer = startup::connect_to_session(&db, false).await.unwrap();
    let uploads = UploadStore::in_memory();

    let state = AppState::new(
        db,
        reqwest::Client::new(),
        None,
        dev_discord(),
        uploads.clone(),
        Vec::new(),
        DEV_PASSWORD.to_string(),
    );

    TestApp {
        app: build_app(state, session_layer, Duration::from_secs(5)),
        uploads,
        test,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Logs in through the dev form and returns the session cookie.
    async fn dev_login(&self, user_id: u64) -> String {
        let response = self
            .send(form(
                Method::POST,
                "/api/auth/dev-login",
                None,
                &format!("username={}&password={}", user_id, DEV_PASSWORD),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        session_cookie(&response)
    }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form(method: Method, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
