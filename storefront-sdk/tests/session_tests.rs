use pretty_assertions::assert_eq;
use serde_json::json;
use storefront_sdk::{AuthStatus, Credentials, SdkConfig, Session, StorefrontClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com"
        })))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, http_method: &str, endpoint: &str, status: u16) {
    Mock::given(method(http_method))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(SdkConfig::new(format!("{}/api", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_init_with_valid_session() {
    let server = MockServer::start().await;
    mount_status(&server, "POST", "/api/auth/check", 200).await;
    mount_user(&server).await;

    let mut session = Session::new();
    let status = session.init(&client_for(&server)).await;

    assert_eq!(status, AuthStatus::Authenticated);
    assert_eq!(session.user().unwrap().full_name(), "Emily Johnson");
}

#[tokio::test]
async fn test_init_without_session_is_anonymous() {
    let server = MockServer::start().await;
    mount_status(&server, "POST", "/api/auth/check", 401).await;

    let mut session = Session::new();
    let status = session.init(&client_for(&server)).await;

    assert_eq!(status, AuthStatus::Anonymous);
    assert!(session.user().is_none());
}

#[tokio::test]
async fn test_init_when_server_is_down_is_anonymous() {
    let client = StorefrontClient::new(SdkConfig::new("http://127.0.0.1:9/api")).unwrap();

    let mut session = Session::new();
    let status = session.init(&client).await;

    assert_eq!(status, AuthStatus::Anonymous);
}

#[tokio::test]
async fn test_login_success_loads_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok"})),
        )
        .mount(&server)
        .await;
    mount_user(&server).await;

    let mut session = Session::new();
    let envelope = session
        .login(&client_for(&server), &Credentials::new("emilys", "emilyspass"))
        .await
        .unwrap();

    assert!(envelope.is_success());
    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().username, "emilys");
    assert_eq!(session.token().unwrap().access_token, "tok");
}

#[tokio::test]
async fn test_login_failure_leaves_session_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let mut session = Session::new();
    let envelope = session
        .login(&client_for(&server), &Credentials::new("emilys", "nope"))
        .await
        .unwrap();

    assert!(!envelope.is_success());
    assert_eq!(envelope.error().unwrap().code, "401");
    assert_eq!(session.status(), AuthStatus::Anonymous);
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_login_then_failed_user_lookup_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok"})),
        )
        .mount(&server)
        .await;
    mount_status(&server, "GET", "/api/auth/me", 500).await;

    let mut session = Session::new();
    let envelope = session
        .login(&client_for(&server), &Credentials::new("emilys", "emilyspass"))
        .await
        .unwrap();

    assert!(!envelope.is_success());
    assert_eq!(envelope.error().unwrap().code, "500");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_even_when_server_fails() {
    let server = MockServer::start().await;
    mount_status(&server, "POST", "/api/auth/check", 200).await;
    mount_user(&server).await;
    mount_status(&server, "POST", "/api/auth/logout", 500).await;

    let client = client_for(&server);
    let mut session = Session::new();
    session.init(&client).await;
    assert!(session.is_authenticated());

    let envelope = session.logout(&client).await.unwrap();

    assert!(!envelope.is_success());
    assert_eq!(session.status(), AuthStatus::Anonymous);
    assert!(session.user().is_none());
}
