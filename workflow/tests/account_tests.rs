mod common;

use common::client_for;
use refinely_client::SignupRequest;
use refinely_workflow::{AuthFlow, ProfileFlow, WorkflowError, LOGIN_FALLBACK};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com"
    })
}

fn signup_request() -> SignupRequest {
    SignupRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "hunter2!".to_string(),
    }
}

#[tokio::test]
async fn login_stores_the_token_and_authenticates_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, session) = client_for(&server);
    let auth = AuthFlow::new(client.clone());
    auth.login("ada@example.com", "hunter2!").await.unwrap();
    assert!(session.is_authenticated());

    let mut profile = ProfileFlow::new(client);
    let loaded = profile.load().await.unwrap();
    assert_eq!(loaded.email, "ada@example.com");
}

#[tokio::test]
async fn rejected_login_maps_to_the_credentials_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, session) = client_for(&server);
    let auth = AuthFlow::new(client);
    let err = auth.login("ada@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.user_message(LOGIN_FALLBACK), LOGIN_FALLBACK);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_surfaces_backend_detail_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "account disabled" })),
        )
        .mount(&server)
        .await;

    let (client, _session) = client_for(&server);
    let auth = AuthFlow::new(client);
    let err = auth.login("ada@example.com", "hunter2!").await.unwrap_err();
    assert_eq!(err.user_message(LOGIN_FALLBACK), "account disabled");
}

#[tokio::test]
async fn signup_validation_short_circuits_before_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _session) = client_for(&server);
    let auth = AuthFlow::new(client);

    let mismatched = auth.signup(&signup_request(), "different").await.unwrap_err();
    assert!(matches!(mismatched, WorkflowError::Validation(_)));

    let mut blank = signup_request();
    blank.first_name = "  ".to_string();
    let missing = auth.signup(&blank, &blank.password.clone()).await.unwrap_err();
    assert!(matches!(missing, WorkflowError::Validation(_)));

    let mut short = signup_request();
    short.password = "abc".to_string();
    let too_short = auth.signup(&short, "abc").await.unwrap_err();
    assert!(matches!(too_short, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn valid_signup_posts_the_registration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "hunter2!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_for(&server);
    let auth = AuthFlow::new(client);
    let created = auth.signup(&signup_request(), "hunter2!").await.unwrap();
    assert_eq!(created.id, "u1");
}

#[tokio::test]
async fn logout_is_idempotent() {
    let server = MockServer::start().await;
    let (client, session) = client_for(&server);
    session.set_token("tok").unwrap();

    let auth = AuthFlow::new(client);
    auth.logout().unwrap();
    assert!(!session.is_authenticated());
    auth.logout().unwrap();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn profile_update_with_blank_password_keeps_the_current_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json()])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(body_json(json!({
            "first_name": "Ada",
            "last_name": "King",
            "email": "ada@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "first_name": "Ada",
            "last_name": "King",
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _session) = client_for(&server);
    let mut profile = ProfileFlow::new(client);
    profile.load().await.unwrap();

    let updated = profile
        .update("Ada", "King", "ada@example.com", "", "")
        .await
        .unwrap();
    assert_eq!(updated.last_name, "King");
}

#[tokio::test]
async fn profile_password_mismatch_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json()])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _session) = client_for(&server);
    let mut profile = ProfileFlow::new(client);
    profile.load().await.unwrap();

    let err = profile
        .update("Ada", "King", "ada@example.com", "new-pass", "other")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn deleting_the_account_drops_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json()])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, session) = client_for(&server);
    session.set_token("tok").unwrap();

    let mut profile = ProfileFlow::new(client);
    profile.load().await.unwrap();
    profile.delete_account().await.unwrap();

    assert!(!session.is_authenticated());
    assert!(profile.profile().is_none());
}
