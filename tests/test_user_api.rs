mod common;

use common::{alice, alice_json, TestEnvironment};
use petstore_client::ApiError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_returns_raw_body() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/user/login"))
        .and(query_param("username", "alice"))
        .and(query_param("password", "pw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("logged in user session:1700000000"))
        .expect(1)
        .mount(&env.server)
        .await;

    let token = env.client.user().login_user("alice", "pw").await.unwrap();
    assert_eq!(token, "logged in user session:1700000000");
}

#[tokio::test]
async fn test_login_rejected() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid username/password supplied"))
        .mount(&env.server)
        .await;

    let err = env.client.user().login_user("alice", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "HTTP 400: Invalid username/password supplied");
}

#[tokio::test]
async fn test_get_user_by_name() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/user/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_json()))
        .mount(&env.server)
        .await;

    let user = env.client.user().get_user_by_name("alice").await.unwrap();
    assert_eq!(user, alice());
}

#[tokio::test]
async fn test_username_is_percent_encoded_in_path() {
    let env = TestEnvironment::new().await;

    Mock::given(method("DELETE"))
        .and(path("/user/a%20b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    env.client.user().delete_user("a b").await.unwrap();
}

#[tokio::test]
async fn test_create_users_send_arrays() {
    let env = TestEnvironment::new().await;

    for endpoint in ["/user/createWithArray", "/user/createWithList"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(body_json(json!([alice_json()])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&env.server)
            .await;
    }

    let users = vec![alice()];
    env.client.user().create_users_with_array_input(&users).await.unwrap();
    env.client.user().create_users_with_list_input(&users).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_create_update_and_logout() {
    let env = TestEnvironment::new().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_json(alice_json()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut renamed = alice();
    renamed.last_name = Some("Pleasance".to_string());
    let mut renamed_json = alice_json();
    renamed_json["lastName"] = json!("Pleasance");

    Mock::given(method("PUT"))
        .and(path("/user/alice"))
        .and(body_json(renamed_json))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    let users = env.client.user();
    users.create_user(&alice()).await.unwrap();
    users.update_user("alice", &renamed).await.unwrap();
    users.logout_user().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let client = petstore_client::ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = client.user().logout_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
