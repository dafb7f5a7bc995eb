mod common;

use common::{doggie, doggie_json};
use petstore_client::{ApiClient, ApiError};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The mock server lives on its own multi-threaded runtime so the blocking
/// façade can be called from a thread with no runtime of its own.
fn start_server(runtime: &Runtime) -> MockServer {
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path("/pet/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(doggie_json()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pet/findByStatus"))
            .and(query_param("status", "['sold']"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("session:42"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pet/404"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Pet not found"))
            .mount(&server)
            .await;
    });
    server
}

#[test]
fn test_blocking_calls_match_async_results() {
    common::init_test_logging();
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);
    let client = ApiClient::new(server.uri()).unwrap();

    let pet = client.pet_blocking().get_pet_by_id(10).unwrap();
    assert_eq!(pet, doggie());

    let sold = client.pet_blocking().find_pets_by_status(&["sold"]).unwrap();
    assert!(sold.is_empty());

    let token = client.user_blocking().login_user("alice", "pw").unwrap();
    assert_eq!(token, "session:42");

    let async_pet = runtime.block_on(client.pet().get_pet_by_id(10)).unwrap();
    assert_eq!(async_pet, pet);
}

#[test]
fn test_blocking_call_surfaces_status_error() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);
    let client = ApiClient::new(server.uri()).unwrap();

    let err = client.pet_blocking().get_pet_by_id(404).unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 404, .. }));
}

#[test]
fn test_blocking_calls_from_several_threads() {
    let runtime = Runtime::new().unwrap();
    let server = start_server(&runtime);
    let client = ApiClient::new(server.uri()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| client.pet_blocking().get_pet_by_id(10)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), doggie());
        }
    });
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_calls_from_spawn_blocking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doggie_json()))
        .expect(1)
        .mount(&server)
        .await;
    let client = ApiClient::new(server.uri()).unwrap();

    let pet = tokio::task::spawn_blocking(move || client.pet_blocking().get_pet_by_id(10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pet, doggie());
}

#[tokio::test]
async fn test_blocking_call_on_runtime_thread_still_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("session:7"))
        .mount(&server)
        .await;
    let client = ApiClient::new(server.uri()).unwrap();

    let token = client.user_blocking().login_user("alice", "pw").unwrap();
    assert_eq!(token, "session:7");
}
