#![allow(dead_code)]

use petstore_client::client::types::{Category, Pet, PetStatus, Tag, User};
use petstore_client::ApiClient;
use serde_json::{json, Value};
use wiremock::MockServer;

pub struct TestEnvironment {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestEnvironment {
    /// Starts a fresh mock server and a client pointed at it.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri()).expect("client should build");
        Self { server, client }
    }
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petstore_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn doggie() -> Pet {
    Pet {
        id: Some(10),
        category: Some(Category {
            id: Some(1),
            name: Some("Dogs".to_string()),
        }),
        name: "doggie".to_string(),
        photo_urls: vec!["https://example.com/doggie.png".to_string()],
        tags: Some(vec![Tag {
            id: Some(3),
            name: Some("friendly".to_string()),
        }]),
        status: Some(PetStatus::Available),
    }
}

pub fn doggie_json() -> Value {
    json!({
        "id": 10,
        "category": {"id": 1, "name": "Dogs"},
        "name": "doggie",
        "photoUrls": ["https://example.com/doggie.png"],
        "tags": [{"id": 3, "name": "friendly"}],
        "status": "available"
    })
}

pub fn alice() -> User {
    User {
        id: Some(1),
        username: Some("alice".to_string()),
        first_name: Some("Alice".to_string()),
        last_name: Some("Liddell".to_string()),
        email: Some("alice@example.com".to_string()),
        password: Some("pw".to_string()),
        phone: Some("555-0100".to_string()),
        user_status: Some(1),
    }
}

pub fn alice_json() -> Value {
    json!({
        "id": 1,
        "username": "alice",
        "firstName": "Alice",
        "lastName": "Liddell",
        "email": "alice@example.com",
        "password": "pw",
        "phone": "555-0100",
        "userStatus": 1
    })
}
