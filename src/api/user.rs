//! User operations.
//!
//! Creating, updating and deleting users can only be done by a logged-in
//! user. `login_user` returns the session token exactly as the server sends it.

use reqwest::Method;

use crate::api::blocking::run_to_completion;
use crate::client::request::{ApiRequest, Json, NoContent, Text};
use crate::client::types::User;
use crate::client::ApiClient;
use crate::encoder::{jsonable_encoder, EncodeOptions};
use crate::error::{ApiError, EncodeError};

pub fn create_user_request(body: &User) -> Result<ApiRequest, EncodeError> {
    let body = jsonable_encoder(body, &EncodeOptions::default())?;
    Ok(ApiRequest::new(Method::POST, "/user").json(body))
}

pub fn create_users_with_array_input_request(body: &[User]) -> Result<ApiRequest, EncodeError> {
    let body = jsonable_encoder(body, &EncodeOptions::default())?;
    Ok(ApiRequest::new(Method::POST, "/user/createWithArray").json(body))
}

pub fn create_users_with_list_input_request(body: &[User]) -> Result<ApiRequest, EncodeError> {
    let body = jsonable_encoder(body, &EncodeOptions::default())?;
    Ok(ApiRequest::new(Method::POST, "/user/createWithList").json(body))
}

pub fn delete_user_request(username: &str) -> ApiRequest {
    ApiRequest::new(Method::DELETE, "/user/{username}").path_param("username", username)
}

pub fn get_user_by_name_request(username: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, "/user/{username}").path_param("username", username)
}

pub fn login_user_request(username: &str, password: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, "/user/login")
        .query_param("username", username)
        .query_param("password", password)
}

pub fn logout_user_request() -> ApiRequest {
    ApiRequest::new(Method::GET, "/user/logout")
}

pub fn update_user_request(username: &str, body: &User) -> Result<ApiRequest, EncodeError> {
    let body = jsonable_encoder(body, &EncodeOptions::default())?;
    Ok(ApiRequest::new(Method::PUT, "/user/{username}")
        .path_param("username", username)
        .json(body))
}

/// Async user operations bound to an [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct AsyncUserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AsyncUserApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_user(&self, body: &User) -> Result<(), ApiError> {
        let request = create_user_request(body)?;
        self.client.request::<NoContent>(request).await
    }

    pub async fn create_users_with_array_input(&self, body: &[User]) -> Result<(), ApiError> {
        let request = create_users_with_array_input_request(body)?;
        self.client.request::<NoContent>(request).await
    }

    pub async fn create_users_with_list_input(&self, body: &[User]) -> Result<(), ApiError> {
        let request = create_users_with_list_input_request(body)?;
        self.client.request::<NoContent>(request).await
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        self.client
            .request::<NoContent>(delete_user_request(username))
            .await
    }

    pub async fn get_user_by_name(&self, username: &str) -> Result<User, ApiError> {
        self.client
            .request::<Json<User>>(get_user_by_name_request(username))
            .await
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.client
            .request::<Text>(login_user_request(username, password))
            .await
    }

    pub async fn logout_user(&self) -> Result<(), ApiError> {
        self.client.request::<NoContent>(logout_user_request()).await
    }

    pub async fn update_user(&self, username: &str, body: &User) -> Result<(), ApiError> {
        let request = update_user_request(username, body)?;
        self.client.request::<NoContent>(request).await
    }
}

/// Blocking user operations; each call runs on its own short-lived runtime.
#[derive(Debug, Clone, Copy)]
pub struct SyncUserApi<'a> {
    inner: AsyncUserApi<'a>,
}

impl<'a> SyncUserApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            inner: AsyncUserApi::new(client),
        }
    }

    pub fn create_user(&self, body: &User) -> Result<(), ApiError> {
        run_to_completion(self.inner.create_user(body))
    }

    pub fn create_users_with_array_input(&self, body: &[User]) -> Result<(), ApiError> {
        run_to_completion(self.inner.create_users_with_array_input(body))
    }

    pub fn create_users_with_list_input(&self, body: &[User]) -> Result<(), ApiError> {
        run_to_completion(self.inner.create_users_with_list_input(body))
    }

    pub fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        run_to_completion(self.inner.delete_user(username))
    }

    pub fn get_user_by_name(&self, username: &str) -> Result<User, ApiError> {
        run_to_completion(self.inner.get_user_by_name(username))
    }

    pub fn login_user(&self, username: &str, password: &str) -> Result<String, ApiError> {
        run_to_completion(self.inner.login_user(username, password))
    }

    pub fn logout_user(&self) -> Result<(), ApiError> {
        run_to_completion(self.inner.logout_user())
    }

    pub fn update_user(&self, username: &str, body: &User) -> Result<(), ApiError> {
        run_to_completion(self.inner.update_user(username, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn alice() -> User {
        User {
            username: Some("alice".into()),
            email: Some("alice@example.com".into()),
            user_status: Some(1),
            ..User::default()
        }
    }

    #[test]
    fn login_puts_credentials_in_query() {
        let request = login_user_request("alice", "pw");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "/user/login");
        assert_eq!(
            request.query_params,
            vec![("username", "alice".to_string()), ("password", "pw".to_string())]
        );
    }

    #[test]
    fn create_with_array_encodes_every_user() {
        let request = create_users_with_array_input_request(&[alice(), User::default()]).unwrap();
        assert_eq!(request.url, "/user/createWithArray");
        let body = request.json.unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["userStatus"], json!(1));
        assert_eq!(body[1]["username"], json!(null));
    }

    #[test]
    fn update_user_combines_path_and_body() {
        let request = update_user_request("alice", &alice()).unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.resolved_path(), "/user/alice");
        assert_eq!(request.json.unwrap()["email"], json!("alice@example.com"));
    }

    #[test]
    fn logout_has_no_parameters() {
        let request = logout_user_request();
        assert!(request.path_params.is_empty());
        assert!(request.query_params.is_empty());
        assert!(request.json.is_none());
    }
}
