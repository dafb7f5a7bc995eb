//! Pet operations.
//!
//! | Method | HTTP | Path |
//! |---|---|---|
//! | `add_pet` | POST | `/pet` |
//! | `delete_pet` | DELETE | `/pet/{petId}` |
//! | `find_pets_by_status` | GET | `/pet/findByStatus` |
//! | `find_pets_by_tags` | GET | `/pet/findByTags` |
//! | `get_pet_by_id` | GET | `/pet/{petId}` |
//! | `update_pet` | PUT | `/pet` |
//! | `update_pet_with_form` | POST | `/pet/{petId}` |
//! | `upload_file` | POST | `/pet/{petId}/uploadImage` |

use reqwest::Method;

use crate::api::blocking::run_to_completion;
use crate::client::request::{list_literal, ApiRequest, FilePart, Json, NoContent};
use crate::client::types::{ApiResponse, Pet};
use crate::client::ApiClient;
use crate::encoder::{jsonable_encoder, EncodeOptions};
use crate::error::{ApiError, EncodeError};

pub fn add_pet_request(body: &Pet) -> Result<ApiRequest, EncodeError> {
    let body = jsonable_encoder(body, &EncodeOptions::default())?;
    Ok(ApiRequest::new(Method::POST, "/pet").json(body))
}

pub fn delete_pet_request(pet_id: i64, api_key: Option<&str>) -> ApiRequest {
    let request = ApiRequest::new(Method::DELETE, "/pet/{petId}").path_param("petId", pet_id);
    match api_key {
        Some(key) => request.header("api_key", key),
        None => request,
    }
}

/// Multiple status values are sent as one list-literal parameter.
pub fn find_pets_by_status_request<S: AsRef<str>>(status: &[S]) -> ApiRequest {
    ApiRequest::new(Method::GET, "/pet/findByStatus").query_param("status", list_literal(status))
}

pub fn find_pets_by_tags_request<S: AsRef<str>>(tags: &[S]) -> ApiRequest {
    ApiRequest::new(Method::GET, "/pet/findByTags").query_param("tags", list_literal(tags))
}

pub fn get_pet_by_id_request(pet_id: i64) -> ApiRequest {
    ApiRequest::new(Method::GET, "/pet/{petId}").path_param("petId", pet_id)
}

pub fn update_pet_request(body: &Pet) -> Result<ApiRequest, EncodeError> {
    let body = jsonable_encoder(body, &EncodeOptions::default())?;
    Ok(ApiRequest::new(Method::PUT, "/pet").json(body))
}

pub fn update_pet_with_form_request(
    pet_id: i64,
    name: Option<&str>,
    status: Option<&str>,
) -> ApiRequest {
    let data = [("name", name), ("status", status)]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field.to_string(), v.to_string())))
        .collect();
    ApiRequest::new(Method::POST, "/pet/{petId}")
        .path_param("petId", pet_id)
        .form(data)
}

pub fn upload_file_request(
    pet_id: i64,
    additional_metadata: Option<&str>,
    file: Option<FilePart>,
) -> ApiRequest {
    let data = additional_metadata
        .map(|meta| vec![("additionalMetadata".to_string(), meta.to_string())])
        .unwrap_or_default();
    let files = file
        .map(|file| vec![("file".to_string(), file)])
        .unwrap_or_default();
    ApiRequest::new(Method::POST, "/pet/{petId}/uploadImage")
        .path_param("petId", pet_id)
        .form(data)
        .files(files)
}

/// Async pet operations bound to an [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct AsyncPetApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AsyncPetApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn add_pet(&self, body: &Pet) -> Result<(), ApiError> {
        let request = add_pet_request(body)?;
        self.client.request::<NoContent>(request).await
    }

    pub async fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<(), ApiError> {
        self.client
            .request::<NoContent>(delete_pet_request(pet_id, api_key))
            .await
    }

    pub async fn find_pets_by_status<S: AsRef<str>>(&self, status: &[S]) -> Result<Vec<Pet>, ApiError> {
        self.client
            .request::<Json<Vec<Pet>>>(find_pets_by_status_request(status))
            .await
    }

    pub async fn find_pets_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<Pet>, ApiError> {
        self.client
            .request::<Json<Vec<Pet>>>(find_pets_by_tags_request(tags))
            .await
    }

    /// Returns a single pet.
    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, ApiError> {
        self.client
            .request::<Json<Pet>>(get_pet_by_id_request(pet_id))
            .await
    }

    pub async fn update_pet(&self, body: &Pet) -> Result<(), ApiError> {
        let request = update_pet_request(body)?;
        self.client.request::<NoContent>(request).await
    }

    pub async fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<(), ApiError> {
        self.client
            .request::<NoContent>(update_pet_with_form_request(pet_id, name, status))
            .await
    }

    pub async fn upload_file(
        &self,
        pet_id: i64,
        additional_metadata: Option<&str>,
        file: Option<FilePart>,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .request::<Json<ApiResponse>>(upload_file_request(pet_id, additional_metadata, file))
            .await
    }
}

/// Blocking pet operations; each call runs on its own short-lived runtime.
#[derive(Debug, Clone, Copy)]
pub struct SyncPetApi<'a> {
    inner: AsyncPetApi<'a>,
}

impl<'a> SyncPetApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            inner: AsyncPetApi::new(client),
        }
    }

    pub fn add_pet(&self, body: &Pet) -> Result<(), ApiError> {
        run_to_completion(self.inner.add_pet(body))
    }

    pub fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<(), ApiError> {
        run_to_completion(self.inner.delete_pet(pet_id, api_key))
    }

    pub fn find_pets_by_status<S: AsRef<str> + Sync>(&self, status: &[S]) -> Result<Vec<Pet>, ApiError> {
        run_to_completion(self.inner.find_pets_by_status(status))
    }

    pub fn find_pets_by_tags<S: AsRef<str> + Sync>(&self, tags: &[S]) -> Result<Vec<Pet>, ApiError> {
        run_to_completion(self.inner.find_pets_by_tags(tags))
    }

    pub fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, ApiError> {
        run_to_completion(self.inner.get_pet_by_id(pet_id))
    }

    pub fn update_pet(&self, body: &Pet) -> Result<(), ApiError> {
        run_to_completion(self.inner.update_pet(body))
    }

    pub fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<(), ApiError> {
        run_to_completion(self.inner.update_pet_with_form(pet_id, name, status))
    }

    pub fn upload_file(
        &self,
        pet_id: i64,
        additional_metadata: Option<&str>,
        file: Option<FilePart>,
    ) -> Result<ApiResponse, ApiError> {
        run_to_completion(self.inner.upload_file(pet_id, additional_metadata, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::PetStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn add_pet_encodes_body_with_aliases() {
        let mut pet = Pet::new("doggie", vec!["a.png".into()]);
        pet.status = Some(PetStatus::Pending);
        let request = add_pet_request(&pet).unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "/pet");
        assert_eq!(
            request.json,
            Some(json!({
                "id": null,
                "category": null,
                "name": "doggie",
                "photoUrls": ["a.png"],
                "tags": null,
                "status": "pending"
            }))
        );
        assert!(request.data.is_none() && request.files.is_none());
    }

    #[test]
    fn delete_pet_sends_api_key_header_only_when_given() {
        let request = delete_pet_request(42, Some("secret"));
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.resolved_path(), "/pet/42");
        assert_eq!(request.headers, vec![("api_key".to_string(), "secret".to_string())]);
        assert!(request.json.is_none());

        assert!(delete_pet_request(42, None).headers.is_empty());
    }

    #[test]
    fn find_by_status_uses_list_literal() {
        let request = find_pets_by_status_request(&["available", "sold"]);
        assert_eq!(request.url, "/pet/findByStatus");
        assert_eq!(
            request.query_params,
            vec![("status", "['available', 'sold']".to_string())]
        );
    }

    #[test]
    fn find_by_status_accepts_status_enum() {
        let request = find_pets_by_status_request(&[PetStatus::Available]);
        assert_eq!(request.query_params, vec![("status", "['available']".to_string())]);
    }

    #[test]
    fn update_with_form_omits_absent_fields() {
        let request = update_pet_with_form_request(7, None, Some("sold"));
        assert_eq!(request.resolved_path(), "/pet/7");
        assert_eq!(request.data, Some(vec![("status".to_string(), "sold".to_string())]));
        assert!(request.files.is_none());
    }

    #[test]
    fn upload_file_is_always_multipart() {
        let request = upload_file_request(7, Some("front"), None);
        assert_eq!(request.resolved_path(), "/pet/7/uploadImage");
        assert_eq!(
            request.data,
            Some(vec![("additionalMetadata".to_string(), "front".to_string())])
        );
        assert_eq!(request.files, Some(vec![]));

        let request = upload_file_request(7, None, Some(FilePart::new(vec![1u8, 2, 3])));
        let files = request.files.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "file");
    }
}
