//! Type definitions for the Petstore API.
//!
//! These are the records the API exchanges. Each one derives serde for
//! response decoding and implements [`Model`] so request bodies go through
//! the alias-aware encoder in [`crate::encoder`].
//!
//! ## Key Types
//!
//! - [`Pet`] - A pet with its category, photos, tags and store status
//! - [`User`] - A store user account
//! - [`ApiResponse`] - Status envelope returned by the image upload endpoint
//!
//! ## Wire names
//!
//! The API uses camelCase for multi-word fields (`photoUrls`, `firstName`,
//! `userStatus`). The Rust fields are snake_case; the camelCase names are
//! declared both as serde renames and as model aliases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encoder::{Encodable, Model, ModelField, Node, Scalar};

/// A pet category such as "Dogs" or "Cats".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// A free-form label attached to a pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Tag text
    #[serde(default)]
    pub name: Option<String>,
}

/// Availability of a pet in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl AsRef<str> for PetStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PetStatus::Available),
            "pending" => Ok(PetStatus::Pending),
            "sold" => Ok(PetStatus::Sold),
            other => Err(format!("unknown pet status `{other}`")),
        }
    }
}

/// A pet in the store.
///
/// `name` and `photo_urls` are required by the API; everything else may be
/// absent. When a pet is created the server assigns `id` if it is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Unique pet identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Category the pet belongs to
    #[serde(default)]
    pub category: Option<Category>,
    /// Pet name
    pub name: String,
    /// URLs of photos of the pet
    #[serde(rename = "photoUrls", default)]
    pub photo_urls: Vec<String>,
    /// Labels used by `find_pets_by_tags`
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    /// Store status
    #[serde(default)]
    pub status: Option<PetStatus>,
}

impl Pet {
    pub fn new(name: impl Into<String>, photo_urls: Vec<String>) -> Self {
        Self {
            name: name.into(),
            photo_urls,
            ..Self::default()
        }
    }
}

/// A store user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Account status code, meaning defined by the server
    #[serde(rename = "userStatus", default)]
    pub user_status: Option<i32>,
}

/// Envelope returned by `upload_file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub code: Option<i32>,
    /// Response kind, e.g. `"unknown"`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Encodable for PetStatus {
    fn to_node(&self) -> Node {
        Node::enumeration(Scalar::String(self.as_str().to_string()))
    }
}

impl Model for Category {
    fn model_name(&self) -> &'static str {
        "Category"
    }

    fn model_fields(&self) -> Vec<ModelField> {
        vec![
            ModelField::optional("id", &self.id),
            ModelField::optional("name", &self.name),
        ]
    }
}

impl Model for Tag {
    fn model_name(&self) -> &'static str {
        "Tag"
    }

    fn model_fields(&self) -> Vec<ModelField> {
        vec![
            ModelField::optional("id", &self.id),
            ModelField::optional("name", &self.name),
        ]
    }
}

impl Model for Pet {
    fn model_name(&self) -> &'static str {
        "Pet"
    }

    fn model_fields(&self) -> Vec<ModelField> {
        vec![
            ModelField::optional("id", &self.id),
            ModelField::optional("category", &self.category),
            ModelField::new("name", &self.name),
            ModelField::new("photo_urls", &self.photo_urls).alias("photoUrls"),
            ModelField::optional("tags", &self.tags),
            ModelField::optional("status", &self.status),
        ]
    }
}

impl Model for User {
    fn model_name(&self) -> &'static str {
        "User"
    }

    fn model_fields(&self) -> Vec<ModelField> {
        vec![
            ModelField::optional("id", &self.id),
            ModelField::optional("username", &self.username),
            ModelField::optional("first_name", &self.first_name).alias("firstName"),
            ModelField::optional("last_name", &self.last_name).alias("lastName"),
            ModelField::optional("email", &self.email),
            ModelField::optional("password", &self.password),
            ModelField::optional("phone", &self.phone),
            ModelField::optional("user_status", &self.user_status).alias("userStatus"),
        ]
    }
}

impl Model for ApiResponse {
    fn model_name(&self) -> &'static str {
        "ApiResponse"
    }

    fn model_fields(&self) -> Vec<ModelField> {
        vec![
            ModelField::optional("code", &self.code),
            ModelField::optional("kind", &self.kind).alias("type"),
            ModelField::optional("message", &self.message),
        ]
    }
}

macro_rules! encodable_model {
    ($($t:ty),+) => {
        $(
            impl Encodable for $t {
                fn to_node(&self) -> Node {
                    Node::model(self)
                }
            }
        )+
    };
}

encodable_model!(Category, Tag, Pet, User, ApiResponse);
