//! # Petstore Client Library
//!
//! A typed client for the Swagger Petstore API. It consists of three main components:
//!
//! ## Encoder Module
//!
//! The [`encoder`] module reduces arbitrary values (models, enums, paths, mappings,
//! sequences and registered foreign types) to JSON-compatible [`serde_json::Value`]s.
//! Request bodies are produced with it.
//!
//! ## Client Module
//!
//! The [`client`] module provides the HTTP transport ([`ApiClient`]) and the API records.
//!
//! ## API Module
//!
//! The [`api`] module groups the operations by resource, each in an async and a
//! blocking form.
//!
//! ## Quick Start
//!
//! ```no_run
//! use petstore_client::{ApiClient, ClientConfig};
//!
//! # fn example() -> Result<(), petstore_client::ApiError> {
//! let client = ApiClient::from_config(&ClientConfig::from_env())?;
//!
//! // Blocking form, usable outside any async runtime
//! let pet = client.pet_blocking().get_pet_by_id(10)?;
//! println!("{}", pet.name);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;

pub use api::{AsyncPetApi, AsyncUserApi, SyncPetApi, SyncUserApi};
pub use client::{ApiClient, ApiResponse, Category, FilePart, Pet, PetStatus, Tag, User};
pub use config::ClientConfig;
pub use encoder::{jsonable_encoder, EncodeOptions};
pub use error::{ApiError, EncodeError};
