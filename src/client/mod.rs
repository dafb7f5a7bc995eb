//! # Petstore HTTP Client
//!
//! The transport layer and the records exchanged with the Petstore API.
//!
//! ## Modules
//!
//! - [`client`] - [`ApiClient`], the reqwest-backed transport every façade sends through
//! - [`request`] - Request descriptors, upload parts and response shapes
//! - [`types`] - Type definitions for API requests and responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use petstore_client::client::ApiClient;
//!
//! # async fn example() -> Result<(), petstore_client::ApiError> {
//! let client = ApiClient::new("https://petstore.swagger.io/v2")?;
//!
//! let pets = client.pet().find_pets_by_status(&["available"]).await?;
//! println!("Found {} pets", pets.len());
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod request;
pub mod types;

pub use client::ApiClient;
pub use request::{ApiRequest, FilePart, Json, NoContent, ResponseType, Text};
pub use types::*;
