//! # API groups
//!
//! One façade per resource group, each in an async and a blocking form that
//! share the same request builders:
//!
//! - [`pet`] - [`AsyncPetApi`] / [`SyncPetApi`]
//! - [`user`] - [`AsyncUserApi`] / [`SyncUserApi`]
//! - [`blocking`] - the run-to-completion adapter used by the blocking forms
//!
//! The `*_request` functions in each module build the [`ApiRequest`](crate::client::ApiRequest)
//! for an operation without sending it.

pub mod blocking;
pub mod pet;
pub mod user;

pub use pet::{AsyncPetApi, SyncPetApi};
pub use user::{AsyncUserApi, SyncUserApi};
