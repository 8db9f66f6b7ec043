//! Async Rust client library for the Zentral REST API.
//!
//! Zentral manages Apple and cross-platform endpoints: MDM, inventory,
//! osquery, Santa, Munki and more. This crate provides the shared HTTP
//! plumbing (base URL resolution, token authentication, JSON encoding,
//! list-option query strings, error translation) and a generic CRUD
//! service reused by every resource.
//!
//! # Modules
//!
//! - [`client`]: `Client`: request building and execution.
//! - [`context`]: Cancellation and deadlines for in-flight calls.
//! - [`error`]: Typed error hierarchy (`Error`, `ArgError`, `ApiError`).
//! - [`options`]: Query-string encoding of list options.
//! - [`resource`]: The generic `Service` and the `Resource` trait.
//! - [`timestamp`]: The API's fixed date-time wire format.
//! - [`config`]: File and environment configuration.
//! - [`inventory`], [`mdm`], [`osquery`], [`santa`]: Resource types.
//!
//! # Quick Start
//!
//! ```ignore
//! use zentral_client::client::Client;
//! use zentral_client::context::Context;
//!
//! let client = Client::new(None, "https://zentral.example.com/api/", "token")?;
//! let ctx = Context::background();
//! let (tag, _resp) = client.tags().get_by_name(&ctx, "VIP").await?;
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod inventory;
pub mod mdm;
pub mod options;
pub mod osquery;
pub mod resource;
pub mod santa;
pub mod timestamp;

pub use client::{Client, Response};
pub use context::Context;
pub use error::{ApiError, ArgError, Error, Result};
