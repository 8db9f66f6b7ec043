//! Generic CRUD service shared by every Zentral resource.
//!
//! Each REST collection (tags, Santa rules, MDM blueprints, ...) is
//! described by a type implementing [`Resource`]: its base path and the
//! shapes of its entity, request body and list filters. [`Service`] turns
//! that description into the usual operations:
//!
//! | Operation | HTTP |
//! |-----------|------|
//! | [`Service::list`] | `GET {base}[?options]` |
//! | [`Service::get_by_id`] | `GET {base}{id}/` |
//! | [`Service::get_by_name`] | `GET {base}?name=...`, first match |
//! | [`Service::create`] | `POST {base}` |
//! | [`Service::update`] | `PUT {base}{id}/` |
//! | [`Service::delete`] | `DELETE {base}{id}/` |
//!
//! Arguments are validated before any request is built, so an invalid ID
//! or blank name never reaches the network.

use std::marker::PhantomData;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::{ArgError, Result};
use crate::options::add_options;

/// A REST collection of the Zentral API.
pub trait Resource: DeserializeOwned {
    /// Body sent on create and update.
    type Request: Serialize;
    /// Query filters accepted by the list endpoint.
    type ListOptions: Serialize;

    /// Path of the collection relative to the API base URL, with a trailing
    /// slash (e.g. `inventory/tags/`).
    const BASE_PATH: &'static str;

    /// Human-readable resource name used in log lines.
    const KIND: &'static str;
}

/// A resource that can be looked up by name through a filtered list call.
pub trait NamedResource: Resource {
    /// List options selecting the items called `name`.
    fn name_filter(name: &str) -> Self::ListOptions;
}

/// CRUD operations for resource `R`, borrowing the shared [`Client`].
pub struct Service<'a, R> {
    client: &'a Client,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Service<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Service<'_, R> {}

impl<'a, R: Resource> Service<'a, R> {
    /// A service for `R` backed by `client`.
    pub fn new(client: &'a Client) -> Self {
        Service {
            client,
            _resource: PhantomData,
        }
    }

    /// Lists the collection, optionally filtered and paginated.
    pub async fn list(
        &self,
        ctx: &Context,
        opts: Option<&R::ListOptions>,
    ) -> Result<(Vec<R>, Response)> {
        let path = add_options(R::BASE_PATH, opts)?;
        debug!(kind = R::KIND, %path, "listing");
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.fetch(ctx, req).await
    }

    /// Retrieves one item by its numeric ID.
    ///
    /// # Errors
    ///
    /// `Error::Arg` if `id < 1`; a missing item is an `Error::Api` with
    /// status 404.
    pub async fn get_by_id(&self, ctx: &Context, id: i64) -> Result<(R, Response)> {
        let path = item_path(R::BASE_PATH, id)?;
        let req = self.client.new_request::<()>(Method::GET, &path, None)?;
        self.client.fetch(ctx, req).await
    }

    /// Creates an item and returns it as stored by the server.
    pub async fn create(&self, ctx: &Context, request: &R::Request) -> Result<(R, Response)> {
        debug!(kind = R::KIND, "creating");
        let req = self
            .client
            .new_request(Method::POST, R::BASE_PATH, Some(request))?;
        self.client.fetch(ctx, req).await
    }

    /// Replaces the item `id` and returns it as stored by the server.
    pub async fn update(
        &self,
        ctx: &Context,
        id: i64,
        request: &R::Request,
    ) -> Result<(R, Response)> {
        let path = item_path(R::BASE_PATH, id)?;
        debug!(kind = R::KIND, id, "updating");
        let req = self.client.new_request(Method::PUT, &path, Some(request))?;
        self.client.fetch(ctx, req).await
    }

    /// Deletes the item `id`. The server answers `204 No Content`.
    pub async fn delete(&self, ctx: &Context, id: i64) -> Result<Response> {
        let path = item_path(R::BASE_PATH, id)?;
        debug!(kind = R::KIND, id, "deleting");
        let req = self.client.new_request::<()>(Method::DELETE, &path, None)?;
        self.client.execute::<()>(ctx, req, None).await
    }
}

impl<R: NamedResource> Service<'_, R> {
    /// Looks an item up by name.
    ///
    /// There is no dedicated endpoint for this: the collection is listed
    /// with a `name` filter and the first match is returned. An empty list
    /// yields `Ok((None, response))`, not an error.
    ///
    /// # Errors
    ///
    /// `Error::Arg` if `name` is blank.
    pub async fn get_by_name(&self, ctx: &Context, name: &str) -> Result<(Option<R>, Response)> {
        if name.trim().is_empty() {
            return Err(ArgError::new("name", "must not be blank").into());
        }
        let filter = R::name_filter(name);
        let (items, response) = self.list(ctx, Some(&filter)).await?;
        Ok((items.into_iter().next(), response))
    }
}

/// Validates `id` and returns `{base}{id}/`.
fn item_path(base: &str, id: i64) -> Result<String> {
    if id < 1 {
        return Err(ArgError::new("id", "must be greater than or equal to 1").into());
    }
    Ok(format!("{base}{id}/"))
}
