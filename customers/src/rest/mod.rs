// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::CustomerId;
use axum::Router;
use axum::middleware;
use customers_core::rest::{RestError, RestResult};
use std::sync::Arc;

mod authz;
pub use authz::{CredentialVerifier, SharedSecret};
mod customer_delete;
mod customer_get;
mod customer_put;
mod customers_get;
mod customers_post;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
///
/// Every request, including those for paths that do not exist, must first pass the authorization
/// checks of `verifier`.
pub(crate) fn app(driver: Driver, verifier: Arc<dyn CredentialVerifier + Send + Sync>) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/customers", get(customers_get::handler).post(customers_post::handler))
        .route(
            "/customers/:id",
            get(customer_get::handler).put(customer_put::handler).delete(customer_delete::handler),
        )
        .with_state(driver)
        .layer(middleware::from_fn_with_state(verifier, authz::authorize))
}

/// Parses the customer identifier `raw` found in a request path.
///
/// Malformed identifiers are reported as internal errors, not as invalid requests.
fn parse_id(raw: &str) -> RestResult<CustomerId> {
    CustomerId::parse(raw).map_err(|e| RestError::InternalError(e.to_string()))
}
