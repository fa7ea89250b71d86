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

//! Authorization gate that guards every API of the service.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use customers_core::rest::{RestError, get_unique_header};
use log::debug;
use std::sync::Arc;

/// Message returned to callers that fail authorization.
const UNAUTHORIZED_STATUS: &str = "Unauthorized";

/// Decides whether the raw value of an `Authorization` header grants access to the service.
pub trait CredentialVerifier {
    /// Returns true if `credential` is acceptable.
    fn verify(&self, credential: &[u8]) -> bool;
}

/// A verifier that accepts a single static secret, compared byte by byte.
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Creates a verifier that only accepts `secret`.
    pub fn new<S: Into<Vec<u8>>>(secret: S) -> Self {
        Self(secret.into())
    }
}

impl CredentialVerifier for SharedSecret {
    fn verify(&self, credential: &[u8]) -> bool {
        self.0 == credential
    }
}

/// Middleware that rejects any request whose `Authorization` header is not accepted by `verifier`.
///
/// Requests without the header, or with more than one instance of it, are rejected without
/// consulting the verifier.
pub(crate) async fn authorize(
    State(verifier): State<Arc<dyn CredentialVerifier + Send + Sync>>,
    request: Request,
    next: Next,
) -> Response {
    let credential = match get_unique_header(request.headers(), &AUTHORIZATION) {
        Ok(Some(value)) => value.as_bytes(),
        Ok(None) => {
            debug!("Rejecting {} {}: no credentials", request.method(), request.uri());
            return RestError::Unauthorized(UNAUTHORIZED_STATUS.to_owned()).into_response();
        }
        Err(e) => {
            debug!("Rejecting {} {}: {}", request.method(), request.uri(), e);
            return RestError::Unauthorized(UNAUTHORIZED_STATUS.to_owned()).into_response();
        }
    };

    if !verifier.verify(credential) {
        debug!("Rejecting {} {}: invalid credentials", request.method(), request.uri());
        return RestError::Unauthorized(UNAUTHORIZED_STATUS.to_owned()).into_response();
    }

    next.run(request).await
}
