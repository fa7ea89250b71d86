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

//! API to create a new customer.

use crate::driver::Driver;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use customers_core::rest::RestError;

/// API handler.
///
/// The body is always interpreted as JSON regardless of its declared content type.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    body: Bytes,
) -> Result<(StatusCode, impl IntoResponse), RestError> {
    let customer = driver.create_customer(&body).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}
