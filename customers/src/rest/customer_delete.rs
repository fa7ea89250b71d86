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

//! API to delete an existing customer.

use crate::driver::Driver;
use crate::rest::parse_id;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use customers_core::rest::RestError;
use serde::Serialize;

/// Message returned on successful deletions.
const DELETED_MESSAGE: &str = "customer deleted";

/// Body of a successful response.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize, PartialEq))]
pub(crate) struct DeleteResponse {
    /// Confirmation message.
    message: String,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, RestError> {
    let id = parse_id(&id)?;
    driver.delete_customer(id).await?;
    Ok(Json(DeleteResponse { message: DELETED_MESSAGE.to_owned() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use customers_core::rest::testutils::*;
    use http::{Method, StatusCode};

    fn route<I: std::fmt::Display>(id: I) -> (Method, String) {
        (Method::DELETE, format!("/customers/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let id1 = context.insert("A", "", "").await;
        let id2 = context.insert("B", "", "").await;

        let response =
            context.request(route(id1)).send_empty().await.expect_json::<DeleteResponse>().await;
        assert_eq!(DeleteResponse { message: "customer deleted".to_owned() }, response);

        assert!(!context.exists(id1).await);
        assert!(context.exists(id2).await);
    }

    #[tokio::test]
    async fn test_get_after_delete_fails() {
        let context = TestContext::setup().await;

        let id = context.insert("A", "", "").await;

        context.request(route(id)).send_empty().await.verify();

        context
            .request((Method::GET, format!("/customers/{}", id)))
            .send_empty()
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Entity not found")
            .await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let id = context.insert("A", "", "").await;

        context
            .request(route(id.as_i64() + 1))
            .send_empty()
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Cannot delete customer [0-9]+: Entity not found")
            .await;

        assert_eq!(1, context.count().await);
    }

    #[tokio::test]
    async fn test_bad_id_is_internal_error() {
        let context = TestContext::setup().await;

        context
            .request(route("1.0"))
            .send_empty()
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Invalid customer id")
            .await;
    }

    #[tokio::test]
    async fn test_backend_error() {
        let context = TestContext::setup_disconnected();

        context
            .request(route(1))
            .send_empty()
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Cannot delete customer 1: Database error: Connection refused")
            .await;
    }
}
