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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::{CredentialVerifier, SharedSecret, app};
use axum::Router;
use axum::http::header::AUTHORIZATION;
use customers_core::db::sqlite::testutils::setup;
use customers_core::db::{Db, DisconnectedDb, Executor};
use customers_core::rest::testutils::OneShotBuilder;
use std::sync::Arc;

/// Credential accepted by the apps created by `TestContext`.
pub(crate) const TEST_TOKEN: &str = "test-token";

pub(crate) struct TestContext {
    db: Arc<dyn Db + Send + Sync>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        Self::setup_with_verifier(SharedSecret::new(TEST_TOKEN)).await
    }

    pub(crate) async fn setup_with_verifier<V>(verifier: V) -> Self
    where
        V: CredentialVerifier + Send + Sync + 'static,
    {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let app = app(Driver::new(db.clone()), Arc::new(verifier));
        Self { db, app }
    }

    /// Sets up an app whose database is unusable so that all operations fail.
    pub(crate) fn setup_disconnected() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        let db: Arc<dyn Db + Send + Sync> = Arc::new(DisconnectedDb::new("Connection refused"));
        let app = app(Driver::new(db.clone()), Arc::new(SharedSecret::new(TEST_TOKEN)));
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Starts a request against `route` that carries valid credentials.
    pub(crate) fn request<U: AsRef<str>>(&self, route: (http::Method, U)) -> OneShotBuilder {
        OneShotBuilder::new(self.app(), route).with_header(AUTHORIZATION, TEST_TOKEN)
    }

    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    pub(crate) async fn insert(&self, name: &str, email: &str, status: &str) -> CustomerId {
        db::create_customer(&mut self.ex().await, &Customer::new(name, email, status))
            .await
            .unwrap()
    }

    pub(crate) async fn get(&self, id: CustomerId) -> Customer {
        db::get_customer(&mut self.ex().await, id).await.unwrap()
    }

    pub(crate) async fn exists(&self, id: CustomerId) -> bool {
        db::get_customer(&mut self.ex().await, id).await.is_ok()
    }

    pub(crate) async fn set_null(&self, id: CustomerId, column: &str) {
        db::tests::set_null(&mut self.ex().await, id, column).await;
    }

    pub(crate) async fn count(&self) -> usize {
        db::get_customers(&mut self.ex().await).await.unwrap().len()
    }
}
