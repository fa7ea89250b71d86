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

//! Business logic for the service.

use customers_core::db::{Db, DbError};
use customers_core::driver::DriverError;
use std::fmt;
use std::sync::Arc;

mod customer;
mod customers;
#[cfg(test)]
mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot" so these operations consume the
/// driver in an attempt to minimize the possibility of executing two operations.  No operation
/// runs inside a transaction.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Returns a function that converts a database error into a driver error whose message starts
/// with `context`.
fn db_error<C: fmt::Display>(context: C) -> impl FnOnce(DbError) -> DriverError {
    move |e| DriverError::from(e).context(context)
}
