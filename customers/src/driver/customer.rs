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

//! Operations on one customer.
//!
//! Updates and deletions first fetch the customer to check that it exists and only then issue
//! the mutation.  The two steps do not run in a transaction so a concurrent request may delete
//! the customer in between, in which case the mutation silently affects no rows.

use crate::db;
use crate::driver::{Driver, db_error};
use crate::model::{Customer, CustomerId};
use customers_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Gets the customer identified by `id`.
    pub(crate) async fn get_customer(self, id: CustomerId) -> DriverResult<Customer> {
        let context = format!("Cannot get customer {}", id);
        let mut ex = self.db.ex().await.map_err(db_error(&context))?;
        let customer = db::get_customer(&mut ex, id).await.map_err(db_error(&context))?;
        Ok(customer)
    }

    /// Replaces the customer identified by `id` with the JSON representation in `body`.
    ///
    /// Returns the customer as parsed from `body`, which means that the returned identifier is
    /// whatever the caller provided and not necessarily `id`.
    pub(crate) async fn update_customer(
        self,
        id: CustomerId,
        body: &[u8],
    ) -> DriverResult<Customer> {
        let context = format!("Cannot update customer {}", id);
        let mut ex = self.db.ex().await.map_err(db_error(&context))?;

        // Existence check only.  The fetched record is not merged into the update.
        db::get_customer(&mut ex, id).await.map_err(db_error(&context))?;

        let customer =
            Customer::from_json(body).map_err(|e| DriverError::InvalidInput(e.to_string()))?;

        db::update_customer(&mut ex, id, &customer).await.map_err(db_error(&context))?;
        Ok(customer)
    }

    /// Deletes the customer identified by `id`.
    pub(crate) async fn delete_customer(self, id: CustomerId) -> DriverResult<()> {
        let context = format!("Cannot delete customer {}", id);
        let mut ex = self.db.ex().await.map_err(db_error(&context))?;

        // Existence check only.
        db::get_customer(&mut ex, id).await.map_err(db_error(&context))?;

        db::delete_customer(&mut ex, id).await.map_err(db_error(&context))?;
        Ok(())
    }
}
