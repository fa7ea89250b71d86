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

//! Operations on the collection of customers.

use crate::db;
use crate::driver::{Driver, db_error};
use crate::model::Customer;
use customers_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Creates a new customer from its JSON representation in `body` and returns it with the
    /// identifier assigned by the database.  Any identifier in `body` is ignored.
    pub(crate) async fn create_customer(self, body: &[u8]) -> DriverResult<Customer> {
        let customer =
            Customer::from_json(body).map_err(|e| DriverError::InvalidInput(e.to_string()))?;

        let context = "Cannot insert customer";
        let mut ex = self.db.ex().await.map_err(db_error(context))?;
        let id = db::create_customer(&mut ex, &customer).await.map_err(db_error(context))?;
        Ok(customer.with_id(id))
    }

    /// Gets all customers.
    pub(crate) async fn get_customers(self) -> DriverResult<Vec<Customer>> {
        let context = "Cannot list customers";
        let mut ex = self.db.ex().await.map_err(db_error(context))?;
        let customers = db::get_customers(&mut ex).await.map_err(db_error(context))?;
        Ok(customers)
    }
}
