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

//! Database abstraction in terms of the operations needed by the server.
//!
//! None of these operations verify how many rows they touched: updates and deletions of
//! identifiers that do not exist succeed silently.  Callers that care must check for existence
//! first.

use crate::model::{Customer, CustomerId};
use customers_core::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use customers_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use customers_core::db::sqlite;
use futures::TryStreamExt;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(test)]
pub(crate) mod tests;

/// Initializes the database schema.  This is idempotent.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Unwraps the value of a text `column` that must not be NULL.
fn not_null(column: &str, value: Option<String>) -> DbResult<String> {
    value.ok_or_else(|| DbError::DataIntegrityError(format!("Column {} is NULL", column)))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Customer {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: Option<String> = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let email: Option<String> = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let status: Option<String> = row.try_get("status").map_err(postgres::map_sqlx_error)?;

        let customer = Customer::new(
            not_null("name", name)?,
            not_null("email", email)?,
            not_null("status", status)?,
        );
        Ok(customer.with_id(CustomerId::new(i64::from(id))))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Customer {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: Option<String> = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let email: Option<String> = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let status: Option<String> = row.try_get("status").map_err(sqlite::map_sqlx_error)?;

        let customer = Customer::new(
            not_null("name", name)?,
            not_null("email", email)?,
            not_null("status", status)?,
        );
        Ok(customer.with_id(CustomerId::new(id)))
    }
}

/// Inserts a new `customer`, ignoring its identifier, and returns the identifier assigned by the
/// database.
pub(crate) async fn create_customer(
    ex: &mut Executor,
    customer: &Customer,
) -> DbResult<CustomerId> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO customers (name, email, status) VALUES ($1, $2, $3) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(customer.name())
                .bind(customer.email())
                .bind(customer.status())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
            Ok(CustomerId::new(i64::from(id)))
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                "INSERT INTO customers (name, email, status) VALUES (?, ?, ?) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(customer.name())
                .bind(customer.email())
                .bind(customer.status())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
            Ok(CustomerId::new(id))
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all customers in whichever order the database returns them.
///
/// A failure while reading any row discards all rows read so far.
pub(crate) async fn get_customers(ex: &mut Executor) -> DbResult<Vec<Customer>> {
    let mut customers = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email, status FROM customers";
            let mut rows = sqlx::query(query_str).fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                customers.push(Customer::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email, status FROM customers";
            let mut rows = sqlx::query(query_str).fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                customers.push(Customer::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(customers)
}

/// Gets the customer identified by `id`.
pub(crate) async fn get_customer(ex: &mut Executor, id: CustomerId) -> DbResult<Customer> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email, status FROM customers WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Customer::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email, status FROM customers WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Customer::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces all mutable fields of the customer identified by `id` with those in `customer`.
///
/// The identifier carried by `customer` is ignored.
pub(crate) async fn update_customer(
    ex: &mut Executor,
    id: CustomerId,
    customer: &Customer,
) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE customers SET name = $1, email = $2, status = $3 WHERE id = $4";
            sqlx::query(query_str)
                .bind(customer.name())
                .bind(customer.email())
                .bind(customer.status())
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE customers SET name = ?, email = ?, status = ? WHERE id = ?";
            sqlx::query(query_str)
                .bind(customer.name())
                .bind(customer.email())
                .bind(customer.status())
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}

/// Deletes the customer identified by `id`.
pub(crate) async fn delete_customer(ex: &mut Executor, id: CustomerId) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM customers WHERE id = $1";
            sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM customers WHERE id = ?";
            sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}
