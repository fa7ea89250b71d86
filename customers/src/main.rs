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

//! Entry point to the customers service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use customers::db::init_schema;
use customers::{SharedSecret, serve};
use customers_core::db::postgres::{PostgresDb, PostgresOptions};
use customers_core::db::{Db, DisconnectedDb};
use customers_core::env::get_optional_var;
use log::{error, info};
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Port to listen on when `CUSTOMERS_PORT` is not set.
const DEFAULT_PORT: u16 = 2019;

/// Credential to require when `CUSTOMERS_TOKEN` is not set.
const DEFAULT_TOKEN: &str = "token2019";

/// Connects to the database configured via `DATABASE_URL`.
///
/// Configuration problems are logged and yield a database that fails all operations so that
/// the service can still start.
fn connect_db() -> Arc<dyn Db + Send + Sync> {
    let result = PostgresOptions::from_env("DATABASE")
        .and_then(|opts| PostgresDb::connect(opts).map_err(|e| e.to_string()));
    match result {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Cannot connect to database: {}", e);
            Arc::new(DisconnectedDb::new(e))
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = get_optional_var::<u16>("CUSTOMERS", "PORT")
        .expect("Invalid port configuration")
        .unwrap_or(DEFAULT_PORT);
    let token = get_optional_var::<String>("CUSTOMERS", "TOKEN")
        .expect("Invalid token configuration")
        .unwrap_or_else(|| DEFAULT_TOKEN.to_owned());
    let addr = (Ipv4Addr::UNSPECIFIED, port);

    let db = connect_db();
    match db.ex().await {
        Ok(mut ex) => match init_schema(&mut ex).await {
            Ok(()) => info!("Database schema ready"),
            Err(e) => error!("Cannot create table: {}", e),
        },
        Err(e) => error!("Cannot create table: {}", e),
    }

    if let Err(e) = serve(addr, db.clone(), Arc::new(SharedSecret::new(token))).await {
        error!("Server failed: {}", e);
    }

    db.close().await;
}
