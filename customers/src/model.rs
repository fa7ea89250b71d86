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

//! High-level data types.

use customers_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a customer as assigned by the database.
///
/// The value `0` is what clients get back when they submit a record without an identifier.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Creates a new identifier from its raw value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses an identifier as found in a request path.
    pub fn parse(raw: &str) -> ModelResult<Self> {
        match raw.parse::<i64>() {
            Ok(id) => Ok(Self(id)),
            Err(e) => Err(ModelError(format!("Invalid customer id '{}': {}", raw, e))),
        }
    }

    /// Returns the raw value of the identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Deserializes a string that may be `null` into an empty string.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A customer record.
///
/// All fields are free-form: there is no validation of the email address nor of the status.
#[derive(Clone, Debug, Default, Deserialize, Getters, PartialEq, Serialize)]
pub struct Customer {
    /// Database identifier.  Ignored on creation.
    #[serde(default)]
    id: CustomerId,

    /// Name of the customer.
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,

    /// Contact email address of the customer.
    #[serde(default, deserialize_with = "null_as_empty")]
    email: String,

    /// Opaque status of the customer.
    #[serde(default, deserialize_with = "null_as_empty")]
    status: String,
}

impl Customer {
    /// Creates a new customer without an assigned identifier.
    pub fn new<N, E, S>(name: N, email: E, status: S) -> Self
    where
        N: Into<String>,
        E: Into<String>,
        S: Into<String>,
    {
        Self {
            id: CustomerId::default(),
            name: name.into(),
            email: email.into(),
            status: status.into(),
        }
    }

    /// Replaces the identifier of the customer with `id`.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = id;
        self
    }

    /// Parses a customer from the raw JSON `body` of a request.
    ///
    /// The body must be a JSON object: the positional array form that serde would otherwise
    /// accept for structs is rejected.
    pub fn from_json(body: &[u8]) -> ModelResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ModelError(format!("Cannot parse customer: {}", e)))?;
        if !value.is_object() {
            return Err(ModelError("Cannot parse customer: expected a JSON object".to_owned()));
        }
        serde_json::from_value(value)
            .map_err(|e| ModelError(format!("Cannot parse customer: {}", e)))
    }
}
