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

//! Database tests shared by all implementations.

use crate::db::*;
use crate::model::*;
use customers_core::db::{Db, DbError, Executor};

/// Sets `column` of the customer `id` to NULL, which the typed statements never do.
pub(crate) async fn set_null(ex: &mut Executor, id: CustomerId, column: &str) {
    let query_str = format!("UPDATE customers SET {} = NULL WHERE id = {}", column, id);
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            sqlx::query(&query_str).execute(&mut **ex).await.unwrap();
        }

        Executor::Sqlite(ex) => {
            sqlx::query(&query_str).execute(&mut **ex).await.unwrap();
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

async fn test_create_and_get(db: Box<dyn Db + Send + Sync>) {
    let customer = Customer::new("A", "a@x.com", "new");
    let id = create_customer(&mut db.ex().await.unwrap(), &customer).await.unwrap();
    assert!(id.as_i64() > 0);

    let stored = get_customer(&mut db.ex().await.unwrap(), id).await.unwrap();
    assert_eq!(customer.with_id(id), stored);

    db.close().await;
}

async fn test_create_ignores_id(db: Box<dyn Db + Send + Sync>) {
    let customer = Customer::new("A", "", "").with_id(CustomerId::new(999));
    let id = create_customer(&mut db.ex().await.unwrap(), &customer).await.unwrap();
    assert_ne!(CustomerId::new(999), id);

    assert_eq!(
        DbError::NotFound,
        get_customer(&mut db.ex().await.unwrap(), CustomerId::new(999)).await.unwrap_err()
    );

    db.close().await;
}

async fn test_create_assigns_unique_ids(db: Box<dyn Db + Send + Sync>) {
    let customer = Customer::new("same", "same", "same");
    let id1 = create_customer(&mut db.ex().await.unwrap(), &customer).await.unwrap();
    let id2 = create_customer(&mut db.ex().await.unwrap(), &customer).await.unwrap();
    assert_ne!(id1, id2);

    db.close().await;
}

async fn test_get_customer_not_found(db: Box<dyn Db + Send + Sync>) {
    assert_eq!(
        DbError::NotFound,
        get_customer(&mut db.ex().await.unwrap(), CustomerId::new(1)).await.unwrap_err()
    );

    db.close().await;
}

async fn test_get_customer_null_column(db: Box<dyn Db + Send + Sync>) {
    let id = create_customer(&mut db.ex().await.unwrap(), &Customer::new("A", "a@x.com", "new"))
        .await
        .unwrap();
    set_null(&mut db.ex().await.unwrap(), id, "email").await;

    assert_eq!(
        DbError::DataIntegrityError("Column email is NULL".to_owned()),
        get_customer(&mut db.ex().await.unwrap(), id).await.unwrap_err()
    );

    db.close().await;
}

async fn test_get_customers_null_column_discards_all(db: Box<dyn Db + Send + Sync>) {
    for name in ["A", "B", "C"] {
        create_customer(&mut db.ex().await.unwrap(), &Customer::new(name, "", ""))
            .await
            .unwrap();
    }
    let id = create_customer(&mut db.ex().await.unwrap(), &Customer::new("D", "", ""))
        .await
        .unwrap();
    set_null(&mut db.ex().await.unwrap(), id, "status").await;

    assert_eq!(
        DbError::DataIntegrityError("Column status is NULL".to_owned()),
        get_customers(&mut db.ex().await.unwrap()).await.unwrap_err()
    );

    db.close().await;
}

async fn test_get_customers(db: Box<dyn Db + Send + Sync>) {
    assert!(get_customers(&mut db.ex().await.unwrap()).await.unwrap().is_empty());

    let mut exp = vec![];
    for name in ["first", "second", "third"] {
        let customer = Customer::new(name, format!("{}@example.com", name), "active");
        let id = create_customer(&mut db.ex().await.unwrap(), &customer).await.unwrap();
        exp.push(customer.with_id(id));
    }

    let mut customers = get_customers(&mut db.ex().await.unwrap()).await.unwrap();
    customers.sort_by_key(|c| c.id().as_i64());
    assert_eq!(exp, customers);

    db.close().await;
}

async fn test_update_customer(db: Box<dyn Db + Send + Sync>) {
    let id = create_customer(&mut db.ex().await.unwrap(), &Customer::new("A", "a@x.com", "new"))
        .await
        .unwrap();
    let other = create_customer(&mut db.ex().await.unwrap(), &Customer::new("Z", "z", "z"))
        .await
        .unwrap();

    let replacement = Customer::new("B", "", "closed").with_id(CustomerId::new(12345));
    update_customer(&mut db.ex().await.unwrap(), id, &replacement).await.unwrap();

    assert_eq!(
        Customer::new("B", "", "closed").with_id(id),
        get_customer(&mut db.ex().await.unwrap(), id).await.unwrap()
    );
    assert_eq!(
        Customer::new("Z", "z", "z").with_id(other),
        get_customer(&mut db.ex().await.unwrap(), other).await.unwrap()
    );

    db.close().await;
}

async fn test_update_customer_missing_is_noop(db: Box<dyn Db + Send + Sync>) {
    let replacement = Customer::new("B", "b@x.com", "closed");
    update_customer(&mut db.ex().await.unwrap(), CustomerId::new(8), &replacement).await.unwrap();

    assert!(get_customers(&mut db.ex().await.unwrap()).await.unwrap().is_empty());

    db.close().await;
}

async fn test_delete_customer(db: Box<dyn Db + Send + Sync>) {
    let id1 = create_customer(&mut db.ex().await.unwrap(), &Customer::new("A", "", ""))
        .await
        .unwrap();
    let id2 = create_customer(&mut db.ex().await.unwrap(), &Customer::new("B", "", ""))
        .await
        .unwrap();

    delete_customer(&mut db.ex().await.unwrap(), id1).await.unwrap();

    assert_eq!(
        DbError::NotFound,
        get_customer(&mut db.ex().await.unwrap(), id1).await.unwrap_err()
    );
    let customers = get_customers(&mut db.ex().await.unwrap()).await.unwrap();
    assert_eq!(vec![Customer::new("B", "", "").with_id(id2)], customers);

    db.close().await;
}

async fn test_delete_customer_missing_is_noop(db: Box<dyn Db + Send + Sync>) {
    delete_customer(&mut db.ex().await.unwrap(), CustomerId::new(3)).await.unwrap();

    db.close().await;
}

async fn test_init_schema_is_idempotent(db: Box<dyn Db + Send + Sync>) {
    let id = create_customer(&mut db.ex().await.unwrap(), &Customer::new("A", "", ""))
        .await
        .unwrap();

    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    assert_eq!(
        Customer::new("A", "", "").with_id(id),
        get_customer(&mut db.ex().await.unwrap(), id).await.unwrap()
    );

    db.close().await;
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta])? ) => {
        customers_core::db::testutils::generate_tests!(
            $( #[$extra], )?
            $setup,
            $crate::db::tests,
            test_create_and_get,
            test_create_ignores_id,
            test_create_assigns_unique_ids,
            test_get_customer_not_found,
            test_get_customer_null_column,
            test_get_customers_null_column_discards_all,
            test_get_customers,
            test_update_customer,
            test_update_customer_missing_is_noop,
            test_delete_customer,
            test_delete_customer_missing_is_noop,
            test_init_schema_is_idempotent
        );
    }
];

mod sqlite {
    use super::*;
    use customers_core::db::sqlite::testutils::setup;

    async fn setup_with_schema() -> Box<dyn Db + Send + Sync> {
        let db = setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Box::from(db)
    }

    generate_db_tests!(setup_with_schema().await);
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use customers_core::db::postgres::testutils::setup;

    async fn setup_with_schema() -> Box<dyn Db + Send + Sync> {
        let db = setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Box::from(db)
    }

    generate_db_tests!(
        setup_with_schema().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}
