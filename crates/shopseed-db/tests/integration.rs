//! Offline tests for shopseed-db pool configuration and the in-memory store.
//! These tests do not require a live database connection.

use std::path::PathBuf;

use shopseed_core::{AdminSettings, AppConfig, Environment, NewProduct};
use shopseed_db::{MemoryStore, PoolConfig, ProductStore};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        server_domain: "http://localhost:8080".to_string(),
        assets_dir: PathBuf::from("./assets"),
        general_sweep_cap: 200,
        admin: AdminSettings {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password: "pw".to_string(),
            avatar_asset: "watches/a.png".to_string(),
        },
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn memory_store_round_trips_through_product_rows() {
    let product = NewProduct {
        product_name: "Redmi 12 3".to_string(),
        brand_name: "Mobiles".to_string(),
        category: "mobiles".to_string(),
        product_image: vec!["http://localhost:8080/images/mobile/Redmi_12.png".to_string()],
        description: "Sample mobiles - Redmi 12 3".to_string(),
        price: 20_000,
        selling_price: 15_000,
    };
    let store = MemoryStore::with_products([product.clone()]);

    let row = store
        .find_product_by_name("Redmi 12 3")
        .await
        .unwrap()
        .expect("seeded product should be found");

    assert_eq!(row.to_new_product(), product);
    assert!(store.find_product_by_name("missing").await.unwrap().is_none());
}
