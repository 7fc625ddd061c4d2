use std::collections::HashSet;
use std::path::PathBuf;

use rand::{rngs::StdRng, SeedableRng};
use shopseed_core::{AdminSettings, Environment, MemoryAssetSource, NewProduct};
use shopseed_db::{FailPoint, MemoryStore};

use super::*;

const ROOT: &str = "/assets";

fn config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        server_domain: "http://localhost:8080".to_string(),
        assets_dir: PathBuf::from(ROOT),
        general_sweep_cap: 200,
        admin: AdminSettings {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password: "Admin123!".to_string(),
            avatar_asset: "watches/boAt Wave Style Call 1.webp".to_string(),
        },
        db_max_connections: 5,
        db_min_connections: 1,
        db_acquire_timeout_secs: 10,
    }
}

fn images(stem: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{stem}_{i}.png")).collect()
}

fn full_assets() -> MemoryAssetSource {
    MemoryAssetSource::new(ROOT)
        .with_dir("watches", images("Casio", 3))
        .with_dir("mobile", images("Redmi", 4))
        .with_dir("mice", images("Logitech", 2))
        .with_dir("TV", images("Sony_Bravia", 2))
        .with_dir("speakers", images("jbl", 1))
        .with_dir("refrigerator", images("lg", 1))
        .with_dir("trimmers", images("philips", 1))
        .with_dir("earphones", images("boAt-Rockerz", 5))
        .with_root_file("README.md")
}

fn product(name: &str, category: &str) -> NewProduct {
    NewProduct {
        product_name: name.to_string(),
        brand_name: "Legacy".to_string(),
        category: category.to_string(),
        product_image: vec![format!("http://localhost:8080/images/legacy/{name}.png")],
        description: format!("Legacy {name}"),
        price: 10_000,
        selling_price: 7_000,
    }
}

async fn count(store: &MemoryStore, category: &str) -> usize {
    store.count_in_categories(&[category]).await.unwrap()
}

async fn catalog(
    store: &MemoryStore,
    assets: &MemoryAssetSource,
    seed: u64,
) -> anyhow::Result<CatalogSummary> {
    let config = config();
    let settings = CatalogSettings::from_config(&config);
    run_catalog(store, assets, &settings, &mut StdRng::seed_from_u64(seed)).await
}

#[tokio::test]
async fn every_plan_reaches_its_target() {
    let store = MemoryStore::new();

    let summary = catalog(&store, &full_assets(), 1).await.unwrap();

    for plan in builtin_plans() {
        assert_eq!(count(&store, plan.canonical).await, plan.target, "{}", plan.canonical);
    }
    assert_eq!(count(&store, "earphones").await, 5);
    assert_eq!(summary.swept, 5);
    assert_eq!(summary.written.inserted, 380);
    assert_eq!(store.count_products().await.unwrap(), 380);
}

#[tokio::test]
async fn second_run_leaves_store_unchanged() {
    let store = MemoryStore::new();
    let assets = full_assets();
    catalog(&store, &assets, 1).await.unwrap();
    let before = store.products();
    let writes = store.write_count();

    let summary = catalog(&store, &assets, 2).await.unwrap();

    assert_eq!(summary.written.inserted, 0);
    assert_eq!(summary.written.already_present, 5);
    assert_eq!(store.write_count(), writes);
    assert_eq!(store.products(), before);
}

#[tokio::test]
async fn staged_names_are_unique() {
    let store = MemoryStore::new();

    let summary = catalog(&store, &full_assets(), 3).await.unwrap();

    let names: HashSet<&str> = summary
        .staged
        .iter()
        .map(|p| p.product_name.as_str())
        .collect();
    assert_eq!(names.len(), summary.staged.len());
}

#[tokio::test]
async fn alias_records_are_folded_into_canonical_category() {
    let store = MemoryStore::with_products([
        product("Old TV A", "tv"),
        product("Old TV B", "tv"),
        product("Old TV C", "tv"),
        product("Old TV D", "Television"),
        product("Old TV E", "Television"),
    ]);
    let assets = MemoryAssetSource::new(ROOT).with_dir("watches", images("Casio", 1));

    catalog(&store, &assets, 4).await.unwrap();

    assert_eq!(count(&store, "tv").await, 0);
    assert_eq!(count(&store, "Television").await, 0);
    assert_eq!(count(&store, "Televisions").await, 5);
}

#[tokio::test]
async fn top_up_counts_normalized_records() {
    let store = MemoryStore::with_products([
        product("Old TV A", "tv"),
        product("Old TV B", "tv"),
        product("Old TV C", "tv"),
        product("Old TV D", "Television"),
        product("Old TV E", "Television"),
    ]);

    catalog(&store, &full_assets(), 5).await.unwrap();

    assert_eq!(count(&store, "Televisions").await, 50);
    assert!(store
        .find_product_by_name("Sony Bravia 2 7")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_product_by_name("Sony Bravia 1 50")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn partially_filled_category_continues_numbering() {
    let store = MemoryStore::with_products((1..=48).map(|i| product(&format!("m{i}"), "Mouse")));
    let assets = MemoryAssetSource::new(ROOT).with_dir("mouse", ["a.png", "b.png"]);

    let summary = catalog(&store, &assets, 6).await.unwrap();

    assert_eq!(summary.written.inserted, 2);
    let a = store.find_product_by_name("a 49").await.unwrap().unwrap();
    let b = store.find_product_by_name("b 50").await.unwrap().unwrap();
    assert_eq!(a.product_image, vec!["http://localhost:8080/images/mouse/a.png"]);
    assert_eq!(b.category, "Mouse");
}

#[tokio::test]
async fn image_urls_point_at_the_folder_found() {
    let store = MemoryStore::new();

    catalog(&store, &full_assets(), 7).await.unwrap();

    let phone = store.find_product_by_name("Redmi 1 1").await.unwrap().unwrap();
    assert_eq!(phone.category, "mobiles");
    assert_eq!(
        phone.product_image,
        vec!["http://localhost:8080/images/mobile/Redmi_1.png"]
    );
}

#[tokio::test]
async fn plans_without_a_folder_are_skipped() {
    let store = MemoryStore::new();
    let assets = MemoryAssetSource::new(ROOT).with_dir("watches", images("Casio", 2));

    let summary = catalog(&store, &assets, 8).await.unwrap();

    assert_eq!(summary.staged.len(), 50);
    assert_eq!(count(&store, "watches").await, 50);
    assert_eq!(count(&store, "mobiles").await, 0);
}

#[tokio::test]
async fn empty_folder_stages_nothing_for_that_plan() {
    let store = MemoryStore::new();
    let assets = MemoryAssetSource::new(ROOT)
        .with_dir("watches", Vec::<String>::new())
        .with_dir("trimmers", images("philips", 1));

    catalog(&store, &assets, 9).await.unwrap();

    assert_eq!(count(&store, "watches").await, 0);
    assert_eq!(count(&store, "Trimmers").await, 25);
}

#[tokio::test]
async fn general_sweep_respects_cap() {
    let store = MemoryStore::new();
    let mut config = config();
    config.general_sweep_cap = 3;
    let settings = CatalogSettings::from_config(&config);

    let summary = run_catalog(
        &store,
        &full_assets(),
        &settings,
        &mut StdRng::seed_from_u64(10),
    )
    .await
    .unwrap();

    assert_eq!(summary.swept, 3);
    assert_eq!(count(&store, "earphones").await, 3);
    assert_eq!(count(&store, "watches").await, 50);
}

#[tokio::test]
async fn staging_failure_still_writes_earlier_products() {
    let store = MemoryStore::with_products([product("Old TV A", "tv")]);
    store.fail_on(FailPoint::Rewrite);

    let result = catalog(&store, &full_assets(), 11).await;

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Televisions"));
    assert_eq!(count(&store, "watches").await, 50);
    assert_eq!(count(&store, "mobiles").await, 100);
    assert_eq!(count(&store, "Mouse").await, 50);
    assert_eq!(count(&store, "earphones").await, 5);
    assert_eq!(count(&store, "tv").await, 1);
    assert_eq!(count(&store, "Bluetooth Speakers").await, 0);
}

#[tokio::test]
async fn unreadable_folder_fails_the_run() {
    let store = MemoryStore::new();
    let assets = full_assets().with_unreadable_dir("broken");

    let result = catalog(&store, &assets, 12).await;

    assert!(result.is_err());
    assert_eq!(store.count_products().await.unwrap(), 0);
}

#[tokio::test]
async fn write_failure_is_fatal() {
    let store = MemoryStore::new();
    store.fail_on(FailPoint::InsertProduct);

    let err = catalog(&store, &full_assets(), 13).await.unwrap_err();

    assert!(format!("{err:#}").contains("failed to write staged products"));
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn missing_asset_root_still_bootstraps_admin() {
    let store = MemoryStore::new();
    let assets = MemoryAssetSource::new("/somewhere/else");

    run_seed(
        &store,
        &assets,
        &config(),
        SeedOptions::default(),
        &mut StdRng::seed_from_u64(14),
    )
    .await
    .unwrap();

    assert_eq!(store.users().len(), 1);
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn skip_flags_limit_the_run() {
    let store = MemoryStore::new();
    let assets = full_assets();
    let mut rng = StdRng::seed_from_u64(15);

    run_seed(
        &store,
        &assets,
        &config(),
        SeedOptions {
            skip_admin: false,
            skip_catalog: true,
        },
        &mut rng,
    )
    .await
    .unwrap();
    assert_eq!(store.users().len(), 1);
    assert!(store.products().is_empty());

    let fresh = MemoryStore::new();
    run_seed(
        &fresh,
        &assets,
        &config(),
        SeedOptions {
            skip_admin: true,
            skip_catalog: false,
        },
        &mut rng,
    )
    .await
    .unwrap();
    assert!(fresh.users().is_empty());
    assert_eq!(fresh.count_products().await.unwrap(), 380);
}

#[tokio::test]
async fn admin_failure_stops_before_catalog() {
    let store = MemoryStore::new();
    store.fail_on(FailPoint::FindUser);

    let err = run_seed(
        &store,
        &full_assets(),
        &config(),
        SeedOptions::default(),
        &mut StdRng::seed_from_u64(16),
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("admin bootstrap failed"));
    assert!(store.products().is_empty());
}
