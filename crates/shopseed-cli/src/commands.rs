//! Command handlers, called from `main` once config and tracing are set up.

use anyhow::Context;
use shopseed_core::{
    builtin_plans, scan_inventory, AppConfig, CategoryPlan, FsAssetSource, Inventory,
    StagedProducts,
};
use shopseed_db::{MemoryStore, PgStore, PoolConfig, ProductRow, UserStore};

use crate::seed::{self, CatalogSettings, SeedOptions};
use crate::DbCommands;

async fn connect(config: &AppConfig) -> anyhow::Result<PgStore> {
    let pool = shopseed_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
        .await
        .context("failed to connect to database")?;
    Ok(PgStore::new(pool))
}

/// Apply pending migrations, then run the seed against Postgres.
pub(crate) async fn run_seed_command(
    config: &AppConfig,
    options: SeedOptions,
) -> anyhow::Result<()> {
    let store = connect(config).await?;
    let applied = shopseed_db::run_migrations(store.pool()).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    seed::run_seed(
        &store,
        &FsAssetSource,
        config,
        options,
        &mut rand::rng(),
    )
    .await
}

/// Run the catalog pipeline against an in-memory copy of the stored
/// products and print what a real run would insert. Postgres is only read.
pub(crate) async fn run_dry_run(
    config: &AppConfig,
    skip_admin: bool,
    skip_catalog: bool,
) -> anyhow::Result<()> {
    let store = connect(config).await?;

    if !skip_admin {
        let user = store.find_user_by_email(&config.admin.email).await?;
        let action = match user {
            None => "would be created",
            Some(u) if !u.has_profile_pic() => "exists; avatar would be set",
            Some(_) => "exists; nothing to do",
        };
        println!("dry-run: admin user {}: {action}", config.admin.email);
    }
    if skip_catalog {
        return Ok(());
    }

    let rows = store.list_products().await?;
    let shadow = MemoryStore::with_products(rows.iter().map(ProductRow::to_new_product));
    let settings = CatalogSettings::from_config(config);

    let summary = seed::run_catalog(&shadow, &FsAssetSource, &settings, &mut rand::rng()).await?;
    if summary.root_missing {
        println!(
            "dry-run: asset directory {} not found; nothing to stage",
            config.assets_dir.display()
        );
        return Ok(());
    }

    print!("{}", render_staged(&summary.staged));
    println!(
        "dry-run: {} would be inserted, {} already present",
        summary.written.inserted, summary.written.already_present
    );
    seed::print_report(&shadow, settings.plans).await?;
    Ok(())
}

fn render_staged(staged: &StagedProducts) -> String {
    let mut out = String::new();
    for product in staged {
        out.push_str(&format!(
            "  [{}] {} ({} / {}) {}\n",
            product.category,
            product.product_name,
            product.selling_price,
            product.price,
            product.primary_image().unwrap_or("-"),
        ));
    }
    out
}

pub(crate) fn run_inventory(config: &AppConfig) -> anyhow::Result<()> {
    let inventory = scan_inventory(&FsAssetSource, &config.assets_dir)
        .with_context(|| format!("failed to scan {}", config.assets_dir.display()))?;
    if inventory.is_empty() {
        println!("no asset folders under {}", config.assets_dir.display());
        return Ok(());
    }
    print!("{}", render_inventory(&inventory, builtin_plans()));
    Ok(())
}

/// One line per asset folder with its image count and the category it feeds.
fn render_inventory(inventory: &Inventory, plans: &[CategoryPlan]) -> String {
    let mut out = String::new();
    for (dir, files) in inventory.directories() {
        let feeds = plans
            .iter()
            .find(|p| p.owns_directory(dir))
            .map_or("general", |p| p.canonical);
        out.push_str(&format!("  {dir:<20} {:>4} images -> {feeds}\n", files.len()));
    }
    out.push_str(&format!(
        "{} folders, {} images\n",
        inventory.directories().count(),
        inventory.file_count()
    ));
    out
}

pub(crate) async fn run_report(config: &AppConfig) -> anyhow::Result<()> {
    let store = connect(config).await?;
    seed::print_report(&store, builtin_plans()).await?;
    Ok(())
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let store = connect(config).await?;
    match command {
        DbCommands::Migrate => {
            let applied = shopseed_db::run_migrations(store.pool()).await?;
            println!("applied {applied} migrations");
        }
        DbCommands::Ping => {
            shopseed_db::ping(store.pool()).await?;
            println!("database reachable");
        }
    }
    Ok(())
}
