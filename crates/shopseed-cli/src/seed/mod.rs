//! The seed run: admin bootstrap followed by the catalog pipeline.
//!
//! The catalog pipeline has two phases. Staging scans the asset tree,
//! normalizes alias categories in the store and tops every product line up to
//! its target, accumulating new products in memory. The write phase then
//! inserts whatever was staged. A staging failure is logged and does not stop
//! the write phase; the run still reports the failure afterwards so the
//! process exits non-zero. Re-running is always safe.

mod admin;
mod normalize;
mod report;
mod write;

use std::path::Path;

use anyhow::Context;
use rand::Rng;
use shopseed_core::{
    builtin_plans, reconcile_category, scan_inventory, sweep_general, validate_category_plans,
    AppConfig, AssetSource, CategoryPlan, ReconcileOutcome, StagedProducts,
};
use shopseed_db::{ProductStore, UserStore};

pub(crate) use admin::AdminOutcome;
pub(crate) use report::print_report;
pub(crate) use write::WriteSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SeedOptions {
    pub(crate) skip_admin: bool,
    pub(crate) skip_catalog: bool,
}

/// Inputs of the catalog pipeline.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CatalogSettings<'a> {
    pub(crate) root: &'a Path,
    pub(crate) base_url: &'a str,
    pub(crate) sweep_cap: usize,
    pub(crate) plans: &'a [CategoryPlan],
}

impl<'a> CatalogSettings<'a> {
    pub(crate) fn from_config(config: &'a AppConfig) -> Self {
        Self {
            root: &config.assets_dir,
            base_url: &config.server_domain,
            sweep_cap: config.general_sweep_cap,
            plans: builtin_plans(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CatalogSummary {
    pub(crate) staged: StagedProducts,
    pub(crate) swept: usize,
    pub(crate) written: WriteSummary,
    pub(crate) root_missing: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct StageReport {
    swept: usize,
    root_missing: bool,
}

/// Full seed run against `store`.
///
/// # Errors
///
/// Returns an error if the category table is inconsistent, the admin
/// bootstrap fails, or the catalog pipeline fails in either phase.
pub(crate) async fn run_seed<S, A, R>(
    store: &S,
    assets: &A,
    config: &AppConfig,
    options: SeedOptions,
    rng: &mut R,
) -> anyhow::Result<()>
where
    S: ProductStore + UserStore,
    A: AssetSource,
    R: Rng,
{
    let settings = CatalogSettings::from_config(config);
    validate_category_plans(settings.plans)?;

    if options.skip_admin {
        tracing::info!("admin bootstrap skipped");
    } else {
        let outcome = admin::bootstrap_admin(store, &config.admin, &config.server_domain)
            .await
            .context("admin bootstrap failed")?;
        match outcome {
            AdminOutcome::Created { id } => {
                println!("admin user created: {} (id {id})", config.admin.email);
            }
            AdminOutcome::AvatarBackfilled => {
                println!("admin user exists: {} (avatar set)", config.admin.email);
            }
            AdminOutcome::AlreadyPresent => {
                println!("admin user exists: {}", config.admin.email);
            }
        }
    }

    if options.skip_catalog {
        tracing::info!("catalog seeding skipped");
        return Ok(());
    }

    let summary = run_catalog(store, assets, &settings, rng).await?;
    if !summary.root_missing {
        println!(
            "seeded catalog: {} staged ({} general), {} inserted, {} already present",
            summary.staged.len(),
            summary.swept,
            summary.written.inserted,
            summary.written.already_present
        );
        print_report(store, settings.plans).await?;
    }

    Ok(())
}

/// Stage the catalog and write it to `store`.
///
/// # Errors
///
/// Returns the write error if the write phase fails, otherwise the staging
/// error if staging stopped early. In the latter case everything staged
/// before the failure has been written.
pub(crate) async fn run_catalog<S, A, R>(
    store: &S,
    assets: &A,
    settings: &CatalogSettings<'_>,
    rng: &mut R,
) -> anyhow::Result<CatalogSummary>
where
    S: ProductStore,
    A: AssetSource,
    R: Rng,
{
    let mut staged = StagedProducts::new();
    let staging = stage_catalog(store, assets, settings, &mut staged, rng).await;
    if let Err(e) = &staging {
        tracing::error!(
            error = %format!("{e:#}"),
            staged = staged.len(),
            "catalog staging failed; writing products staged so far"
        );
    }

    let written = write::write_staged(store, &staged)
        .await
        .context("failed to write staged products")?;
    tracing::info!(
        inserted = written.inserted,
        already_present = written.already_present,
        "wrote staged products"
    );

    let report = staging?;
    Ok(CatalogSummary {
        staged,
        swept: report.swept,
        written,
        root_missing: report.root_missing,
    })
}

async fn stage_catalog<S, A, R>(
    store: &S,
    assets: &A,
    settings: &CatalogSettings<'_>,
    staged: &mut StagedProducts,
    rng: &mut R,
) -> anyhow::Result<StageReport>
where
    S: ProductStore,
    A: AssetSource,
    R: Rng,
{
    if !assets.exists(settings.root) {
        tracing::warn!(
            root = %settings.root.display(),
            "asset directory not found; skipping catalog seeding"
        );
        return Ok(StageReport {
            swept: 0,
            root_missing: true,
        });
    }

    let inventory = scan_inventory(assets, settings.root)
        .with_context(|| format!("failed to scan {}", settings.root.display()))?;
    tracing::info!(
        directories = inventory.directories().count(),
        files = inventory.file_count(),
        "scanned asset inventory"
    );

    let swept = sweep_general(
        &inventory,
        settings.plans,
        settings.sweep_cap,
        staged,
        settings.base_url,
        rng,
    );
    if swept > 0 {
        tracing::info!(swept, cap = settings.sweep_cap, "staged general sample products");
    }

    for plan in settings.plans {
        normalize::normalize_category(store, plan)
            .await
            .with_context(|| format!("failed to normalize category '{}'", plan.canonical))?;

        let Some(dir) = inventory.resolve(plan.source_dirs) else {
            tracing::warn!(
                category = plan.canonical,
                candidates = ?plan.source_dirs,
                "no asset folder for category; skipping"
            );
            continue;
        };

        let in_db = store
            .count_in_categories(&[plan.canonical])
            .await
            .with_context(|| format!("failed to count category '{}'", plan.canonical))?;
        tracing::info!(
            category = plan.canonical,
            dir,
            in_db,
            queued = staged.count_in_category(plan.canonical),
            target = plan.target,
            "category folder detected"
        );

        let outcome = reconcile_category(
            plan,
            dir,
            inventory.files(dir),
            in_db,
            staged,
            settings.base_url,
            rng,
        );
        log_outcome(plan, dir, outcome);
    }

    Ok(StageReport {
        swept,
        root_missing: false,
    })
}

fn log_outcome(plan: &CategoryPlan, dir: &str, outcome: ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::AlreadySatisfied { existing } => {
            tracing::info!(category = plan.canonical, existing, "category already at target");
        }
        ReconcileOutcome::NoImages { existing, needed } => {
            tracing::warn!(
                category = plan.canonical,
                dir,
                existing,
                needed,
                "no images in folder; cannot generate products"
            );
        }
        ReconcileOutcome::Staged {
            existing,
            added,
            duplicates,
        } => {
            tracing::info!(category = plan.canonical, existing, added, "staged products");
            if duplicates > 0 {
                tracing::warn!(
                    category = plan.canonical,
                    duplicates,
                    "generated names already staged; dropped"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
