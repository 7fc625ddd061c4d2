use thiserror::Error;

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod inventory;
pub mod products;
pub mod reconcile;
pub mod urls;

pub use app_config::{AdminSettings, AppConfig, Environment};
pub use catalog::{builtin_plans, validate_category_plans, CategoryPlan, Naming};
pub use config::{load_app_config, load_app_config_from_env};
pub use inventory::{
    scan_inventory, AssetSource, FsAssetSource, Inventory, InventoryError, MemoryAssetSource,
};
pub use products::{NewProduct, NewUser, ADMIN_ROLE};
pub use reconcile::{reconcile_category, sweep_general, ReconcileOutcome, StagedProducts};
pub use urls::image_url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid category plan: {0}")]
    Validation(String),
}
