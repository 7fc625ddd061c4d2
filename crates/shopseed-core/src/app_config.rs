use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for the singleton admin account created by the bootstrap step.
#[derive(Clone)]
pub struct AdminSettings {
    pub email: String,
    pub name: String,
    pub password: String,
    /// Default avatar as `<directory>/<file name>` under the asset root.
    pub avatar_asset: String,
}

impl std::fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSettings")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[redacted]")
            .field("avatar_asset", &self.avatar_asset)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Public origin of the image server, without a trailing slash.
    pub server_domain: String,
    pub assets_dir: PathBuf,
    pub general_sweep_cap: usize,
    pub admin: AdminSettings,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("server_domain", &self.server_domain)
            .field("assets_dir", &self.assets_dir)
            .field("general_sweep_cap", &self.general_sweep_cap)
            .field("admin", &self.admin)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
