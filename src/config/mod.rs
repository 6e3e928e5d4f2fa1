mod app_config;
mod aws;

pub use app_config::{
    AppConfig, CorsConfig, DatabaseConfig, EmailConfig, Environment, ServerConfig, StorageConfig,
};
pub use aws::*;
