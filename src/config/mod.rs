mod file_config;

pub use file_config::FileConfig;

use crate::server::{Environment, RequestsLoggingLevel, ServerConfig};
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub api_prefix: String,
    pub frontend_dir_path: Option<String>,
    pub environment: Environment,
    pub read_pool_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            db_path: None,
            port: 3001,
            logging_level: RequestsLoggingLevel::Path,
            api_prefix: "/api/v1".to_string(),
            frontend_dir_path: None,
            environment: Environment::Production,
            read_pool_size: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub api_prefix: String,
    pub frontend_dir_path: Option<String>,
    pub environment: Environment,
    pub read_pool_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow!("db_path must be specified via --db-path, DATABASE_PATH or in config file")
            })?;

        // The file itself is created on first start, its directory must exist.
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let api_prefix = file.api_prefix.unwrap_or_else(|| cli.api_prefix.clone());
        if !api_prefix.is_empty() && !api_prefix.starts_with('/') {
            bail!("api_prefix must start with '/': {}", api_prefix);
        }

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let environment = match file.environment {
            Some(s) => parse_environment(&s)
                .ok_or_else(|| anyhow!("Unknown environment in config file: {}", s))?,
            None => cli.environment,
        };

        let read_pool_size = file.read_pool_size.unwrap_or(cli.read_pool_size);
        if read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        Ok(Self {
            db_path,
            port,
            logging_level,
            api_prefix,
            frontend_dir_path,
            environment,
            read_pool_size,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            api_prefix: self.api_prefix.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            environment: self.environment,
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_environment(s: &str) -> Option<Environment> {
    Environment::from_str(s, true).ok()
}
