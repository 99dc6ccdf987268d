use super::RequestsLoggingLevel;

/// Controls how much of an error reaches the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Environment {
    /// Error bodies carry the real message and a `stack` with the cause chain.
    Development,
    #[default]
    Production,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Path every API route is nested under, e.g. `/api/v1`.
    pub api_prefix: String,
    pub frontend_dir_path: Option<String>,
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3001,
            api_prefix: "/api/v1".to_string(),
            frontend_dir_path: None,
            environment: Environment::Production,
        }
    }
}
