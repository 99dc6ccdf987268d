mod album_routes;
mod artist_routes;
pub mod config;
pub mod error;
mod genre_routes;
mod http_layers;
pub mod server;
mod song_routes;
pub mod state;
mod stats_routes;

pub use config::{Environment, ServerConfig};
pub use error::ApiError;
pub use http_layers::*;
pub use server::run_server;
