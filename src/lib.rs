#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else, clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod data;
pub mod error;
pub mod maud_conveniences;
pub mod registry;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Loads `.env` (if any) and installs the global `tracing` subscriber.
pub fn init_environment() {
    let dotenv_result = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv_result {
        warn!(?e, "No .env file loaded, using the process environment");
    }
}
