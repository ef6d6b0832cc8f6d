//! Adds the eight sample students to whichever store the environment points at.

use student_registry::{
    config::RuntimeConfiguration,
    init_environment,
    seed::{SAMPLE_STUDENTS, seed},
    state::RegistryState,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_environment();

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let state = RegistryState::new(&config)
        .await
        .expect("unable to create state");

    let outcome = seed(state.store(), &SAMPLE_STUDENTS).await;
    state.sensible_shutdown().await;

    match outcome {
        Ok(report) => {
            info!(
                "Summary: {} created, {} skipped, {} failed. Total students in database: {}",
                report.created, report.skipped, report.failed, report.total_in_store
            );
        }
        Err(e) => {
            error!(?e, "Seeding aborted");
            std::process::exit(1);
        }
    }
}
