//! OCI Demo
//!
//! Lists the compute instances in a compartment, makes sure a private bucket
//! exists and uploads a short run report to it.

use anyhow::Result;
use oci_demo::demo::{self, Session};
use oci_demo::settings::{self, RunSettings};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    oci_demo::init_logging();
    settings::load_dotenv();

    tracing::info!("Starting OCI Demo v{}", env!("CARGO_PKG_VERSION"));

    let settings = match RunSettings::from_env() {
        Ok(s) => s,
        Err(e) => {
            oci_demo::print_config_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let profile = match settings.profile.load() {
        Ok(p) => p,
        Err(e) => {
            oci_demo::print_config_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let session = Session::connect(profile)?;
    demo::run(&session, &settings).await?;

    Ok(ExitCode::SUCCESS)
}
