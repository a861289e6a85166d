//! Lists the tenancy's buckets and the report objects in the demo bucket.

use anyhow::Result;
use oci_demo::demo::Session;
use oci_demo::settings::{self, BucketSettings, ProfileSelection};
use oci_demo::storage_list;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    oci_demo::init_logging();
    settings::load_dotenv();

    let profile = match ProfileSelection::from_env().and_then(|s| s.load()) {
        Ok(p) => p,
        Err(e) => {
            oci_demo::print_config_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let bucket = BucketSettings::from_lookup(&settings::env_var);
    let session = Session::connect(profile)?;
    storage_list::run(&session, &bucket).await?;

    Ok(ExitCode::SUCCESS)
}
