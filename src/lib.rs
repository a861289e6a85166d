//! OCI Demo Library
//!
//! This crate provides the core functionality for the `oci-demo` and
//! `oci-storage-list` command-line programs. The public modules can be used
//! for testing and extension.

pub mod demo;
pub mod oci;
pub mod report;
pub mod settings;
pub mod storage_list;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr, filtered by `RUST_LOG`
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Print a fatal configuration error the way the programs report it
pub fn print_config_error(err: &oci::ConfigError) {
    println!("ERROR: {}", err);
    if let Some(hint) = err.hint() {
        println!("{}", hint);
    }
}
