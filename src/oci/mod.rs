//! OCI client module
//!
//! This module provides the Oracle Cloud Infrastructure functionality the
//! demos need:
//! - [`config::ConfigFile`] - `~/.oci/config` profile loading
//! - [`signer::RequestSigner`] - API key request signing
//! - [`identity::IdentityClient`], [`compute::ComputeClient`],
//!   [`object_storage::ObjectStorageClient`] - service clients
//! - [`types`] - resource types (Tenancy, Instance, Bucket, ...)

pub mod client;
pub mod compute;
pub mod config;
pub mod error;
pub mod identity;
pub mod object_storage;
pub mod signer;
pub mod types;

// Re-export commonly used types
pub use client::OciClientConfig;
pub use compute::ComputeClient;
pub use config::{ConfigFile, OciProfile};
pub use error::{ConfigError, OciError, SignerError};
pub use identity::IdentityClient;
pub use object_storage::ObjectStorageClient;
pub use signer::RequestSigner;
pub use types::{Bucket, BucketSummary, CreateBucketDetails, Instance, ObjectSummary, Tenancy};
