//! The demo run: list instances, ensure a bucket, upload a report

use crate::oci::{
    ComputeClient, CreateBucketDetails, IdentityClient, Instance, ObjectStorageClient,
    OciClientConfig, OciError, OciProfile, RequestSigner,
};
use crate::report::{self, Report};
use crate::settings::RunSettings;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The three service clients, sharing one signer
pub struct Session {
    pub profile: OciProfile,
    pub identity: IdentityClient,
    pub compute: ComputeClient,
    pub object_storage: ObjectStorageClient,
}

impl Session {
    /// Build clients for a profile using region-derived endpoints
    pub fn connect(profile: OciProfile) -> Result<Self> {
        let config = OciClientConfig::for_profile(&profile);
        Self::with_config(profile, &config)
    }

    /// Build clients for a profile with explicit client configuration
    pub fn with_config(profile: OciProfile, config: &OciClientConfig) -> Result<Self> {
        let signer = Arc::new(
            RequestSigner::from_profile(&profile).context("Failed to load API signing key")?,
        );

        Ok(Self {
            identity: IdentityClient::new(config, signer.clone())?,
            compute: ComputeClient::new(config, signer.clone())?,
            object_storage: ObjectStorageClient::new(config, signer)?,
            profile,
        })
    }
}

/// What [`ensure_bucket`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOutcome {
    Existing,
    Created,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub namespace: String,
    pub tenancy_name: String,
    pub instances: Vec<Instance>,
    pub bucket: BucketOutcome,
    pub object_name: String,
    pub report: Report,
}

/// List and print the instances in a compartment
pub async fn list_instances(
    compute: &ComputeClient,
    compartment_id: &str,
) -> Result<Vec<Instance>, OciError> {
    let instances = compute.list_instances(compartment_id).await?;

    println!("\nFound {} instance(s):", instances.len());
    for inst in &instances {
        println!(
            "- {} | {} | {}",
            inst.display_name, inst.lifecycle_state, inst.id
        );
    }

    Ok(instances)
}

/// Create a private bucket unless it already exists
///
/// Only a 404 from the lookup leads to creation; any other failure is
/// returned unchanged and nothing is created.
pub async fn ensure_bucket(
    object_storage: &ObjectStorageClient,
    namespace: &str,
    compartment_id: &str,
    bucket_name: &str,
) -> Result<BucketOutcome, OciError> {
    match object_storage.get_bucket(namespace, bucket_name).await {
        Ok(_) => {
            println!("\nBucket exists: {}", bucket_name);
            return Ok(BucketOutcome::Existing);
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!("Bucket lookup returned 404: {}", e);
        }
        Err(e) => return Err(e),
    }

    println!("\nCreating bucket: {}", bucket_name);
    let details = CreateBucketDetails::private(bucket_name, compartment_id);
    object_storage.create_bucket(namespace, &details).await?;
    println!("Bucket created.");

    Ok(BucketOutcome::Created)
}

/// Upload UTF-8 text as an object
pub async fn upload_text_object(
    object_storage: &ObjectStorageClient,
    namespace: &str,
    bucket_name: &str,
    object_name: &str,
    content: &str,
) -> Result<(), OciError> {
    println!("\nUploading object: {}", object_name);
    object_storage
        .put_object(namespace, bucket_name, object_name, content.as_bytes().to_vec())
        .await?;
    println!("Upload complete.");

    Ok(())
}

/// Run the whole demo sequence with the current time
pub async fn run(session: &Session, settings: &RunSettings) -> Result<RunSummary> {
    run_at(session, settings, Utc::now()).await
}

/// Run the whole demo sequence, stamping the report with `now`
pub async fn run_at(
    session: &Session,
    settings: &RunSettings,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let region = &session.profile.region;
    println!("Using region: {}", region);

    let namespace = session
        .object_storage
        .get_namespace()
        .await
        .context("Failed to get Object Storage namespace")?;
    let tenancy = session
        .identity
        .get_tenancy(&session.profile.tenancy)
        .await
        .context("Failed to get tenancy")?;

    println!("Tenancy: {}", tenancy.name);
    println!("Object Storage Namespace: {}", namespace);

    let instances = list_instances(&session.compute, &settings.compartment_id)
        .await
        .context("Failed to list instances")?;

    let bucket = ensure_bucket(
        &session.object_storage,
        &namespace,
        &settings.compartment_id,
        &settings.bucket.bucket_name,
    )
    .await
    .with_context(|| format!("Failed to ensure bucket {}", settings.bucket.bucket_name))?;

    let timestamp = report::report_timestamp(now);
    let object_name = report::object_name(&settings.bucket.object_prefix, &timestamp);
    let report = Report::for_instances(
        &timestamp,
        region,
        &tenancy.name,
        &settings.compartment_id,
        &instances,
    );

    upload_text_object(
        &session.object_storage,
        &namespace,
        &settings.bucket.bucket_name,
        &object_name,
        &report.render(),
    )
    .await
    .with_context(|| format!("Failed to upload {}", object_name))?;

    println!("\nDone !!!");

    Ok(RunSummary {
        namespace,
        tenancy_name: tenancy.name,
        instances,
        bucket,
        object_name,
        report,
    })
}
