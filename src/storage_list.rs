//! Bucket and object listing

use crate::oci::{BucketSummary, ObjectSummary};
use crate::demo::Session;
use crate::settings::BucketSettings;
use anyhow::{Context, Result};

/// What a listing run found
#[derive(Debug, Clone)]
pub struct Listing {
    pub buckets: Vec<BucketSummary>,
    pub objects: Vec<ObjectSummary>,
}

/// List the tenancy's buckets, then the objects under `<prefix>/` in the
/// configured bucket
pub async fn run(session: &Session, settings: &BucketSettings) -> Result<Listing> {
    let os = &session.object_storage;

    let namespace = os
        .get_namespace()
        .await
        .context("Failed to get Object Storage namespace")?;

    // The tenancy OCID doubles as the root compartment
    let buckets = os
        .list_buckets(&namespace, &session.profile.tenancy)
        .await
        .context("Failed to list buckets")?;

    println!("Buckets:");
    for b in &buckets {
        println!("- {}", b.name);
    }

    let prefix = format!("{}/", settings.object_prefix);
    println!("\nObjects in {}:", settings.bucket_name);
    let objects = os
        .list_objects(&namespace, &settings.bucket_name, Some(&prefix))
        .await
        .with_context(|| format!("Failed to list objects in {}", settings.bucket_name))?;

    for obj in &objects {
        tracing::debug!("{} ({})", obj.name, obj.size_string());
        println!("- {}", obj.name);
    }

    Ok(Listing { buckets, objects })
}
