//! Object Storage service client

use crate::oci::client::{Body, OciClientConfig, Service, Transport};
use crate::oci::error::OciError;
use crate::oci::signer::RequestSigner;
use crate::oci::types::{Bucket, BucketSummary, CreateBucketDetails, ListObjects, ObjectSummary};
use reqwest::Method;
use std::sync::Arc;

/// Object Storage client with high-level operations
pub struct ObjectStorageClient {
    transport: Transport,
}

impl ObjectStorageClient {
    pub fn new(config: &OciClientConfig, signer: Arc<RequestSigner>) -> Result<Self, OciError> {
        Ok(Self {
            transport: Transport::new(Service::ObjectStorage, config, signer)?,
        })
    }

    /// Get the Object Storage namespace of the caller's tenancy
    pub async fn get_namespace(&self) -> Result<String, OciError> {
        let url = self.transport.url("/n/", &[])?;
        self.transport.get_json(url).await
    }

    /// Get a bucket's metadata; a missing bucket yields a 404 service error
    pub async fn get_bucket(&self, namespace: &str, bucket: &str) -> Result<Bucket, OciError> {
        let url = self.transport.url(&bucket_path(namespace, bucket), &[])?;
        self.transport.get_json(url).await
    }

    pub async fn create_bucket(
        &self,
        namespace: &str,
        details: &CreateBucketDetails,
    ) -> Result<Bucket, OciError> {
        let path = format!("/n/{}/b/", urlencoding::encode(namespace));
        let url = self.transport.url(&path, &[])?;
        let response = self
            .transport
            .send(Method::POST, url, Body::json(details)?)
            .await?;
        crate::oci::client::decode(response).await
    }

    /// Upload bytes as an object
    pub async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        object_name: &str,
        data: Vec<u8>,
    ) -> Result<(), OciError> {
        let path = format!(
            "{}/o/{}",
            bucket_path(namespace, bucket),
            urlencoding::encode(object_name)
        );
        let url = self.transport.url(&path, &[])?;
        self.transport
            .send(Method::PUT, url, Body::Binary(data))
            .await?;

        Ok(())
    }

    /// List all buckets in a compartment, following pagination
    pub async fn list_buckets(
        &self,
        namespace: &str,
        compartment_id: &str,
    ) -> Result<Vec<BucketSummary>, OciError> {
        let path = format!("/n/{}/b/", urlencoding::encode(namespace));
        let mut buckets = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut query = vec![("compartmentId", compartment_id)];
            if let Some(ref token) = page {
                query.push(("page", token.as_str()));
            }
            let url = self.transport.url(&path, &query)?;
            let (items, next_page): (Vec<BucketSummary>, _) = self.transport.get_page(url).await?;
            buckets.extend(items);

            match next_page {
                Some(token) => {
                    tracing::trace!("Following bucket page {}", token);
                    page = Some(token);
                }
                None => break,
            }
        }

        Ok(buckets)
    }

    /// List objects in a bucket with optional prefix, following pagination
    pub async fn list_objects(
        &self,
        namespace: &str,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectSummary>, OciError> {
        let path = format!("{}/o", bucket_path(namespace, bucket));
        let mut objects = Vec::new();
        let mut start: Option<String> = None;

        loop {
            let mut query = vec![("fields", "name,size,timeCreated,md5,etag")];
            if let Some(p) = prefix {
                query.push(("prefix", p));
            }
            if let Some(ref s) = start {
                query.push(("start", s.as_str()));
            }
            let url = self.transport.url(&path, &query)?;
            let page: ListObjects = self.transport.get_json(url).await?;
            objects.extend(page.objects);

            match page.next_start_with {
                Some(next) => {
                    tracing::trace!("Following object listing from {}", next);
                    start = Some(next);
                }
                None => break,
            }
        }

        Ok(objects)
    }
}

fn bucket_path(namespace: &str, bucket: &str) -> String {
    format!(
        "/n/{}/b/{}",
        urlencoding::encode(namespace),
        urlencoding::encode(bucket)
    )
}
