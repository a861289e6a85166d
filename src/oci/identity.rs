//! Identity service client

use crate::oci::client::{OciClientConfig, Service, Transport};
use crate::oci::error::OciError;
use crate::oci::signer::RequestSigner;
use crate::oci::types::Tenancy;
use std::sync::Arc;

const API_VERSION: &str = "20160918";

pub struct IdentityClient {
    transport: Transport,
}

impl IdentityClient {
    pub fn new(config: &OciClientConfig, signer: Arc<RequestSigner>) -> Result<Self, OciError> {
        Ok(Self {
            transport: Transport::new(Service::Identity, config, signer)?,
        })
    }

    /// Get a tenancy by OCID
    pub async fn get_tenancy(&self, tenancy_id: &str) -> Result<Tenancy, OciError> {
        let path = format!(
            "/{}/tenancies/{}",
            API_VERSION,
            urlencoding::encode(tenancy_id)
        );
        let url = self.transport.url(&path, &[])?;
        self.transport.get_json(url).await
    }
}
