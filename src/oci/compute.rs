//! Compute service client

use crate::oci::client::{OciClientConfig, Service, Transport};
use crate::oci::error::OciError;
use crate::oci::signer::RequestSigner;
use crate::oci::types::Instance;
use std::sync::Arc;

const API_VERSION: &str = "20160918";

pub struct ComputeClient {
    transport: Transport,
}

impl ComputeClient {
    pub fn new(config: &OciClientConfig, signer: Arc<RequestSigner>) -> Result<Self, OciError> {
        Ok(Self {
            transport: Transport::new(Service::Compute, config, signer)?,
        })
    }

    /// List every instance in a compartment, following pagination
    pub async fn list_instances(&self, compartment_id: &str) -> Result<Vec<Instance>, OciError> {
        let path = format!("/{}/instances", API_VERSION);
        let mut instances = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut query = vec![("compartmentId", compartment_id)];
            if let Some(ref token) = page {
                query.push(("page", token.as_str()));
            }
            let url = self.transport.url(&path, &query)?;
            let (items, next_page): (Vec<Instance>, _) = self.transport.get_page(url).await?;
            instances.extend(items);

            match next_page {
                Some(token) => {
                    tracing::trace!("Following instance page {}", token);
                    page = Some(token);
                }
                None => break,
            }
        }

        Ok(instances)
    }
}
