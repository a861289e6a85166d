//! Signed HTTP transport shared by the OCI service clients

use crate::oci::config::OciProfile;
use crate::oci::error::OciError;
use crate::oci::signer::{RequestSigner, SignedBody, SigningRequest};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Header carrying the token for the next page of a list call
pub const NEXT_PAGE_HEADER: &str = "opc-next-page";
const REQUEST_ID_HEADER: &str = "opc-request-id";

/// The OCI services the demos talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Identity,
    Compute,
    ObjectStorage,
}

impl Service {
    /// Public endpoint for this service in a region (commercial realm)
    pub fn endpoint(&self, region: &str) -> String {
        match self {
            Service::Identity => format!("https://identity.{}.oci.oraclecloud.com", region),
            Service::Compute => format!("https://iaas.{}.oraclecloud.com", region),
            Service::ObjectStorage => format!("https://objectstorage.{}.oraclecloud.com", region),
        }
    }
}

/// Client configuration shared by all service clients
#[derive(Debug, Clone, Default)]
pub struct OciClientConfig {
    pub region: String,
    /// Overrides the region-derived endpoint when set
    pub endpoint: Option<String>,
}

impl OciClientConfig {
    pub fn for_profile(profile: &OciProfile) -> Self {
        Self {
            region: profile.region.clone(),
            endpoint: None,
        }
    }
}

/// Request body variants
#[derive(Debug)]
pub enum Body {
    Empty,
    /// Serialized JSON, covered by the signature
    Json(Vec<u8>),
    /// Opaque object data, not covered by the signature
    Binary(Vec<u8>),
}

impl Body {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, OciError> {
        Ok(Body::Json(serde_json::to_vec(value)?))
    }
}

/// Signs and sends requests against one service endpoint
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    signer: Arc<RequestSigner>,
    base: Url,
}

impl Transport {
    pub fn new(
        service: Service,
        config: &OciClientConfig,
        signer: Arc<RequestSigner>,
    ) -> Result<Self, OciError> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| service.endpoint(&config.region));
        let base = Url::parse(&endpoint)?;
        let http = Client::builder()
            .user_agent(concat!("oci-demo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!("{:?} endpoint: {}", service, base);

        Ok(Self { http, signer, base })
    }

    /// Base URL of the service endpoint
    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    /// Build a request URL from an already-encoded path and query pairs
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, OciError> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sign and send a request, mapping non-success statuses to
    /// [`OciError::Service`]
    pub async fn send(&self, method: Method, url: Url, body: Body) -> Result<Response, OciError> {
        let host = match url.port() {
            Some(port) => format!("{}:{}", url.host_str().unwrap_or_default(), port),
            None => url.host_str().unwrap_or_default().to_string(),
        };
        let target = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        let signed_body = match &body {
            Body::Json(bytes) => Some(SignedBody {
                content_type: "application/json",
                bytes,
            }),
            Body::Empty | Body::Binary(_) => None,
        };

        let signed = self.signer.sign(&SigningRequest {
            method: method.as_str(),
            target: &target,
            host: &host,
            body: signed_body,
        });

        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        for (name, value) in signed.headers {
            request = request.header(name, value);
        }

        request = match body {
            Body::Empty => request,
            // content-type and content-length were already set by the signer
            Body::Json(bytes) => request.body(bytes),
            Body::Binary(bytes) => request
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes),
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let request_id = header_value(&response, REQUEST_ID_HEADER);
        let text = response.text().await.unwrap_or_default();
        tracing::debug!("Request failed with {}: {}", status, text);
        Err(OciError::from_response(status, request_id, &text))
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, OciError> {
        let response = self.send(Method::GET, url, Body::Empty).await?;
        decode(response).await
    }

    /// GET one page of a list call, returning items and the next page token
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<(Vec<T>, Option<String>), OciError> {
        let response = self.send(Method::GET, url, Body::Empty).await?;
        let next_page = header_value(&response, NEXT_PAGE_HEADER);
        let items = decode(response).await?;
        Ok((items, next_page))
    }
}

/// Decode a JSON response body
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, OciError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
