use modex_core::{ExtractRequest, TransportResponse};
use url::Url;

use crate::{ClientSettings, TransportError};

/// The one capability the extraction driver needs from the network.
///
/// Implementations report any HTTP status as `Ok`; `Err` is reserved for
/// failures where no response was received.
#[async_trait::async_trait]
pub trait ExtractionTransport: Send + Sync {
    /// `POST` the request as JSON to the extraction endpoint.
    async fn post_extract(
        &self,
        request: &ExtractRequest,
    ) -> Result<TransportResponse, TransportError>;

    /// `GET` the service root.
    async fn check_health(&self) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    extract_url: Url,
    health_url: Url,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let base = Url::parse(&settings.base_url).map_err(|err| {
            TransportError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                message: err.to_string(),
            }
        })?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                message: "base URL cannot carry a path".to_string(),
            });
        }
        let extract_url = endpoint(&base, &settings.extract_path);
        let health_url = endpoint(&base, "");

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::from_reqwest)?;

        Ok(Self {
            client,
            extract_url,
            health_url,
        })
    }

    pub fn extract_url(&self) -> &Url {
        &self.extract_url
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

/// Appends `path` below the base URL's own path, so a prefix such as
/// `http://gateway/modex` is kept.
fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    let suffix = path.trim_start_matches('/');
    url.set_path(&format!("{prefix}/{suffix}"));
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[async_trait::async_trait]
impl ExtractionTransport for ReqwestTransport {
    async fn post_extract(
        &self,
        request: &ExtractRequest,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(self.extract_url.clone())
            .json(request)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        read_response(response).await
    }

    async fn check_health(&self) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        read_response(response).await
    }
}

async fn read_response(response: reqwest::Response) -> Result<TransportResponse, TransportError> {
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(TransportError::from_reqwest)?;
    Ok(TransportResponse::new(status, body.to_vec()))
}
