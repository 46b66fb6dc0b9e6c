use async_trait::async_trait;
use opensearch::auth::Credentials;
use opensearch::cert::CertificateValidation;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::http::Url;
use opensearch::{IndexParts, OpenSearch};
use thiserror::Error;

use crate::env_keys::{ES_ENDPOINT, ES_PASSWORD, ES_USERNAME};
use crate::picture::PictureItem;

use super::PictureStore;

pub static PICTURES_INDEX: &str = "pictures";

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("index write for picture {id} failed with status {status_code}: {message}")]
    Write {
        id: String,
        status_code: u16,
        message: String,
    },

    #[error("index request failed: {details}")]
    Transport { details: String },
}

#[derive(Debug, Clone)]
pub struct ESPictureService {
    inner: OpenSearch,
}

impl ESPictureService {
    /// Builds the search client from `ES_ENDPOINT`, with optional basic auth
    /// taken from `ES_USERNAME`/`ES_PASSWORD`.
    pub fn new() -> anyhow::Result<Self> {
        let endpoint = std::env::var(ES_ENDPOINT)?;
        let url = Url::parse(&endpoint)?;
        let conn_pool = SingleNodeConnectionPool::new(url);

        let mut transport_builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let (Ok(username), Ok(password)) =
            (std::env::var(ES_USERNAME), std::env::var(ES_PASSWORD))
        {
            transport_builder = transport_builder.auth(Credentials::Basic(username, password));
        }

        // Local clusters run with self-signed certificates.
        if endpoint.contains("https://localhost") {
            transport_builder = transport_builder.cert_validation(CertificateValidation::None);
        }

        let transport = transport_builder.build()?;

        Ok(Self {
            inner: OpenSearch::new(transport),
        })
    }
}

// Index names may not contain `:` (present in Cognito identity ids) or
// uppercase characters.
fn picture_index(cognito_id: &str) -> String {
    format!(
        "{}-{}",
        PICTURES_INDEX,
        cognito_id.to_lowercase().replace(':', "-")
    )
}

#[async_trait]
impl PictureStore for ESPictureService {
    async fn add(&self, cognito_id: &str, picture: &PictureItem) -> Result<(), IndexError> {
        let index = picture_index(cognito_id);

        let response = self
            .inner
            .index(IndexParts::IndexId(&index, &picture.id))
            .body(picture)
            .send()
            .await
            .map_err(|error| IndexError::Transport {
                details: error.to_string(),
            })?;

        let status_code = response.status_code();
        if !status_code.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                index = %index,
                id = %picture.id,
                status_code = %status_code,
                message = %message,
                "error upserting picture"
            );
            return Err(IndexError::Write {
                id: picture.id.clone(),
                status_code: status_code.as_u16(),
                message,
            });
        }

        tracing::trace!(index = %index, id = %picture.id, "picture upserted");

        Ok(())
    }
}
