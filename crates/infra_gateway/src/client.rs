//! Shared HTTP plumbing for the collaborator adapters
//!
//! Every collaborator endpoint is a JSON POST carrying the transaction id
//! in a `transactionId` header, acknowledged with a JSON body. Non-success
//! statuses and body decode failures map onto [`InquiryError`] so the
//! domain never sees reqwest types.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use core_kernel::TransactionId;
use domain_transfer::InquiryError;

pub(crate) const TRANSACTION_ID_HEADER: &str = "transactionId";

/// Shared HTTP transport for the collaborator adapters
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpTransport {
    pub(crate) fn new(timeout_ms: u64) -> Result<Self, InquiryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|err| InquiryError::Connection {
                message: "failed to build HTTP client".into(),
                source: Some(Box::new(err)),
            })?;
        Ok(Self { client, timeout_ms })
    }

    /// POSTs `body` to `url` and decodes the JSON response
    pub(crate) async fn post_json<B, T>(
        &self,
        url: &str,
        transaction_id: TransactionId,
        body: &B,
    ) -> Result<T, InquiryError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, %transaction_id, "posting to collaborator");
        let response = self
            .client
            .post(url)
            .header(TRANSACTION_ID_HEADER, transaction_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        Self::decode_response(response).await
    }

    /// GETs `url` and decodes the JSON response
    pub(crate) async fn get_json<T>(&self, url: &str) -> Result<T, InquiryError>
    where
        T: DeserializeOwned,
    {
        debug!(%url, "querying collaborator");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;
        Self::decode_response(response).await
    }

    async fn decode_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, InquiryError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InquiryError::Status {
                code: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|err| InquiryError::decode(err.to_string()))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> InquiryError {
        if err.is_timeout() {
            InquiryError::Timeout {
                duration_ms: self.timeout_ms,
            }
        } else {
            InquiryError::Connection {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}
