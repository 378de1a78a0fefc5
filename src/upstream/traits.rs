use crate::model::{ColumnDescriptor, Credentials, QueryPayload, TableDescriptor};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service answered with anything other than 200
    #[error("Primavera error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response from Primavera: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The Primavera P6 data service endpoints the portal consumes.
///
/// Every call is a single attempt; callers decide how failures are shown.
#[async_trait::async_trait]
pub trait DataService: Send + Sync {
    async fn list_tables(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<TableDescriptor>, UpstreamError>;

    async fn list_columns(
        &self,
        credentials: &Credentials,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, UpstreamError>;

    async fn run_query(
        &self,
        credentials: &Credentials,
        payload: &QueryPayload,
    ) -> Result<Value, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_embeds_status_and_body() {
        let err = UpstreamError::Status {
            status: 401,
            body: "Unauthorized user".to_string(),
        };
        assert_eq!(err.to_string(), "Primavera error 401: Unauthorized user");
    }

    #[test]
    fn test_decode_error_conversion() {
        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        let err: UpstreamError = json_err.into();
        assert!(matches!(err, UpstreamError::Decode(_)));
        assert!(err.to_string().starts_with("unexpected response from Primavera"));
    }
}
