use crate::model::{parse_columns, ColumnDescriptor, Credentials, QueryPayload, TableDescriptor};
use crate::upstream::traits::{DataService, UpstreamError};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

/// Data source configuration every endpoint is queried with.
pub const CONFIG_CODE: &str = "ds_p6adminuser";

const DATASERVICE_PATH: &str = "/pds/rest-service/dataservice";

/// reqwest-backed client for the Primavera REST data service.
#[derive(Debug, Clone)]
pub struct PrimaveraClient {
    client: Client,
}

impl PrimaveraClient {
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!("Primavera responded with status {}", status);

        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn get(&self, credentials: &Credentials, url: Url) -> RequestBuilder {
        log::debug!("Calling GET {}", url);
        self.client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(ACCEPT, "application/json")
    }
}

/// Build `{base}/pds/rest-service/dataservice{path}[/{segment}]?configCode=...`.
///
/// The base URL is taken verbatim; `segment` is percent-encoded as a single
/// path segment.
pub fn endpoint(base_url: &str, path: &str, segment: Option<&str>) -> Result<Url, UpstreamError> {
    let raw = format!("{}{}{}", base_url, DATASERVICE_PATH, path);
    let invalid = |reason: String| UpstreamError::InvalidUrl {
        url: raw.clone(),
        reason,
    };

    let mut url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
    if let Some(segment) = segment {
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot have path segments".to_string()))?
            .push(segment);
    }
    url.query_pairs_mut().append_pair("configCode", CONFIG_CODE);
    Ok(url)
}

#[async_trait::async_trait]
impl DataService for PrimaveraClient {
    async fn list_tables(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<TableDescriptor>, UpstreamError> {
        let url = endpoint(&credentials.service_base_url, "/metadata/tables", None)?;
        let body = self.send(self.get(credentials, url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn list_columns(
        &self,
        credentials: &Credentials,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>, UpstreamError> {
        let url = endpoint(&credentials.service_base_url, "/metadata/columns", Some(table))?;
        let body = self.send(self.get(credentials, url)).await?;
        Ok(parse_columns(body.as_bytes())?)
    }

    async fn run_query(
        &self,
        credentials: &Credentials,
        payload: &QueryPayload,
    ) -> Result<Value, UpstreamError> {
        let url = endpoint(&credentials.service_base_url, "/runquery", None)?;
        log::debug!("Calling POST {} for {} table(s)", url, payload.tables.len());
        let request = self
            .client
            .post(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(ACCEPT, "application/json")
            .json(payload);
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
