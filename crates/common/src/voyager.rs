use crate::http::get_json;
use crate::types::{BalancesResponse, Page, TransferItem, TxnItem};
use anyhow::{Context, Result};
use reqwest::Url;

/// Read-only client for the Voyager explorer API.
pub struct VoyagerClient {
    base_url: String,
    page_size: u32,
    client: reqwest::Client,
}

impl VoyagerClient {
    pub fn new(client: reqwest::Client, base_url: &str, page_size: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
            client,
        }
    }

    pub fn txns_url(&self, address: &str, page: u32) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/txns", self.base_url))
            .with_context(|| format!("invalid explorer base url: {}", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("to", address)
            .append_pair("ps", &self.page_size.to_string())
            .append_pair("p", &page.to_string())
            .append_pair("type", "null");
        Ok(url)
    }

    pub fn transfers_url(&self, address: &str, page: u32) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/contract/{address}/transfers", self.base_url))
            .with_context(|| format!("invalid explorer base url: {}", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("ps", &self.page_size.to_string())
            .append_pair("p", &page.to_string());
        Ok(url)
    }

    pub fn balances_url(&self, address: &str) -> Result<Url> {
        Url::parse(&format!("{}/contract/{address}/balances", self.base_url))
            .with_context(|| format!("invalid explorer base url: {}", self.base_url))
    }

    pub async fn fetch_txns_raw(&self, address: &str, page: u32) -> Result<Page<TxnItem>> {
        get_json(&self.client, self.txns_url(address, page)?).await
    }

    pub async fn fetch_transfers_raw(
        &self,
        address: &str,
        page: u32,
    ) -> Result<Page<TransferItem>> {
        get_json(&self.client, self.transfers_url(address, page)?).await
    }

    pub async fn fetch_balances_raw(&self, address: &str) -> Result<BalancesResponse> {
        get_json(&self.client, self.balances_url(address)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_client, classify_api_error, ApiErrorKind};
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client_for(server: &MockServer) -> VoyagerClient {
        let http = build_client(Some(Duration::from_secs(5))).unwrap();
        VoyagerClient::new(http, &server.url("/api/"), 50)
    }

    #[test]
    fn test_txns_url() {
        let http = build_client(Some(Duration::from_secs(5))).unwrap();
        let client = VoyagerClient::new(http, "https://voyager.online/api/", 50);
        let url = client.txns_url("0xabc", 2).unwrap().to_string();
        assert_eq!(
            url,
            "https://voyager.online/api/txns?to=0xabc&ps=50&p=2&type=null"
        );
    }

    #[test]
    fn test_transfers_and_balances_urls() {
        let http = build_client(Some(Duration::from_secs(5))).unwrap();
        let client = VoyagerClient::new(http, "https://voyager.online/api", 25);
        assert_eq!(
            client.transfers_url("0xabc", 1).unwrap().as_str(),
            "https://voyager.online/api/contract/0xabc/transfers?ps=25&p=1"
        );
        assert_eq!(
            client.balances_url("0xabc").unwrap().as_str(),
            "https://voyager.online/api/contract/0xabc/balances"
        );
    }

    #[tokio::test]
    async fn test_fetch_txns_page() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/txns")
                .query_param("to", "0xabc")
                .query_param("p", "1");
            then.status(200).json_body(serde_json::json!({
                "items": [{"type": "INVOKE", "timestamp": 1_700_000_000, "actual_fee": "1"}],
                "lastPage": 1
            }));
        });

        let page = client_for(&server).fetch_txns_raw("0xabc", 1).await.unwrap();
        mock.assert();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.last_page, 1);
    }

    #[tokio::test]
    async fn test_fetch_balances() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/contract/0xabc/balances");
            then.status(200)
                .json_body(serde_json::json!({"ethereum": {"amount": "0.5"}}));
        });

        let balances = client_for(&server).fetch_balances_raw("0xabc").await.unwrap();
        assert!(balances.contains_key("ethereum"));
    }

    #[tokio::test]
    async fn test_http_error_is_classified_as_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/contract/0xabc/transfers");
            then.status(503).body("unavailable");
        });

        let err = client_for(&server)
            .fetch_transfers_raw("0xabc", 1)
            .await
            .unwrap_err();
        assert_eq!(classify_api_error(&err), ApiErrorKind::Status);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_classified_as_decode() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/txns");
            then.status(200).body("<html>not json</html>");
        });

        let err = client_for(&server)
            .fetch_txns_raw("0xabc", 1)
            .await
            .unwrap_err();
        assert_eq!(classify_api_error(&err), ApiErrorKind::Decode);
    }
}
