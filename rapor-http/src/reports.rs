//! Reporting endpoint client

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::errors::HttpError;
use async_trait::async_trait;
use rapor_config::domains::api::ApiConfig;
use rapor_core::{FetchError, OrderRow, OrderSource, ReportFilter};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// Path of the reporting endpoint relative to the API base
pub const REPORTS_PATH: &str = "admin/reports";

/// Response envelope of the reporting endpoint
#[derive(Debug, Deserialize)]
struct ReportEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<JsonValue>,
    #[serde(default)]
    message: Option<String>,
}

/// Fetches order snapshots from `GET {base}/admin/reports`
#[derive(Debug, Clone)]
pub struct ReportsClient {
    api: ApiClient,
}

impl ReportsClient {
    /// Wrap an already configured client
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Build a client from the api and http configuration domains
    pub fn from_config(api: &ApiConfig, client: &ClientConfig) -> Result<Self, HttpError> {
        let mut inner = ApiClient::new(api.trimmed_base_url(), client)?;
        if let Some(token) = &api.token {
            inner = inner.with_bearer(token.clone());
        }
        if let Some(key) = &api.api_key {
            inner = inner.with_api_key(key.clone());
        }
        Ok(Self::new(inner))
    }
}

#[async_trait]
impl OrderSource for ReportsClient {
    async fn fetch_orders(&self, filter: &ReportFilter) -> Result<Vec<OrderRow>, FetchError> {
        let response = self
            .api
            .get(REPORTS_PATH, &filter.query_pairs())
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let envelope = serde_json::from_value::<ReportEnvelope>(response.body.clone()).ok();

        if !response.is_success() {
            warn!(status = response.status, "Reporting endpoint returned an error status");
            return Err(FetchError::Status {
                status: response.status,
                message: envelope.and_then(|e| e.message),
            });
        }

        let envelope = envelope
            .ok_or_else(|| FetchError::Decode("response is not a report envelope".to_string()))?;

        if !envelope.success {
            return Err(FetchError::Rejected {
                message: envelope.message,
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| FetchError::Decode("missing data field".to_string()))?;
        let orders: Vec<OrderRow> =
            serde_json::from_value(data).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            orders = orders.len(),
            elapsed_ms = response.elapsed.as_millis() as u64,
            "Decoded report response"
        );
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rapor_core::{Channel, DateRange, OrderStatus};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer) -> ReportsClient {
        let api = ApiConfig {
            base_url: format!("{}/api", server.uri()),
            token: Some("admin-token".to_string()),
            api_key: None,
        };
        ReportsClient::from_config(&api, &ClientConfig::default()).unwrap()
    }

    fn may_filter() -> ReportFilter {
        ReportFilter::new(DateRange::parse("2024-05-01", "2024-05-07").unwrap())
    }

    #[tokio::test]
    async fn test_fetch_sends_filter_and_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/reports"))
            .and(query_param("dateFrom", "2024-05-01"))
            .and(query_param("dateTo", "2024-05-07"))
            .and(query_param("channel", "trendyol"))
            .and(header("authorization", "Bearer admin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "id": 7,
                    "date": "2024-05-02",
                    "channel": "trendyol",
                    "status": "delivered",
                    "amount": 125.5,
                    "customerName": "Zeynep Kaya",
                    "cargoProvider": "MNG",
                    "cargoSlipPrintedAt": "2024-05-02T14:00:00Z"
                }]
            })))
            .mount(&mock_server)
            .await;

        let orders = client_for(&mock_server)
            .fetch_orders(&may_filter().with_channel(Some(Channel::Trendyol)))
            .await
            .unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "7");
        assert_eq!(orders[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(orders[0].status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_unset_filters_are_not_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/reports"))
            .respond_with(|req: &Request| {
                let keys: Vec<String> = req.url.query_pairs().map(|(k, _)| k.into_owned()).collect();
                let body = if keys == ["dateFrom", "dateTo"] {
                    json!({ "success": true, "data": [] })
                } else {
                    json!({ "success": false, "message": format!("unexpected query {:?}", keys) })
                };
                ResponseTemplate::new(200).set_body_json(body)
            })
            .mount(&mock_server)
            .await;

        let orders = client_for(&mock_server)
            .fetch_orders(&may_filter())
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_unsuccessful_flag_is_rejected_with_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/reports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Rapor olusturulamadi"
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .fetch_orders(&may_filter())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Rejected { .. }));
        assert_eq!(err.user_message(), "Rapor olusturulamadi");
    }

    #[tokio::test]
    async fn test_error_status_and_bad_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/reports"))
            .and(query_param("status", "returned"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "message": "Unauthorized"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/admin/reports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "id": 1, "channel": "ebay" }]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let err = client
            .fetch_orders(&may_filter().with_status(Some(OrderStatus::Returned)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 401, .. }));
        assert_eq!(err.user_message(), "Unauthorized");

        let err = client.fetch_orders(&may_filter()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.user_message(), rapor_core::FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token: None,
            api_key: None,
        };
        let err = ReportsClient::from_config(&api, &ClientConfig::default())
            .unwrap()
            .fetch_orders(&may_filter())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
