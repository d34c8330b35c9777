//! The four-step checkout journey run by each virtual user

use crate::tracker::MetricsTracker;
use rapor_http::{ApiClient, ApiResponse, HttpError, HttpMethod};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::time::Instant;
use tracing::trace;

/// Journey steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Login,
    Products,
    AddToCart,
    PlaceOrder,
}

impl Step {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [Step; Step::COUNT] {
        &[Step::Login, Step::Products, Step::AddToCart, Step::PlaceOrder]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Login => "login",
            Step::Products => "products",
            Step::AddToCart => "add_to_cart",
            Step::PlaceOrder => "place_order",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Step::Products => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Step::Login => "auth/login",
            Step::Products => "products",
            Step::AddToCart => "cart/add",
            Step::PlaceOrder => "order",
        }
    }

    /// Whether `status` passes this step's check
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Step::Login | Step::Products => status == 200,
            Step::AddToCart | Step::PlaceOrder => status == 200 || status == 201,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Login credentials shared by all virtual users
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Check results of one iteration, indexed by [`Step::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IterationReport {
    pub checks: [bool; Step::COUNT],
}

impl IterationReport {
    pub fn passed(&self, step: Step) -> bool {
        self.checks[step.index()]
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|&c| c)
    }
}

/// Walks login, product listing, add-to-cart and order placement.
///
/// Steps never retry and never abort the iteration: a failed login leaves
/// the token empty, and later steps run anyway and fail their own checks.
#[derive(Debug, Clone)]
pub struct CheckoutJourney {
    client: ApiClient,
    credentials: Credentials,
    api_key: Option<String>,
}

impl CheckoutJourney {
    /// `client` is used unauthenticated for login
    pub fn new(client: ApiClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            api_key: None,
        }
    }

    /// Send `x-api-key` on every request after login
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub async fn run_iteration(&self, tracker: &MetricsTracker) -> IterationReport {
        let mut report = IterationReport::default();

        let login_body = json!({
            "email": self.credentials.email,
            "password": self.credentials.password,
        });
        let login = self
            .execute(&self.client, Step::Login, Some(&login_body), tracker, &mut report)
            .await;
        let token = login
            .as_ref()
            .and_then(|r| r.find_text(&["/token", "/data/token"]));

        let mut session = match &self.api_key {
            Some(key) => self.client.clone().with_api_key(key.clone()),
            None => self.client.clone(),
        };
        session.set_bearer(token);

        let products = self
            .execute(&session, Step::Products, None, tracker, &mut report)
            .await;
        let product_id = products
            .as_ref()
            .and_then(|r| r.find(&["/0/id", "/data/0/id", "/products/0/id"]))
            .cloned()
            .unwrap_or(JsonValue::Null);

        let cart_body = json!({ "productId": product_id, "quantity": 1 });
        self.execute(&session, Step::AddToCart, Some(&cart_body), tracker, &mut report)
            .await;

        self.execute(&session, Step::PlaceOrder, Some(&json!({})), tracker, &mut report)
            .await;

        tracker.record_iteration(&report);
        report
    }

    async fn execute(
        &self,
        client: &ApiClient,
        step: Step,
        body: Option<&JsonValue>,
        tracker: &MetricsTracker,
        report: &mut IterationReport,
    ) -> Option<ApiResponse> {
        let started = Instant::now();
        let result: Result<ApiResponse, HttpError> =
            client.request(step.method(), step.path(), &[], body).await;

        match result {
            Ok(response) => {
                let passed = step.accepts(response.status);
                report.checks[step.index()] = passed;
                tracker
                    .record_request(step, response.elapsed, Some(response.status), passed)
                    .await;
                trace!(step = step.name(), status = response.status, passed, "Journey step");
                Some(response)
            }
            Err(e) => {
                tracker
                    .record_request(step, started.elapsed(), None, false)
                    .await;
                trace!(step = step.name(), error = %e, "Journey step transport failure");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapor_http::ClientConfig;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn journey(server: &MockServer) -> CheckoutJourney {
        let client = ApiClient::new(&server.uri(), &ClientConfig::default()).unwrap();
        CheckoutJourney::new(
            client,
            Credentials {
                email: "vu@example.com".to_string(),
                password: "secret".to_string(),
            },
        )
        .with_api_key(Some("public-key".to_string()))
    }

    #[test]
    fn test_step_checks() {
        assert!(Step::Login.accepts(200));
        assert!(!Step::Login.accepts(201));
        assert!(!Step::Products.accepts(204));
        assert!(Step::AddToCart.accepts(201));
        assert!(Step::PlaceOrder.accepts(200));
        assert!(!Step::PlaceOrder.accepts(400));
    }

    #[tokio::test]
    async fn test_happy_path_carries_token_and_product() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "email": "vu@example.com", "password": "secret" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "token": "jwt-1" }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .and(header("authorization", "Bearer jwt-1"))
            .and(header("x-api-key", "public-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [{ "id": "sku-9" }, { "id": "sku-10" }]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/cart/add"))
            .and(header("authorization", "Bearer jwt-1"))
            .and(body_json(json!({ "productId": "sku-9", "quantity": 1 })))
            .respond_with(ResponseTemplate::new(201))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/order"))
            .and(header("authorization", "Bearer jwt-1"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orderId": 1 })))
            .mount(&mock_server)
            .await;

        let tracker = MetricsTracker::new();
        let report = journey(&mock_server).run_iteration(&tracker).await;

        assert!(report.all_passed());
        let results = tracker.results(std::time::Duration::from_secs(1), 1).await;
        assert_eq!(results.total_requests, 4);
        assert_eq!(results.failed_requests, 0);
        assert_eq!(results.iterations, 1);
    }

    #[tokio::test]
    async fn test_rejected_login_cascades_without_aborting() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "invalid credentials"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/cart/add"))
            .and(body_json(json!({ "productId": null, "quantity": 1 })))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/order"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tracker = MetricsTracker::new();
        let report = journey(&mock_server).run_iteration(&tracker).await;

        assert!(!report.passed(Step::Login));
        assert!(!report.passed(Step::Products));
        assert!(!report.passed(Step::AddToCart));
        assert!(!report.passed(Step::PlaceOrder));

        let results = tracker.results(std::time::Duration::from_secs(1), 1).await;
        assert_eq!(results.total_requests, 4);
        assert_eq!(results.failed_requests, 4);
        assert_eq!(results.steps[Step::Login.index()].checks_failed, 1);
        assert_eq!(results.status_codes.get(&401), Some(&4));
    }

    #[tokio::test]
    async fn test_unreachable_target_records_transport_failures() {
        let client = ApiClient::new("http://127.0.0.1:9", &ClientConfig::default()).unwrap();
        let journey = CheckoutJourney::new(
            client,
            Credentials {
                email: "a@b.c".to_string(),
                password: "p".to_string(),
            },
        );

        let tracker = MetricsTracker::new();
        let report = journey.run_iteration(&tracker).await;

        assert_eq!(report, IterationReport::default());
        let results = tracker.results(std::time::Duration::from_secs(1), 1).await;
        assert_eq!(results.transport_errors, 4);
        assert_eq!(results.failure_rate, 1.0);
    }
}
