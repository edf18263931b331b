use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::GreenPromptClientConfig,
    error::{FetchError, FetchOutcome, GreenPromptClientError},
    types::{
        CarbonHistoryResponse, CarbonHistorySeries, CarbonIntensityResponse, CarbonSnapshot,
        ErrorBody, Prompt, ScheduleRequest, ScheduleResponse, SendRequest, SendResponse,
    },
};

pub const CARBON_INTENSITY_PATH: &str = "api/carbon-intensity";
pub const CARBON_INTENSITY_PAST_PATH: &str = "api/carbon-intensity-past";
pub const PROMPTS_PATH: &str = "api/prompts";
pub const SEND_PATH: &str = "api/send";
pub const SCHEDULE_PATH: &str = "api/schedule";

/// HTTP client for the GreenPrompt API.
///
/// Every method issues exactly one request and never retries. Failures of any kind
/// (transport, non-2xx status, undecodable body) come back as a [`FetchError`]
/// instead of a panic, so each caller decides what its display region shows.
#[derive(Clone, Debug)]
pub struct GreenPromptClient {
    http: Client,
    base_url: Url,
}

impl GreenPromptClient {
    /// Creates a client from an already built `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `GreenPromptClientError::InvalidBaseUrl` if `base_url` cannot be parsed.
    pub fn new(http: Client, base_url: &str) -> Result<Self, GreenPromptClientError> {
        // Endpoint paths are joined relative to the base, so it must end with a slash
        // to keep any path prefix (e.g. `https://host/greenprompt/`).
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self { http, base_url })
    }

    /// Creates a client from the `greenprompt_client` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &GreenPromptClientConfig) -> Result<Self, GreenPromptClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Self::new(builder.build()?, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Reads the current grid carbon intensity.
    #[instrument(level = "debug", skip_all, fields(endpoint = CARBON_INTENSITY_PATH))]
    pub async fn carbon_intensity(&self) -> FetchOutcome<CarbonSnapshot> {
        self.get::<CarbonIntensityResponse>(CARBON_INTENSITY_PATH)
            .await
            .map(CarbonSnapshot::from)
    }

    /// Reads the historical carbon intensity series.
    #[instrument(level = "debug", skip_all, fields(endpoint = CARBON_INTENSITY_PAST_PATH))]
    pub async fn carbon_history(&self) -> FetchOutcome<CarbonHistorySeries> {
        self.get::<CarbonHistoryResponse>(CARBON_INTENSITY_PAST_PATH)
            .await
            .map(CarbonHistorySeries::from)
    }

    /// Reads the complete set of prompts, in store order.
    #[instrument(level = "debug", skip_all, fields(endpoint = PROMPTS_PATH))]
    pub async fn prompts(&self) -> FetchOutcome<Vec<Prompt>> {
        self.get(PROMPTS_PATH).await
    }

    /// Sends a prompt for immediate execution.
    #[instrument(level = "debug", skip_all, fields(endpoint = SEND_PATH, model = %request.model))]
    pub async fn send(&self, request: &SendRequest) -> FetchOutcome<SendResponse> {
        self.post(SEND_PATH, request).await
    }

    /// Schedules a prompt for carbon-aware execution.
    #[instrument(
        level = "debug",
        skip_all,
        fields(endpoint = SCHEDULE_PATH, model = %request.model, schedule = %request.schedule)
    )]
    pub async fn schedule(&self, request: &ScheduleRequest) -> FetchOutcome<ScheduleResponse> {
        self.post(SCHEDULE_PATH, request).await
    }

    fn endpoint(&self, path: &str) -> FetchOutcome<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> FetchOutcome<T> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(
                target = "greenprompt-client",
                event = "request-failed",
                endpoint = path,
                error = %e,
                "GET request failed"
            );
            FetchError::from(e)
        })?;
        decode_response(response, path).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> FetchOutcome<T> {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).json(body).send().await.map_err(|e| {
            warn!(
                target = "greenprompt-client",
                event = "request-failed",
                endpoint = path,
                error = %e,
                "POST request failed"
            );
            FetchError::from(e)
        })?;
        decode_response(response, path).await
    }
}

/// Turns a response into a typed value or a [`FetchError`].
///
/// The body is parsed as JSON before the status is looked at: a body that is not JSON
/// is `InvalidJson` whatever the status. A non-2xx JSON body becomes `Status` carrying
/// its `error` text, if any.
async fn decode_response<T: DeserializeOwned>(response: Response, path: &str) -> FetchOutcome<T> {
    let status = response.status();
    let body = response.text().await?;

    let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        warn!(
            target = "greenprompt-client",
            event = "invalid-json",
            endpoint = path,
            status = status.as_u16(),
            error = %e,
            "Response body is not valid JSON"
        );
        FetchError::InvalidJson
    })?;

    if !status.is_success() {
        let error_body: ErrorBody = serde_json::from_value(value).unwrap_or_default();
        warn!(
            target = "greenprompt-client",
            event = "http-error",
            endpoint = path,
            status = status.as_u16(),
            error = error_body.error.as_deref().unwrap_or_default(),
            "Request returned a non-success status"
        );
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: error_body.error,
        });
    }

    debug!(
        target = "greenprompt-client",
        event = "response-received",
        endpoint = path,
        status = status.as_u16(),
    );
    serde_json::from_value(value).map_err(|e| {
        warn!(
            target = "greenprompt-client",
            event = "unexpected-shape",
            endpoint = path,
            error = %e,
            "Response body does not match the expected shape"
        );
        FetchError::InvalidJson
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptStatus;
    use axum::{
        http::{header::CONTENT_TYPE, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> GreenPromptClient {
        GreenPromptClient::new(Client::new(), base_url).unwrap()
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = client("http://localhost:7071/greenprompt");
        assert_eq!(
            client.endpoint(PROMPTS_PATH).unwrap().as_str(),
            "http://localhost:7071/greenprompt/api/prompts"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            GreenPromptClient::new(Client::new(), "not a url"),
            Err(GreenPromptClientError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_carbon_intensity_success() {
        let router = Router::new().route(
            "/api/carbon-intensity",
            get(|| async {
                Json(json!({"carbonIntensity": 123, "zone": "FR", "zone_name": "France"}))
            }),
        );
        let base_url = spawn_server(router).await;
        let snapshot = client(&base_url).carbon_intensity().await.unwrap();
        assert_eq!(snapshot.carbon_intensity, 123.0);
        assert_eq!(snapshot.zone, "FR");
        assert_eq!(snapshot.zone_name, "France");
    }

    #[tokio::test]
    async fn test_carbon_history_success() {
        let router = Router::new().route(
            "/api/carbon-intensity-past",
            get(|| async { Json(json!({"stamps": ["t1", "t2"], "intensities": [10, 20]})) }),
        );
        let base_url = spawn_server(router).await;
        let series = client(&base_url).carbon_history().await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].timestamp, "t1");
        assert_eq!(series.points()[1].intensity, 20.0);
    }

    #[tokio::test]
    async fn test_prompts_preserve_store_order() {
        let router = Router::new().route(
            "/api/prompts",
            get(|| async {
                Json(json!([
                    {"timestamp": "a", "prompt": "first", "status": "completed", "carbonIntensity_S": 1, "carbonIntensity_C": 2, "outTokens": 3, "completedAt": "x", "response": "r"},
                    {"timestamp": "b", "prompt": "second", "status": "pending", "carbonIntensity_S": 4, "carbonIntensity_C": 0},
                ]))
            }),
        );
        let base_url = spawn_server(router).await;
        let prompts = client(&base_url).prompts().await.unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].prompt, "first");
        assert_eq!(prompts[0].status, PromptStatus::Completed);
        assert_eq!(prompts[1].prompt, "second");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_server_error() {
        let router = Router::new().route(
            "/api/send",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"error": "rate limited"})),
                )
            }),
        );
        let base_url = spawn_server(router).await;
        let error = client(&base_url)
            .send(&SendRequest {
                prompt: "hello".into(),
                model: "gpt-x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            error,
            FetchError::Status {
                status: 429,
                message: Some("rate limited".into())
            }
        );
        assert_eq!(error.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn test_non_success_status_without_error_field() {
        let router = Router::new().route(
            "/api/send",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
        );
        let base_url = spawn_server(router).await;
        let error = client(&base_url)
            .send(&SendRequest {
                prompt: "hello".into(),
                model: "gpt-x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Request failed");
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_invalid_json() {
        let router = Router::new().route(
            "/api/send",
            post(|| async { ([(CONTENT_TYPE, "text/html")], "<html>oops</html>").into_response() }),
        );
        let base_url = spawn_server(router).await;
        let error = client(&base_url)
            .send(&SendRequest {
                prompt: "hello".into(),
                model: "gpt-x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error, FetchError::InvalidJson);
        assert_eq!(error.to_string(), "Invalid JSON from server");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_invalid_json() {
        let router = Router::new().route(
            "/api/carbon-intensity",
            get(|| async { Json(json!({"unexpected": true})) }),
        );
        let base_url = spawn_server(router).await;
        let error = client(&base_url).carbon_intensity().await.unwrap_err();
        assert_eq!(error, FetchError::InvalidJson);
    }

    #[tokio::test]
    async fn test_schedule_posts_exact_body() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);
        let router = Router::new().route(
            "/api/schedule",
            post(move |Json(body): Json<Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({"message": "scheduled"}))
                }
            }),
        );
        let base_url = spawn_server(router).await;
        let response = client(&base_url)
            .schedule(&ScheduleRequest {
                prompt: "hello".into(),
                model: "gpt-x".into(),
                schedule: "2024-01-01T00:00".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "scheduled");
        assert_eq!(
            captured.lock().unwrap().clone(),
            Some(json!({"prompt": "hello", "model": "gpt-x", "schedule": "2024-01-01T00:00"}))
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let error = client(&format!("http://{addr}")).prompts().await.unwrap_err();
        assert!(matches!(error, FetchError::Transport(_)));
    }
}
