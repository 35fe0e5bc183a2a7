//! The request executor.
//!
//! Turns a declarative [`ApiRequest`] into a parsed envelope or a
//! classified [`ApiError`]. Every failure leaving this module has passed
//! through classification exactly once: transport errors, decode errors,
//! non-2xx statuses, and 2xx envelopes whose success flag is false.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use kiosk_core::ApiError;
use kiosk_core::ports::{
    ErrorMonitor, HttpTransport, Incident, RawResponse, RequestParts, TokenStore, TransportError,
};
use kiosk_shared::{Envelope, ErrorBody};

use crate::classify::{classify, Caught};
use crate::config::ClientConfig;
use crate::request::ApiRequest;

/// Issues requests over the transport port, attaching stored credentials
/// and normalizing every outcome.
pub struct Executor {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
    monitor: Arc<dyn ErrorMonitor>,
}

impl Executor {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
        monitor: Arc<dyn ErrorMonitor>,
    ) -> Self {
        Self {
            config,
            transport,
            tokens,
            monitor,
        }
    }

    /// Execute and parse the uniform envelope.
    ///
    /// An envelope carrying `success: false` is raised as a classified
    /// error even when the HTTP status was 2xx, so call sites never
    /// re-check the flag.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<T>, ApiError> {
        self.execute_cancellable(request, &CancellationToken::new())
            .await
    }

    /// [`execute`](Self::execute) with cooperative cancellation. A
    /// cancelled request classifies as the timeout variant.
    pub async fn execute_cancellable<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.build_url(&request)?;
        let raw = self.dispatch(&request, &url, cancel).await?;

        let envelope: Envelope<T> = match serde_json::from_slice(&raw.body) {
            Ok(envelope) => envelope,
            Err(error) => {
                return Err(self
                    .finish_error(&request.context, &url, classify(Caught::Decode(error.to_string())))
                    .await);
            }
        };

        if !envelope.success {
            let body = ErrorBody {
                status_code: Some(raw.status),
                message: Some(envelope.message.clone()),
                error: None,
                details: None,
                errors: envelope.errors.clone(),
            };
            let error = classify(Caught::Http {
                status: raw.status,
                body,
            });
            return Err(self.finish_error(&request.context, &url, error).await);
        }

        Ok(envelope)
    }

    /// Execute and return the raw JSON value of a 2xx response, without
    /// envelope enforcement. For endpoints whose responses do not reliably
    /// carry the envelope (order/VPS provisioning).
    pub async fn execute_value(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.build_url(&request)?;
        let raw = self
            .dispatch(&request, &url, &CancellationToken::new())
            .await?;
        match serde_json::from_slice(&raw.body) {
            Ok(value) => Ok(value),
            Err(error) => Err(self
                .finish_error(&request.context, &url, classify(Caught::Decode(error.to_string())))
                .await),
        }
    }

    /// Issue the request, retrying transient failures of idempotent
    /// methods, and classify whatever goes wrong.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, ApiError> {
        let parts = RequestParts {
            method: request.method,
            url: url.to_string(),
            headers: self.build_headers(request).await,
            body: request.body.clone(),
        };

        let attempts = if request.method.is_idempotent() {
            self.config.retry.max_retries + 1
        } else {
            1
        };

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(TransportError::Cancelled),
                result = self.transport.execute(parts.clone()) => result,
            };

            let caught = match result {
                Ok(raw) if raw.is_success() => return Ok(raw),
                Ok(raw) => {
                    // Error bodies are JSON when the backend produced them;
                    // proxies in between may answer with anything.
                    let body: ErrorBody = serde_json::from_slice(&raw.body).unwrap_or_default();
                    Caught::Http {
                        status: raw.status,
                        body,
                    }
                }
                Err(error) => Caught::Transport(error),
            };

            let error = classify(caught);
            if attempt < attempts && error.is_retryable() && !cancel.is_cancelled() {
                let delay = self.config.retry.delay_for(attempt);
                tracing::debug!(
                    context = %request.context,
                    url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(self.finish_error(&request.context, url, error).await);
        }
    }

    /// Log the classified error and forward server-class incidents to the
    /// monitor, then hand the error back for propagation.
    async fn finish_error(&self, context: &str, url: &str, error: ApiError) -> ApiError {
        if self.config.log_errors {
            tracing::error!(
                context,
                url,
                user_agent = %self.config.user_agent,
                status = error.status(),
                title = error.title(),
                detail = ?error,
                "{}",
                error.message()
            );
        }

        if error.is_server() {
            let incident = Incident::new(context, url, error.status(), error.message());
            if let Err(report_error) = self.monitor.report(incident).await {
                tracing::warn!(%report_error, "incident report failed");
            }
        }

        error
    }

    /// Absolute URLs pass through unchanged; relative paths are prefixed
    /// with the configured base URL. Only present query values serialize.
    fn build_url(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let raw = if request.path.starts_with("http://") || request.path.starts_with("https://") {
            request.path.clone()
        } else {
            format!(
                "{}{}",
                self.config.base_url.trim_end_matches('/'),
                request.path
            )
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::api(format!("Invalid request URL {raw:?}: {e}"), 500, None, None))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }

        Ok(url.into())
    }

    /// Default headers, then the bearer credential when requested and
    /// present, then caller overrides. A missing token silently omits the
    /// Authorization header entirely.
    async fn build_headers(&self, request: &ApiRequest) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];

        if request.authorize {
            if let Some(pair) = self.tokens.tokens().await {
                headers.push((
                    "Authorization".to_string(),
                    format!("Bearer {}", pair.access_token),
                ));
            }
        }

        for (name, value) in &request.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use kiosk_core::domain::TokenPair;
    use kiosk_core::ports::{HttpMethod, MonitorError};

    struct FakeTransport {
        requests: Mutex<Vec<RequestParts>>,
        responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    }

    impl FakeTransport {
        fn scripted(
            responses: impl IntoIterator<Item = Result<RawResponse, TransportError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into_iter().collect()),
            })
        }

        async fn request_count(&self) -> usize {
            self.requests.lock().await.len()
        }

        async fn last_request(&self) -> RequestParts {
            self.requests.lock().await.last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn execute(&self, request: RequestParts) -> Result<RawResponse, TransportError> {
            self.requests.lock().await.push(request);
            self.responses
                .lock()
                .await
                .pop_front()
                .unwrap_or(Err(TransportError::Failed("script exhausted".into())))
        }
    }

    struct MemoryTokens(Mutex<Option<TokenPair>>);

    #[async_trait]
    impl TokenStore for MemoryTokens {
        async fn tokens(&self) -> Option<TokenPair> {
            self.0.lock().await.clone()
        }
        async fn set_tokens(
            &self,
            tokens: Option<TokenPair>,
        ) -> Result<(), kiosk_core::ports::StoreError> {
            *self.0.lock().await = tokens;
            Ok(())
        }
        async fn user(&self) -> Option<kiosk_core::domain::User> {
            None
        }
        async fn set_user(
            &self,
            _user: Option<kiosk_core::domain::User>,
        ) -> Result<(), kiosk_core::ports::StoreError> {
            Ok(())
        }
        async fn clear_all(&self) -> Result<(), kiosk_core::ports::StoreError> {
            *self.0.lock().await = None;
            Ok(())
        }
    }

    struct RecordingMonitor(Mutex<Vec<Incident>>);

    #[async_trait]
    impl ErrorMonitor for RecordingMonitor {
        async fn report(&self, incident: Incident) -> Result<(), MonitorError> {
            self.0.lock().await.push(incident);
            Ok(())
        }
    }

    fn ok_body(json: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status: 200,
            body: json.as_bytes().to_vec(),
        })
    }

    fn status_body(status: u16, json: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status,
            body: json.as_bytes().to_vec(),
        })
    }

    fn test_config() -> ClientConfig {
        ClientConfig {
            base_url: "http://api.test".to_string(),
            retry: crate::RetryPolicy {
                max_retries: 2,
                base_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(5),
            },
            log_errors: false,
            ..ClientConfig::default()
        }
    }

    fn executor_with(
        transport: Arc<FakeTransport>,
        tokens: Option<TokenPair>,
    ) -> (Executor, Arc<RecordingMonitor>) {
        let monitor = Arc::new(RecordingMonitor(Mutex::new(Vec::new())));
        let executor = Executor::new(
            test_config(),
            transport,
            Arc::new(MemoryTokens(Mutex::new(tokens))),
            monitor.clone(),
        );
        (executor, monitor)
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_when_stored() {
        let transport = FakeTransport::scripted([ok_body(r#"{"success":true}"#)]);
        let (executor, _) = executor_with(
            transport.clone(),
            Some(TokenPair::new("tok-123".into(), "ref".into())),
        );

        executor
            .execute::<Value>(ApiRequest::get("/api/auth/me"))
            .await
            .unwrap();

        let request = transport.last_request().await;
        let auth = request
            .headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .cloned();
        assert_eq!(auth, Some(("Authorization".into(), "Bearer tok-123".into())));
    }

    #[tokio::test]
    async fn test_missing_token_omits_the_authorization_header() {
        let transport = FakeTransport::scripted([ok_body(r#"{"success":true}"#)]);
        let (executor, _) = executor_with(transport.clone(), None);

        executor
            .execute::<Value>(ApiRequest::get("/api/auth/me"))
            .await
            .unwrap();

        let request = transport.last_request().await;
        assert!(
            !request
                .headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("authorization")),
            "no Authorization header may be sent without a token"
        );
    }

    #[tokio::test]
    async fn test_relative_paths_join_the_base_url_with_query() {
        let transport = FakeTransport::scripted([ok_body(r#"{"success":true}"#)]);
        let (executor, _) = executor_with(transport.clone(), None);

        executor
            .execute::<Value>(
                ApiRequest::get("/api/tools")
                    .query("page", 2)
                    .maybe_query("search", None::<String>),
            )
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().await.url,
            "http://api.test/api/tools?page=2"
        );
    }

    #[tokio::test]
    async fn test_absolute_urls_pass_through_unchanged() {
        let transport = FakeTransport::scripted([ok_body(r#"{"success":true}"#)]);
        let (executor, _) = executor_with(transport.clone(), None);

        executor
            .execute::<Value>(ApiRequest::get("https://cdn.example.com/manifest.json"))
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().await.url,
            "https://cdn.example.com/manifest.json"
        );
    }

    #[tokio::test]
    async fn test_http_error_statuses_classify_per_table() {
        let transport = FakeTransport::scripted([status_body(
            401,
            r#"{"message":"Session expired"}"#,
        )]);
        let (executor, _) = executor_with(transport, None);

        let error = executor
            .execute::<Value>(ApiRequest::post("/api/orders"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Unauthorized { .. }));
        assert_eq!(error.message(), "Session expired");
    }

    #[tokio::test]
    async fn test_transport_failure_reaches_caller_as_one_classified_error() {
        let transport =
            FakeTransport::scripted([Err(TransportError::Offline("dns failure".into()))]);
        let (executor, _) = executor_with(transport, None);

        let error = executor
            .execute::<Value>(ApiRequest::post("/api/orders"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Network { .. }));
    }

    #[tokio::test]
    async fn test_success_false_envelope_is_raised_even_on_200() {
        let transport = FakeTransport::scripted([ok_body(
            r#"{"success":false,"message":"Số dư không đủ"}"#,
        )]);
        let (executor, _) = executor_with(transport, None);

        let error = executor
            .execute::<Value>(ApiRequest::post("/api/orders"))
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Số dư không đủ");
    }

    #[tokio::test]
    async fn test_idempotent_requests_retry_transient_failures() {
        let transport = FakeTransport::scripted([
            Err(TransportError::Timeout("slow".into())),
            status_body(503, r#"{"message":"warming up"}"#),
            ok_body(r#"{"success":true,"message":"OK"}"#),
        ]);
        let (executor, _) = executor_with(transport.clone(), None);

        let envelope = executor
            .execute::<Value>(ApiRequest::get("/api/tools"))
            .await
            .unwrap();
        assert!(envelope.success);
        assert_eq!(transport.request_count().await, 3);
    }

    #[tokio::test]
    async fn test_non_idempotent_requests_never_retry() {
        let transport = FakeTransport::scripted([
            Err(TransportError::Timeout("slow".into())),
            ok_body(r#"{"success":true}"#),
        ]);
        let (executor, _) = executor_with(transport.clone(), None);

        let error = executor
            .execute::<Value>(ApiRequest::post("/api/orders"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Timeout { .. }));
        assert_eq!(transport.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_client_rejections_do_not_retry() {
        let transport = FakeTransport::scripted([
            status_body(404, r#"{"message":"no such tool"}"#),
            ok_body(r#"{"success":true}"#),
        ]);
        let (executor, _) = executor_with(transport.clone(), None);

        let error = executor
            .execute::<Value>(ApiRequest::get("/api/tools/none"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::NotFound { .. }));
        assert_eq!(transport.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_server_errors_reach_the_monitor() {
        let transport = FakeTransport::scripted([status_body(
            502,
            r#"{"message":"upstream exploded"}"#,
        )]);
        let (executor, monitor) = executor_with(transport, None);

        let error = executor
            .execute::<Value>(ApiRequest::post("/api/orders").context("orders.create"))
            .await
            .unwrap_err();
        assert!(error.is_server());

        let incidents = monitor.0.lock().await;
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].status, 502);
        assert_eq!(incidents[0].context, "orders.create");
    }

    #[tokio::test]
    async fn test_non_server_errors_skip_the_monitor() {
        let transport = FakeTransport::scripted([status_body(404, r#"{"message":"gone"}"#)]);
        let (executor, monitor) = executor_with(transport, None);

        executor
            .execute::<Value>(ApiRequest::get("/api/tools/x"))
            .await
            .unwrap_err();
        assert!(monitor.0.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_classifies_as_timeout() {
        let transport = FakeTransport::scripted([ok_body(r#"{"success":true}"#)]);
        let (executor, _) = executor_with(transport.clone(), None);

        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = executor
            .execute_cancellable::<Value>(ApiRequest::get("/api/tools"), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Timeout { .. }));
        // The transport was never reached.
        assert_eq!(transport.request_count().await, 0);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_classified() {
        let transport = FakeTransport::scripted([ok_body("<html>gateway</html>")]);
        let (executor, _) = executor_with(transport, None);

        let error = executor
            .execute::<Value>(ApiRequest::get("/api/tools"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Api { .. }));
        assert_eq!(error.status(), 500);
    }

    #[tokio::test]
    async fn test_caller_header_overrides_win() {
        let transport = FakeTransport::scripted([ok_body(r#"{"success":true}"#)]);
        let (executor, _) = executor_with(transport.clone(), None);

        executor
            .execute::<Value>(
                ApiRequest::get("/api/files/1/raw").header("Accept", "application/octet-stream"),
            )
            .await
            .unwrap();

        let request = transport.last_request().await;
        let accepts: Vec<_> = request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("accept"))
            .collect();
        assert_eq!(accepts.len(), 1);
        assert_eq!(accepts[0].1, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_head_is_idempotent_and_get_like() {
        assert!(HttpMethod::Head.is_idempotent());
        assert!(HttpMethod::Delete.is_idempotent());
        assert!(!HttpMethod::Post.is_idempotent());
    }
}
