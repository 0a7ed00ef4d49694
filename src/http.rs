//! HTTP transport for the Overseerr API
//!
//! Every resource operation funnels through [`send`], which issues a single
//! request described by a [`RequestSpec`], bounds it by a deadline, retries
//! connection failures according to a [`RetryPolicy`] and classifies the
//! outcome into a JSON payload or an [`HttpError`].

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Deadline applied to a request when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors produced by the transport layer
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request did not complete within its deadline
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: Url, timeout: Duration },

    /// The server could not be reached, even after retrying
    #[error("Failed to communicate with {url} after {attempts} attempt(s): {source}")]
    Connection {
        url: Url,
        attempts: u32,
        source: reqwest::Error,
    },

    /// The request could not be built or sent, e.g. a redirect loop
    #[error("Request to {url} failed: {source}")]
    Request { url: Url, source: reqwest::Error },

    /// The server answered but the body could not be read to the end
    #[error("Failed to read HTTP {status} response from {url}: {source}")]
    ResponseBody {
        url: Url,
        status: StatusCode,
        source: reqwest::Error,
    },

    /// The server answered with a 4xx or 5xx status
    #[error("Server responded with HTTP {status}: {detail}")]
    Server { status: StatusCode, detail: Value },

    /// The server declared a JSON body but sent something unparseable
    #[error("Malformed JSON response from {url}: {source}")]
    MalformedJson {
        url: Url,
        source: serde_json::Error,
    },
}

/// A query parameter value before it is put on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl QueryValue {
    /// Renders the value the way the API expects it; booleans become
    /// lowercase `true`/`false`.
    pub fn to_query_string(&self) -> String {
        match self {
            QueryValue::Text(text) => text.clone(),
            QueryValue::Bool(true) => "true".to_string(),
            QueryValue::Bool(false) => "false".to_string(),
            QueryValue::Int(number) => number.to_string(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

/// Request body variants
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    /// A JSON document
    Json(Value),
}

/// Immutable description of a single API request
///
/// Built with the chained methods below and handed to [`send`].
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: Url,
    query: Vec<(String, QueryValue)>,
    body: Option<Body>,
    headers: Vec<(String, String)>,
    timeout: Duration,
}

impl RequestSpec {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Appends a query parameter
    pub fn query(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Appends a query parameter only when a value is present
    pub fn query_opt<V: Into<QueryValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Attaches a JSON body and the matching content type header
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self.header(CONTENT_TYPE.as_str(), "application/json")
    }

    /// Attaches a form encoded body
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Some(Body::Form(pairs));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Query parameters as they are transmitted
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(key, value)| (key.clone(), value.to_query_string()))
            .collect()
    }

    fn to_builder(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut builder = client.request(self.method.clone(), self.url.clone());

        if !self.query.is_empty() {
            builder = builder.query(&self.query_pairs());
        }

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match &self.body {
            Some(Body::Json(value)) => builder.json(value),
            Some(Body::Form(pairs)) => builder.form(pairs),
            None => builder,
        }
    }
}

/// Exponential backoff schedule for connection failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubled for every further one
    pub base_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// How a single attempt failed
#[derive(Debug)]
pub(crate) enum AttemptError<E> {
    /// Worth trying again after a delay
    Retryable(E),
    /// Surfaces immediately
    Fatal(HttpError),
}

/// Why a retried operation gave up
#[derive(Debug)]
pub(crate) enum RetryError<E> {
    Exhausted { attempts: u32, last: E },
    Fatal(HttpError),
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(exponent))
            .min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails fatally or the attempt
    /// budget is spent. The closure receives the 1-based attempt number.
    pub(crate) async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        E: std::fmt::Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AttemptError<E>>>,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Fatal(error)) => return Err(RetryError::Fatal(error)),
                Err(AttemptError::Retryable(error)) => {
                    if attempt >= self.max_attempts {
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            last: error,
                        });
                    }

                    let delay = self.delay_after(attempt);
                    warn!(attempt, ?delay, %error, "connection failed, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Sends a request and classifies the response
///
/// Success yields the parsed JSON body, or `{"message": <text>}` when the
/// server answered with something other than JSON. Timeouts are not retried;
/// connection failures are retried according to `policy`.
///
/// # Errors
///
/// Returns [`HttpError::Timeout`], [`HttpError::Connection`] once retries are
/// exhausted, [`HttpError::Request`] for failures that are not worth
/// retrying, [`HttpError::ResponseBody`] when a response breaks off,
/// [`HttpError::Server`] for 4xx/5xx responses and
/// [`HttpError::MalformedJson`] for unparseable JSON bodies.
pub async fn send(
    client: &reqwest::Client,
    request: &RequestSpec,
    policy: &RetryPolicy,
) -> Result<Value, HttpError> {
    let outcome = policy
        .run(|attempt| async move {
            debug!(method = %request.method, url = %request.url, attempt, "sending request");
            match tokio::time::timeout(request.timeout, execute(client, request)).await {
                Ok(result) => result,
                Err(_) => Err(AttemptError::Fatal(timeout_error(request))),
            }
        })
        .await;

    match outcome {
        Ok(payload) => Ok(payload),
        Err(RetryError::Fatal(error)) => Err(error),
        Err(RetryError::Exhausted { attempts, last }) => Err(HttpError::Connection {
            url: request.url.clone(),
            attempts,
            source: last,
        }),
    }
}

/// Performs one attempt. The body is always read to the end so the
/// connection goes back to the pool, on the error path as well.
/// Nothing is retried once a status line has arrived.
async fn execute(
    client: &reqwest::Client,
    request: &RequestSpec,
) -> Result<Value, AttemptError<reqwest::Error>> {
    let response = request
        .to_builder(client)
        .send()
        .await
        .map_err(|error| classify_send_error(request, error))?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.text().await.map_err(|source| {
        if source.is_timeout() {
            AttemptError::Fatal(timeout_error(request))
        } else {
            AttemptError::Fatal(HttpError::ResponseBody {
                url: request.url.clone(),
                status,
                source,
            })
        }
    })?;

    debug!(%status, url = %request.url, "received response");

    if status.is_client_error() || status.is_server_error() {
        return Err(AttemptError::Fatal(HttpError::Server {
            status,
            detail: error_detail(&content_type, body),
        }));
    }

    if is_json(&content_type) {
        serde_json::from_str(&body).map_err(|source| {
            AttemptError::Fatal(HttpError::MalformedJson {
                url: request.url.clone(),
                source,
            })
        })
    } else {
        Ok(json!({ "message": body }))
    }
}

/// Connect failures and request-level I/O errors before any response are
/// retryable; redirect and builder errors are not.
fn classify_send_error(
    request: &RequestSpec,
    error: reqwest::Error,
) -> AttemptError<reqwest::Error> {
    if error.is_timeout() {
        AttemptError::Fatal(timeout_error(request))
    } else if error.is_connect() || error.is_request() {
        AttemptError::Retryable(error)
    } else {
        AttemptError::Fatal(HttpError::Request {
            url: request.url.clone(),
            source: error,
        })
    }
}

fn timeout_error(request: &RequestSpec) -> HttpError {
    HttpError::Timeout {
        url: request.url.clone(),
        timeout: request.timeout,
    }
}

fn is_json(content_type: &str) -> bool {
    content_type.contains("application/json")
}

/// Error bodies are kept as JSON when possible, otherwise wrapped as a message
fn error_detail(content_type: &str, body: String) -> Value {
    if is_json(content_type) {
        if let Ok(detail) = serde_json::from_str(&body) {
            return detail;
        }
    }
    json!({ "message": body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn url() -> Url {
        Url::parse("http://localhost:5055/api/v1/status").unwrap()
    }

    #[test]
    fn test_query_values_normalized() {
        let request = RequestSpec::get(url())
            .query("is4k", true)
            .query("watched", false)
            .query("take", 20_u32)
            .query("sort", "added")
            .query_opt::<&str>("filter", None);

        assert_eq!(
            request.query_pairs(),
            vec![
                ("is4k".to_string(), "true".to_string()),
                ("watched".to_string(), "false".to_string()),
                ("take".to_string(), "20".to_string()),
                ("sort".to_string(), "added".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_body_adds_content_type() {
        let request = RequestSpec::new(Method::POST, url()).json(json!({ "a": 1 }));

        assert_eq!(request.body(), Some(&Body::Json(json!({ "a": 1 }))));
        assert!(
            request
                .headers()
                .iter()
                .any(|(name, value)| name == "content-type" && value == "application/json")
        );
    }

    #[test]
    fn test_delay_doubles_until_capped() {
        let policy = RetryPolicy::new(10, Duration::from_secs(1), Duration::from_secs(5));

        assert_eq!(policy.delay_after(1), Duration::from_secs(1));
        assert_eq!(policy.delay_after(2), Duration::from_secs(2));
        assert_eq!(policy.delay_after(3), Duration::from_secs(4));
        assert_eq!(policy.delay_after(4), Duration::from_secs(5));
        assert_eq!(policy.delay_after(40), Duration::from_secs(5));
    }

    #[test]
    fn test_error_detail_wraps_text() {
        assert_eq!(
            error_detail("text/html", "Bad Gateway".to_string()),
            json!({ "message": "Bad Gateway" })
        );
        assert_eq!(
            error_detail("application/json; charset=utf-8", r#"{"error":"nope"}"#.to_string()),
            json!({ "error": "nope" })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_five_times_with_increasing_delay() {
        let policy = RetryPolicy::default();
        let calls: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

        let result: Result<(), _> = policy
            .run(|_| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.lock().unwrap().push(Instant::now());
                    Err(AttemptError::Retryable("connection refused"))
                }
            })
            .await;

        match result {
            Err(RetryError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 5);
                assert_eq!(last, "connection refused");
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        let gaps: Vec<Duration> = calls.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(gaps.windows(2).all(|g| g[1] > g[0]), "gaps: {gaps:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(Mutex::new(0_u32));

        let result: Result<(), RetryError<&str>> = policy
            .run(|_| {
                let calls = Arc::clone(&calls);
                async move {
                    *calls.lock().unwrap() += 1;
                    Err(AttemptError::Fatal(HttpError::Timeout {
                        url: url(),
                        timeout: DEFAULT_TIMEOUT,
                    }))
                }
            })
            .await;

        assert!(matches!(
            result,
            Err(RetryError::Fatal(HttpError::Timeout { .. }))
        ));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let policy = RetryPolicy::default();

        let result: Result<u32, RetryError<&str>> = policy
            .run(|attempt| async move {
                if attempt < 3 {
                    Err(AttemptError::Retryable("reset"))
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert!(matches!(result, Ok(3)));
    }
}
