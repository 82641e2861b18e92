//! HTTP client for the fit and curve-sampling endpoints.
//!
//! Two JSON-over-HTTP POST contracts are consumed:
//!
//! - `POST /api/otimizar` — nonlinear fit over uploaded samples
//! - `POST /api/curva` — model evaluation at an explicit parameter vector
//!
//! Responses are classified three ways, in order: structured success,
//! structured error (message taken from the body's `error` field), or an
//! unparsable body. Unparsable bodies are sniffed for the substring `"504"`
//! because the production gateway returns an HTML/plaintext 504 page with no
//! structured body; everything else unparsable is reported with fixed
//! guidance rather than raw page content. The raw body goes to stderr only.

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    CurveResponse, CurveSettings, FitResponse, FitSettings, ParamVector, Sample, SampleWindow,
};
use crate::error::AppError;

pub const FIT_PATH: &str = "/api/otimizar";
pub const CURVE_PATH: &str = "/api/curva";

const ENV_BASE_URL: &str = "PILEFIT_API_URL";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Fixed guidance shown when the gateway timed out behind the service.
pub const TIMEOUT_GUIDANCE: &str =
    "Request timed out (gateway returned 504). The 9-parameter regression can exceed the \
     server's time limit; retry with fewer samples or a looser tolerance.";

/// Fixed guidance shown for any other unparsable response.
pub const MALFORMED_GUIDANCE: &str =
    "Server returned a response this client cannot interpret (non-JSON). Check the service logs.";

/// Fit request payload.
///
/// `chute` is omitted from the wire entirely when no guess was resolved; an
/// absent key (not `null`, not `[]`) tells the service to pick its own
/// default starting point.
#[derive(Debug, Clone, Serialize)]
pub struct FitRequest {
    pub tempos: Vec<f64>,
    pub temperaturas: Vec<f64>,
    pub config: FitSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chute: Option<ParamVector>,
}

impl FitRequest {
    pub fn new(samples: &[Sample], config: FitSettings, chute: Option<ParamVector>) -> Self {
        Self {
            tempos: samples.iter().map(|s| s.t).collect(),
            temperaturas: samples.iter().map(|s| s.temp).collect(),
            config,
            chute,
        }
    }
}

/// Curve-sampling request payload.
#[derive(Debug, Clone, Serialize)]
pub struct CurveRequest {
    pub params: ParamVector,
    pub config: CurveSettings,
    pub tempos: Vec<f64>,
}

impl CurveRequest {
    pub fn new(params: ParamVector, config: CurveSettings, window: SampleWindow) -> Self {
        Self {
            params,
            config,
            tempos: time_grid(window.t_min, window.t_max, window.n),
        }
    }
}

/// `n` points linearly spaced from `t_min` to `t_max`, both inclusive.
///
/// Callers guarantee `n >= 2` (window resolution clamps to a floor of 50).
pub fn time_grid(t_min: f64, t_max: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n)
        .map(|i| t_min + (t_max - t_min) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Transport-level failure classes for unparsable response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Body sniffed as a gateway 504 page.
    Timeout,
    /// Body is not JSON, or JSON of an unexpected shape.
    Malformed,
}

/// Three-way classification of a service response.
///
/// Modeled as an explicit variant rather than thrown errors so every caller
/// must handle all three paths.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success(T),
    ServiceError(String),
    Transport(TransportError),
}

/// Classify a response from its transport success flag and raw body text.
pub fn classify_response<T: DeserializeOwned>(transport_ok: bool, body: &str) -> Outcome<T> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) if transport_ok => match serde_json::from_value::<T>(value) {
            Ok(parsed) => Outcome::Success(parsed),
            Err(_) => Outcome::Transport(TransportError::Malformed),
        },
        Ok(value) => {
            let message = value
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| "API error".to_string());
            Outcome::ServiceError(message)
        }
        Err(_) => {
            if body.contains("504") {
                Outcome::Transport(TransportError::Timeout)
            } else {
                Outcome::Transport(TransportError::Malformed)
            }
        }
    }
}

/// Blocking client for the estimation service.
///
/// Carries a per-client in-flight flag: each user action is expected to have
/// at most one outstanding call, so a second call while one is outstanding is
/// refused instead of queued.
pub struct ApiClient {
    client: Client,
    base_url: String,
    in_flight: AtomicBool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Resolve the base URL: explicit flag, then `PILEFIT_API_URL` from the
    /// environment (`.env` honored), then the local default.
    pub fn from_env(flag: Option<String>) -> Self {
        let base_url = flag.unwrap_or_else(|| {
            dotenvy::dotenv().ok();
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        });
        Self::new(base_url)
    }

    pub fn fit(&self, request: &FitRequest) -> Result<Outcome<FitResponse>, AppError> {
        self.post(FIT_PATH, request)
    }

    pub fn curve(&self, request: &CurveRequest) -> Result<Outcome<CurveResponse>, AppError> {
        self.post(CURVE_PATH, request)
    }

    fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Outcome<Resp>, AppError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let _guard = self.begin(path)?;

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| AppError::service(format!("Request to {url} failed: {e}")))?;

        let transport_ok = response.status().is_success();
        let body = response
            .text()
            .map_err(|e| AppError::service(format!("Failed to read response from {url}: {e}")))?;

        let outcome = classify_response(transport_ok, &body);
        if matches!(outcome, Outcome::Transport(_)) {
            // Diagnostics only; raw error pages never reach the user message.
            eprintln!("[pilefit] raw server response: {}", snippet(&body));
        }
        Ok(outcome)
    }

    fn begin(&self, path: &str) -> Result<FlightGuard<'_>, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::input(format!(
                "A request to {path} was refused: another call is still in flight."
            )));
        }
        Ok(FlightGuard {
            flag: &self.in_flight,
        })
    }
}

struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
