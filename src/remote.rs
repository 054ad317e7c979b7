// src/remote.rs
// Remote zero-shot classification client. Best-effort and fail-open: the
// caller cannot distinguish "not classified" from "classified as nothing",
// which is the accepted contract. Budget enforcement lives in the caller.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};

/// Top label and its confidence as returned by the remote endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteVerdict {
    pub label: String,
    pub score: f32,
}

#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Any network error, timeout, non-2xx status, or malformed body yields
    /// `None` rather than an error.
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Option<RemoteVerdict>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// HuggingFace inference API client (zero-shot pipeline, e.g.
/// facebook/bart-large-mnli). Requires a bearer token; the caller checks
/// `RemoteConfig::is_active` before invoking.
pub struct HfClassifier {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HfClassifier {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("newswatch/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ClassifyReq<'a> {
    inputs: &'a str,
    parameters: ClassifyParams<'a>,
}

#[derive(Serialize)]
struct ClassifyParams<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Deserialize)]
struct ClassifyResp {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[async_trait]
impl ZeroShotClassifier for HfClassifier {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> Option<RemoteVerdict> {
        let req = ClassifyReq {
            inputs: text,
            parameters: ClassifyParams { candidate_labels },
        };

        let resp = match self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                counter!("poll_remote_errors_total").increment(1);
                tracing::warn!(error = ?e, "remote classification request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            counter!("poll_remote_errors_total").increment(1);
            tracing::warn!(status = %resp.status(), "remote classification non-success");
            return None;
        }

        let body: ClassifyResp = match resp.json().await {
            Ok(b) => b,
            Err(e) => {
                counter!("poll_remote_errors_total").increment(1);
                tracing::warn!(error = ?e, "remote classification malformed body");
                return None;
            }
        };
        let Some(label) = body.labels.first().cloned() else {
            counter!("poll_remote_errors_total").increment(1);
            tracing::warn!("remote classification returned no labels");
            return None;
        };
        let score = body.scores.first().copied().unwrap_or(0.0);
        Some(RemoteVerdict { label, score })
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}

/// Deterministic double for tests and local runs: always returns the fixed
/// verdict and counts how often it was invoked.
pub struct FixedClassifier {
    verdict: Option<RemoteVerdict>,
    calls: AtomicU32,
}

impl FixedClassifier {
    pub fn new(verdict: Option<RemoteVerdict>) -> Self {
        Self {
            verdict,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZeroShotClassifier for FixedClassifier {
    async fn classify(&self, _text: &str, _candidate_labels: &[&str]) -> Option<RemoteVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
