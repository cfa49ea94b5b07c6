//! Verifier port: the AI engine boundary.
//!
//! Callers only ever see the `Verifier` trait, so the simulated engine
//! can be swapped for a real extraction/scoring pipeline without
//! touching the workflow. The simulation reproduces the portal's
//! staged progress (upload, analysis, scoring, wrap-up) with timed
//! delays and a confidence draw from a fixed range.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Document;

/// What a verification run decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Verified,
    Rejected,
}

/// Result of one verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    pub verdict: Verdict,
    /// 0–100 confidence in the verdict.
    pub confidence: u8,
}

/// The verification engine boundary.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, document: &Document) -> VerificationOutcome;
}

/// Tuning for the simulated engine.
#[derive(Debug, Clone)]
pub struct SimulatedVerifierConfig {
    /// One sleep per progress stage the portal shows.
    pub stage_delays: [Duration; 4],
    /// Confidence is drawn uniformly from this range.
    pub confidence_range: Range<u8>,
}

impl Default for SimulatedVerifierConfig {
    fn default() -> Self {
        Self {
            stage_delays: [
                Duration::from_millis(1000),
                Duration::from_millis(1500),
                Duration::from_millis(1000),
                Duration::from_millis(500),
            ],
            confidence_range: 70..100,
        }
    }
}

impl SimulatedVerifierConfig {
    /// Zero-delay configuration for tests.
    pub fn instant() -> Self {
        Self {
            stage_delays: [Duration::ZERO; 4],
            ..Self::default()
        }
    }
}

/// Stand-in for the AI engine. Performs no inspection of the file:
/// every document passes, with a random confidence score. Rejection
/// only ever comes from an HR override.
pub struct SimulatedVerifier {
    config: SimulatedVerifierConfig,
}

impl SimulatedVerifier {
    pub fn new(config: SimulatedVerifierConfig) -> Self {
        Self { config }
    }
}

impl Default for SimulatedVerifier {
    fn default() -> Self {
        Self::new(SimulatedVerifierConfig::default())
    }
}

#[async_trait]
impl Verifier for SimulatedVerifier {
    async fn verify(&self, document: &Document) -> VerificationOutcome {
        for (stage, delay) in self.config.stage_delays.iter().enumerate() {
            tokio::time::sleep(*delay).await;
            tracing::debug!(document_id = %document.id, stage, "Verification stage complete");
        }

        let confidence = rand::thread_rng().gen_range(self.config.confidence_range.clone());
        tracing::info!(
            document_id = %document.id,
            confidence,
            "Simulated verification finished"
        );

        VerificationOutcome {
            verdict: Verdict::Verified,
            confidence,
        }
    }
}
