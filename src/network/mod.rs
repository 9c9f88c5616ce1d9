use crate::{
    models::{PredictionInput, PredictionOutput},
    plan::chunk_size_bytes,
};
use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// Client for a remote advisor's `predict-chunk-size` endpoint.
#[derive(Clone)]
pub struct OptimizerClient {
    base_url: String,
    client: reqwest::Client,
}

impl OptimizerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/predict-chunk-size", self.base_url)
    }

    pub async fn predict(&self, input: &PredictionInput) -> Result<PredictionOutput> {
        let endpoint = self.endpoint();
        tracing::debug!(%endpoint, size_bytes = input.size_bytes, "requesting chunk size");

        let resp = self
            .client
            .post(&endpoint)
            .json(input)
            .send()
            .await
            .with_context(|| format!("POST {endpoint}"))?;
        if !resp.status().is_success() {
            return Err(anyhow!("optimizer service returned status {}", resp.status()));
        }

        let output: PredictionOutput = resp
            .json()
            .await
            .context("decode optimizer response")?;
        validate_prediction(&output)?;
        Ok(output)
    }

    /// Same as [`predict`](Self::predict), converted to bytes.
    pub async fn predict_chunk_bytes(&self, input: &PredictionInput) -> Result<u64> {
        let output = self.predict(input).await?;
        Ok(chunk_size_bytes(output.chunk_size_mb))
    }
}

pub fn validate_prediction(output: &PredictionOutput) -> Result<()> {
    if !output.chunk_size_mb.is_finite() || output.chunk_size_mb <= 0.0 {
        return Err(anyhow!(
            "invalid chunk_size_mb from service: {}",
            output.chunk_size_mb
        ));
    }
    Ok(())
}
