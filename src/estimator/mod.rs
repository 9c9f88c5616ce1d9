//! Chunk size estimation.
//!
//! [`HeuristicEstimator`] is a rule table standing in for a trained regression
//! model. Anything that implements [`ChunkSizeEstimator`] can be served by the
//! API in its place.

use crate::models::{PredictionInput, PredictionOutput};

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Smallest chunk size the advisor will ever return, in MB.
pub const MIN_CHUNK_SIZE_MB: f64 = 4.0;
/// Largest chunk size the advisor will ever return, in MB.
pub const MAX_CHUNK_SIZE_MB: f64 = 256.0;

pub trait ChunkSizeEstimator: Send + Sync {
    /// Recommended chunk size in MB, always within
    /// [`MIN_CHUNK_SIZE_MB`, `MAX_CHUNK_SIZE_MB`].
    fn estimate(
        &self,
        size_bytes: i64,
        bandwidth_mbps: Option<f64>,
        latency_ms: Option<f64>,
    ) -> f64;

    fn predict(&self, input: &PredictionInput) -> PredictionOutput {
        PredictionOutput {
            chunk_size_mb: self.estimate(
                input.size_bytes,
                input.estimated_bandwidth_mbps,
                input.latency_ms,
            ),
        }
    }
}

pub fn clamp_chunk_size(chunk_size_mb: f64) -> f64 {
    chunk_size_mb.min(MAX_CHUNK_SIZE_MB).max(MIN_CHUNK_SIZE_MB)
}

/// A file size tier: files up to and including `max_size_mb` get `base_mb`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTier {
    pub max_size_mb: f64,
    pub base_mb: f64,
}

/// A two-sided multiplier on a network measurement. Values strictly above
/// `above` are scaled by `above_factor`, values strictly below `below` by
/// `below_factor`. Anything in between, or an absent measurement, leaves the
/// chunk size alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub above: f64,
    pub above_factor: f64,
    pub below: f64,
    pub below_factor: f64,
}

impl Adjustment {
    pub fn factor(&self, measurement: Option<f64>) -> f64 {
        match measurement {
            Some(value) if value > self.above => self.above_factor,
            Some(value) if value < self.below => self.below_factor,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicRules {
    /// Checked in ascending order; the first tier that fits wins.
    pub size_tiers: Vec<SizeTier>,
    /// Base for files larger than every tier.
    pub largest_base_mb: f64,
    pub bandwidth: Adjustment,
    pub latency: Adjustment,
}

impl Default for HeuristicRules {
    fn default() -> Self {
        Self {
            size_tiers: vec![
                SizeTier {
                    max_size_mb: 100.0,
                    base_mb: 8.0,
                },
                SizeTier {
                    max_size_mb: 1024.0,
                    base_mb: 32.0,
                },
                SizeTier {
                    max_size_mb: 10_240.0,
                    base_mb: 64.0,
                },
            ],
            largest_base_mb: 128.0,
            // Faster links can keep bigger chunks in flight.
            bandwidth: Adjustment {
                above: 200.0,
                above_factor: 1.5,
                below: 20.0,
                below_factor: 0.75,
            },
            // Long round trips favour fewer, bigger chunks.
            latency: Adjustment {
                above: 100.0,
                above_factor: 1.25,
                below: 20.0,
                below_factor: 0.9,
            },
        }
    }
}

impl HeuristicRules {
    pub fn base_for(&self, size_mb: f64) -> f64 {
        self.size_tiers
            .iter()
            .find(|tier| size_mb <= tier.max_size_mb)
            .map(|tier| tier.base_mb)
            .unwrap_or(self.largest_base_mb)
    }
}

/// Placeholder for a LightGBM/XGBoost style model: picks a base chunk from the
/// file size, scales it for bandwidth then latency, and clamps the result.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEstimator {
    rules: HeuristicRules,
}

impl HeuristicEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: HeuristicRules) -> Self {
        Self { rules }
    }

}

impl ChunkSizeEstimator for HeuristicEstimator {
    fn estimate(
        &self,
        size_bytes: i64,
        bandwidth_mbps: Option<f64>,
        latency_ms: Option<f64>,
    ) -> f64 {
        let size_mb = size_bytes as f64 / BYTES_PER_MB;

        let mut chunk_mb = self.rules.base_for(size_mb);
        chunk_mb *= self.rules.bandwidth.factor(bandwidth_mbps);
        chunk_mb *= self.rules.latency.factor(latency_ms);

        clamp_chunk_size(chunk_mb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: i64 = 1024 * 1024;

    fn estimate(size_mb: i64, bandwidth: Option<f64>, latency: Option<f64>) -> f64 {
        HeuristicEstimator::new().estimate(size_mb * MB, bandwidth, latency)
    }

    #[test]
    fn base_follows_size_tiers() {
        assert_eq!(estimate(50, None, None), 8.0);
        assert_eq!(estimate(500, None, None), 32.0);
        assert_eq!(estimate(5_000, None, None), 64.0);
        assert_eq!(estimate(20_000, None, None), 128.0);
    }

    #[test]
    fn size_thresholds_are_inclusive() {
        assert_eq!(estimate(100, None, None), 8.0);
        assert_eq!(estimate(1024, None, None), 32.0);
        assert_eq!(estimate(10_240, None, None), 64.0);

        let est = HeuristicEstimator::new();
        assert_eq!(est.estimate(100 * MB + 1, None, None), 32.0);
        assert_eq!(est.estimate(1024 * MB + 1, None, None), 64.0);
        assert_eq!(est.estimate(10_240 * MB + 1, None, None), 128.0);
    }

    #[test]
    fn empty_file_gets_smallest_base() {
        assert_eq!(HeuristicEstimator::new().estimate(0, None, None), 8.0);
    }

    #[test]
    fn negative_size_gets_smallest_base() {
        let est = HeuristicEstimator::new();
        assert_eq!(est.estimate(-1, None, None), 8.0);
        assert_eq!(est.estimate(i64::MIN, Some(10.0), None), 6.0);
    }

    #[test]
    fn bandwidth_scales_base() {
        assert_eq!(estimate(50, Some(300.0), None), 12.0);
        assert_eq!(estimate(50, Some(10.0), None), 6.0);
        assert_eq!(estimate(50, Some(100.0), None), 8.0);
    }

    #[test]
    fn bandwidth_thresholds_are_exclusive() {
        assert_eq!(estimate(50, Some(200.0), None), 8.0);
        assert_eq!(estimate(50, Some(20.0), None), 8.0);
    }

    #[test]
    fn latency_thresholds_are_exclusive() {
        assert_eq!(estimate(50, None, Some(100.0)), 8.0);
        assert_eq!(estimate(50, None, Some(20.0)), 8.0);
        assert_eq!(estimate(50, None, Some(150.0)), 10.0);
        assert!((estimate(50, None, Some(5.0)) - 7.2).abs() < 1e-9);
    }

    #[test]
    fn adjustments_compound_bandwidth_then_latency() {
        assert_eq!(estimate(500, Some(300.0), Some(150.0)), 60.0);
        assert!((estimate(50, Some(10.0), Some(5.0)) - 5.4).abs() < 1e-9);
    }

    #[test]
    fn largest_tier_with_both_boosts_stays_below_max() {
        assert_eq!(estimate(50_000, Some(300.0), Some(150.0)), 240.0);
    }

    #[test]
    fn clamps_to_max_when_raw_product_is_too_large() {
        let rules = HeuristicRules {
            largest_base_mb: 512.0,
            ..HeuristicRules::default()
        };
        let est = HeuristicEstimator::with_rules(rules);
        assert_eq!(est.estimate(50_000 * MB, Some(300.0), Some(150.0)), 256.0);
    }

    #[test]
    fn clamps_to_min_when_base_is_tiny() {
        let mut rules = HeuristicRules::default();
        rules.size_tiers[0].base_mb = 1.0;
        let est = HeuristicEstimator::with_rules(rules);
        assert_eq!(est.estimate(MB, Some(10.0), Some(5.0)), 4.0);
    }

    #[test]
    fn clamp_chunk_size_bounds() {
        assert_eq!(clamp_chunk_size(0.5), MIN_CHUNK_SIZE_MB);
        assert_eq!(clamp_chunk_size(1_000.0), MAX_CHUNK_SIZE_MB);
        assert_eq!(clamp_chunk_size(42.0), 42.0);
    }

    #[test]
    fn predict_ignores_mime_type() {
        let est = HeuristicEstimator::new();
        let mut input = PredictionInput {
            size_bytes: 500 * MB,
            mime_type: None,
            estimated_bandwidth_mbps: Some(300.0),
            latency_ms: Some(150.0),
        };
        let plain = est.predict(&input);
        input.mime_type = Some("video/mp4".into());
        assert_eq!(est.predict(&input), plain);
        assert_eq!(plain.chunk_size_mb, 60.0);
    }

    #[test]
    fn estimator_is_usable_as_trait_object() {
        struct Fixed;
        impl ChunkSizeEstimator for Fixed {
            fn estimate(&self, _: i64, _: Option<f64>, _: Option<f64>) -> f64 {
                16.0
            }
        }

        let estimators: Vec<Box<dyn ChunkSizeEstimator>> =
            vec![Box::new(Fixed), Box::new(HeuristicEstimator::new())];
        let outputs: Vec<f64> = estimators
            .iter()
            .map(|e| e.estimate(50 * MB, None, None))
            .collect();
        assert_eq!(outputs, vec![16.0, 8.0]);
    }
}
