use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use uuid::Uuid;

const SCORE_FLOOR: f64 = 60.0;
const SCORE_SPAN: u128 = 36;

/// Estimates how closely a return photo matches the dispatch photo, as a
/// percentage in [0, 100]. Implementations may be slow (real model
/// inference); callers treat one call as a single in-flight unit of work
/// per order.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    async fn score(&self, dispatch_photo: &str, return_photo: &str) -> f64;
}

/// Stand-in for a real image-similarity model: waits out a configurable
/// analysis delay, then draws a score in [60, 95] from UUID entropy.
pub struct SimulatedScorer {
    analysis_delay: Duration,
}

impl SimulatedScorer {
    pub fn new(analysis_delay: Duration) -> Self {
        Self { analysis_delay }
    }
}

#[async_trait]
impl SimilarityScorer for SimulatedScorer {
    async fn score(&self, _dispatch_photo: &str, _return_photo: &str) -> f64 {
        if !self.analysis_delay.is_zero() {
            sleep(self.analysis_delay).await;
        }

        let entropy = Uuid::new_v4().as_u128();
        SCORE_FLOOR + (entropy % SCORE_SPAN) as f64
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{SCORE_FLOOR, SCORE_SPAN, SimilarityScorer, SimulatedScorer};

    #[tokio::test]
    async fn simulated_scores_stay_in_range() {
        let scorer = SimulatedScorer::new(Duration::ZERO);
        let ceiling = SCORE_FLOOR + (SCORE_SPAN - 1) as f64;

        for _ in 0..200 {
            let score = scorer.score("imgA", "imgB").await;
            assert!(
                (SCORE_FLOOR..=ceiling).contains(&score),
                "score {score} out of range"
            );
        }
    }
}
