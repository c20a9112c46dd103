//! Crowd advisor: canned predictions and crowd optimizations.
//!
//! Nothing here models crowds. Results are chosen uniformly from fixed pools,
//! optimizations after an artificial delay standing in for a remote call.

use std::sync::Mutex;
use std::time::Duration;

use crate::model::{Area, CrowdOptimization, Prediction, PredictionKind, Priority};
use crate::random::{rng_from_seed, RandomSource};
use crate::sync::{lock, BusyCounter};

/// Artificial analysis delay for [CrowdAdvisor::generate_crowd_optimization].
pub const ANALYSIS_DELAY_MS: u64 = 2_000;

/// Most predictions kept by [CrowdAdvisor::update_prediction].
pub const PREDICTION_CAP: usize = 5;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seed_predictions() -> Vec<Prediction> {
    vec![
        Prediction {
            kind: PredictionKind::CrowdSurge,
            message: "Expected crowd surge in main sanctum area at 6:00 PM due to evening Aarti"
                .to_string(),
            confidence: 85,
            timeframe: "45 minutes".to_string(),
            recommendations: strings(&[
                "Deploy 2 additional security personnel",
                "Activate overflow queue management",
                "Send notification to pilgrims about expected wait times",
            ]),
            priority: Priority::Medium,
        },
        Prediction {
            kind: PredictionKind::OptimalTiming,
            message: "Optimal visiting conditions expected between 2:00 PM - 4:00 PM".to_string(),
            confidence: 92,
            timeframe: "Next 2 hours".to_string(),
            recommendations: strings(&[
                "Promote this time slot to new arrivals",
                "Offer expedited darshan booking",
                "Reduce security deployment in other areas",
            ]),
            priority: Priority::Low,
        },
    ]
}

fn optimization_pool() -> Vec<CrowdOptimization> {
    vec![
        CrowdOptimization {
            suggested_actions: strings(&[
                "Open secondary entrance to reduce main gate congestion",
                "Deploy mobile darshan booking kiosks in parking area",
                "Implement timed entry system for next 2 hours",
            ]),
            predicted_impact: "Reduce average wait time by 35%".to_string(),
            estimated_improvement: "25 minutes saved per pilgrim".to_string(),
        },
        CrowdOptimization {
            suggested_actions: strings(&[
                "Activate express lanes for elderly and disabled",
                "Set up temporary shade structures in queue areas",
                "Increase prasadam distribution points from 2 to 4",
            ]),
            predicted_impact: "Improve overall pilgrim satisfaction by 40%".to_string(),
            estimated_improvement: "Comfort index increased from 6.2 to 8.7".to_string(),
        },
    ]
}

/// Confidence spans and timeframe draws per prediction kind.
struct PredictionTemplate {
    message: &'static str,
    confidence_span: u32,
    confidence_low: i64,
    timeframe_span: u32,
    timeframe_low: i64,
    timeframe_unit: &'static str,
    recommendations: [&'static str; 3],
    priority: Priority,
}

fn template(kind: PredictionKind) -> PredictionTemplate {
    match kind {
        PredictionKind::CrowdSurge => PredictionTemplate {
            message: "Potential crowd surge detected based on social media activity and festival calendar",
            confidence_span: 30,
            confidence_low: 70,
            timeframe_span: 60,
            timeframe_low: 15,
            timeframe_unit: "minutes",
            recommendations: [
                "Increase security presence by 30%",
                "Activate emergency crowd control measures",
                "Send proactive notifications to incoming pilgrims",
            ],
            priority: Priority::High,
        },
        PredictionKind::WeatherImpact => PredictionTemplate {
            message: "Weather conditions may affect pilgrim flow and comfort levels",
            confidence_span: 25,
            confidence_low: 75,
            timeframe_span: 3,
            timeframe_low: 1,
            timeframe_unit: "hours",
            recommendations: [
                "Set up additional shade structures",
                "Increase water distribution points",
                "Monitor heat-related health issues",
            ],
            priority: Priority::Medium,
        },
        PredictionKind::SafetyRisk => PredictionTemplate {
            message: "Elevated safety risk due to crowd density in confined areas",
            confidence_span: 20,
            confidence_low: 80,
            timeframe_span: 30,
            timeframe_low: 10,
            timeframe_unit: "minutes",
            recommendations: [
                "Implement one-way movement in critical areas",
                "Deploy additional medical personnel",
                "Activate real-time crowd monitoring",
            ],
            priority: Priority::High,
        },
        PredictionKind::OptimalTiming => PredictionTemplate {
            message: "AI identifies optimal visiting window with minimal crowds",
            confidence_span: 15,
            confidence_low: 85,
            timeframe_span: 4,
            timeframe_low: 1,
            timeframe_unit: "hours",
            recommendations: [
                "Promote time slot through app notifications",
                "Offer incentives for off-peak visits",
                "Reduce staff deployment in other time slots",
            ],
            priority: Priority::Low,
        },
    }
}

pub struct CrowdAdvisor {
    predictions: Mutex<Vec<Prediction>>,
    rng: Mutex<Box<dyn RandomSource>>,
    analyzing: BusyCounter,
    analysis_delay: Duration,
}

impl CrowdAdvisor {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_source(Box::new(rng_from_seed(seed)))
    }

    pub fn with_source(rng: Box<dyn RandomSource>) -> Self {
        Self {
            predictions: Mutex::new(seed_predictions()),
            rng: Mutex::new(rng),
            analyzing: BusyCounter::default(),
            analysis_delay: Duration::from_millis(ANALYSIS_DELAY_MS),
        }
    }

    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }

    /// Current predictions, most recent first.
    pub fn predictions(&self) -> Vec<Prediction> {
        lock(&self.predictions).clone()
    }

    /// True while any optimization is being generated.
    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_busy()
    }

    /// Wait out the analysis delay, then return one of the canned optimizations.
    ///
    /// `areas` is accepted as analysis input but does not influence the result.
    pub async fn generate_crowd_optimization(&self, areas: &[Area]) -> CrowdOptimization {
        let _guard = self.analyzing.engage();
        log::debug!("analyzing {} areas", areas.len());

        tokio::time::sleep(self.analysis_delay).await;

        let mut pool = optimization_pool();
        let idx = lock(&self.rng).pick_index(pool.len());
        pool.swap_remove(idx)
    }

    /// A canned prediction of `kind` with drawn confidence and timeframe.
    pub fn generate_prediction(&self, kind: PredictionKind) -> Prediction {
        let template = template(kind);
        let mut rng = lock(&self.rng);
        let confidence = rng.offset_int(template.confidence_span, template.confidence_low);
        let timeframe = rng.offset_int(template.timeframe_span, template.timeframe_low);
        Prediction {
            kind,
            message: template.message.to_string(),
            confidence: u32::try_from(confidence).unwrap_or(0),
            timeframe: format!("{timeframe} {}", template.timeframe_unit),
            recommendations: strings(&template.recommendations),
            priority: template.priority,
        }
    }

    /// Prepend `prediction`, keeping at most [PREDICTION_CAP].
    pub fn update_prediction(&self, prediction: Prediction) {
        let mut predictions = lock(&self.predictions);
        predictions.insert(0, prediction);
        predictions.truncate(PREDICTION_CAP);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_helpers::ScriptedRandom;

    #[test]
    fn starts_with_two_seed_predictions() {
        let advisor = CrowdAdvisor::new(Some(1));
        let predictions = advisor.predictions();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].confidence, 85);
        assert_eq!(predictions[1].kind, PredictionKind::OptimalTiming);
    }

    #[test]
    fn prediction_draws_follow_kind_ranges() {
        // confidence floor(0.5 * 30) + 70, timeframe floor(0.25 * 60) + 15
        let advisor = CrowdAdvisor::with_source(Box::new(ScriptedRandom::new(vec![0.5, 0.25])));
        let prediction = advisor.generate_prediction(PredictionKind::CrowdSurge);
        assert_eq!(prediction.confidence, 85);
        assert_eq!(prediction.timeframe, "30 minutes");
        assert_eq!(prediction.priority, Priority::High);
        assert_eq!(prediction.recommendations.len(), 3);
    }

    #[test]
    fn weather_timeframe_is_in_hours() {
        let advisor = CrowdAdvisor::with_source(Box::new(ScriptedRandom::new(vec![0.0, 0.99])));
        let prediction = advisor.generate_prediction(PredictionKind::WeatherImpact);
        assert_eq!(prediction.confidence, 75);
        assert_eq!(prediction.timeframe, "3 hours");
    }

    #[test]
    fn update_prediction_caps_history() {
        let advisor = CrowdAdvisor::new(Some(5));
        for _ in 0..10 {
            let p = advisor.generate_prediction(PredictionKind::SafetyRisk);
            advisor.update_prediction(p);
        }
        let predictions = advisor.predictions();
        assert_eq!(predictions.len(), PREDICTION_CAP);
        assert!(predictions
            .iter()
            .all(|p| p.kind == PredictionKind::SafetyRisk));
    }

    #[tokio::test(start_paused = true)]
    async fn analyzing_while_optimizations_are_in_flight() {
        let advisor = Arc::new(
            CrowdAdvisor::with_source(Box::new(ScriptedRandom::new(Vec::new())))
                .with_analysis_delay(Duration::from_millis(500)),
        );
        let spawn_optimization = |advisor: &Arc<CrowdAdvisor>| {
            let advisor = Arc::clone(advisor);
            tokio::spawn(async move { advisor.generate_crowd_optimization(&[]).await })
        };

        let first = spawn_optimization(&advisor);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(advisor.is_analyzing());
        let second = spawn_optimization(&advisor);

        // first done at 500 ms, second at 800 ms
        tokio::time::sleep(Duration::from_millis(300)).await;
        first.await.expect("first optimization");
        assert!(advisor.is_analyzing());

        second.await.expect("second optimization");
        assert!(!advisor.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn optimization_waits_and_clears_busy_flag() {
        let advisor = CrowdAdvisor::with_source(Box::new(ScriptedRandom::new(vec![0.75])));
        let started = tokio::time::Instant::now();
        let optimization = advisor.generate_crowd_optimization(&[]).await;
        assert!(started.elapsed() >= Duration::from_millis(ANALYSIS_DELAY_MS));
        assert!(!advisor.is_analyzing());
        assert_eq!(
            optimization.predicted_impact,
            "Improve overall pilgrim satisfaction by 40%"
        );
    }
}
