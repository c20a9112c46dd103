//! Test helpers: scripted randomness, a manual clock and recording doubles
//! for the platform traits.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::clock::Clock;
use crate::config::PositionOptions;
use crate::error::PositionError;
use crate::location::{NavigationHandler, PositionProvider};
use crate::model::Location;
use crate::random::RandomSource;
use crate::sync::lock;

/// Replays a fixed sequence of unit draws, then repeats `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into(),
            fallback: 0.5,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

/// The unit draw that makes a tick apply `delta` (in `-10..=9`) to an area.
pub fn unit_for_delta(delta: i64) -> f64 {
    debug_assert!((-10..=9).contains(&delta), "delta out of tick range");
    ((delta + 10) as f64 + 0.5) / 20.0
}

/// Clock that only moves when told to, counting how often it is read.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    reads: AtomicUsize,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn at_millis(ms: i64) -> Self {
        let start = Utc
            .timestamp_millis_opt(ms)
            .single()
            .unwrap_or_default();
        Self::new(start)
    }

    pub fn advance(&self, by: Duration) {
        let mut now = lock(&self.now);
        *now += by;
    }

    /// Number of `now()` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        *lock(&self.now)
    }
}

/// Position provider answering every query with the same outcome.
#[derive(Debug)]
pub struct FixedPositionProvider {
    outcome: Result<Location, PositionError>,
    requests: Mutex<Vec<PositionOptions>>,
}

impl FixedPositionProvider {
    pub fn new(outcome: Result<Location, PositionError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Options of every query received so far.
    pub fn requests(&self) -> Vec<PositionOptions> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    async fn current_position(&self, options: &PositionOptions) -> Result<Location, PositionError> {
        lock(&self.requests).push(*options);
        self.outcome.clone()
    }
}

/// Position provider that never answers.
#[derive(Debug, Default)]
pub struct StalledPositionProvider;

#[async_trait]
impl PositionProvider for StalledPositionProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Location, PositionError> {
        std::future::pending().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    Native(String),
    Web(String),
}

/// Navigation handler recording every handoff in order.
#[derive(Debug, Default)]
pub struct RecordingNavigationHandler {
    handoffs: Mutex<Vec<Handoff>>,
}

impl RecordingNavigationHandler {
    pub fn handoffs(&self) -> Vec<Handoff> {
        lock(&self.handoffs).clone()
    }
}

impl NavigationHandler for RecordingNavigationHandler {
    fn open_native(&self, url: &str) {
        lock(&self.handoffs).push(Handoff::Native(url.to_string()));
    }

    fn open_web(&self, url: &str) {
        lock(&self.handoffs).push(Handoff::Web(url.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_for_delta_round_trips_through_tick_formula() {
        for delta in -10..=9 {
            let r = unit_for_delta(delta);
            assert_eq!((r * 20.0).floor() as i64 - 10, delta);
        }
    }

    #[test]
    fn scripted_random_falls_back_when_exhausted() {
        let mut rng = ScriptedRandom::new(vec![0.1]).with_fallback(0.9);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.9);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::at_millis(1_000);
        clock.advance(Duration::milliseconds(5));
        assert_eq!(clock.now_ms(), 1_005);
        assert_eq!(clock.reads(), 1);
    }
}
