//! Live crowd/booking simulator.
//!
//! Holds the monitored areas, darshan slots, incidents and the notification
//! feed. Each collection sits behind its own lock so a booking never waits on
//! an area update, while a tick and a mutation on the same collection never
//! interleave. The recurring timer lives in `runner`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::{Clock, SystemClock, TimestampIds};
use crate::config::SimulatorConfig;
use crate::error::FlowError;
use crate::model::{
    Area, DarshanSlot, Incident, IncidentStatus, NewIncident, Notification, NotificationKind,
    SlotStatus,
};
use crate::random::{rng_from_seed, RandomSource};
use crate::runner::TickTimer;
use crate::sync::lock;

/// Most notifications kept in the feed.
pub const NOTIFICATION_CAP: usize = 5;

/// A tick emits a notification when its draw is strictly above this value.
pub const NOTIFICATION_PROBABILITY_THRESHOLD: f64 = 0.7;

/// Occupancy delta per tick is `floor(r * SPAN) + LOW`, i.e. `[-10, 9]`.
const OCCUPANCY_DELTA_SPAN: u32 = 20;
const OCCUPANCY_DELTA_LOW: i64 = -10;

/// Time label stamped on freshly created incidents and notifications.
pub const JUST_NOW: &str = "Just now";

pub const NOTIFICATION_MESSAGES: [&str; 5] = [
    "Main gate queue reduced by 30 people",
    "Special darshan booking now available",
    "Parking lot B is now 85% full",
    "Weather conditions favorable for next 3 hours",
    "AI prediction: Crowd surge expected in 45 minutes",
];

/// Notification kinds a tick may emit.
pub const TICK_NOTIFICATION_KINDS: [NotificationKind; 3] = [
    NotificationKind::Success,
    NotificationKind::Info,
    NotificationKind::Warning,
];

/// Summary of one tick, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub areas_updated: usize,
    pub notification: Option<Notification>,
}

/// Shared simulator state, owned jointly by the handle and the timer task.
pub(crate) struct SimulatorState {
    areas: Mutex<Vec<Area>>,
    darshan_slots: Mutex<Vec<DarshanSlot>>,
    incidents: Mutex<Vec<Incident>>,
    notifications: Mutex<Vec<Notification>>,
    rng: Mutex<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
    incident_ids: Mutex<TimestampIds>,
    notification_ids: Mutex<TimestampIds>,
}

impl SimulatorState {
    pub(crate) fn tick(&self) -> TickReport {
        let now = self.clock.now();
        let areas_updated = {
            let mut areas = lock(&self.areas);
            let mut rng = lock(&self.rng);
            for area in areas.iter_mut() {
                let delta = rng.offset_int(OCCUPANCY_DELTA_SPAN, OCCUPANCY_DELTA_LOW);
                let next = (i64::from(area.current) + delta).max(0);
                area.current = u32::try_from(next).unwrap_or(u32::MAX);
                area.last_updated = now;
            }
            areas.len()
        };

        let draw = {
            let mut rng = lock(&self.rng);
            if rng.next_unit() > NOTIFICATION_PROBABILITY_THRESHOLD {
                let message = NOTIFICATION_MESSAGES[rng.pick_index(NOTIFICATION_MESSAGES.len())];
                let kind = TICK_NOTIFICATION_KINDS[rng.pick_index(TICK_NOTIFICATION_KINDS.len())];
                Some((message, kind))
            } else {
                None
            }
        };
        let notification = draw.map(|(message, kind)| {
            let id = lock(&self.notification_ids).next(now.timestamp_millis());
            let notification = Notification {
                id: id.to_string(),
                message: message.to_string(),
                kind,
                time: JUST_NOW.to_string(),
            };
            let mut feed = lock(&self.notifications);
            feed.insert(0, notification.clone());
            feed.truncate(NOTIFICATION_CAP);
            notification
        });

        TickReport {
            areas_updated,
            notification,
        }
    }
}

/// Owned simulator service with an explicit `start`/`stop` lifecycle.
///
/// Dropping the simulator cancels its timer.
pub struct CrowdSimulator {
    state: Arc<SimulatorState>,
    tick_interval: Duration,
    timer: Mutex<Option<TickTimer>>,
}

impl CrowdSimulator {
    /// Build from config with a seeded RNG and the system clock.
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = Box::new(rng_from_seed(config.seed));
        Self::with_sources(config, rng, Arc::new(SystemClock))
    }

    /// Build with an explicit random source and clock.
    pub fn with_sources(
        config: SimulatorConfig,
        rng: Box<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let tick_interval = config.tick_interval();
        let areas = config
            .areas
            .into_iter()
            .map(|seed| seed.into_area(now))
            .collect();
        let state = SimulatorState {
            areas: Mutex::new(areas),
            darshan_slots: Mutex::new(config.darshan_slots),
            incidents: Mutex::new(config.incidents),
            notifications: Mutex::new(Vec::new()),
            rng: Mutex::new(rng),
            clock,
            incident_ids: Mutex::new(TimestampIds::default()),
            notification_ids: Mutex::new(TimestampIds::default()),
        };
        Self {
            state: Arc::new(state),
            tick_interval,
            timer: Mutex::new(None),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Start the recurring tick timer on the current Tokio runtime.
    ///
    /// The first tick fires one interval after start. Calling `start` while
    /// already running does nothing.
    pub fn start(&self) -> Result<(), FlowError> {
        let mut timer = lock(&self.timer);
        if timer.is_some() {
            return Ok(());
        }
        let handle = tokio::runtime::Handle::try_current()?;
        *timer = Some(TickTimer::spawn(&handle, Arc::clone(&self.state), self.tick_interval));
        log::info!(
            "crowd simulator started, ticking every {:?}",
            self.tick_interval
        );
        Ok(())
    }

    /// Cancel the tick timer. No-op when not running.
    pub fn stop(&self) {
        if let Some(timer) = lock(&self.timer).take() {
            timer.cancel();
            log::info!("crowd simulator stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.timer).is_some()
    }

    /// Run one simulation step immediately.
    pub fn tick(&self) -> TickReport {
        self.state.tick()
    }

    /// Book one place in the slot labelled `time`.
    ///
    /// Returns `false` (and changes nothing) when no slot matches or the slot
    /// is already full. A booking that reaches capacity marks the slot full;
    /// otherwise the status is left as it was.
    pub fn book_darshan_slot(&self, time: &str) -> bool {
        let mut slots = lock(&self.state.darshan_slots);
        let Some(slot) = slots.iter_mut().find(|slot| slot.time == time) else {
            log::debug!("no darshan slot at {time}");
            return false;
        };
        if slot.is_full() {
            return false;
        }
        slot.booked = slot.booked.saturating_add(1);
        if slot.booked >= slot.capacity {
            slot.status = SlotStatus::Full;
        }
        true
    }

    /// Set the status of incident `id`. Returns `false` when no incident matches.
    pub fn update_incident_status(&self, id: &str, status: IncidentStatus) -> bool {
        let mut incidents = lock(&self.state.incidents);
        match incidents.iter_mut().find(|incident| incident.id == id) {
            Some(incident) => {
                incident.status = status;
                true
            }
            None => {
                log::debug!("no incident {id}");
                false
            }
        }
    }

    /// Record a new incident at the head of the log and return its id.
    pub fn add_incident(&self, draft: NewIncident) -> String {
        let mut incidents = lock(&self.state.incidents);
        let mut ids = lock(&self.state.incident_ids);
        let now_ms = self.state.clock.now_ms();
        let id = loop {
            let candidate = format!("INC{}", ids.next(now_ms));
            if incidents.iter().all(|incident| incident.id != candidate) {
                break candidate;
            }
        };
        log::info!("incident {id} reported at {}", draft.location);
        incidents.insert(0, draft.into_incident(id.clone(), JUST_NOW));
        id
    }

    pub fn areas(&self) -> Vec<Area> {
        lock(&self.state.areas).clone()
    }

    pub fn darshan_slots(&self) -> Vec<DarshanSlot> {
        lock(&self.state.darshan_slots).clone()
    }

    /// Incidents, most recent first.
    pub fn incidents(&self) -> Vec<Incident> {
        lock(&self.state.incidents).clone()
    }

    /// Incidents not yet resolved, most recent first.
    pub fn active_incidents(&self) -> Vec<Incident> {
        lock(&self.state.incidents)
            .iter()
            .filter(|incident| incident.status != IncidentStatus::Resolved)
            .cloned()
            .collect()
    }

    /// Notification feed, most recent first, at most [NOTIFICATION_CAP] entries.
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.state.notifications).clone()
    }
}

impl Drop for CrowdSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}
