//! Recurring tick timer: drives [SimulatorState::tick] on a Tokio interval.
//!
//! The timer task holds its own reference to the state. Cancelling (or
//! dropping) the [TickTimer] aborts the task at its next await point; a tick
//! never awaits, so an in-flight tick always completes.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::simulator::SimulatorState;

pub(crate) struct TickTimer {
    task: JoinHandle<()>,
}

impl TickTimer {
    pub(crate) fn spawn(handle: &Handle, state: Arc<SimulatorState>, period: Duration) -> Self {
        let task = handle.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let report = state.tick();
                match &report.notification {
                    Some(notification) => log::debug!(
                        "tick: {} areas updated, notification {:?}",
                        report.areas_updated,
                        notification.message
                    ),
                    None => log::debug!("tick: {} areas updated", report.areas_updated),
                }
            }
        });
        Self { task }
    }

    pub(crate) fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
