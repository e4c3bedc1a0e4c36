//! Daily trigger — coarse wall-clock polling with a same-day guard.
//!
//! The process runs the pipeline once at startup, then polls once a
//! minute and fires on the first poll at or after the configured run
//! time. Firing late beats skipping: sleep drift can push a poll past
//! the trigger minute, so the check is an at-or-after comparison and
//! `last_fired_on` guards against a second firing the same day. A failed
//! run is logged and the loop returns to waiting; the process only stops
//! by external termination.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};

/// Poll interval for due-trigger checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Trigger state for the once-a-day run.
#[derive(Debug, Clone)]
pub struct DailySchedule {
    run_time: NaiveTime,
    last_fired_on: Option<NaiveDate>,
}

impl DailySchedule {
    /// Arm the schedule at `now`. Starting at or after the trigger time
    /// counts today as already fired (the startup run covers it), so the
    /// first scheduled firing is tomorrow.
    pub fn new(run_time: NaiveTime, now: DateTime<Local>) -> Self {
        let last_fired_on = (now.time() >= run_time).then(|| now.date_naive());
        Self {
            run_time,
            last_fired_on,
        }
    }

    /// True when `now` is at or past the trigger time and the schedule
    /// has not fired today.
    pub fn due(&self, now: DateTime<Local>) -> bool {
        now.time() >= self.run_time && self.last_fired_on != Some(now.date_naive())
    }

    /// Record a firing so the trigger cannot fire twice the same day.
    pub fn mark_fired(&mut self, date: NaiveDate) {
        self.last_fired_on = Some(date);
    }

    pub fn run_time(&self) -> NaiveTime {
        self.run_time
    }
}

/// Poll forever, invoking `run` each time the daily trigger comes due.
///
/// Run failures are the callback's to log; the loop keeps going either
/// way.
pub fn run_loop(mut schedule: DailySchedule, mut run: impl FnMut()) -> ! {
    tracing::info!(
        run_time = %schedule.run_time().format("%H:%M"),
        poll_secs = POLL_INTERVAL.as_secs(),
        "Daily schedule armed"
    );

    loop {
        std::thread::sleep(POLL_INTERVAL);
        let now = Local::now();
        if schedule.due(now) {
            schedule.mark_fired(now.date_naive());
            tracing::info!("Daily trigger fired");
            run();
        }
    }
}
