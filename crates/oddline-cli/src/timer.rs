use chrono::{DateTime, TimeDelta, Utc};

/// Elapsed-time counter that can be paused, driven by caller-supplied instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausableTimer {
    accumulated: TimeDelta,
    running_since: Option<DateTime<Utc>>,
    stopped: bool,
}

impl PausableTimer {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            accumulated: TimeDelta::zero(),
            running_since: Some(now),
            stopped: false,
        }
    }

    /// Returns `false` when the timer was not running.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        match self.running_since.take() {
            Some(since) => {
                self.accumulated += (now - since).max(TimeDelta::zero());
                true
            }
            None => false,
        }
    }

    /// Returns `false` when the timer was running or already stopped.
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if self.stopped || self.running_since.is_some() {
            return false;
        }
        self.running_since = Some(now);
        true
    }

    /// Stop for good and return the running time.
    pub fn stop(&mut self, now: DateTime<Utc>) -> TimeDelta {
        self.pause(now);
        self.stopped = true;
        self.accumulated
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        let running = self
            .running_since
            .map(|since| (now - since).max(TimeDelta::zero()))
            .unwrap_or_else(TimeDelta::zero);
        self.accumulated + running
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().expect("valid timestamp")
    }

    #[test]
    fn paused_time_is_not_counted() {
        let mut timer = PausableTimer::start(at(0));
        assert_eq!(timer.elapsed(at(350)).num_milliseconds(), 350);

        assert!(timer.pause(at(350)));
        assert_eq!(timer.elapsed(at(1_350)).num_milliseconds(), 350);

        assert!(timer.resume(at(1_350)));
        assert_eq!(timer.elapsed(at(1_850)).num_milliseconds(), 850);
        assert_eq!(timer.stop(at(1_850)).num_milliseconds(), 850);
    }

    #[test]
    fn repeated_pause_and_resume_are_ignored() {
        let mut timer = PausableTimer::start(at(0));
        assert!(!timer.resume(at(10)));
        assert!(timer.pause(at(100)));
        assert!(!timer.pause(at(200)));
        assert_eq!(timer.elapsed(at(500)).num_milliseconds(), 100);
    }

    #[test]
    fn stopped_timer_stays_stopped() {
        let mut timer = PausableTimer::start(at(0));
        assert_eq!(timer.stop(at(400)).num_milliseconds(), 400);
        assert!(!timer.resume(at(500)));
        assert_eq!(timer.elapsed(at(900)).num_milliseconds(), 400);
    }
}
