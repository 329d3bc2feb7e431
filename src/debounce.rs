// Time-based gesture filtering, applied by the caller around the core.
// A pinch only counts once it has been held briefly, and a sustained fist
// fires exactly one undo per hold, with a cooldown between undos.

use std::time::{Duration, Instant};

/// Level filter: true while `active` has been continuously true for `hold`.
#[derive(Debug, Clone)]
pub struct HoldFilter {
    hold: Duration,
    since: Option<Instant>,
}

impl HoldFilter {
    pub fn new(hold: Duration) -> Self {
        Self { hold, since: None }
    }

    pub fn update(&mut self, active: bool, now: Instant) -> bool {
        if !active {
            self.since = None;
            return false;
        }
        let since = *self.since.get_or_insert(now);
        now.duration_since(since) >= self.hold
    }

    pub fn reset(&mut self) {
        self.since = None;
    }
}

/// Edge trigger: fires once `active` has been held for `hold`, then re-arms
/// (the hold must be satisfied again) and stays quiet for `cooldown`.
#[derive(Debug, Clone)]
pub struct TriggerGate {
    hold: HoldFilter,
    cooldown: Duration,
    last_fired: Option<Instant>,
}

impl TriggerGate {
    pub fn new(hold: Duration, cooldown: Duration) -> Self {
        Self { hold: HoldFilter::new(hold), cooldown, last_fired: None }
    }

    pub fn update(&mut self, active: bool, now: Instant) -> bool {
        if !self.hold.update(active, now) {
            return false;
        }
        if self.last_fired.is_some_and(|t| now.duration_since(t) < self.cooldown) {
            return false;
        }
        self.last_fired = Some(now);
        self.hold.reset();
        true
    }
}
