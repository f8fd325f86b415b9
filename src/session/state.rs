use std::time::Instant;

use crate::types::Vec3;

/// Where the session stands in its strike lifecycle. Deadlines live inside
/// the variants; dropping the phase retires them all at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikePhase {
    /// No session is running.
    Idle,
    /// Session started; the eligibility decision runs once the settle
    /// delay has passed.
    Settling { decide_at: Instant },
    /// A strike is scheduled.
    Waiting { strike_at: Instant },
    /// Warning cue running; it stops at `cue_until` and the first impact
    /// lands at `fire_at`.
    Warning {
        cue_until: Instant,
        fire_at: Instant,
        center: Vec3,
    },
    /// Cue stopped; short random pause before the first impact.
    Lull { fire_at: Instant, center: Vec3 },
    /// Impacts in flight.
    Barrage {
        next_at: Instant,
        fired: u32,
        total: u32,
        center: Vec3,
    },
    /// Strike activity for this session is over. Inbound cues still play.
    Retired,
}

impl StrikePhase {
    /// True while a warning or barrage sequence is running. A second
    /// sequence may never start during this window.
    pub fn sequence_in_flight(&self) -> bool {
        matches!(
            self,
            StrikePhase::Warning { .. } | StrikePhase::Lull { .. } | StrikePhase::Barrage { .. }
        )
    }
}
