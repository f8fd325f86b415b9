use std::sync::Arc;
use std::time::{Duration, Instant};

use fastrand::Rng;
use log::{debug, info, warn};

use crate::gateway::{CueOutcome, EffectGateway};
use crate::schema::{SendError, StrikeCue};
use crate::session::config::StrikeConfig;
use crate::session::error::TriggerError;
use crate::session::state::StrikePhase;
use crate::session::targeting::{pick_strike_center, pick_target, spread_point};
use crate::sync::PeerSync;
use crate::types::{Role, Vec3};
use crate::world::WorldView;

/// Fixed pause between session start and the eligibility decision, giving
/// the host environment time to finish loading in.
pub const SETTLE_DELAY: Duration = Duration::from_secs(8);

/// Pause band between a completed strike and a drawn repeat.
const REPEAT_DELAY_MIN: Duration = Duration::from_secs(120);
const REPEAT_DELAY_MAX: Duration = Duration::from_secs(480);

/// Pause band between cue stop and the first impact.
const LULL_MIN: Duration = Duration::from_millis(500);
const LULL_MAX: Duration = Duration::from_secs(2);

/// The per-session strike controller.
///
/// One value per session; the host glue pumps it with [`StrikeSession::update`]
/// from its own tick loop, passing the current time. The session never reads
/// the wall clock itself, so tests can drive it with synthetic instants.
///
/// Only the authoritative role schedules and fires strikes. Everyone,
/// host and observer alike, listens for broadcast cues, and that playback
/// path runs outside this state machine entirely.
pub struct StrikeSession {
    sync: Arc<PeerSync>,
    gateway: Arc<dyn EffectGateway>,
    config: StrikeConfig,
    rng: Rng,
    phase: StrikePhase,
    role: Role,
    strikes_fired: u32,
    cue_consumed: bool,
}

impl StrikeSession {
    pub fn new(sync: Arc<PeerSync>, gateway: Arc<dyn EffectGateway>, config: StrikeConfig) -> Self {
        Self::with_rng(sync, gateway, config, Rng::new())
    }

    /// Like [`StrikeSession::new`], with a caller-provided random source.
    /// Seed it for reproducible schedules.
    pub fn with_rng(
        sync: Arc<PeerSync>,
        gateway: Arc<dyn EffectGateway>,
        config: StrikeConfig,
        rng: Rng,
    ) -> Self {
        Self {
            sync,
            gateway,
            config,
            rng,
            phase: StrikePhase::Idle,
            role: Role::Unknown,
            strikes_fired: 0,
            cue_consumed: false,
        }
    }

    pub fn phase(&self) -> &StrikePhase {
        &self.phase
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn strikes_fired(&self) -> u32 {
        self.strikes_fired
    }

    /// Begins a session. The eligibility decision runs on the first
    /// `update` past the settle delay.
    pub fn start(&mut self, now: Instant) {
        self.phase = StrikePhase::Settling {
            decide_at: now + SETTLE_DELAY,
        };
        self.role = Role::Unknown;
        self.strikes_fired = 0;
        self.cue_consumed = false;
        info!("Strike session started, deciding eligibility in {SETTLE_DELAY:?}");
    }

    /// Drives the lifecycle. Call once per frame or tick; every deadline
    /// is measured against the `now` passed in.
    pub fn update<W: WorldView>(&mut self, world: &W, now: Instant) {
        match self.phase {
            StrikePhase::Idle | StrikePhase::Retired => {}
            StrikePhase::Settling { decide_at } => {
                if now >= decide_at {
                    self.decide_eligibility(world, now);
                }
            }
            StrikePhase::Waiting { strike_at } => {
                if now >= strike_at && !self.begin_strike(world, now, true) {
                    info!("No participants to target, skipping this strike");
                    self.schedule_repeat(now);
                }
            }
            StrikePhase::Warning {
                cue_until,
                fire_at,
                center,
            } => {
                if now >= cue_until {
                    self.gateway.stop_warning_cue();
                    self.phase = StrikePhase::Lull { fire_at, center };
                }
            }
            StrikePhase::Lull { fire_at, center } => {
                if now >= fire_at {
                    self.phase = StrikePhase::Barrage {
                        next_at: now,
                        fired: 0,
                        total: self.config.barrage_count.max(1),
                        center,
                    };
                    self.run_barrage(now);
                }
            }
            StrikePhase::Barrage { .. } => self.run_barrage(now),
        }
    }

    /// Fires a strike immediately, replacing any scheduled one. Works even
    /// after the session retired from scheduling.
    ///
    /// Only the authoritative session may trigger, and never while a
    /// warning or barrage sequence is in flight.
    pub fn trigger_now<W: WorldView>(
        &mut self,
        world: &W,
        now: Instant,
        with_warning: bool,
    ) -> Result<(), TriggerError> {
        if matches!(self.phase, StrikePhase::Idle) {
            warn!("Manual strike refused: no active session");
            return Err(TriggerError::NoActiveSession);
        }
        if self.phase.sequence_in_flight() {
            warn!("Manual strike refused: a sequence is already in flight");
            return Err(TriggerError::SequenceInFlight);
        }

        if self.role == Role::Unknown {
            self.resolve_role();
        }
        if self.role != Role::Host {
            warn!("Manual strike refused: not authoritative");
            return Err(TriggerError::NotAuthoritative);
        }

        self.ensure_session_ready();

        if !self.begin_strike(world, now, with_warning) {
            warn!("Manual strike refused: no participants to target");
            return Err(TriggerError::NoTargets);
        }
        info!("Manual strike triggered (with_warning: {with_warning})");
        Ok(())
    }

    /// Host-environment notification that a strike of its own is about to
    /// land. Plays the warning cue at most once per strike no matter how
    /// many notifications arrive.
    pub fn notify_host_strike(&mut self) -> CueOutcome {
        self.play_warning_cue(false)
    }

    /// Triggers the warning cue through the once-per-strike guard.
    ///
    /// `force` is the start-of-strike path: it plays regardless of the
    /// guard. Either way a trigger that gets past the config flag consumes
    /// the guard, played or failed.
    pub fn play_warning_cue(&mut self, force: bool) -> CueOutcome {
        if !self.config.audio_warning_enabled {
            return CueOutcome::Skipped;
        }
        if self.cue_consumed && !force {
            return CueOutcome::Skipped;
        }
        self.cue_consumed = true;
        match self.gateway.play_warning_cue() {
            Ok(()) => CueOutcome::Played,
            Err(error) => {
                warn!("Warning cue failed: {error}");
                CueOutcome::Failed
            }
        }
    }

    /// Ends the session: every pending deadline is dropped, the cue is
    /// silenced, and the per-session networking state is cleared.
    pub fn end(&mut self) {
        self.gateway.stop_warning_cue();
        self.phase = StrikePhase::Idle;
        self.role = Role::Unknown;
        self.sync.reset_session();
        info!("Strike session ended");
    }

    /// The session-start decision: map exclusion, role resolution,
    /// networking setup, occurrence roll, first delay.
    fn decide_eligibility<W: WorldView>(&mut self, world: &W, now: Instant) {
        let map_id = world.map_id().to_string();
        if self.config.is_map_excluded(&map_id) {
            self.retire(&format!("map {map_id:?} is excluded"));
            return;
        }

        self.resolve_role();

        // Both roles listen; only the host schedules.
        self.ensure_session_ready();

        if self.role != Role::Host {
            info!("Not authoritative; strikes will arrive over the wire");
            self.phase = StrikePhase::Retired;
            return;
        }

        let occurrence = self.config.occurrence_chance.clamp(0.0, 1.0);
        let roll = self.rng.f32();
        debug!("Occurrence roll {roll:.3} against {occurrence:.3}");
        if roll >= occurrence {
            self.retire("occurrence roll failed");
            return;
        }

        let delay = draw_duration(
            &self.rng,
            self.config.min_initial_delay,
            self.config.max_initial_delay,
        );
        info!("First strike in {delay:?}");
        self.phase = StrikePhase::Waiting {
            strike_at: now + delay,
        };
    }

    fn resolve_role(&mut self) {
        self.role = if self.sync.is_authoritative() {
            Role::Host
        } else {
            Role::Client
        };
        debug!("Session role resolved: {:?}", self.role);
    }

    /// Runs the once-per-session networking setup with this session's
    /// remote-playback handler. Idempotent within a session.
    fn ensure_session_ready(&self) {
        let gateway = self.gateway.clone();
        let audio_enabled = self.config.audio_warning_enabled;
        self.sync.ready_for_session(move |cue| {
            play_remote_cue(gateway.as_ref(), audio_enabled, cue);
        });
    }

    /// Picks a target and a center and starts the warning (or goes straight
    /// to the barrage). False when nobody is present to target.
    fn begin_strike<W: WorldView>(&mut self, world: &W, now: Instant, with_warning: bool) -> bool {
        let participants = world.participants();
        let Some(target) = pick_target(&participants, self.config.targeting_weight, &self.rng)
        else {
            return false;
        };
        let target_position = target.position;

        let center = pick_strike_center(
            target_position,
            &self.config,
            self.gateway.as_ref(),
            &self.rng,
        );
        info!(
            "Strike inbound near {:?} at ({:.1}, {:.1}, {:.1})",
            target.name, center.x, center.y, center.z
        );

        if with_warning {
            self.begin_warning(center, target_position.y, now);
        } else {
            self.phase = StrikePhase::Barrage {
                next_at: now,
                fired: 0,
                total: self.config.barrage_count.max(1),
                center,
            };
            self.run_barrage(now);
        }
        true
    }

    fn begin_warning(&mut self, center: Vec3, reference_height: f32, now: Instant) {
        if self.config.visual_warning_enabled {
            if let Err(error) = self.gateway.spawn_visual_marker(center, Some(reference_height)) {
                warn!("Warning marker failed: {error}");
            }
        }

        if self.config.audio_warning_enabled {
            // New strike: the guard belongs to this playback.
            self.cue_consumed = false;
            self.play_warning_cue(true);
            self.broadcast(center);
        }

        let cue_until = now + self.config.warning_duration;
        let lull = draw_duration(&self.rng, LULL_MIN, LULL_MAX);
        self.phase = StrikePhase::Warning {
            cue_until,
            fire_at: cue_until + lull,
            center,
        };
    }

    fn broadcast(&self, center: Vec3) {
        if self.role != Role::Host {
            return;
        }
        match self.sync.broadcast_cue(center.x, center.y, center.z) {
            Ok(()) => debug!("Strike cue broadcast"),
            Err(SendError::SenderUnresolved) => {
                debug!("Strike cue not broadcast: no sender bound");
            }
            Err(error) => warn!("Strike cue broadcast failed: {error}"),
        }
    }

    /// Fires every impact whose deadline has passed, then either leaves the
    /// barrage pending or closes out the strike.
    fn run_barrage(&mut self, now: Instant) {
        let StrikePhase::Barrage {
            mut next_at,
            mut fired,
            total,
            center,
        } = self.phase
        else {
            return;
        };

        while fired < total && now >= next_at {
            let point = if fired == 0 {
                center
            } else {
                spread_point(
                    center,
                    self.config.barrage_spread_radius,
                    self.gateway.as_ref(),
                    &self.rng,
                )
            };
            if let Err(error) = self.gateway.fire_effect(point) {
                warn!("Impact {}/{total} failed: {error}", fired + 1);
            }
            fired += 1;
            next_at += self.config.barrage_spacing;
        }

        if fired < total {
            self.phase = StrikePhase::Barrage {
                next_at,
                fired,
                total,
                center,
            };
        } else {
            self.strikes_fired += 1;
            info!("Strike {} complete", self.strikes_fired);
            self.schedule_repeat(now);
        }
    }

    fn schedule_repeat(&mut self, now: Instant) {
        if !self.config.allow_repeats {
            self.retire("repeats disabled");
            return;
        }
        if self.strikes_fired >= self.config.max_strikes {
            self.retire("strike cap reached");
            return;
        }
        let repeat_chance = self.config.repeat_chance.clamp(0.0, 1.0);
        if self.rng.f32() >= repeat_chance {
            self.retire("repeat roll failed");
            return;
        }

        let delay = draw_duration(&self.rng, REPEAT_DELAY_MIN, REPEAT_DELAY_MAX);
        info!("Another strike in {delay:?}");
        self.phase = StrikePhase::Waiting {
            strike_at: now + delay,
        };
    }

    fn retire(&mut self, reason: &str) {
        info!("Strike scheduling retired: {reason}");
        self.phase = StrikePhase::Retired;
    }
}

impl Drop for StrikeSession {
    fn drop(&mut self) {
        if !matches!(self.phase, StrikePhase::Idle) {
            self.end();
        }
    }
}

/// Local playback for a cue that arrived over the wire. Runs outside the
/// session's state: remote cues must not disturb local timers or guards.
fn play_remote_cue(gateway: &dyn EffectGateway, audio_enabled: bool, cue: StrikeCue) {
    let point = Vec3::new(cue.x, cue.y, cue.z);
    info!(
        "Remote strike cue at ({:.1}, {:.1}, {:.1})",
        point.x, point.y, point.z
    );

    if audio_enabled {
        if let Err(error) = gateway.play_warning_cue() {
            warn!("Remote cue playback failed: {error}");
        }
    }
    if let Err(error) = gateway.spawn_visual_marker(point, None) {
        warn!("Remote cue marker failed: {error}");
    }
}

/// Uniform draw from a duration band. An inverted band collapses to its
/// lower bound.
fn draw_duration(rng: &Rng, min: Duration, max: Duration) -> Duration {
    let min_secs = min.as_secs_f64();
    let max_secs = max.as_secs_f64().max(min_secs);
    Duration::from_secs_f64(min_secs + (max_secs - min_secs) * rng.f64())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fastrand::Rng;

    use super::draw_duration;

    #[test]
    fn draw_duration_stays_in_band() {
        let rng = Rng::with_seed(11);
        let min = Duration::from_secs(120);
        let max = Duration::from_secs(480);

        for _ in 0..100 {
            let drawn = draw_duration(&rng, min, max);
            assert!(drawn >= min);
            assert!(drawn <= max);
        }
    }

    #[test]
    fn inverted_band_collapses_to_lower_bound() {
        let rng = Rng::with_seed(12);
        let drawn = draw_duration(&rng, Duration::from_secs(60), Duration::from_secs(10));

        assert_eq!(drawn, Duration::from_secs(60));
    }
}
