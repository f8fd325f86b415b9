use thiserror::Error;

use crate::types::Vec3;

/// Errors that can occur inside the host environment's effect layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    /// No valid surface exists near the requested point
    #[error("No valid surface near ({x:.1}, {y:.1}, {z:.1}); the effect cannot be placed")]
    NoValidSurface {
        x: f32,
        y: f32,
        z: f32,
    },

    /// The environment rejected or failed the effect call
    #[error("Effect call failed: {reason}")]
    Failed {
        reason: String,
    },
}

/// Outcome of a guarded warning-cue trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueOutcome {
    /// The cue started playing.
    Played,
    /// The cue was suppressed: audio is disabled, or this strike already
    /// consumed its playback.
    Skipped,
    /// Playback was attempted and the environment reported failure.
    Failed,
}

/// The host environment's audible and visible side of a strike.
///
/// The session treats every call as best-effort: failures are logged and
/// stepped over, never propagated into the lifecycle.
pub trait EffectGateway: Send + Sync {
    /// Starts the warning cue. Looping and channel policy belong to the
    /// implementation.
    fn play_warning_cue(&self) -> Result<(), EffectError>;

    /// Stops a playing warning cue, if any.
    fn stop_warning_cue(&self);

    /// Places a visible marker at a surface-corrected position near
    /// `point`. `reference_height` is a known-good height to search from
    /// when `point` floats above any surface.
    fn spawn_visual_marker(
        &self,
        point: Vec3,
        reference_height: Option<f32>,
    ) -> Result<(), EffectError>;

    /// Triggers the strike effect at `point`.
    fn fire_effect(&self, point: Vec3) -> Result<(), EffectError>;

    /// Height of the surface at the horizontal position of `point`, or
    /// `None` when nothing valid is above or below it.
    fn surface_height(&self, point: Vec3) -> Option<f32>;
}
