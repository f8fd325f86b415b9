//! The per-session strike lifecycle: eligibility, scheduling, targeting,
//! the warning phase with its once-per-strike cue guard, and the barrage.
//! Poll-driven; every deadline is plain data inside the phase value.

mod config;
mod error;
mod session;
mod state;
mod targeting;

pub use config::StrikeConfig;
pub use error::TriggerError;
pub use session::{StrikeSession, SETTLE_DELAY};
pub use state::StrikePhase;
pub use targeting::{pick_strike_center, pick_target, spread_point};
