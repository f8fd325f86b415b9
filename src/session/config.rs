use std::default::Default;
use std::time::Duration;

/// Contains the tunable properties of a strike session, snapshotted once
/// at session start. Out-of-range values are clamped where they are used.
#[derive(Clone)]
pub struct StrikeConfig {
    /// Probability in [0, 1] that a session gets any strikes at all.
    pub occurrence_chance: f32,
    /// Earliest the first strike may begin, measured from the eligibility
    /// decision.
    pub min_initial_delay: Duration,
    /// Latest the first strike may begin.
    pub max_initial_delay: Duration,
    /// Whether a session may run more than one strike.
    pub allow_repeats: bool,
    /// Probability in [0, 1] that another strike follows a completed one.
    pub repeat_chance: f32,
    /// Hard cap on strikes per session.
    pub max_strikes: u32,
    /// Impacts per strike. Values below 1 are treated as 1.
    pub barrage_count: u32,
    /// Pause between consecutive impacts.
    pub barrage_spacing: Duration,
    /// Horizontal radius around the strike center for follow-up impacts.
    pub barrage_spread_radius: f32,
    /// Closest the strike center may land to the chosen target.
    pub min_target_distance: f32,
    /// Farthest the strike center may land from the chosen target.
    pub max_target_distance: f32,
    /// Bias toward human-controlled targets, 0 (none) to 100 (always).
    pub targeting_weight: u8,
    /// How long the warning cue runs before the pre-impact lull.
    pub warning_duration: Duration,
    /// Map identifiers on which sessions never schedule strikes.
    pub excluded_maps: Vec<String>,
    /// Whether the visual warning marker is spawned.
    pub visual_warning_enabled: bool,
    /// Whether the audio warning cue is played (and the cue broadcast).
    pub audio_warning_enabled: bool,
}

impl StrikeConfig {
    /// True when strikes are disabled on the given map. Matching is
    /// case-insensitive on the full identifier.
    pub fn is_map_excluded(&self, map_id: &str) -> bool {
        self.excluded_maps
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(map_id))
    }
}

impl Default for StrikeConfig {
    fn default() -> Self {
        Self {
            occurrence_chance: 0.35,
            min_initial_delay: Duration::from_secs(5 * 60),
            max_initial_delay: Duration::from_secs(15 * 60),
            allow_repeats: true,
            repeat_chance: 0.25,
            max_strikes: 3,
            barrage_count: 3,
            barrage_spacing: Duration::from_secs(3),
            barrage_spread_radius: 50.0,
            min_target_distance: 30.0,
            max_target_distance: 200.0,
            targeting_weight: 30,
            warning_duration: Duration::from_secs(15),
            excluded_maps: Vec::new(),
            visual_warning_enabled: true,
            audio_warning_enabled: true,
        }
    }
}
