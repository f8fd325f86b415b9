use fastrand::Rng;
use log::debug;

use crate::gateway::EffectGateway;
use crate::session::config::StrikeConfig;
use crate::types::Vec3;
use crate::world::Participant;

/// Attempts made to land the strike center on a valid surface before
/// falling back to a flat offset from the target.
const PLACEMENT_ATTEMPTS: u32 = 20;

/// Snapped heights outside this window count as no surface.
const MIN_VALID_HEIGHT: f32 = -50.0;
const MAX_VALID_HEIGHT: f32 = 500.0;

/// Picks the participant a strike centers on.
///
/// Human-controlled participants are favored by `weight`: at 0 everyone is
/// equally likely, at 100 only humans are eligible (when any are present),
/// and in between the natural human share of the population is
/// interpolated toward certainty.
pub fn pick_target<'p>(
    participants: &'p [Participant],
    weight: u8,
    rng: &Rng,
) -> Option<&'p Participant> {
    if participants.is_empty() {
        return None;
    }

    let humans: Vec<&Participant> = participants.iter().filter(|p| p.human).collect();
    let autonomous: Vec<&Participant> = participants.iter().filter(|p| !p.human).collect();

    if humans.is_empty() {
        return Some(autonomous[rng.usize(..autonomous.len())]);
    }
    if autonomous.is_empty() {
        return Some(humans[rng.usize(..humans.len())]);
    }

    let weight = weight.min(100);
    if weight == 100 {
        return Some(humans[rng.usize(..humans.len())]);
    }
    if weight == 0 {
        return Some(&participants[rng.usize(..participants.len())]);
    }

    let natural_ratio = humans.len() as f32 / participants.len() as f32;
    let bias = f32::from(weight) / 100.0;
    let human_chance = natural_ratio + (1.0 - natural_ratio) * bias;

    let selected = if rng.f32() < human_chance {
        humans[rng.usize(..humans.len())]
    } else {
        autonomous[rng.usize(..autonomous.len())]
    };
    debug!(
        "Target draw: {} human / {} total, human chance {:.2}, picked {:?}",
        humans.len(),
        participants.len(),
        human_chance,
        selected.name
    );
    Some(selected)
}

/// Turns a chosen target position into a strike center inside the
/// configured distance band, snapped to a valid surface.
///
/// Tries up to [`PLACEMENT_ATTEMPTS`] random annulus points; when none
/// snaps to a height inside the valid window, falls back to a flat offset
/// from the target at the target's own height.
pub fn pick_strike_center(
    target: Vec3,
    config: &StrikeConfig,
    gateway: &dyn EffectGateway,
    rng: &Rng,
) -> Vec3 {
    let (min_distance, max_distance) = distance_band(config);

    for _ in 0..PLACEMENT_ATTEMPTS {
        let angle = rng.f32() * std::f32::consts::TAU;
        let distance = range_f32(rng, min_distance, max_distance);
        let candidate = target.offset(angle.cos() * distance, angle.sin() * distance);

        if let Some(height) = gateway.surface_height(candidate) {
            if height > MIN_VALID_HEIGHT && height < MAX_VALID_HEIGHT {
                return candidate.with_y(height);
            }
        }
    }

    debug!("No valid surface after {PLACEMENT_ATTEMPTS} attempts, using flat fallback");
    target.offset(range_f32(rng, min_distance, max_distance), 0.0)
}

/// A follow-up impact point: a uniform draw inside the spread disc around
/// the center, snapped to the surface when one exists and kept at the
/// center's height otherwise.
pub fn spread_point(center: Vec3, radius: f32, gateway: &dyn EffectGateway, rng: &Rng) -> Vec3 {
    let angle = rng.f32() * std::f32::consts::TAU;
    let distance = radius.max(0.0) * rng.f32().sqrt();
    let candidate = center.offset(angle.cos() * distance, angle.sin() * distance);

    match gateway.surface_height(candidate) {
        Some(height) => candidate.with_y(height),
        None => candidate,
    }
}

fn distance_band(config: &StrikeConfig) -> (f32, f32) {
    let min = config.min_target_distance.max(0.0);
    let max = config.max_target_distance.max(min);
    (min, max)
}

fn range_f32(rng: &Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.f32()
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;

    use super::{pick_strike_center, pick_target, spread_point};
    use crate::gateway::{EffectError, EffectGateway};
    use crate::session::config::StrikeConfig;
    use crate::types::Vec3;
    use crate::world::Participant;

    struct FlatGround {
        height: Option<f32>,
    }

    impl EffectGateway for FlatGround {
        fn play_warning_cue(&self) -> Result<(), EffectError> {
            Ok(())
        }

        fn stop_warning_cue(&self) {}

        fn spawn_visual_marker(
            &self,
            _point: Vec3,
            _reference_height: Option<f32>,
        ) -> Result<(), EffectError> {
            Ok(())
        }

        fn fire_effect(&self, _point: Vec3) -> Result<(), EffectError> {
            Ok(())
        }

        fn surface_height(&self, _point: Vec3) -> Option<f32> {
            self.height
        }
    }

    fn population(humans: usize, autonomous: usize) -> Vec<Participant> {
        let mut participants = Vec::new();
        for i in 0..humans {
            participants.push(Participant::new(&format!("human-{i}"), Vec3::ZERO, true));
        }
        for i in 0..autonomous {
            participants.push(Participant::new(&format!("bot-{i}"), Vec3::ZERO, false));
        }
        participants
    }

    #[test]
    fn empty_population_has_no_target() {
        let rng = Rng::with_seed(1);
        assert!(pick_target(&[], 50, &rng).is_none());
    }

    #[test]
    fn max_weight_always_picks_humans() {
        let rng = Rng::with_seed(2);
        let participants = population(3, 7);

        for _ in 0..200 {
            let target = pick_target(&participants, 100, &rng).unwrap();
            assert!(target.human);
        }
    }

    #[test]
    fn humans_only_population_ignores_weight() {
        let rng = Rng::with_seed(3);
        let participants = population(4, 0);

        let target = pick_target(&participants, 0, &rng).unwrap();
        assert!(target.human);
    }

    #[test]
    fn center_lands_inside_distance_band_on_flat_ground() {
        let rng = Rng::with_seed(4);
        let gateway = FlatGround { height: Some(12.0) };
        let config = StrikeConfig::default();
        let target = Vec3::new(100.0, 30.0, -40.0);

        for _ in 0..50 {
            let center = pick_strike_center(target, &config, &gateway, &rng);
            let distance = center.horizontal_distance(&target);

            assert!(distance >= config.min_target_distance - 0.001);
            assert!(distance <= config.max_target_distance + 0.001);
            assert_eq!(center.y, 12.0);
        }
    }

    #[test]
    fn center_falls_back_when_no_surface_exists() {
        let rng = Rng::with_seed(5);
        let gateway = FlatGround { height: None };
        let config = StrikeConfig::default();
        let target = Vec3::new(0.0, 7.5, 0.0);

        let center = pick_strike_center(target, &config, &gateway, &rng);

        // Flat fallback: offset from the target at the target's height.
        assert_eq!(center.y, 7.5);
        assert_eq!(center.z, 0.0);
        let distance = center.horizontal_distance(&target);
        assert!(distance >= config.min_target_distance - 0.001);
        assert!(distance <= config.max_target_distance + 0.001);
    }

    #[test]
    fn surface_outside_valid_window_is_rejected() {
        let rng = Rng::with_seed(6);
        let gateway = FlatGround {
            height: Some(-300.0),
        };
        let config = StrikeConfig::default();
        let target = Vec3::new(0.0, 1.0, 0.0);

        let center = pick_strike_center(target, &config, &gateway, &rng);

        // Every snap lands below the window, so the fallback keeps the
        // target's height.
        assert_eq!(center.y, 1.0);
    }

    #[test]
    fn spread_point_stays_inside_radius() {
        let rng = Rng::with_seed(7);
        let gateway = FlatGround { height: Some(0.0) };
        let center = Vec3::new(10.0, 5.0, 10.0);

        for _ in 0..50 {
            let point = spread_point(center, 50.0, &gateway, &rng);
            assert!(point.horizontal_distance(&center) <= 50.001);
        }
    }
}
