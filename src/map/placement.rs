//! Procedural placement of module units inside their zone wedges

use log::debug;
use rand::Rng;

use super::config::PlacementConfig;
use super::error::{MapError, MapResult};
use super::types::{ModuleUnit, PlanePosition, UnitId, UnitStatus, Zone, WEDGE_SPAN_DEG};

/// Number of zones the map is divided into
pub const ZONE_COUNT: usize = 4;

/// Share of units drawn as occupied by the first status draw
pub const OCCUPIED_THRESHOLD: f64 = 0.85;
/// Second draw threshold for maintenance, applied only when the first draw missed
pub const MAINTENANCE_THRESHOLD: f64 = 0.95;

/// Generate `per_zone` units for each zone, in the order given.
///
/// Ids are assigned sequentially from 1 across all zones. Each unit lies in
/// its zone's 90 degree wedge at a distance drawn from the radius band.
pub fn generate<R: Rng + ?Sized>(
    zones: &[Zone],
    config: &PlacementConfig,
    rng: &mut R,
) -> MapResult<Vec<ModuleUnit>> {
    if zones.len() != ZONE_COUNT {
        return Err(MapError::ZoneCount {
            expected: ZONE_COUNT,
            found: zones.len(),
        });
    }
    config.validate()?;

    let mut units = Vec::with_capacity(ZONE_COUNT * config.per_zone as usize);
    let mut next_id = 1;

    for &zone in zones {
        for _ in 0..config.per_zone {
            let position = random_in_wedge(zone, config.min_radius, config.max_radius, rng);
            let status = draw_status(rng);
            units.push(ModuleUnit {
                id: UnitId(next_id),
                zone,
                status,
                position,
            });
            next_id += 1;
        }
        debug!("Placed {} units in {}", config.per_zone, zone);
    }

    Ok(units)
}

/// Random point inside `zone`'s wedge within the `[min_radius, max_radius]` band
pub fn random_in_wedge<R: Rng + ?Sized>(
    zone: Zone,
    min_radius: f32,
    max_radius: f32,
    rng: &mut R,
) -> PlanePosition {
    let distance = rng.random_range(min_radius..=max_radius);
    let angle = zone.start_angle_deg() + rng.random_range(0.0..WEDGE_SPAN_DEG);
    PlanePosition::from_polar(angle, distance)
}

/// Two-draw status scheme: ~15% occupied, then ~5% of the rest in maintenance
pub fn draw_status<R: Rng + ?Sized>(rng: &mut R) -> UnitStatus {
    if rng.random::<f64>() > OCCUPIED_THRESHOLD {
        UnitStatus::Occupied
    } else if rng.random::<f64>() > MAINTENANCE_THRESHOLD {
        UnitStatus::Maintenance
    } else {
        UnitStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::types::ZONE_EPSILON;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_four_by_per_zone() {
        let mut rng = StdRng::seed_from_u64(7);
        let units = generate(&Zone::ALL, &PlacementConfig::default(), &mut rng).unwrap();
        assert_eq!(units.len(), 100);
        for (index, unit) in units.iter().enumerate() {
            assert_eq!(unit.id, UnitId(index as u32 + 1));
        }
    }

    #[test]
    fn test_units_stay_in_wedge_and_band() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = PlacementConfig::default();
        let units = generate(&Zone::ALL, &config, &mut rng).unwrap();
        for unit in &units {
            let distance = unit.position.distance_from_center();
            assert!(distance >= config.min_radius - ZONE_EPSILON);
            assert!(distance <= config.max_radius + ZONE_EPSILON);
            assert!(
                unit.zone.wedge_contains(unit.position.angle_from_center_deg()),
                "unit {} at {:?} outside {}",
                unit.id,
                unit.position,
                unit.zone
            );
        }
    }

    #[test]
    fn test_zone_order_drives_ids() {
        let mut rng = StdRng::seed_from_u64(3);
        let zones = [Zone::Desert, Zone::Lake, Zone::Mountain, Zone::Forest];
        let units = generate(&zones, &PlacementConfig::default(), &mut rng).unwrap();
        assert_eq!(units[0].zone, Zone::Desert);
        assert_eq!(units[99].zone, Zone::Forest);
    }

    #[test]
    fn test_wrong_zone_count_is_fatal() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate(&Zone::ALL[..3], &PlacementConfig::default(), &mut rng);
        assert_eq!(
            result,
            Err(MapError::ZoneCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = PlacementConfig::default();
        let a = generate(&Zone::ALL, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&Zone::ALL, &config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }
}
