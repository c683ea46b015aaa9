//! Radial pass stepping
//!
//! Walks Y from the initial radius towards the final radius one
//! depth-per-pass increment at a time, and closes on the final radius
//! exactly once the next increment would reach or pass it.

use keywaykit_core::{round_to, COORD_DECIMALS};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::KeywayGeometry;

/// Y positions of every radial pass of one notch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialSchedule {
    positions: Vec<f64>,
    closes_at_final: bool,
}

impl RadialSchedule {
    pub fn plan(geometry: &KeywayGeometry) -> Self {
        let final_radius = geometry.final_radius;
        let mut current = geometry.initial_radius;
        let mut positions = vec![current];
        let mut closes_at_final = false;

        loop {
            // Rounded so that landings on the final radius compare exactly.
            let next = round_to(current + geometry.radial_increment, COORD_DECIMALS);
            let reached = if geometry.cutting_reversed {
                next <= final_radius
            } else {
                next >= final_radius
            };

            if !reached {
                trace!("Radial pass at Y{}", next);
                positions.push(next);
                current = next;
                continue;
            }

            if next == final_radius || current != final_radius {
                trace!("Closing radial pass at Y{}", final_radius);
                positions.push(final_radius);
                closes_at_final = true;
            }
            break;
        }

        Self {
            positions,
            closes_at_final,
        }
    }

    /// Y of each pass, in cutting order
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Number of radial passes per notch
    pub fn pass_count(&self) -> usize {
        self.positions.len()
    }

    /// True when the last pass was added on the final radius, which is
    /// followed by an extra rapid to the start Z
    pub fn closes_at_final(&self) -> bool {
        self.closes_at_final
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyway::KeywayParameters;

    fn schedule(initial: f64, final_: f64, depth: f64) -> RadialSchedule {
        let params = KeywayParameters {
            initial_diameter: initial,
            final_diameter: final_,
            depth_per_pass_y: depth,
            ..KeywayParameters::default()
        };
        RadialSchedule::plan(&KeywayGeometry::resolve(&params))
    }

    #[test]
    fn test_exact_landing() {
        let s = schedule(30.0, 40.0, 1.0);
        assert_eq!(s.positions(), &[15.0, 16.0, 17.0, 18.0, 19.0, 20.0]);
        assert!(s.closes_at_final());
    }

    #[test]
    fn test_overshoot_lands_on_final() {
        let s = schedule(30.0, 40.0, 2.0);
        assert_eq!(s.positions(), &[15.0, 17.0, 19.0, 20.0]);
        assert!(s.closes_at_final());
    }

    #[test]
    fn test_reversed() {
        let s = schedule(40.0, 30.0, 1.5);
        assert_eq!(s.positions(), &[20.0, 18.5, 17.0, 15.5, 15.0]);
    }

    #[test]
    fn test_single_increment_covers_depth() {
        let s = schedule(30.0, 32.0, 5.0);
        assert_eq!(s.positions(), &[15.0, 16.0]);
    }

    #[test]
    fn test_fractional_steps_land_exactly() {
        // 0.1 increments accumulate binary error without rounding
        let s = schedule(30.0, 31.0, 0.1);
        assert_eq!(s.pass_count(), 6);
        assert_eq!(*s.positions().last().unwrap(), 15.5);
        assert_eq!(s.positions()[3], 15.3);
    }

    #[test]
    fn test_pass_count_bound() {
        for (initial, final_, depth) in [(30.0, 40.0, 1.0), (30.0, 40.0, 3.0), (41.0, 30.0, 0.7)] {
            let s = schedule(initial, final_, depth);
            let bound = ((final_ - initial) / 2.0_f64).abs() / depth;
            assert!(s.pass_count() <= bound.ceil() as usize + 1);
        }
    }
}
