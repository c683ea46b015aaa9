//! Lateral pass planning
//!
//! Decides at which X offsets the tool must stroke to clear a keyway
//! opening wider than the tool itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Openings up to this multiple of the tool diameter are cleared with
/// exactly two passes, one at each edge.
pub const TWO_PASS_RATIO: f64 = 1.625;

/// Fraction of the lateral step actually advanced between passes.
pub const STEP_OVERLAP_FACTOR: f64 = 0.9;

/// Ordered X offsets for one radial pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralPlan {
    offsets: Vec<f64>,
}

impl LateralPlan {
    /// Plan the offsets for a tool of `tool_diameter` clearing `keyway_opening`
    ///
    /// `step_override` replaces the tool diameter as the nominal step; it is
    /// clamped to the tool diameter and ignored unless positive.
    pub fn plan(tool_diameter: f64, keyway_opening: f64, step_override: Option<f64>) -> Self {
        if keyway_opening <= tool_diameter {
            debug!(
                "Opening {} fits tool {}, single centered pass",
                keyway_opening, tool_diameter
            );
            return Self::centered();
        }

        let effective_width = keyway_opening - tool_diameter;
        let half_width = effective_width / 2.0;

        let mut offsets = if keyway_opening <= tool_diameter * TWO_PASS_RATIO {
            vec![-half_width, half_width]
        } else {
            let nominal = match step_override {
                Some(step) if step > 0.0 => {
                    if step > tool_diameter {
                        warn!(
                            "Lateral step {} exceeds tool diameter {}, clamping",
                            step, tool_diameter
                        );
                    }
                    step.min(tool_diameter)
                }
                _ => tool_diameter,
            };
            let step = nominal * STEP_OVERLAP_FACTOR;

            let mut count = (effective_width / step).ceil() as usize + 1;
            if count % 2 == 0 {
                count += 1;
            }

            let half_count = (count / 2) as i64;
            (-half_count..=half_count)
                .map(|i| (i as f64 / half_count as f64) * half_width)
                .collect()
        };

        // Center first, then outwards; the stable sort keeps -x before +x.
        offsets.sort_by(|a, b| a.abs().total_cmp(&b.abs()));

        debug!("Lateral plan: {} passes {:?}", offsets.len(), offsets);
        Self { offsets }
    }

    /// Plan with no lateral movement
    pub fn centered() -> Self {
        Self {
            offsets: Vec::new(),
        }
    }

    /// True when the tool covers the opening on its own
    pub fn is_centered(&self) -> bool {
        self.offsets.is_empty()
    }

    /// X offsets in traversal order; empty for a centered plan
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Number of strokes per radial pass
    pub fn pass_count(&self) -> usize {
        self.offsets.len().max(1)
    }

    /// Largest absolute offset (0 for a centered plan)
    pub fn max_displacement(&self) -> f64 {
        self.offsets.iter().fold(0.0, |acc, x| acc.max(x.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_not_wider_than_tool() {
        let plan = LateralPlan::plan(8.0, 6.0, None);
        assert!(plan.is_centered());
        assert_eq!(plan.pass_count(), 1);
        assert_eq!(plan.max_displacement(), 0.0);

        let plan = LateralPlan::plan(8.0, 8.0, None);
        assert!(plan.is_centered());
    }

    #[test]
    fn test_two_pass_band() {
        // 10 <= 8 * 1.625 = 13
        let plan = LateralPlan::plan(8.0, 10.0, None);
        assert_eq!(plan.offsets(), &[-1.0, 1.0]);
        assert_eq!(plan.max_displacement(), 1.0);

        // Upper edge of the band is still two passes
        let plan = LateralPlan::plan(8.0, 13.0, None);
        assert_eq!(plan.offsets(), &[-2.5, 2.5]);
    }

    #[test]
    fn test_multi_pass_is_odd_and_center_first() {
        // width 12, step 7.2 -> ceil(1.67)+1 = 3 passes
        let plan = LateralPlan::plan(8.0, 20.0, None);
        assert_eq!(plan.offsets(), &[0.0, -6.0, 6.0]);

        // width 22, step 7.2 -> ceil(3.06)+1 = 5 passes
        let plan = LateralPlan::plan(8.0, 30.0, None);
        assert_eq!(plan.offsets(), &[0.0, -5.5, 5.5, -11.0, 11.0]);
    }

    #[test]
    fn test_step_override() {
        // width 12, step 4 * 0.9 = 3.6 -> ceil(3.33)+1 = 5 passes
        let plan = LateralPlan::plan(8.0, 20.0, Some(4.0));
        assert_eq!(plan.pass_count(), 5);
        assert_eq!(plan.offsets(), &[0.0, -3.0, 3.0, -6.0, 6.0]);
    }

    #[test]
    fn test_step_override_clamped_and_ignored() {
        let default = LateralPlan::plan(8.0, 20.0, None);
        assert_eq!(LateralPlan::plan(8.0, 20.0, Some(50.0)), default);
        assert_eq!(LateralPlan::plan(8.0, 20.0, Some(0.0)), default);
        assert_eq!(LateralPlan::plan(8.0, 20.0, Some(-3.0)), default);
    }

    #[test]
    fn test_symmetry() {
        for opening in [9.0, 12.0, 14.0, 21.0, 40.0, 77.7] {
            let plan = LateralPlan::plan(8.0, opening, None);
            let half = (opening - 8.0) / 2.0;
            let sum: f64 = plan.offsets().iter().sum();
            assert!(sum.abs() < 1e-9, "opening {} sum {}", opening, sum);
            assert!(plan.offsets().contains(&half));
            assert!(plan.offsets().contains(&-half));
            assert!((plan.max_displacement() - half).abs() < 1e-12);
        }
    }
}
