//! Three-source selectors: blend and select.
//!
//! Both take two value sources and a control source (slot 2). Sources are passed lazily so a
//! selector only evaluates the branch it actually returns.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::kernel::{linear, s_curve3};

/// Weighted blend of `v0` and `v1`; a control of -1 yields `v0`, +1 yields `v1`.
#[inline]
pub fn blend(v0: f64, v1: f64, control: f64) -> f64 {
    linear(v0, v1, (control + 1.0) / 2.0)
}

/// Parameters for a select module.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectParams {
    /// Lower bound of the control range that selects source 1.
    pub lower: f64,
    /// Upper bound of the control range that selects source 1.
    pub upper: f64,
    /// Half-width of the smoothed transition at each bound.
    pub edge_falloff: f64,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
            edge_falloff: 0.0,
        }
    }
}

impl SelectParams {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            edge_falloff: 0.0,
        }
    }

    /// Sets the edge falloff.
    pub fn with_edge_falloff(mut self, edge_falloff: f64) -> Self {
        self.edge_falloff = edge_falloff;
        self
    }

    /// Rejects inverted bounds and clamps the falloff so both transitions fit inside the range.
    pub(crate) fn normalized(mut self) -> Result<Self> {
        if self.lower.is_nan() || self.upper.is_nan() || self.lower > self.upper {
            return Err(Error::InvalidParameter(format!(
                "Select lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        if self.edge_falloff.is_nan() || self.edge_falloff < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "Select edge falloff must be >= 0, got {}",
                self.edge_falloff
            )));
        }
        let max_falloff = (self.upper - self.lower) / 2.0;
        if self.edge_falloff > max_falloff {
            warn!(
                "Select edge falloff {} clamped to {}.",
                self.edge_falloff, max_falloff
            );
            self.edge_falloff = max_falloff;
        }
        Ok(self)
    }

    /// Picks between `v0` and `v1` by `control`.
    ///
    /// Without falloff, `v1` is returned for controls inside `[lower, upper]`. With falloff the
    /// control axis splits into five bands: `v0`, an S-curve ramp from `v0` to `v1`, `v1`, a ramp
    /// from `v1` back to `v0`, and `v0`.
    pub fn select(
        &self,
        control: f64,
        v0: impl FnOnce() -> f64,
        v1: impl FnOnce() -> f64,
    ) -> f64 {
        let falloff = self.edge_falloff;
        if falloff > 0.0 {
            if control < self.lower - falloff {
                v0()
            } else if control < self.lower + falloff {
                let start = self.lower - falloff;
                let alpha = s_curve3((control - start) / (2.0 * falloff));
                linear(v0(), v1(), alpha)
            } else if control < self.upper - falloff {
                v1()
            } else if control < self.upper + falloff {
                let start = self.upper - falloff;
                let alpha = s_curve3((control - start) / (2.0 * falloff));
                linear(v1(), v0(), alpha)
            } else {
                v0()
            }
        } else if control < self.lower || control > self.upper {
            v0()
        } else {
            v1()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: f64 = -0.75;
    const V1: f64 = 0.5;

    fn select(params: &SelectParams, control: f64) -> f64 {
        params.select(control, || V0, || V1)
    }

    #[test]
    fn blend_maps_control_to_weight() {
        assert_eq!(blend(2.0, 4.0, -1.0), 2.0);
        assert_eq!(blend(2.0, 4.0, 1.0), 4.0);
        assert_eq!(blend(2.0, 4.0, 0.0), 3.0);
    }

    #[test]
    fn hard_select_without_falloff() {
        let params = SelectParams::new(-1.0, 1.0).normalized().expect("valid");
        assert_eq!(select(&params, 0.5), V1);
        assert_eq!(select(&params, 1.5), V0);
        assert_eq!(select(&params, -1.5), V0);
        assert_eq!(select(&params, 1.0), V1);
        assert_eq!(select(&params, -1.0), V1);
    }

    #[test]
    fn five_band_select_with_falloff() {
        let params = SelectParams::new(0.5, 0.8)
            .with_edge_falloff(0.1)
            .normalized()
            .expect("valid");

        assert_eq!(select(&params, 0.3), V0);

        let alpha = s_curve3((0.5 - (0.5 - 0.1)) / (2.0 * 0.1));
        assert_eq!(select(&params, 0.5), linear(V0, V1, alpha));
        assert!((select(&params, 0.5) - (V0 + V1) / 2.0).abs() < 1e-9);

        assert_eq!(select(&params, 0.65), V1);

        let alpha = s_curve3((0.8 - (0.8 - 0.1)) / (2.0 * 0.1));
        assert_eq!(select(&params, 0.8), linear(V1, V0, alpha));

        assert_eq!(select(&params, 0.95), V0);
    }

    #[test]
    fn falloff_ramps_are_continuous() {
        let params = SelectParams::new(0.0, 1.0)
            .with_edge_falloff(0.2)
            .normalized()
            .expect("valid");
        let eps = 1e-9;
        for edge in [-0.2, 0.2, 0.8, 1.2] {
            let below = select(&params, edge - eps);
            let above = select(&params, edge + eps);
            assert!((below - above).abs() < 1e-6, "jump at {edge}");
        }
    }

    #[test]
    fn only_selected_branch_is_evaluated() {
        let params = SelectParams::new(-1.0, 1.0);
        let v = params.select(0.0, || panic!("source 0 evaluated"), || 1.0);
        assert_eq!(v, 1.0);
    }

    #[test]
    fn falloff_is_clamped_to_half_range() {
        let params = SelectParams::new(0.0, 0.4)
            .with_edge_falloff(1.0)
            .normalized()
            .expect("valid");
        assert_eq!(params.edge_falloff, 0.2);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = SelectParams::new(1.0, -1.0)
            .normalized()
            .expect_err("inverted bounds");
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(SelectParams::new(0.0, 1.0)
            .with_edge_falloff(-0.1)
            .normalized()
            .is_err());
    }
}
