//! Rule configuration, validation, and error types.
//!
//! [`RulesConfig`] is a flat record of gate toggles and thresholds. The
//! evaluator reads it on every decision and never mutates it.
//! [`validate()`](RulesConfig::validate) checks ranges once, when a session
//! adopts the config; [`clamped()`](RulesConfig::clamped) coerces raw
//! slider input into range instead of failing.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Largest meaningful `support_m`: the radius-1 window holds 8 cells.
pub const RING1_CELLS: u32 = 8;
/// Largest meaningful `support_n`: the radius-2 window holds 24 cells.
pub const RING12_CELLS: u32 = 24;
/// Smallest accepted perimeter/area ceiling.
pub const MIN_PERIMETER_AREA: f64 = 0.1;

// ── RulesConfig ────────────────────────────────────────────────────

/// Toggles and thresholds for the optional claim gates.
///
/// Duplicate, bootstrap and adjacency checks are always on and have no
/// entry here. Each optional gate has a `limit_*`/`require_*`/`forbid_*`
/// toggle; a disabled gate is skipped without computing anything.
///
/// Missing fields deserialize to their [`Default`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Require at least two claimed edge neighbours. Default: off.
    pub require_two_adjacent: bool,
    /// Limit thin-arm length on single-neighbour claims. Default: on.
    pub limit_arm: bool,
    /// Longest permitted arm. Default: 6.
    pub max_arm_len: u32,
    /// Require neighbourhood support in the 8- and 24-cell windows. Default: on.
    pub limit_support: bool,
    /// Claimed cells in the 8-window must exceed this. Default: 1.
    pub support_m: u32,
    /// Claimed cells in the 24-window must exceed this. Default: 5.
    pub support_n: u32,
    /// Cap the perimeter/area ratio. Default: off.
    pub limit_perimeter_area: bool,
    /// Largest permitted perimeter/area ratio. Default: 3.5.
    pub max_perimeter_area: f64,
    /// Cap the approximate diameter. Default: off.
    pub limit_diameter: bool,
    /// Largest permitted approximate diameter. Default: 64.
    pub max_diameter: u32,
    /// Cap the number of endpoints. Default: off.
    pub limit_endpoints: bool,
    /// Largest permitted endpoint count. Default: 64.
    pub max_endpoints: u32,
    /// Reject claims that create or enlarge holes. Default: on.
    pub forbid_holes: bool,
    /// Enforce the bounding-square fill ratio (improve-or-hold). Default: off.
    pub limit_outer_fill: bool,
    /// Minimum `A / L²`. Default: 0.65.
    pub min_outer_fill: f64,
    /// Enforce the largest-solid-square share. Default: off.
    pub limit_inner_share: bool,
    /// Minimum `Lin² / A`. Default: 0.2.
    pub min_inner_share: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            require_two_adjacent: false,
            limit_arm: true,
            max_arm_len: 6,
            limit_support: true,
            support_m: 1,
            support_n: 5,
            limit_perimeter_area: false,
            max_perimeter_area: 3.5,
            limit_diameter: false,
            max_diameter: 64,
            limit_endpoints: false,
            max_endpoints: 64,
            forbid_holes: true,
            limit_outer_fill: false,
            min_outer_fill: 0.65,
            limit_inner_share: false,
            min_inner_share: 0.2,
        }
    }
}

impl RulesConfig {
    /// Every optional gate off; thresholds keep their defaults.
    ///
    /// Only duplicate and adjacency checks remain, which makes this a
    /// convenient base for enabling one gate at a time.
    pub fn permissive() -> Self {
        Self {
            require_two_adjacent: false,
            limit_arm: false,
            limit_support: false,
            limit_perimeter_area: false,
            limit_diameter: false,
            limit_endpoints: false,
            forbid_holes: false,
            limit_outer_fill: false,
            limit_inner_share: false,
            ..Self::default()
        }
    }

    /// Enable the two-adjacency gate.
    pub fn with_two_adjacency(mut self) -> Self {
        self.require_two_adjacent = true;
        self
    }

    /// Enable the arm-length gate with the given maximum.
    pub fn with_arm_limit(mut self, max_arm_len: u32) -> Self {
        self.limit_arm = true;
        self.max_arm_len = max_arm_len;
        self
    }

    /// Enable the neighbourhood-support gate with thresholds `m` and `n`.
    pub fn with_support(mut self, m: u32, n: u32) -> Self {
        self.limit_support = true;
        self.support_m = m;
        self.support_n = n;
        self
    }

    /// Enable the perimeter/area gate with the given ceiling.
    pub fn with_perimeter_area_limit(mut self, max: f64) -> Self {
        self.limit_perimeter_area = true;
        self.max_perimeter_area = max;
        self
    }

    /// Enable the diameter gate with the given ceiling.
    pub fn with_diameter_limit(mut self, max: u32) -> Self {
        self.limit_diameter = true;
        self.max_diameter = max;
        self
    }

    /// Enable the endpoint gate with the given ceiling.
    pub fn with_endpoint_limit(mut self, max: u32) -> Self {
        self.limit_endpoints = true;
        self.max_endpoints = max;
        self
    }

    /// Toggle the no-new/no-larger-holes gate.
    pub fn with_forbid_holes(mut self, forbid: bool) -> Self {
        self.forbid_holes = forbid;
        self
    }

    /// Enable the outer-fill gate with the given minimum.
    pub fn with_outer_fill(mut self, min: f64) -> Self {
        self.limit_outer_fill = true;
        self.min_outer_fill = min;
        self
    }

    /// Enable the inner-share gate with the given minimum.
    pub fn with_inner_share(mut self, min: f64) -> Self {
        self.limit_inner_share = true;
        self.min_inner_share = min;
        self
    }

    /// Check every threshold is in its meaningful range.
    ///
    /// Thresholds are validated even when their gate is disabled, so a
    /// config never becomes invalid just by toggling a gate on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_arm_len == 0 {
            return Err(ConfigError::ArmLengthZero);
        }
        if self.support_m > RING1_CELLS {
            return Err(ConfigError::SupportThresholdOutOfRange {
                name: "support_m",
                value: self.support_m,
                max: RING1_CELLS,
            });
        }
        if self.support_n > RING12_CELLS {
            return Err(ConfigError::SupportThresholdOutOfRange {
                name: "support_n",
                value: self.support_n,
                max: RING12_CELLS,
            });
        }
        if !self.max_perimeter_area.is_finite() || self.max_perimeter_area < MIN_PERIMETER_AREA {
            return Err(ConfigError::PerimeterAreaOutOfRange {
                value: self.max_perimeter_area,
            });
        }
        if self.max_endpoints == 0 {
            return Err(ConfigError::EndpointLimitZero);
        }
        check_fraction("min_outer_fill", self.min_outer_fill)?;
        check_fraction("min_inner_share", self.min_inner_share)?;
        Ok(())
    }

    /// Coerce every threshold into range.
    ///
    /// Non-finite floats fall back to the default threshold. The result
    /// always passes [`validate()`](Self::validate).
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            max_arm_len: self.max_arm_len.max(1),
            support_m: self.support_m.min(RING1_CELLS),
            support_n: self.support_n.min(RING12_CELLS),
            max_perimeter_area: finite_or(self.max_perimeter_area, defaults.max_perimeter_area)
                .max(MIN_PERIMETER_AREA),
            max_endpoints: self.max_endpoints.max(1),
            min_outer_fill: finite_or(self.min_outer_fill, defaults.min_outer_fill).clamp(0.0, 1.0),
            min_inner_share: finite_or(self.min_inner_share, defaults.min_inner_share)
                .clamp(0.0, 1.0),
            ..self.clone()
        }
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { name, value })
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`RulesConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_arm_len` is 0; every single-neighbour claim would be rejected.
    ArmLengthZero,
    /// A support threshold exceeds the size of its window.
    SupportThresholdOutOfRange {
        /// Field name.
        name: &'static str,
        /// The configured value.
        value: u32,
        /// Window size.
        max: u32,
    },
    /// `max_perimeter_area` is not finite or below [`MIN_PERIMETER_AREA`].
    PerimeterAreaOutOfRange {
        /// The configured value.
        value: f64,
    },
    /// `max_endpoints` is 0.
    EndpointLimitZero,
    /// A ratio threshold is not finite or outside `[0, 1]`.
    FractionOutOfRange {
        /// Field name.
        name: &'static str,
        /// The configured value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArmLengthZero => write!(f, "max_arm_len must be at least 1"),
            Self::SupportThresholdOutOfRange { name, value, max } => {
                write!(f, "{name} is {value}, window only holds {max} cells")
            }
            Self::PerimeterAreaOutOfRange { value } => {
                write!(
                    f,
                    "max_perimeter_area must be finite and >= {MIN_PERIMETER_AREA}, got {value}"
                )
            }
            Self::EndpointLimitZero => write!(f, "max_endpoints must be at least 1"),
            Self::FractionOutOfRange { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(RulesConfig::default().validate(), Ok(()));
        assert_eq!(RulesConfig::permissive().validate(), Ok(()));
    }

    #[test]
    fn permissive_disables_every_gate() {
        let r = RulesConfig::permissive();
        assert!(!r.require_two_adjacent);
        assert!(!r.limit_arm);
        assert!(!r.limit_support);
        assert!(!r.limit_perimeter_area);
        assert!(!r.limit_diameter);
        assert!(!r.limit_endpoints);
        assert!(!r.forbid_holes);
        assert!(!r.limit_outer_fill);
        assert!(!r.limit_inner_share);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let base = RulesConfig::default();
        assert_eq!(
            RulesConfig { max_arm_len: 0, ..base.clone() }.validate(),
            Err(ConfigError::ArmLengthZero)
        );
        assert!(matches!(
            RulesConfig { support_m: 9, ..base.clone() }.validate(),
            Err(ConfigError::SupportThresholdOutOfRange { name: "support_m", .. })
        ));
        assert!(matches!(
            RulesConfig { support_n: 25, ..base.clone() }.validate(),
            Err(ConfigError::SupportThresholdOutOfRange { name: "support_n", .. })
        ));
        assert!(matches!(
            RulesConfig { max_perimeter_area: f64::NAN, ..base.clone() }.validate(),
            Err(ConfigError::PerimeterAreaOutOfRange { .. })
        ));
        assert!(matches!(
            RulesConfig { max_perimeter_area: 0.05, ..base.clone() }.validate(),
            Err(ConfigError::PerimeterAreaOutOfRange { .. })
        ));
        assert_eq!(
            RulesConfig { max_endpoints: 0, ..base.clone() }.validate(),
            Err(ConfigError::EndpointLimitZero)
        );
        assert!(matches!(
            RulesConfig { min_inner_share: 1.5, ..base.clone() }.validate(),
            Err(ConfigError::FractionOutOfRange { name: "min_inner_share", .. })
        ));
        assert!(matches!(
            RulesConfig { min_outer_fill: -0.1, ..base }.validate(),
            Err(ConfigError::FractionOutOfRange { name: "min_outer_fill", .. })
        ));
    }

    #[test]
    fn clamped_always_validates() {
        let wild = RulesConfig {
            max_arm_len: 0,
            support_m: 100,
            support_n: 100,
            max_perimeter_area: f64::INFINITY,
            max_endpoints: 0,
            min_outer_fill: 7.0,
            min_inner_share: f64::NAN,
            ..RulesConfig::default()
        };
        let c = wild.clamped();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.max_arm_len, 1);
        assert_eq!(c.support_m, RING1_CELLS);
        assert_eq!(c.support_n, RING12_CELLS);
        assert_eq!(c.max_perimeter_area, 3.5);
        assert_eq!(c.min_outer_fill, 1.0);
        assert_eq!(c.min_inner_share, 0.2);
    }

    #[test]
    fn builder_methods_enable_gates() {
        let r = RulesConfig::permissive()
            .with_arm_limit(2)
            .with_support(3, 10)
            .with_outer_fill(0.5);
        assert!(r.limit_arm && r.limit_support && r.limit_outer_fill);
        assert_eq!((r.max_arm_len, r.support_m, r.support_n), (2, 3, 10));
        assert_eq!(r.min_outer_fill, 0.5);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let r: RulesConfig = serde_json::from_str(r#"{"limit_arm": false, "max_diameter": 10}"#).unwrap();
        assert!(!r.limit_arm);
        assert_eq!(r.max_diameter, 10);
        assert!(r.forbid_holes);
        let back: RulesConfig = serde_json::from_str(&serde_json::to_string(&r).unwrap()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn error_messages_name_the_field() {
        let e = ConfigError::FractionOutOfRange { name: "min_outer_fill", value: 2.0 };
        assert!(e.to_string().contains("min_outer_fill"));
    }
}
