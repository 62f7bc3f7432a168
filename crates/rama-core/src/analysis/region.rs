use serde::{Deserialize, Serialize};
use std::fmt;

/// Stereochemical favorability of a backbone conformation.
///
/// Variants are declared in plotting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Most Favorable")]
    MostFavorable,
    #[serde(rename = "Favorable")]
    Favorable,
    #[serde(rename = "Allowed")]
    Allowed,
    #[serde(rename = "Disallowed")]
    Disallowed,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::MostFavorable,
        Region::Favorable,
        Region::Allowed,
        Region::Disallowed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::MostFavorable => "Most Favorable",
            Region::Favorable => "Favorable",
            Region::Allowed => "Allowed",
            Region::Disallowed => "Disallowed",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn within(value: f64, low: f64, high: f64) -> bool {
    (low..=high).contains(&value)
}

/// Classifies a (phi, psi) pair, in degrees, into its favorability region.
///
/// The boxes are a coarse rectangular approximation of the beta-sheet and
/// helical basins. Rules are checked from most to least favorable and all
/// bounds are inclusive. NaN or out-of-range input is `Disallowed`.
pub fn classify(phi: f64, psi: f64) -> Region {
    if (within(phi, -140.0, -40.0) && within(psi, 50.0, 180.0))
        || (within(phi, -180.0, -140.0) && within(psi, -180.0, 0.0))
    {
        Region::MostFavorable
    } else if within(phi, -140.0, 40.0) && within(psi, -100.0, 100.0) {
        Region::Favorable
    } else if within(phi, -180.0, 180.0) && within(psi, -180.0, 180.0) {
        Region::Allowed
    } else {
        Region::Disallowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 1e-6;

    #[test]
    fn canonical_points_classify_as_expected() {
        assert_eq!(classify(-90.0, 100.0), Region::MostFavorable);
        assert_eq!(classify(-160.0, -50.0), Region::MostFavorable);
        assert_eq!(classify(0.0, 0.0), Region::Favorable);
        assert_eq!(classify(170.0, 170.0), Region::Allowed);
    }

    #[test]
    fn upper_left_box_boundaries_are_inclusive() {
        assert_eq!(classify(-140.0, 50.0), Region::MostFavorable);
        assert_eq!(classify(-40.0, 180.0), Region::MostFavorable);
        assert_eq!(classify(-40.0 + STEP, 120.0), Region::Allowed);
        assert_eq!(classify(-90.0, 50.0 - STEP), Region::Favorable);
        assert_eq!(classify(-140.0 - STEP, 120.0), Region::Allowed);
    }

    #[test]
    fn lower_left_box_boundaries_are_inclusive() {
        assert_eq!(classify(-180.0, -180.0), Region::MostFavorable);
        assert_eq!(classify(-140.0, 0.0), Region::MostFavorable);
        assert_eq!(classify(-160.0, STEP), Region::Allowed);
        assert_eq!(classify(-140.0 + STEP, -50.0), Region::Favorable);
    }

    #[test]
    fn favorable_box_boundaries_are_inclusive() {
        assert_eq!(classify(40.0, 100.0), Region::Favorable);
        assert_eq!(classify(-40.0 + STEP, -100.0), Region::Favorable);
        assert_eq!(classify(40.0 + STEP, 0.0), Region::Allowed);
        assert_eq!(classify(0.0, 100.0 + STEP), Region::Allowed);
        assert_eq!(classify(0.0, -100.0 - STEP), Region::Allowed);
    }

    #[test]
    fn most_favorable_takes_precedence_over_favorable() {
        assert_eq!(classify(-100.0, 60.0), Region::MostFavorable);
        assert_eq!(classify(-140.0, -50.0), Region::MostFavorable);
    }

    #[test]
    fn out_of_domain_input_is_disallowed() {
        assert_eq!(classify(180.0, 180.0), Region::Allowed);
        assert_eq!(classify(180.0 + STEP, 0.0), Region::Disallowed);
        assert_eq!(classify(0.0, -180.0 - STEP), Region::Disallowed);
        assert_eq!(classify(f64::NAN, 0.0), Region::Disallowed);
        assert_eq!(classify(0.0, f64::NAN), Region::Disallowed);
    }

    #[test]
    fn display_uses_human_readable_labels() {
        for region in Region::ALL {
            assert_eq!(region.to_string(), region.label());
        }
        assert_eq!(Region::MostFavorable.to_string(), "Most Favorable");
    }
}
