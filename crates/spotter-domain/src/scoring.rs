//! Score calculator
//!
//! Maps (sex, bodyweight, total) to a bodyweight-normalized score under one of
//! the named formulas. Every coefficient function clamps bodyweight into its
//! valid range before evaluation; out-of-range bodyweights score exactly like
//! the nearest boundary. Non-positive bodyweight or total always scores 0.

use crate::equipment::EquipmentClass;
use crate::lift::Sex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named bodyweight-normalization formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Dynamic Objective Team Scoring
    Dots,
    /// Wilks (pre-2020 coefficients)
    Wilks,
    /// Glossbrenner (Schwartz/Malone blended with Wilks)
    Glossbrenner,
    /// IPF GL points
    Goodlift,
    /// Wilks adjusted by age
    McCulloch,
}

impl Formula {
    /// Every formula
    pub const ALL: [Formula; 5] = [
        Formula::Dots,
        Formula::Wilks,
        Formula::Glossbrenner,
        Formula::Goodlift,
        Formula::McCulloch,
    ];

    /// Human-facing name
    pub fn label(&self) -> &'static str {
        match self {
            Formula::Dots => "Dots",
            Formula::Wilks => "Wilks",
            Formula::Glossbrenner => "Glossbrenner",
            Formula::Goodlift => "GL Points",
            Formula::McCulloch => "McCulloch",
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dots polynomial coefficients (x^4 .. x^0) and valid bodyweight ranges
mod dots {
    pub const MEN: [f64; 5] = [
        -0.0000010930,
        0.0007391293,
        -0.1918759221,
        24.0900756,
        -307.75076,
    ];
    pub const WOMEN: [f64; 5] = [
        -0.0000010706,
        0.0005158568,
        -0.1126655495,
        13.6175032,
        -57.96288,
    ];
    pub const MEN_RANGE: (f64, f64) = (40.0, 210.0);
    pub const WOMEN_RANGE: (f64, f64) = (40.0, 150.0);
}

/// Wilks polynomial coefficients (x^5 .. x^0) and valid bodyweight ranges
mod wilks {
    pub const MEN: [f64; 6] = [
        -1.291e-08,
        7.01863e-06,
        -0.00113732,
        -0.002388645,
        16.2606339,
        -216.0475144,
    ];
    pub const WOMEN: [f64; 6] = [
        -0.00000009054,
        0.00004731582,
        -0.00930733913,
        0.82112226871,
        -27.23842536447,
        594.31747775582,
    ];
    pub const MEN_RANGE: (f64, f64) = (40.0, 201.9);
    pub const WOMEN_RANGE: (f64, f64) = (26.51, 154.53);
}

/// Glossbrenner branch thresholds and linear-extrapolation terms
mod glossbrenner {
    pub const MEN_THRESHOLD: f64 = 153.05;
    pub const WOMEN_THRESHOLD: f64 = 106.3;
    pub const MEN_LINEAR: (f64, f64) = (-0.000821668402557, 0.676940740094416);
    pub const WOMEN_LINEAR: (f64, f64) = (-0.000313738002024, 0.852664892884785);
}

/// IPF GL (A, B, C) parameter triples
mod goodlift {
    pub const MIN_BODYWEIGHT: f64 = 35.0;

    pub const SBD_MEN_RAW: [f64; 3] = [1199.72839, 1025.18162, 0.009210];
    pub const SBD_MEN_EQUIPPED: [f64; 3] = [1236.25115, 1449.21864, 0.01644];
    pub const SBD_WOMEN_RAW: [f64; 3] = [610.32796, 1045.59282, 0.03048];
    pub const SBD_WOMEN_EQUIPPED: [f64; 3] = [758.63878, 949.31382, 0.02435];

    pub const BENCH_MEN_RAW: [f64; 3] = [320.98041, 281.40258, 0.01008];
    pub const BENCH_MEN_EQUIPPED: [f64; 3] = [381.22073, 733.79378, 0.02398];
    pub const BENCH_WOMEN_RAW: [f64; 3] = [142.40398, 442.52671, 0.04724];
    pub const BENCH_WOMEN_EQUIPPED: [f64; 3] = [221.82209, 357.00377, 0.02937];
}

/// Age coefficients: Foster for teenagers, McCulloch for masters
mod age {
    pub const TEEN_FIRST_AGE: u32 = 14;
    /// Ages 14..=22
    pub const TEEN: [f64; 9] = [1.23, 1.18, 1.13, 1.08, 1.06, 1.04, 1.03, 1.02, 1.01];

    pub const MASTERS_FIRST_AGE: u32 = 41;
    /// Ages 41..=80
    pub const MASTERS: [f64; 40] = [
        1.010, 1.020, 1.031, 1.043, 1.055, 1.068, 1.082, 1.097, 1.113, 1.130, //
        1.147, 1.165, 1.184, 1.204, 1.225, 1.246, 1.268, 1.291, 1.315, 1.340, //
        1.366, 1.393, 1.421, 1.450, 1.480, 1.511, 1.543, 1.576, 1.610, 1.645, //
        1.681, 1.718, 1.756, 1.795, 1.835, 1.876, 1.918, 1.961, 2.005, 2.050,
    ];
}

/// Score `total_kg` under `formula`
///
/// Goodlift uses the full-power parameters; call [`goodlift`] directly for
/// bench-only entries. McCulloch without an age is plain Wilks; call
/// [`mcculloch`] to supply one.
///
/// # Examples
///
/// ```
/// use spotter_domain::equipment::EquipmentClass;
/// use spotter_domain::scoring::{score, Formula};
/// use spotter_domain::Sex;
///
/// let dots = score(Formula::Dots, Sex::Male, 90.0, 500.0, EquipmentClass::RawEquivalent);
/// assert!((dots - 323.30).abs() < 0.01);
///
/// assert_eq!(score(Formula::Wilks, Sex::Female, 0.0, 400.0, EquipmentClass::RawEquivalent), 0.0);
/// ```
pub fn score(
    formula: Formula,
    sex: Sex,
    bodyweight_kg: f64,
    total_kg: f64,
    equipment: EquipmentClass,
) -> f64 {
    match formula {
        Formula::Dots => dots(sex, bodyweight_kg, total_kg),
        Formula::Wilks => wilks(sex, bodyweight_kg, total_kg),
        Formula::Glossbrenner => glossbrenner(sex, bodyweight_kg, total_kg),
        Formula::Goodlift => goodlift(sex, equipment, false, bodyweight_kg, total_kg),
        Formula::McCulloch => mcculloch(sex, bodyweight_kg, total_kg, None),
    }
}

/// Dots points
pub fn dots(sex: Sex, bodyweight_kg: f64, total_kg: f64) -> f64 {
    if !valid_inputs(bodyweight_kg, total_kg) {
        return 0.0;
    }
    finish(dots_coefficient(sex, bodyweight_kg) * total_kg)
}

/// Wilks points
pub fn wilks(sex: Sex, bodyweight_kg: f64, total_kg: f64) -> f64 {
    if !valid_inputs(bodyweight_kg, total_kg) {
        return 0.0;
    }
    finish(wilks_coefficient(sex, bodyweight_kg) * total_kg)
}

/// Glossbrenner points
pub fn glossbrenner(sex: Sex, bodyweight_kg: f64, total_kg: f64) -> f64 {
    if !valid_inputs(bodyweight_kg, total_kg) {
        return 0.0;
    }
    finish(glossbrenner_coefficient(sex, bodyweight_kg) * total_kg)
}

/// IPF GL points
///
/// Bodyweights under 35 kg are outside the model and score 0.
pub fn goodlift(
    sex: Sex,
    equipment: EquipmentClass,
    bench_only: bool,
    bodyweight_kg: f64,
    total_kg: f64,
) -> f64 {
    if !valid_inputs(bodyweight_kg, total_kg) || bodyweight_kg < goodlift::MIN_BODYWEIGHT {
        return 0.0;
    }

    let [a, b, c] = goodlift_parameters(sex, equipment, bench_only);
    let denominator = a - b * (-c * bodyweight_kg).exp();
    if denominator == 0.0 {
        return 0.0;
    }

    finish(total_kg * (100.0 / denominator).max(0.0))
}

/// McCulloch points: Wilks scaled by the age coefficient
pub fn mcculloch(sex: Sex, bodyweight_kg: f64, total_kg: f64, age: Option<f64>) -> f64 {
    let coefficient = age.map(age_coefficient).unwrap_or(1.0);
    finish(wilks(sex, bodyweight_kg, total_kg) * coefficient)
}

/// Foster/McCulloch age coefficient; 1.0 for ages 23 through 40
///
/// Ages below 14 use the age-14 coefficient and ages above 80 the age-80
/// coefficient.
pub fn age_coefficient(age: f64) -> f64 {
    if !age.is_finite() || age <= 0.0 {
        return 1.0;
    }
    let years = age.floor() as u32;

    if years <= age::TEEN_FIRST_AGE {
        return age::TEEN[0];
    }
    let teen_index = (years - age::TEEN_FIRST_AGE) as usize;
    if teen_index < age::TEEN.len() {
        return age::TEEN[teen_index];
    }
    if years < age::MASTERS_FIRST_AGE {
        return 1.0;
    }
    let masters_index = ((years - age::MASTERS_FIRST_AGE) as usize).min(age::MASTERS.len() - 1);
    age::MASTERS[masters_index]
}

fn dots_coefficient(sex: Sex, bodyweight_kg: f64) -> f64 {
    let (coefficients, range) = match sex {
        Sex::Male => (&dots::MEN, dots::MEN_RANGE),
        Sex::Female => (&dots::WOMEN, dots::WOMEN_RANGE),
    };
    500.0 / polynomial(coefficients, clamp(bodyweight_kg, range))
}

fn wilks_coefficient(sex: Sex, bodyweight_kg: f64) -> f64 {
    let (coefficients, range) = match sex {
        Sex::Male => (&wilks::MEN[..], wilks::MEN_RANGE),
        Sex::Female => (&wilks::WOMEN[..], wilks::WOMEN_RANGE),
    };
    500.0 / polynomial(coefficients, clamp(bodyweight_kg, range))
}

/// Men's bodyweight curve used by Glossbrenner
fn schwartz_coefficient(bodyweight_kg: f64) -> f64 {
    1000.0 / polynomial(&dots::MEN, clamp(bodyweight_kg, dots::MEN_RANGE))
}

/// Women's bodyweight curve used by Glossbrenner
fn malone_coefficient(bodyweight_kg: f64) -> f64 {
    1000.0 / polynomial(&dots::WOMEN, clamp(bodyweight_kg, dots::WOMEN_RANGE))
}

fn glossbrenner_coefficient(sex: Sex, bodyweight_kg: f64) -> f64 {
    match sex {
        Sex::Male => {
            let curve = schwartz_coefficient(bodyweight_kg);
            if bodyweight_kg < glossbrenner::MEN_THRESHOLD {
                (curve + wilks_coefficient(Sex::Male, bodyweight_kg)) / 2.0
            } else {
                let (a, b) = glossbrenner::MEN_LINEAR;
                (curve + a * bodyweight_kg + b) / 2.0
            }
        }
        Sex::Female => {
            let curve = malone_coefficient(bodyweight_kg);
            if bodyweight_kg < glossbrenner::WOMEN_THRESHOLD {
                (curve + wilks_coefficient(Sex::Female, bodyweight_kg)) / 2.0
            } else {
                let (a, b) = glossbrenner::WOMEN_LINEAR;
                (curve + a * bodyweight_kg + b) / 2.0
            }
        }
    }
}

fn goodlift_parameters(sex: Sex, equipment: EquipmentClass, bench_only: bool) -> [f64; 3] {
    use EquipmentClass::{Equipped, RawEquivalent};

    match (bench_only, sex, equipment) {
        (false, Sex::Male, RawEquivalent) => goodlift::SBD_MEN_RAW,
        (false, Sex::Male, Equipped) => goodlift::SBD_MEN_EQUIPPED,
        (false, Sex::Female, RawEquivalent) => goodlift::SBD_WOMEN_RAW,
        (false, Sex::Female, Equipped) => goodlift::SBD_WOMEN_EQUIPPED,
        (true, Sex::Male, RawEquivalent) => goodlift::BENCH_MEN_RAW,
        (true, Sex::Male, Equipped) => goodlift::BENCH_MEN_EQUIPPED,
        (true, Sex::Female, RawEquivalent) => goodlift::BENCH_WOMEN_RAW,
        (true, Sex::Female, Equipped) => goodlift::BENCH_WOMEN_EQUIPPED,
    }
}

/// Horner evaluation, highest power first
fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

fn clamp(bodyweight_kg: f64, (low, high): (f64, f64)) -> f64 {
    bodyweight_kg.clamp(low, high)
}

fn valid_inputs(bodyweight_kg: f64, total_kg: f64) -> bool {
    bodyweight_kg.is_finite() && total_kg.is_finite() && bodyweight_kg > 0.0 && total_kg > 0.0
}

/// Scores are never negative or NaN
fn finish(points: f64) -> f64 {
    if points.is_finite() && points > 0.0 {
        points
    } else {
        0.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_sex() -> impl Strategy<Value = Sex> {
        prop_oneof![Just(Sex::Male), Just(Sex::Female)]
    }

    fn any_class() -> impl Strategy<Value = EquipmentClass> {
        prop_oneof![Just(EquipmentClass::RawEquivalent), Just(EquipmentClass::Equipped)]
    }

    proptest! {
        /// Property: scores are never negative
        #[test]
        fn test_scores_non_negative(
            sex in any_sex(),
            class in any_class(),
            bodyweight in -50.0f64..400.0,
            total in -100.0f64..1500.0,
        ) {
            for formula in Formula::ALL {
                let points = score(formula, sex, bodyweight, total, class);
                prop_assert!(points >= 0.0);
                if bodyweight <= 0.0 || total <= 0.0 {
                    prop_assert_eq!(points, 0.0);
                }
            }
        }

        /// Property: Dots and Wilks below the valid range equal the lower boundary
        #[test]
        fn test_clamped_below_range(bodyweight in 1.0f64..40.0, total in 1.0f64..1200.0) {
            prop_assert_eq!(dots(Sex::Male, bodyweight, total), dots(Sex::Male, 40.0, total));
            prop_assert_eq!(wilks(Sex::Male, bodyweight, total), wilks(Sex::Male, 40.0, total));
            prop_assert_eq!(dots(Sex::Female, bodyweight, total), dots(Sex::Female, 40.0, total));
        }

        /// Property: Dots and Wilks above the valid range equal the upper boundary
        #[test]
        fn test_clamped_above_range(bodyweight in 210.0f64..400.0, total in 1.0f64..1200.0) {
            prop_assert_eq!(dots(Sex::Male, bodyweight, total), dots(Sex::Male, 210.0, total));
            prop_assert_eq!(wilks(Sex::Male, bodyweight, total), wilks(Sex::Male, 201.9, total));
            prop_assert_eq!(dots(Sex::Female, bodyweight, total), dots(Sex::Female, 150.0, total));
            prop_assert_eq!(wilks(Sex::Female, bodyweight, total), wilks(Sex::Female, 154.53, total));
        }
    }
}
