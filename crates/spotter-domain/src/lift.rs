//! Lift result module - one competition entry for one athlete at one meet

use crate::equipment::{Equipment, EquipmentClass};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Competitor sex as recorded by the federation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male category
    Male,
    /// Female category
    Female,
}

impl Sex {
    /// Short code used by the upstream dataset ("M" / "F")
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Parse from a dataset code or a human-facing word
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "men" | "man" => Some(Sex::Male),
            "f" | "female" | "women" | "woman" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sex: {}", s))
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// Which of the two independently maintained record sets a row came from
///
/// Both sets form one logical population; the tag is kept for debugging and
/// for per-set storage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSet {
    /// Set A: the all-federation OpenPowerlifting export
    Opl,
    /// Set B: the IPF-family OpenIPF export
    Ipf,
}

impl RecordSet {
    /// Stable storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSet::Opl => "opl",
            RecordSet::Ipf => "ipf",
        }
    }

    /// Parse a storage name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "opl" | "a" => Some(RecordSet::Opl),
            "ipf" | "b" => Some(RecordSet::Ipf),
            _ => None,
        }
    }
}

/// Competition lifts that can be ranked on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lift {
    /// Best successful squat
    Squat,
    /// Best successful bench press
    Bench,
    /// Best successful deadlift
    Deadlift,
    /// Sum of the three
    Total,
}

/// Normalized scores some sources ship precomputed
///
/// `None` (or a non-positive value) means "not provided"; the scoring layer
/// recomputes from bodyweight and total in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredScores {
    /// Dots points
    pub dots: Option<f64>,
    /// Wilks points
    pub wilks: Option<f64>,
    /// Glossbrenner points
    pub glossbrenner: Option<f64>,
    /// IPF GL (Goodlift) points
    pub goodlift: Option<f64>,
    /// Age-adjusted Wilks
    pub mcculloch: Option<f64>,
}

/// One competition entry for one athlete at one meet
///
/// Immutable once ingested. Athlete identity is the literal `name` string;
/// see [`crate::identity`] for the consequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftResult {
    /// Athlete name (identity key)
    pub name: String,

    /// Competitor sex
    pub sex: Sex,

    /// Event code ("SBD", "B", "BD", ...) when known
    pub event: Option<String>,

    /// Equipment category as recorded ("Raw", "Wraps", "Single-ply", ...)
    pub equipment: String,

    /// Age at the meet, if recorded
    pub age: Option<f64>,

    /// Age class label ("24-34", "40-44", ...), federation-independent
    pub age_class: Option<String>,

    /// Free-text division label, federation-specific
    pub division: Option<String>,

    /// Bodyweight in kilograms
    pub bodyweight_kg: Option<f64>,

    /// Weight class label ("83", "120+")
    pub weight_class_kg: Option<String>,

    /// Best successful squat
    pub best_squat_kg: Option<f64>,

    /// Best successful bench press
    pub best_bench_kg: Option<f64>,

    /// Best successful deadlift
    pub best_deadlift_kg: Option<f64>,

    /// Total (zero or absent when a lift was missed under full-power rules)
    pub total_kg: Option<f64>,

    /// Precomputed scores, where the source provides them
    pub scores: StoredScores,

    /// Whether the competition was drug tested
    pub tested: bool,

    /// Athlete's country
    pub country: Option<String>,

    /// Federation code ("USAPL", "IPF", ...)
    pub federation: String,

    /// Competition date
    pub date: NaiveDate,

    /// Meet name
    pub meet_name: Option<String>,

    /// Record set this row was read from
    pub source: RecordSet,
}

impl LiftResult {
    /// Create a result with the identifying fields set and every optional
    /// attribute empty
    pub fn new(
        name: impl Into<String>,
        sex: Sex,
        federation: impl Into<String>,
        equipment: impl Into<String>,
        date: NaiveDate,
        source: RecordSet,
    ) -> Self {
        Self {
            name: name.into(),
            sex,
            event: None,
            equipment: equipment.into(),
            age: None,
            age_class: None,
            division: None,
            bodyweight_kg: None,
            weight_class_kg: None,
            best_squat_kg: None,
            best_bench_kg: None,
            best_deadlift_kg: None,
            total_kg: None,
            scores: StoredScores::default(),
            tested: false,
            country: None,
            federation: federation.into(),
            date,
            meet_name: None,
            source,
        }
    }

    /// Ranking contribution of one lift column
    ///
    /// Missing, zero and negative (failed) values all contribute 0.
    pub fn lift_kg(&self, lift: Lift) -> f64 {
        let value = match lift {
            Lift::Squat => self.best_squat_kg,
            Lift::Bench => self.best_bench_kg,
            Lift::Deadlift => self.best_deadlift_kg,
            Lift::Total => self.total_kg,
        };
        positive(value)
    }

    /// Bodyweight, or 0 when unknown
    pub fn bodyweight(&self) -> f64 {
        positive(self.bodyweight_kg)
    }

    /// Parsed equipment category, if recognised
    pub fn equipment_kind(&self) -> Option<Equipment> {
        Equipment::parse(&self.equipment)
    }

    /// Two-class equipment grouping used for formula parameters
    ///
    /// Unrecognised strings fall back to raw-equivalent.
    pub fn equipment_class(&self) -> EquipmentClass {
        self.equipment_kind()
            .map(|e| e.class())
            .unwrap_or(EquipmentClass::RawEquivalent)
    }

    /// True when the entry is a bench-only event
    pub fn is_bench_only(&self) -> bool {
        self.event
            .as_deref()
            .map(|e| e.trim().eq_ignore_ascii_case("B"))
            .unwrap_or(false)
    }
}

/// Collapse absent and non-positive values to 0
pub(crate) fn positive(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
