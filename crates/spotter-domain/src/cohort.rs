//! Cohort filter - an immutable predicate over lift results
//!
//! Built once per request from the user-facing filter selections. Every
//! active sub-predicate is ANDed; an inactive one is `Any`.

use crate::division::{leading_age, Division};
use crate::equipment::{Equipment, EquipmentClass};
use crate::lift::{LiftResult, Sex};
use crate::taxonomy::Taxonomy;
use crate::window::DateWindow;
use serde::{Deserialize, Serialize};

/// Raw filter selections as the caller supplied them
///
/// Empty strings and the UI's "all" sentinels mean no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelections {
    /// Federation code or group token ("usapl", "all-usa-tested", "fully-tested")
    pub federation: Option<String>,
    /// Equipment token ("raw", "Raw + Wraps", "equipped")
    pub equipment: Option<String>,
    /// Weight-class label ("83 kg", "120+ kg")
    pub weight_class: Option<String>,
    /// Division label ("Open", "Masters 1")
    pub division: Option<String>,
    /// Competitor sex
    pub sex: Option<String>,
    /// Athlete country
    pub country: Option<String>,
}

/// Federation selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FederationFilter {
    /// No restriction
    Any,
    /// One federation code, compared case-insensitively
    Exact {
        /// Lowercased code
        code: String,
        /// Also require the tested flag
        tested_only: bool,
    },
    /// Any federation historically associated with a country
    CountryGroup {
        /// Lowercased codes
        codes: Vec<String>,
        /// Also require the tested flag
        tested_only: bool,
    },
    /// Any federation, tested meets only
    TestedOnly,
    /// Federations that test every competitor
    FullyTestedGroup(Vec<String>),
}

/// Equipment selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentFilter {
    /// No restriction
    Any,
    /// One equipment string, compared case-insensitively
    Exact(String),
    /// Membership in a combined class ("Raw + Wraps")
    EquivalenceClass(Vec<String>),
}

impl EquipmentFilter {
    /// Formula parameter class implied by the selection
    ///
    /// `None` for no selection. A class or combined selection is equipped
    /// only when every member is; unknown single names are raw-equivalent.
    pub fn class(&self) -> Option<EquipmentClass> {
        match self {
            EquipmentFilter::Any => None,
            EquipmentFilter::Exact(name) => Some(EquipmentClass::of(name)),
            EquipmentFilter::EquivalenceClass(members) => {
                let equipped = !members.is_empty()
                    && members
                        .iter()
                        .all(|m| EquipmentClass::of(m) == EquipmentClass::Equipped);
                Some(if equipped {
                    EquipmentClass::Equipped
                } else {
                    EquipmentClass::RawEquivalent
                })
            }
        }
    }
}

/// Weight-class selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightClassFilter {
    /// No restriction
    Any,
    /// Numeric class label with unit suffix removed
    Exact {
        /// Class number as text ("84")
        class: String,
        /// Whether this is the open-ended "+" class
        plus: bool,
    },
}

/// Division selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivisionFilter {
    /// No restriction (also "Open")
    Any,
    /// Leading age of the age-class label must fall in `[min, max]`
    AgeRange {
        /// Youngest included age
        min: u32,
        /// Oldest included age
        max: u32,
    },
}

/// Complete cohort-membership predicate
///
/// Two filters are equal iff every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortFilter {
    /// Federation selection
    pub federation: FederationFilter,
    /// Equipment selection
    pub equipment: EquipmentFilter,
    /// Weight-class selection
    pub weight_class: WeightClassFilter,
    /// Division selection
    pub division: DivisionFilter,
    /// Competitor sex, when restricted
    pub sex: Option<Sex>,
    /// Athlete country (lowercased), when restricted
    pub country: Option<String>,
    /// Date restriction; `None` is all-time
    pub window: Option<DateWindow>,
}

impl Default for CohortFilter {
    fn default() -> Self {
        Self::any()
    }
}

impl CohortFilter {
    /// Filter that admits every result
    pub fn any() -> Self {
        Self {
            federation: FederationFilter::Any,
            equipment: EquipmentFilter::Any,
            weight_class: WeightClassFilter::Any,
            division: DivisionFilter::Any,
            sex: None,
            country: None,
            window: None,
        }
    }

    /// Translate filter selections into a predicate
    ///
    /// Unrecognised tokens never fail: unknown federation and equipment
    /// tokens become exact matches and unknown divisions apply no filter.
    pub fn build(selections: &FilterSelections, taxonomy: &Taxonomy) -> Self {
        Self {
            federation: federation_filter(selections.federation.as_deref(), taxonomy),
            equipment: equipment_filter(selections.equipment.as_deref()),
            weight_class: weight_class_filter(selections.weight_class.as_deref()),
            division: division_filter(selections.division.as_deref()),
            sex: selections.sex.as_deref().and_then(Sex::parse),
            country: active(selections.country.as_deref()).map(str::to_lowercase),
            window: None,
        }
    }

    /// Same predicate restricted to `window` (or unrestricted for `None`)
    pub fn with_window(&self, window: Option<DateWindow>) -> Self {
        Self {
            window,
            ..self.clone()
        }
    }

    /// Whether a result belongs to the cohort
    pub fn matches(&self, result: &LiftResult) -> bool {
        self.matches_federation(result)
            && self.matches_equipment(result)
            && self.matches_weight_class(result)
            && self.matches_division(result)
            && self.sex.is_none_or(|sex| sex == result.sex)
            && self.matches_country(result)
            && self.window.is_none_or(|w| w.contains(result.date))
    }

    fn matches_federation(&self, result: &LiftResult) -> bool {
        let federation = result.federation.trim().to_lowercase();
        match &self.federation {
            FederationFilter::Any => true,
            FederationFilter::Exact { code, tested_only } => {
                federation == *code && (!tested_only || result.tested)
            }
            FederationFilter::CountryGroup { codes, tested_only } => {
                codes.contains(&federation) && (!tested_only || result.tested)
            }
            FederationFilter::TestedOnly => result.tested,
            FederationFilter::FullyTestedGroup(codes) => codes.contains(&federation),
        }
    }

    fn matches_equipment(&self, result: &LiftResult) -> bool {
        let equipment = result.equipment.trim().to_lowercase();
        match &self.equipment {
            EquipmentFilter::Any => true,
            EquipmentFilter::Exact(wanted) => equipment == *wanted,
            EquipmentFilter::EquivalenceClass(members) => members.contains(&equipment),
        }
    }

    fn matches_weight_class(&self, result: &LiftResult) -> bool {
        match &self.weight_class {
            WeightClassFilter::Any => true,
            WeightClassFilter::Exact { class, plus } => result
                .weight_class_kg
                .as_deref()
                .map(normalize_weight_class)
                .is_some_and(|(stored, stored_plus)| stored == *class && stored_plus == *plus),
        }
    }

    fn matches_division(&self, result: &LiftResult) -> bool {
        match self.division {
            DivisionFilter::Any => true,
            DivisionFilter::AgeRange { min, max } => result
                .age_class
                .as_deref()
                .and_then(leading_age)
                .is_some_and(|age| age >= min && age <= max),
        }
    }

    fn matches_country(&self, result: &LiftResult) -> bool {
        match &self.country {
            None => true,
            Some(wanted) => result
                .country
                .as_deref()
                .is_some_and(|c| c.trim().to_lowercase() == *wanted),
        }
    }
}

/// Strip a unit suffix and a trailing "+" from a weight-class label
///
/// Returns the class number and whether the "+" was present:
/// "84+ kg" -> ("84", true), "83" -> ("83", false).
pub fn normalize_weight_class(label: &str) -> (String, bool) {
    let lowered = label.trim().to_lowercase();
    let without_unit = lowered.trim_end_matches("kg").trim();
    let plus = without_unit.ends_with('+');
    let class = without_unit.trim_end_matches('+').trim().to_string();
    (class, plus)
}

/// Selection text, or `None` when it is empty or an "all" sentinel
fn active(selection: Option<&str>) -> Option<&str> {
    let value = selection?.trim();
    let lowered = value.to_lowercase();
    match lowered.as_str() {
        "" | "all" | "any" | "all classes" | "all divisions" => None,
        _ => Some(value),
    }
}

fn federation_filter(selection: Option<&str>, taxonomy: &Taxonomy) -> FederationFilter {
    let Some(token) = active(selection) else {
        return FederationFilter::Any;
    };
    let token = token.to_lowercase();

    match token.as_str() {
        "all-tested" => return FederationFilter::TestedOnly,
        "fully-tested" => {
            return FederationFilter::FullyTestedGroup(taxonomy.fully_tested_federations())
        }
        _ => {}
    }

    let (base, tested_only) = match token.strip_suffix("-tested") {
        Some(base) => (base, true),
        None => (token.as_str(), false),
    };

    if let Some(slug) = base.strip_prefix("all-") {
        if let Some(codes) = taxonomy.country_federations(slug) {
            return FederationFilter::CountryGroup { codes, tested_only };
        }
    }

    FederationFilter::Exact {
        code: base.to_string(),
        tested_only,
    }
}

fn equipment_filter(selection: Option<&str>) -> EquipmentFilter {
    let Some(token) = active(selection) else {
        return EquipmentFilter::Any;
    };
    let compact: String = token
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    match compact.as_str() {
        "raw+wraps" => EquipmentFilter::EquivalenceClass(vec![
            Equipment::Raw.as_str().to_string(),
            Equipment::Wraps.as_str().to_string(),
        ]),
        "raw-equivalent" | "rawequivalent" => class_filter(EquipmentClass::RawEquivalent),
        "equipped" => class_filter(EquipmentClass::Equipped),
        _ => EquipmentFilter::Exact(token.to_lowercase()),
    }
}

fn class_filter(class: EquipmentClass) -> EquipmentFilter {
    EquipmentFilter::EquivalenceClass(class.members().into_iter().map(String::from).collect())
}

fn weight_class_filter(selection: Option<&str>) -> WeightClassFilter {
    match active(selection) {
        Some(label) => {
            let (class, plus) = normalize_weight_class(label);
            if class.is_empty() {
                WeightClassFilter::Any
            } else {
                WeightClassFilter::Exact { class, plus }
            }
        }
        None => WeightClassFilter::Any,
    }
}

fn division_filter(selection: Option<&str>) -> DivisionFilter {
    active(selection)
        .and_then(Division::parse)
        .and_then(|d| d.age_range())
        .map(|(min, max)| DivisionFilter::AgeRange { min, max })
        .unwrap_or(DivisionFilter::Any)
}
