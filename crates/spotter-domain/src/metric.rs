//! Metric module - what a ranking sorts athletes by

use crate::lift::{positive, Lift, LiftResult};
use crate::scoring::{self, Formula};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sortable value selected for a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Raw weight of one lift or the total
    Lift(Lift),
    /// Bodyweight-normalized score of the total
    Points(Formula),
}

impl Metric {
    /// Metric used when a request names nothing recognisable
    pub const DEFAULT: Metric = Metric::Lift(Lift::Total);

    /// Parse a UI metric name; unknown names fall back to Total
    ///
    /// Accepts the display names ("GL Points", "Dots", ...) as well as the
    /// lowercase forms used on the command line.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "total" => Metric::Lift(Lift::Total),
            "squat" => Metric::Lift(Lift::Squat),
            "bench" => Metric::Lift(Lift::Bench),
            "deadlift" => Metric::Lift(Lift::Deadlift),
            "gl points" | "gl" | "goodlift" | "ipf gl" => Metric::Points(Formula::Goodlift),
            "dots" => Metric::Points(Formula::Dots),
            "glossbrenner" => Metric::Points(Formula::Glossbrenner),
            "mcculloch" => Metric::Points(Formula::McCulloch),
            "wilks" => Metric::Points(Formula::Wilks),
            _ => Metric::DEFAULT,
        }
    }

    /// Whether the value is a normalized score
    pub fn is_points(&self) -> bool {
        matches!(self, Metric::Points(_))
    }

    /// True only for Total, the one metric whose ties are broken by Dots
    pub fn breaks_ties_by_dots(&self) -> bool {
        matches!(self, Metric::Lift(Lift::Total))
    }

    /// Display unit: "kg" or "points"
    pub fn unit(&self) -> &'static str {
        if self.is_points() {
            "points"
        } else {
            "kg"
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Lift(Lift::Total) => "Total",
            Metric::Lift(Lift::Squat) => "Squat",
            Metric::Lift(Lift::Bench) => "Bench",
            Metric::Lift(Lift::Deadlift) => "Deadlift",
            Metric::Points(formula) => formula.label(),
        }
    }

    /// Value of this metric for one result; 0 means no ranking contribution
    pub fn value_of(&self, result: &LiftResult) -> f64 {
        match self {
            Metric::Lift(lift) => result.lift_kg(*lift),
            Metric::Points(formula) => points_of(result, *formula),
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::DEFAULT
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stored score when the source provides a positive one, otherwise recomputed
pub fn points_of(result: &LiftResult, formula: Formula) -> f64 {
    let stored = match formula {
        Formula::Dots => result.scores.dots,
        Formula::Wilks => result.scores.wilks,
        Formula::Glossbrenner => result.scores.glossbrenner,
        Formula::Goodlift => result.scores.goodlift,
        Formula::McCulloch => result.scores.mcculloch,
    };
    let stored = positive(stored);
    if stored > 0.0 {
        return stored;
    }

    let bodyweight = result.bodyweight();
    let total = result.lift_kg(Lift::Total);
    match formula {
        Formula::Goodlift => scoring::goodlift(
            result.sex,
            result.equipment_class(),
            result.is_bench_only(),
            bodyweight,
            total,
        ),
        Formula::McCulloch => scoring::mcculloch(result.sex, bodyweight, total, result.age),
        other => scoring::score(other, result.sex, bodyweight, total, result.equipment_class()),
    }
}
