//! Equipment module - competition equipment categories and their two-class grouping

use serde::{Deserialize, Serialize};

/// Equipment category a lift was performed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    /// No supportive equipment beyond a belt
    Raw,
    /// Raw with knee wraps
    Wraps,
    /// Raw with straps (deadlift)
    Straps,
    /// Single-ply suits and shirts
    SinglePly,
    /// Multi-ply suits and shirts
    MultiPly,
    /// No equipment restrictions
    Unlimited,
}

/// Two-class grouping used only to select formula parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentClass {
    /// Raw, wraps, straps
    RawEquivalent,
    /// Single-ply, multi-ply, unlimited
    Equipped,
}

impl Equipment {
    /// Every category, in dataset order
    pub const ALL: [Equipment; 6] = [
        Equipment::Raw,
        Equipment::Wraps,
        Equipment::Straps,
        Equipment::SinglePly,
        Equipment::MultiPly,
        Equipment::Unlimited,
    ];

    /// Lowercase dataset spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Raw => "raw",
            Equipment::Wraps => "wraps",
            Equipment::Straps => "straps",
            Equipment::SinglePly => "single-ply",
            Equipment::MultiPly => "multi-ply",
            Equipment::Unlimited => "unlimited",
        }
    }

    /// Parse a dataset or UI spelling, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Some(Equipment::Raw),
            "wraps" => Some(Equipment::Wraps),
            "straps" => Some(Equipment::Straps),
            "single-ply" | "single" => Some(Equipment::SinglePly),
            "multi-ply" | "multi" => Some(Equipment::MultiPly),
            "unlimited" => Some(Equipment::Unlimited),
            _ => None,
        }
    }

    /// Formula parameter class
    pub fn class(&self) -> EquipmentClass {
        match self {
            Equipment::Raw | Equipment::Wraps | Equipment::Straps => EquipmentClass::RawEquivalent,
            Equipment::SinglePly | Equipment::MultiPly | Equipment::Unlimited => {
                EquipmentClass::Equipped
            }
        }
    }
}

impl EquipmentClass {
    /// Dataset spellings of every member of the class
    pub fn members(&self) -> Vec<&'static str> {
        Equipment::ALL
            .iter()
            .filter(|e| e.class() == *self)
            .map(|e| e.as_str())
            .collect()
    }

    /// Class for a free-form equipment string; unknown strings are raw-equivalent
    pub fn of(equipment: &str) -> Self {
        Equipment::parse(equipment)
            .map(|e| e.class())
            .unwrap_or(EquipmentClass::RawEquivalent)
    }
}

impl std::str::FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid equipment: {}", s))
    }
}
