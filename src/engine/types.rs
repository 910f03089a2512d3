use serde::{Deserialize, Serialize};
use std::fmt;

/// Résultat exhaustif du contrôle de faisabilité.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputStatus {
    Valid,
    NegativeInterval,
    TooSmallInterval,
    UnsupportedCombination,
}

impl InputStatus {
    pub fn is_valid(self) -> bool {
        self == InputStatus::Valid
    }
}

impl fmt::Display for InputStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InputStatus::Valid => "valid",
            InputStatus::NegativeInterval => "end of rests must be after their beginning",
            InputStatus::TooSmallInterval => "rest window too short for the requested periods",
            InputStatus::UnsupportedCombination => {
                "unsupported combination of users and rest periods"
            }
        };
        f.write_str(msg)
    }
}

/// Élément de la séquence d'unités : repos ou pause, dans l'ordre chronologique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Rest(u32),
    Break(u32),
}

impl Slot {
    pub fn units(self) -> u32 {
        match self {
            Slot::Rest(units) | Slot::Break(units) => units,
        }
    }

    pub fn is_rest(self) -> bool {
        matches!(self, Slot::Rest(_))
    }
}
