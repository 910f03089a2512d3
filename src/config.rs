use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

pub const DEFAULT_USERS: u32 = 2;
pub const DEFAULT_PERIODS: u32 = 2;
pub const DEFAULT_MINIMUM_BREAK_UNITS: u32 = 1;
pub const DEFAULT_OPTIMISE_BREAKS: bool = false;
pub const DEFAULT_SERVICE: &str = "1h30";

/// Participants sélectionnables.
pub const USER_RANGE: RangeInclusive<u32> = 2..=3;
/// Nombre de repos sélectionnables.
pub const PERIOD_RANGE: RangeInclusive<u32> = 2..=5;
/// Pause minimale sélectionnable, en unités (aucune à 15 min).
pub const BREAK_RANGE: RangeInclusive<u32> = 0..=3;

pub const DEFAULT_MAX_ENTRIES: usize = 50;
pub const DEFAULT_RETENTION_MONTHS: u32 = 6;

/// Sélections par défaut de la saisie et réglages de l'historique.
///
/// Chargeable depuis un JSON partiel : les champs absents gardent leur valeur par défaut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub users: u32,
    pub periods: u32,
    pub minimum_break_units: u32,
    pub optimise_breaks: bool,
    pub service: String,
    pub max_entries: usize,
    pub retention_months: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS,
            periods: DEFAULT_PERIODS,
            minimum_break_units: DEFAULT_MINIMUM_BREAK_UNITS,
            optimise_breaks: DEFAULT_OPTIMISE_BREAKS,
            service: DEFAULT_SERVICE.to_string(),
            max_entries: DEFAULT_MAX_ENTRIES,
            retention_months: DEFAULT_RETENTION_MONTHS,
        }
    }
}

impl Defaults {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            USER_RANGE.contains(&self.users),
            "default users must be within {USER_RANGE:?}"
        );
        ensure!(
            PERIOD_RANGE.contains(&self.periods),
            "default periods must be within {PERIOD_RANGE:?}"
        );
        ensure!(
            BREAK_RANGE.contains(&self.minimum_break_units),
            "default minimum break must be within {BREAK_RANGE:?} units"
        );
        ensure!(self.max_entries > 0, "max_entries must be > 0");
        crate::io::parse_service_label(&self.service)
            .with_context(|| format!("invalid default service {}", self.service))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let defaults: Defaults = serde_json::from_slice(&data)
            .with_context(|| format!("parsing defaults {}", path.display()))?;
        defaults.validate()?;
        Ok(defaults)
    }
}
