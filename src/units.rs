//! Conversion entre temps réel et unités de repos de 300 s.

use chrono::{DateTime, TimeDelta, Utc};

/// Granularité de tous les calculs de repos et de pauses.
pub const UNIT_LENGTH_SECS: u32 = 300;

/// Arrondit à la frontière d'unité suivante (inchangé si déjà aligné).
pub fn round_up(instant: DateTime<Utc>) -> DateTime<Utc> {
    let unit = i64::from(UNIT_LENGTH_SECS);
    let secs = instant.timestamp();
    let rem = secs.rem_euclid(unit);
    if rem == 0 && instant.timestamp_subsec_nanos() == 0 {
        return instant;
    }
    DateTime::from_timestamp(secs - rem + unit, 0).unwrap_or(instant)
}

/// Arrondit à la frontière d'unité précédente.
pub fn round_down(instant: DateTime<Utc>) -> DateTime<Utc> {
    let unit = i64::from(UNIT_LENGTH_SECS);
    let secs = instant.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(unit), 0).unwrap_or(instant)
}

/// Fenêtre de repos utilisable, bornes alignées sur les unités.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RestWindow {
    /// Début arrondi vers le haut, fin vers le bas. Si l'arrondi inverse les
    /// bornes, la fenêtre est vide et commence à `begin`.
    pub fn rounded(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let start = round_up(begin);
        let stop = round_down(end);
        if start < stop {
            Self { start, end: stop }
        } else {
            Self {
                start: begin,
                end: begin,
            }
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn total_units(&self) -> u32 {
        let units = self.duration().num_seconds() / i64::from(UNIT_LENGTH_SECS);
        u32::try_from(units.max(0)).unwrap_or(u32::MAX)
    }
}

/// Durée correspondant à `units` unités.
pub fn units_to_duration(units: u32) -> TimeDelta {
    TimeDelta::seconds(i64::from(units) * i64::from(UNIT_LENGTH_SECS))
}
