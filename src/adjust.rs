//! Normalisation des heures saisies (sélecteur sans date) en instants concrets.
//!
//! Toutes les fonctions prennent l'instant de référence `now` en paramètre :
//! aucune lecture d'horloge ici.

use crate::model::CrewRole;
use chrono::{DateTime, Days, NaiveTime, TimeDelta, TimeZone};

/// Au-delà de 6 h dans le passé, l'heure saisie désigne le lendemain.
const PAST_TOLERANCE_HOURS: i64 = 6;
/// Au-delà de 12 h dans le futur, l'heure saisie désigne la veille.
const FUTURE_TOLERANCE_HOURS: i64 = 12;

/// Valeur brute du sélecteur : la date locale de `now` à l'heure `time`.
///
/// `None` si l'heure locale n'existe pas ce jour-là (saut d'heure d'été).
pub fn instant_for_time<Tz: TimeZone>(time: NaiveTime, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    now.timezone()
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()
}

/// Ramène `raw` à l'occurrence la plus plausible par rapport à `now`.
pub fn adjust_begin<Tz: TimeZone>(raw: DateTime<Tz>, now: &DateTime<Tz>) -> DateTime<Tz> {
    let offset = raw.clone() - now.clone();
    if offset < TimeDelta::hours(-PAST_TOLERANCE_HOURS) {
        next_day(raw)
    } else if offset > TimeDelta::hours(FUTURE_TOLERANCE_HOURS) {
        previous_day(raw)
    } else {
        raw
    }
}

/// Fin de la fenêtre de repos.
///
/// Pilotes : `raw_end`, reporté au lendemain s'il ne suit pas `begin`.
/// PNC : l'atterrissage (reporté de la même façon) moins la durée du service,
/// les repos devant se terminer avant le début du service.
pub fn adjust_end<Tz: TimeZone>(
    begin: &DateTime<Tz>,
    raw_end: DateTime<Tz>,
    raw_landing: DateTime<Tz>,
    service_seconds: u32,
    role: CrewRole,
) -> DateTime<Tz> {
    match role {
        CrewRole::FlightCrew => after(begin, raw_end),
        CrewRole::CabinCrew => {
            after(begin, raw_landing) - TimeDelta::seconds(i64::from(service_seconds))
        }
    }
}

/// Saisie de fin propre à chaque fonction.
#[derive(Debug, Clone)]
pub enum EndInput<Tz: TimeZone> {
    FlightCrew {
        raw_end: DateTime<Tz>,
    },
    CabinCrew {
        raw_landing: DateTime<Tz>,
        service_seconds: u32,
    },
}

impl<Tz: TimeZone> EndInput<Tz> {
    pub fn role(&self) -> CrewRole {
        match self {
            EndInput::FlightCrew { .. } => CrewRole::FlightCrew,
            EndInput::CabinCrew { .. } => CrewRole::CabinCrew,
        }
    }

    pub fn resolve(self, begin: &DateTime<Tz>) -> DateTime<Tz> {
        match self {
            EndInput::FlightCrew { raw_end } => {
                adjust_end(begin, raw_end.clone(), raw_end, 0, CrewRole::FlightCrew)
            }
            EndInput::CabinCrew {
                raw_landing,
                service_seconds,
            } => adjust_end(
                begin,
                raw_landing.clone(),
                raw_landing,
                service_seconds,
                CrewRole::CabinCrew,
            ),
        }
    }
}

fn after<Tz: TimeZone>(begin: &DateTime<Tz>, raw: DateTime<Tz>) -> DateTime<Tz> {
    if &raw > begin {
        raw
    } else {
        next_day(raw)
    }
}

fn next_day<Tz: TimeZone>(raw: DateTime<Tz>) -> DateTime<Tz> {
    raw.clone().checked_add_days(Days::new(1)).unwrap_or(raw)
}

fn previous_day<Tz: TimeZone>(raw: DateTime<Tz>) -> DateTime<Tz> {
    raw.clone().checked_sub_days(Days::new(1)).unwrap_or(raw)
}
