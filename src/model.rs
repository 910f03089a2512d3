use crate::config;
use crate::units::UNIT_LENGTH_SECS;
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fonction à bord : pilotes ou personnel de cabine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrewRole {
    FlightCrew,
    CabinCrew,
}

impl CrewRole {
    /// Libellé d'un participant (indice 1-based).
    pub fn owner_label(self, owner: u32) -> String {
        match self {
            CrewRole::FlightCrew => format!("Pilot {owner}"),
            CrewRole::CabinCrew => format!("Group {owner}"),
        }
    }

    pub fn plan_title(self) -> &'static str {
        match self {
            CrewRole::FlightCrew => "Flight Crew Rests",
            CrewRole::CabinCrew => "Cabin Crew Rests",
        }
    }
}

/// Identifiant fort pour RestRequest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Demande de calcul de repos, une par calcul.
///
/// La fenêtre `[begin_instant, end_instant]` est déjà normalisée (voir
/// [`crate::adjust`]). `begin_instant < end_instant` n'est pas imposé ici :
/// c'est [`crate::engine::validate`] qui le vérifie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestRequest {
    pub id: RequestId,
    pub creation_instant: DateTime<Utc>,
    pub begin_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    /// Durée d'une unité en secondes (toujours 300).
    #[serde(default = "default_unit_length")]
    pub unit_length: u32,
    pub number_of_users: u32,
    pub number_of_periods: u32,
    pub minimum_break_units: u32,
    #[serde(default)]
    pub optimise_breaks: bool,
    pub crew_role: CrewRole,
    /// Fuseau d'affichage uniquement.
    pub time_zone: Tz,
}

fn default_unit_length() -> u32 {
    UNIT_LENGTH_SECS
}

impl RestRequest {
    /// Crée une demande avec les sélections par défaut de l'écran de saisie.
    pub fn new(
        begin_instant: DateTime<Utc>,
        end_instant: DateTime<Utc>,
        crew_role: CrewRole,
        time_zone: Tz,
        creation_instant: DateTime<Utc>,
    ) -> Self {
        let mut request = Self {
            id: RequestId::random(),
            creation_instant,
            begin_instant,
            end_instant,
            unit_length: UNIT_LENGTH_SECS,
            number_of_users: config::DEFAULT_USERS,
            number_of_periods: config::DEFAULT_PERIODS,
            minimum_break_units: config::DEFAULT_MINIMUM_BREAK_UNITS,
            optimise_breaks: config::DEFAULT_OPTIMISE_BREAKS,
            crew_role,
            time_zone,
        };
        request.sync_cabin_groups();
        request
    }

    /// Sans effet pour le PNC : chaque groupe se repose une seule fois.
    pub fn with_users(mut self, users: u32) -> Self {
        self.number_of_users = users;
        self.sync_cabin_groups();
        self
    }

    pub fn with_periods(mut self, periods: u32) -> Self {
        self.number_of_periods = periods;
        self.sync_cabin_groups();
        self
    }

    pub fn with_minimum_break(mut self, units: u32) -> Self {
        self.minimum_break_units = units;
        self
    }

    pub fn with_optimised_breaks(mut self, optimise: bool) -> Self {
        self.optimise_breaks = optimise;
        self
    }

    fn sync_cabin_groups(&mut self) {
        if self.crew_role == CrewRole::CabinCrew {
            self.number_of_users = self.number_of_periods;
        }
    }

    /// Deux demandes sont des doublons si tout est égal sauf `id` et `creation_instant`.
    pub fn is_duplicate_of(&self, other: &RestRequest) -> bool {
        self.begin_instant == other.begin_instant
            && self.end_instant == other.end_instant
            && self.unit_length == other.unit_length
            && self.number_of_users == other.number_of_users
            && self.number_of_periods == other.number_of_periods
            && self.minimum_break_units == other.minimum_break_units
            && self.optimise_breaks == other.optimise_breaks
            && self.crew_role == other.crew_role
            && self.time_zone == other.time_zone
    }
}

/// Intervalle UTC [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// Période de repos attribuée à un participant (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedRestPeriod {
    pub owner: u32,
    pub period: Period,
    pub crew_role: CrewRole,
}

impl AssignedRestPeriod {
    pub fn owner_label(&self) -> String {
        self.crew_role.owner_label(self.owner)
    }
}

/// Plan complet tel que présenté : périodes + fuseau d'affichage par défaut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestPlan {
    pub time_zone: Tz,
    pub rest_periods: Vec<AssignedRestPeriod>,
}

impl RestPlan {
    pub fn new(time_zone: Tz, rest_periods: Vec<AssignedRestPeriod>) -> Self {
        Self {
            time_zone,
            rest_periods,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rest_periods.is_empty()
    }

    /// Fonction du plan, déduite de la première période.
    pub fn role(&self) -> Option<CrewRole> {
        self.rest_periods.first().map(|p| p.crew_role)
    }

    pub fn title(&self) -> &'static str {
        self.role().map_or("Empty Plan", CrewRole::plan_title)
    }

    /// Périodes d'un participant, dans l'ordre chronologique.
    pub fn periods_of(&self, owner: u32) -> impl Iterator<Item = &AssignedRestPeriod> {
        self.rest_periods.iter().filter(move |p| p.owner == owner)
    }
}
