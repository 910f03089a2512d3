use crate::model::{AssignedRestPeriod, RestPlan, RestRequest};
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

/// Permet de customiser le rendu d'un plan (terminal, message, etc.).
pub trait PlanRenderer {
    fn render(&self, plan: &RestPlan, tz: Tz) -> String;
}

/// Rendu texte : titre puis une ligne par repos, heures dans le fuseau demandé.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPlanRenderer;

impl PlanRenderer for TextPlanRenderer {
    fn render(&self, plan: &RestPlan, tz: Tz) -> String {
        let mut out = String::new();
        out.push_str(plan.title());
        out.push('\n');
        for rest in &plan.rest_periods {
            out.push_str(&period_line(rest, tz));
            out.push('\n');
        }
        out
    }
}

fn period_line(rest: &AssignedRestPeriod, tz: Tz) -> String {
    format!(
        "{label}  {start} → {end}  ({duration})",
        label = rest.owner_label(),
        start = clock(rest.period.start, tz),
        end = clock(rest.period.end, tz),
        duration = format_hhmm(rest.period.duration()),
    )
}

/// `HH:MM ABR`, `GMT` affiché `UTC`.
pub fn clock(instant: DateTime<Utc>, tz: Tz) -> String {
    let local = instant.with_timezone(&tz);
    format!("{} {}", local.format("%H:%M"), zone_abbreviation(&local))
}

pub fn zone_abbreviation(local: &DateTime<Tz>) -> String {
    local.format("%Z").to_string().replace("GMT", "UTC")
}

/// Durée en `H:MM` (heures non complétées, minutes sur deux chiffres).
pub fn format_hhmm(duration: TimeDelta) -> String {
    let secs = duration.num_seconds();
    format!("{}:{:02}", secs / 3600, (secs % 3600) / 60)
}

/// Ligne d'historique : identifiant, création, fenêtre et sélections.
pub fn summary_line(request: &RestRequest) -> String {
    let tz = request.time_zone;
    format!(
        "{id} | {created} | {begin} → {end} | {role:?} {users}×{periods} break {brk}{opt}",
        id = request.id.as_str(),
        created = request.creation_instant.format("%d/%m %H:%M UTC"),
        begin = clock(request.begin_instant, tz),
        end = clock(request.end_instant, tz),
        role = request.crew_role,
        users = request.number_of_users,
        periods = request.number_of_periods,
        brk = format_hhmm(crate::units::units_to_duration(request.minimum_break_units)),
        opt = if request.optimise_breaks { " optimised" } else { "" },
    )
}
