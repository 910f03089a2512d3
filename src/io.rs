use crate::config::BREAK_RANGE;
use crate::model::RestPlan;
use crate::units::UNIT_LENGTH_SECS;
use anyhow::{bail, ensure, Context, Result};
use chrono::NaiveTime;
use chrono_tz::Tz;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

const MAX_SERVICE_SECS: u32 = 3 * 3600;
const MIN_SERVICE_SECS: u32 = 3600;
const SERVICE_STEP_SECS: u32 = 15 * 60;

/// Heure de sélecteur `HH:MM` (ou `HH:MM:SS`).
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid time of day: {raw}"))
}

/// Identifiant IANA (`Europe/Lisbon`, `UTC`...).
pub fn parse_time_zone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|err| anyhow::anyhow!("invalid time zone {raw}: {err}"))
}

/// Durée du service PNC en secondes.
///
/// Accepte `none` / `No Time`, `1h30`, `90m`. Seules les durées proposées à la
/// saisie sont valides : zéro, ou de 1h00 à 3h00 par pas de 15 min.
pub fn parse_service_label(raw: &str) -> Result<u32> {
    let label = raw.trim().to_ascii_lowercase();
    let seconds = match label.as_str() {
        "none" | "no time" | "0" => return Ok(0),
        _ => {
            if let Some((hours, minutes)) = label.split_once('h') {
                let hours: u32 = hours.trim().parse().context("service hours")?;
                let minutes: u32 = if minutes.trim().is_empty() {
                    0
                } else {
                    minutes.trim().parse().context("service minutes")?
                };
                ensure!(minutes < 60, "service minutes must be < 60");
                hours.saturating_mul(3600).saturating_add(minutes * 60)
            } else {
                parse_minutes(&label)
                    .context("service duration")?
                    .saturating_mul(60)
            }
        }
    };

    if seconds == 0 {
        return Ok(0);
    }
    if !(MIN_SERVICE_SECS..=MAX_SERVICE_SECS).contains(&seconds) || seconds % SERVICE_STEP_SECS != 0
    {
        bail!("unsupported service duration: {raw} (none, or 1h00 to 3h00 by 15 min)");
    }
    Ok(seconds)
}

/// Pause minimale en unités : `none`, `5`, `5m`, `5 min`.
pub fn parse_break_label(raw: &str) -> Result<u32> {
    let label = raw.trim().to_ascii_lowercase();
    if label == "none" {
        return Ok(0);
    }
    let minutes = parse_minutes(&label).with_context(|| format!("invalid break: {raw}"))?;
    let unit_minutes = UNIT_LENGTH_SECS / 60;
    ensure!(
        minutes % unit_minutes == 0,
        "break must be a multiple of {unit_minutes} min"
    );
    let units = minutes / unit_minutes;
    ensure!(
        BREAK_RANGE.contains(&units),
        "break must be at most {} min",
        BREAK_RANGE.end() * unit_minutes
    );
    Ok(units)
}

fn parse_minutes(label: &str) -> Result<u32> {
    let digits = label
        .trim_end_matches("min")
        .trim_end_matches('m')
        .trim();
    digits
        .parse()
        .with_context(|| format!("expected minutes, got {label}"))
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &RestPlan) -> Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du plan: header `owner,label,start,end,duration_minutes`
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &RestPlan) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["owner", "label", "start", "end", "duration_minutes"])?;
    for rest in &plan.rest_periods {
        w.write_record([
            rest.owner.to_string(),
            rest.owner_label(),
            rest.period.start.to_rfc3339(),
            rest.period.end.to_rfc3339(),
            rest.period.duration_minutes().to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
