use super::Slot;
use crate::model::{AssignedRestPeriod, CrewRole, Period};
use crate::units::units_to_duration;
use chrono::{DateTime, Utc};

/// Pose les créneaux bout à bout depuis `start`, retire les pauses et attribue
/// les repos en round-robin (participants 1-based).
pub fn assemble_plan(
    start: DateTime<Utc>,
    slots: &[Slot],
    users: u32,
    crew_role: CrewRole,
) -> Vec<AssignedRestPeriod> {
    if users == 0 {
        return Vec::new();
    }

    let mut cursor = start;
    let mut rests = 0u32;
    let mut out = Vec::with_capacity(slots.len() / 2 + 1);

    for slot in slots {
        let end = cursor + units_to_duration(slot.units());
        if slot.is_rest() {
            out.push(AssignedRestPeriod {
                owner: rests % users + 1,
                period: Period { start: cursor, end },
                crew_role,
            });
            rests += 1;
        }
        cursor = end;
    }

    out
}
