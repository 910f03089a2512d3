use super::Slot;
use tracing::warn;

/// Longueur de la séquence : `periods` repos et `periods - 1` pauses.
pub fn sequence_len(periods: u32) -> usize {
    (periods as usize * 2).saturating_sub(1)
}

/// Répartit `total_units` en une alternance repos / pause équitable.
///
/// Ne revalide pas la demande : une combinaison non prévue (répartition
/// inégale hors 2 participants, compteurs nuls, unités insuffisantes)
/// donne une séquence vide.
pub fn distribute_units(
    users: u32,
    periods: u32,
    minimum_break_units: u32,
    total_units: u32,
    optimise_breaks: bool,
) -> Vec<Slot> {
    if users == 0 || periods == 0 {
        warn!(users, periods, "empty distribution requested");
        return Vec::new();
    }

    let slots = if periods % users == 0 {
        equal_share(periods, minimum_break_units, total_units, optimise_breaks)
    } else {
        unequal_share(users, periods, minimum_break_units, total_units)
    };

    slots.unwrap_or_else(|| {
        warn!(
            users,
            periods, total_units, "no distribution rule for this request"
        );
        Vec::new()
    })
}

/// Repos identiques ; le reste va aux pauses (mode optimisé) ou est perdu.
fn equal_share(
    periods: u32,
    minimum_break_units: u32,
    total_units: u32,
    optimise_breaks: bool,
) -> Option<Vec<Slot>> {
    let breaks = periods - 1;
    let max_rest_units = total_units.checked_sub(breaks.checked_mul(minimum_break_units)?)?;

    let rest = max_rest_units / periods;
    let gap = if optimise_breaks {
        let leftover = max_rest_units % periods;
        minimum_break_units + leftover.checked_div(breaks).unwrap_or(0)
    } else {
        minimum_break_units
    };

    Some(alternate(periods, gap, |_| rest))
}

/// 2 participants, nombre de repos impair : court, long, court, ..., court.
fn unequal_share(
    users: u32,
    periods: u32,
    minimum_break_units: u32,
    total_units: u32,
) -> Option<Vec<Slot>> {
    if users != 2 {
        return None;
    }
    let breaks = periods - 1;
    let max_rest_units = total_units.checked_sub(breaks.checked_mul(minimum_break_units)?)?;

    let long_periods = periods / users;
    let short_periods = long_periods + 1;

    let per_user = max_rest_units / users;
    let short_rest = per_user / short_periods;
    let long_rest = per_user.checked_div(long_periods)?;

    let leftover =
        max_rest_units % users + per_user % long_periods + per_user % short_periods;
    // toujours appliqué ici, indépendamment de l'option d'optimisation
    let gap = minimum_break_units + leftover.checked_div(breaks)?;

    Some(alternate(periods, gap, |index| {
        if index % 2 == 0 {
            short_rest
        } else {
            long_rest
        }
    }))
}

fn alternate(periods: u32, gap: u32, rest_for: impl Fn(u32) -> u32) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(sequence_len(periods));
    for index in 0..periods {
        if index > 0 {
            slots.push(Slot::Break(gap));
        }
        slots.push(Slot::Rest(rest_for(index)));
    }
    slots
}
