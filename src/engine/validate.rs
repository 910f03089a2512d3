use super::InputStatus;
use crate::model::RestRequest;
use crate::units::RestWindow;

pub(super) fn validate(request: &RestRequest) -> InputStatus {
    if request.begin_instant >= request.end_instant {
        return InputStatus::NegativeInterval;
    }

    let window = RestWindow::rounded(request.begin_instant, request.end_instant);
    let total_units = window.total_units();

    if total_units < minimum_units(request.number_of_periods, request.minimum_break_units) {
        return InputStatus::TooSmallInterval;
    }

    // aucun participant ou moins de deux repos : rien à répartir
    if request.number_of_users == 0 || request.number_of_periods < 2 {
        return InputStatus::UnsupportedCombination;
    }

    // répartition inégale : définie uniquement pour 2 participants
    if request.number_of_periods % request.number_of_users != 0 && request.number_of_users != 2 {
        return InputStatus::UnsupportedCombination;
    }

    InputStatus::Valid
}

/// Nombre minimal d'unités pour `periods` repos séparés par des pauses minimales.
///
/// Nombre pair : une unité par repos. Nombre impair : `2 × longs × courts`,
/// repris tel quel de la règle d'origine.
pub fn minimum_units(periods: u32, minimum_break_units: u32) -> u32 {
    let breaks = periods.saturating_sub(1).saturating_mul(minimum_break_units);
    if periods % 2 == 0 {
        periods.saturating_add(breaks)
    } else {
        let long_periods = periods / 2;
        let short_periods = long_periods + 1;
        long_periods
            .saturating_mul(short_periods)
            .saturating_mul(2)
            .saturating_add(breaks)
    }
}
