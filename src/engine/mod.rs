//! Moteur de répartition des repos : faisabilité, répartition des unités,
//! assemblage du plan. Fonctions pures, sans horloge ni état partagé.

mod assemble;
mod distribute;
mod types;
mod validate;

pub use assemble::assemble_plan;
pub use distribute::{distribute_units, sequence_len};
pub use types::{InputStatus, Slot};
pub use validate::minimum_units;

use crate::model::{AssignedRestPeriod, RestPlan, RestRequest};
use crate::units::RestWindow;
use tracing::{debug, warn};

/// Contrôle de faisabilité d'une demande déjà normalisée.
pub fn validate(request: &RestRequest) -> InputStatus {
    validate::validate(request)
}

/// Calcule les repos attribués. Vide si la demande n'est pas valide :
/// appeler [`validate`] pour distinguer les deux cas.
pub fn compute_plan(request: &RestRequest) -> Vec<AssignedRestPeriod> {
    let status = validate(request);
    if !status.is_valid() {
        debug!(request = request.id.as_str(), %status, "request rejected");
        return Vec::new();
    }

    let window = RestWindow::rounded(request.begin_instant, request.end_instant);
    let total_units = window.total_units();
    debug!(
        start = %window.start,
        end = %window.end,
        total_units,
        "rounded rest window"
    );

    let slots = distribute_units(
        request.number_of_users,
        request.number_of_periods,
        request.minimum_break_units,
        total_units,
        request.optimise_breaks,
    );
    if slots.is_empty() {
        warn!(
            request = request.id.as_str(),
            "valid request produced no distribution"
        );
        return Vec::new();
    }

    assemble_plan(
        window.start,
        &slots,
        request.number_of_users,
        request.crew_role,
    )
}

/// [`compute_plan`] accompagné du fuseau d'affichage de la demande.
pub fn compute_rest_plan(request: &RestRequest) -> RestPlan {
    RestPlan::new(request.time_zone, compute_plan(request))
}
