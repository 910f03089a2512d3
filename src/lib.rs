#![forbid(unsafe_code)]
//! Flight Rests — répartition équitable des repos en vol (pilotes, groupes PNC).
//!
//! - Fenêtre découpée en unités de 5 minutes.
//! - Répartition repos / pauses équitable, attribution round-robin.
//! - Normalisation des heures saisies par rapport à un `now` explicite.
//! - Tout en UTC ; le fuseau de la demande ne sert qu'à l'affichage.
//! - Historique local (JSON), sans base de données.

pub mod adjust;
pub mod config;
pub mod engine;
pub mod history;
pub mod io;
pub mod model;
pub mod render;
pub mod storage;
pub mod units;

pub use adjust::{adjust_begin, adjust_end, instant_for_time, EndInput};
pub use config::Defaults;
pub use engine::{compute_plan, compute_rest_plan, validate, InputStatus, Slot};
pub use history::{HistoryError, RequestLog};
pub use model::{AssignedRestPeriod, CrewRole, Period, RequestId, RestPlan, RestRequest};
pub use render::{PlanRenderer, TextPlanRenderer};
pub use storage::{JsonStorage, Storage};
pub use units::{RestWindow, UNIT_LENGTH_SECS};
