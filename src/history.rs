//! Historique local des demandes récentes.

use crate::config::{DEFAULT_MAX_ENTRIES, DEFAULT_RETENTION_MONTHS};
use crate::model::{RequestId, RestRequest};
use chrono::{DateTime, Months, Utc};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("unknown request: {0}")]
    UnknownRequest(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Demandes récentes, de la plus récente à la plus ancienne.
///
/// Après chaque ajout : suppression des entrées de plus de `retention_months`
/// mois, puis éviction des plus anciennes au-delà de `max_entries`.
#[derive(Debug, Clone)]
pub struct RequestLog {
    requests: Vec<RestRequest>,
    max_entries: usize,
    retention_months: u32,
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_ENTRIES, DEFAULT_RETENTION_MONTHS)
    }
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_entries: usize, retention_months: u32) -> Self {
        Self {
            requests: Vec::new(),
            max_entries,
            retention_months,
        }
    }

    /// Reprend des entrées chargées depuis un support, maintenance comprise.
    pub fn restore(mut self, requests: Vec<RestRequest>, now: DateTime<Utc>) -> Self {
        self.requests = requests;
        self.maintain(now);
        self
    }

    pub fn requests(&self) -> &[RestRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn find(&self, id: &RequestId) -> Option<&RestRequest> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Ajoute `request` sauf doublon. Retourne `true` si l'entrée a été ajoutée
    /// et survit à la maintenance.
    pub fn add_request(&mut self, request: RestRequest, now: DateTime<Utc>) -> bool {
        if self.requests.iter().any(|r| r.is_duplicate_of(&request)) {
            debug!(request = request.id.as_str(), "duplicate request ignored");
            return false;
        }
        let id = request.id.clone();
        self.requests.push(request);
        self.maintain(now);
        self.find(&id).is_some()
    }

    pub fn remove_request(&mut self, id: &RequestId) -> Result<RestRequest, HistoryError> {
        let Some(pos) = self.requests.iter().position(|r| &r.id == id) else {
            return Err(HistoryError::UnknownRequest(id.as_str().to_string()));
        };
        Ok(self.requests.remove(pos))
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Rétention puis plafond, en gardant l'ordre du plus récent au plus ancien.
    pub fn maintain(&mut self, now: DateTime<Utc>) {
        let before = self.requests.len();
        if let Some(cutoff) = now.checked_sub_months(Months::new(self.retention_months)) {
            self.requests.retain(|r| r.creation_instant >= cutoff);
        }
        self.requests
            .sort_by(|a, b| b.creation_instant.cmp(&a.creation_instant));
        self.requests.truncate(self.max_entries);

        let dropped = before - self.requests.len();
        if dropped > 0 {
            debug!(dropped, kept = self.requests.len(), "history maintenance");
        }
    }
}
