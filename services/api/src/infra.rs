use chrono::NaiveDate;
use interview_ranking::workflows::import::{RatingCsvImporter, RatingImportError};
use interview_ranking::workflows::interviews::{
    InterviewSession, RatingSource, SessionId, SourceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sessions held in memory for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRatingSource {
    sessions: Arc<Mutex<HashMap<SessionId, InterviewSession>>>,
}

impl InMemoryRatingSource {
    pub(crate) fn insert(&self, session: InterviewSession) {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(session.id.clone(), session);
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.lock().expect("session mutex poisoned").len()
    }
}

impl RatingSource for InMemoryRatingSource {
    fn session(&self, id: &SessionId) -> Result<Option<InterviewSession>, SourceError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| SourceError::Unavailable("session store poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

/// Imports a CSV export as a session named after the file stem.
pub(crate) fn load_session(
    path: &Path,
    interview_date: NaiveDate,
) -> Result<InterviewSession, RatingImportError> {
    let ratings = RatingCsvImporter::from_path(path)?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(InterviewSession {
        id: SessionId(id),
        interview_date,
        candidates: Vec::new(),
        ratings,
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
