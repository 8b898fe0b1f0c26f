use metrics_exporter_prometheus::PrometheusHandle;
use positivation::analytics::{
    Campaign, CampaignId, Client, CompletionFilter, RankingConfig, RepositoryError, Snapshot,
    SnapshotRepository,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) ranking: RankingConfig,
}

/// Keeps the latest published snapshot per campaign.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotRepository {
    snapshots: Arc<Mutex<HashMap<CampaignId, Snapshot>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("snapshot store lock poisoned".to_string())
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn store(&self, snapshot: Snapshot) -> Result<(), RepositoryError> {
        let mut guard = self.snapshots.lock().map_err(poisoned)?;
        guard.insert(snapshot.campaign.id.clone(), snapshot);
        Ok(())
    }

    fn campaign(&self, id: &CampaignId) -> Result<Option<Campaign>, RepositoryError> {
        let guard = self.snapshots.lock().map_err(poisoned)?;
        Ok(guard.get(id).map(|snapshot| snapshot.campaign.clone()))
    }

    fn clients(&self, id: &CampaignId) -> Result<Vec<Client>, RepositoryError> {
        let guard = self.snapshots.lock().map_err(poisoned)?;
        guard
            .get(id)
            .map(|snapshot| snapshot.clients.clone())
            .ok_or(RepositoryError::NotFound)
    }
}

pub(crate) fn parse_completion(raw: &str) -> Result<CompletionFilter, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "all" => Ok(CompletionFilter::All),
        "complete" | "completed" => Ok(CompletionFilter::Complete),
        "incomplete" | "pending" => Ok(CompletionFilter::Incomplete),
        other => Err(format!(
            "unknown completion filter '{other}' (expected all, complete or incomplete)"
        )),
    }
}
