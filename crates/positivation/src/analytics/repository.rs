use crate::analytics::domain::{Campaign, CampaignId, Client, Snapshot};

/// Storage seam for campaign and client documents. The engine never reaches storage on its
/// own; the service reads a complete snapshot through this trait before each computation.
pub trait SnapshotRepository: Send + Sync {
    /// Replaces the stored campaign and its clients.
    fn store(&self, snapshot: Snapshot) -> Result<(), RepositoryError>;
    fn campaign(&self, id: &CampaignId) -> Result<Option<Campaign>, RepositoryError>;
    fn clients(&self, id: &CampaignId) -> Result<Vec<Client>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
