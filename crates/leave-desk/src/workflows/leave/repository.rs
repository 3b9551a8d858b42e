use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{RequestId, RequestStatus, UserId};

/// Persisted shape of a vacation request. Timestamps are maintained by the
/// store, not by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: RequestId,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: RequestStatus,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the service when persisting a new request. The store
/// assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: RequestStatus,
}

/// Unique lookup key: at most one request exists per user and date range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RequestKey {
    pub fn matches(&self, record: &RequestRecord) -> bool {
        self.user_id == record.user_id
            && self.start_date == record.start_date
            && self.end_date == record.end_date
    }
}

/// Overwrite applied by the transition operation. All three fields replace
/// the stored values unconditionally.
#[derive(Debug, Clone)]
pub struct RequestPatch {
    pub reason: Option<String>,
    pub comments: Option<String>,
    pub status: RequestStatus,
}

/// Listing filter with explicit combination semantics: present fields are
/// ANDed, an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub user_id: Option<UserId>,
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn matches(&self, record: &RequestRecord) -> bool {
        self.user_id
            .as_ref()
            .map_or(true, |id| *id == record.user_id)
            && self.status.map_or(true, |status| status == record.status)
    }
}

/// Storage abstraction so the lifecycle service can be exercised in
/// isolation. Implementations hold the compound uniqueness constraint on
/// (user_id, start_date, end_date).
pub trait RequestRepository: Send + Sync {
    /// Insert a new request. Surfaces [`RepositoryError::Conflict`] when the
    /// uniqueness constraint rejects the row, which the service maps to its
    /// duplicate-request error; the optimistic pre-check alone would lose a
    /// race between two identical creates.
    fn insert(&self, request: NewRequest) -> Result<RequestRecord, RepositoryError>;
    fn find_by_key(&self, key: &RequestKey) -> Result<Option<RequestRecord>, RepositoryError>;
    fn find_all(&self, filter: &RequestFilter) -> Result<Vec<RequestRecord>, RepositoryError>;
    /// Apply the patch to every record matching the key, returning how many
    /// rows changed.
    fn update_where(&self, key: &RequestKey, patch: RequestPatch)
        -> Result<usize, RepositoryError>;
    /// Remove a request by id, returning how many rows were removed.
    fn delete(&self, id: &RequestId) -> Result<usize, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("a request already exists for this user and date range")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("request store unavailable: {0}")]
    Unavailable(String),
}
