use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::leave::directory::{DirectoryError, UserDirectory};
use crate::workflows::leave::domain::{
    CreateRequestInput, RequestId, RequestStatus, TransitionInput, UserId, UserIdentity, UserRole,
};
use crate::workflows::leave::repository::{
    NewRequest, RepositoryError, RequestFilter, RequestKey, RequestPatch, RequestRecord,
    RequestRepository,
};
use crate::workflows::leave::{request_router, VacationRequestService};

pub(super) const JOHN: &str = "john.doe@example.com";
pub(super) const JANE: &str = "jane.hughes@example.com";
pub(super) const BOB: &str = "manager.bob@example.com";

pub(super) fn seeded_users() -> Vec<UserIdentity> {
    vec![
        UserIdentity {
            id: UserId("user-1".to_string()),
            name: "John Doe".to_string(),
            role: UserRole::Requester,
            email: Some(JOHN.to_string()),
        },
        UserIdentity {
            id: UserId("user-2".to_string()),
            name: "Jane Hughes".to_string(),
            role: UserRole::Requester,
            email: Some(JANE.to_string()),
        },
        UserIdentity {
            id: UserId("user-3".to_string()),
            name: "Manager Bob".to_string(),
            role: UserRole::Validator,
            email: Some(BOB.to_string()),
        },
    ]
}

pub(super) fn create_input(email: &str, start: &str, end: &str) -> CreateRequestInput {
    CreateRequestInput {
        user_email: email.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        reason: Some("Family vacation".to_string()),
    }
}

pub(super) fn transition_input(
    email: &str,
    start: &str,
    end: &str,
    status: RequestStatus,
    comments: Option<&str>,
) -> TransitionInput {
    TransitionInput {
        user_email: email.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        status,
        reason: None,
        comments: comments.map(str::to_string),
    }
}

pub(super) fn build_service() -> (
    VacationRequestService<MemoryDirectory, MemoryRepository>,
    Arc<MemoryDirectory>,
    Arc<MemoryRepository>,
) {
    let directory = Arc::new(MemoryDirectory::default());
    let repository = Arc::new(MemoryRepository::default());
    let service = VacationRequestService::new(directory.clone(), repository.clone());
    (service, directory, repository)
}

pub(super) fn request_router_with_service(
    service: VacationRequestService<MemoryDirectory, MemoryRepository>,
) -> axum::Router {
    request_router(Arc::new(service))
}

pub(super) struct MemoryDirectory {
    users: Vec<UserIdentity>,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self {
            users: seeded_users(),
        }
    }
}

impl UserDirectory for MemoryDirectory {
    fn find_by_email(&self, email: &str) -> Result<Option<UserIdentity>, DirectoryError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned())
    }

    fn find_by_id(&self, id: &UserId) -> Result<Option<UserIdentity>, DirectoryError> {
        Ok(self.users.iter().find(|user| user.id == *id).cloned())
    }

    fn list_by_role(&self, role: UserRole) -> Result<Vec<UserIdentity>, DirectoryError> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    sequence: u64,
    records: HashMap<RequestId, RequestRecord>,
}

impl MemoryRepository {
    pub(super) fn record_count(&self) -> usize {
        self.state.lock().expect("repository mutex poisoned").records.len()
    }
}

impl RequestRepository for MemoryRepository {
    fn insert(&self, request: NewRequest) -> Result<RequestRecord, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let duplicate = state.records.values().any(|record| {
            record.user_id == request.user_id
                && record.start_date == request.start_date
                && record.end_date == request.end_date
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }

        state.sequence += 1;
        let id = RequestId(format!("req-{:06}", state.sequence));
        let now = Utc::now();
        let record = RequestRecord {
            id: id.clone(),
            user_id: request.user_id,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason,
            status: request.status,
            comments: None,
            created_at: now,
            updated_at: now,
        };
        state.records.insert(id, record.clone());
        Ok(record)
    }

    fn find_by_key(&self, key: &RequestKey) -> Result<Option<RequestRecord>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state
            .records
            .values()
            .find(|record| key.matches(record))
            .cloned())
    }

    fn find_all(&self, filter: &RequestFilter) -> Result<Vec<RequestRecord>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        let mut found: Vec<RequestRecord> = state
            .records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(found)
    }

    fn update_where(
        &self,
        key: &RequestKey,
        patch: RequestPatch,
    ) -> Result<usize, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let mut touched = 0;
        for record in state.records.values_mut() {
            if key.matches(record) {
                record.reason = patch.reason.clone();
                record.comments = patch.comments.clone();
                record.status = patch.status;
                record.updated_at = Utc::now();
                touched += 1;
            }
        }
        Ok(touched)
    }

    fn delete(&self, id: &RequestId) -> Result<usize, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.records.remove(id).map_or(0, |_| 1))
    }
}

/// Repository whose pre-check sees nothing but whose insert always loses the
/// uniqueness race, to exercise the conflict-to-duplicate mapping.
pub(super) struct RacingRepository;

impl RequestRepository for RacingRepository {
    fn insert(&self, _request: NewRequest) -> Result<RequestRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn find_by_key(&self, _key: &RequestKey) -> Result<Option<RequestRecord>, RepositoryError> {
        Ok(None)
    }

    fn find_all(&self, _filter: &RequestFilter) -> Result<Vec<RequestRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn update_where(
        &self,
        _key: &RequestKey,
        _patch: RequestPatch,
    ) -> Result<usize, RepositoryError> {
        Ok(0)
    }

    fn delete(&self, _id: &RequestId) -> Result<usize, RepositoryError> {
        Ok(0)
    }
}

pub(super) struct UnavailableRepository;

impl RequestRepository for UnavailableRepository {
    fn insert(&self, _request: NewRequest) -> Result<RequestRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_key(&self, _key: &RequestKey) -> Result<Option<RequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_all(&self, _filter: &RequestFilter) -> Result<Vec<RequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_where(
        &self,
        _key: &RequestKey,
        _patch: RequestPatch,
    ) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &RequestId) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
