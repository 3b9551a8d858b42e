use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

use leave_desk::workflows::leave::{
    DirectoryError, NewRequest, RepositoryError, RequestFilter, RequestId, RequestKey,
    RequestPatch, RequestRecord, RequestRepository, UserDirectory, UserId, UserIdentity, UserRole,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory backed by the seed users the HR side provisions out-of-band.
pub(crate) struct InMemoryUserDirectory {
    users: Vec<UserIdentity>,
}

impl InMemoryUserDirectory {
    pub(crate) fn seeded() -> Self {
        let users = [
            ("user-1", "John Doe", UserRole::Requester, "john.doe@example.com"),
            ("user-2", "Jane Hughes", UserRole::Requester, "jane.hughes@example.com"),
            ("user-3", "David Hughes", UserRole::Requester, "david.hughes@example.com"),
            ("user-4", "Emily Baker", UserRole::Requester, "emily.baker@example.com"),
            ("user-5", "Manager Bob", UserRole::Validator, "manager.bob@example.com"),
        ]
        .into_iter()
        .map(|(id, name, role, email)| UserIdentity {
            id: UserId(id.to_string()),
            name: name.to_string(),
            role,
            email: Some(email.to_string()),
        })
        .collect();

        Self { users }
    }
}

impl UserDirectory for InMemoryUserDirectory {
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

/// Request store holding the compound uniqueness constraint on
/// (user_id, start_date, end_date), mirroring the unique index a SQL
/// deployment would carry.
#[derive(Default)]
pub(crate) struct InMemoryRequestRepository {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    sequence: u64,
    records: HashMap<RequestId, RequestRecord>,
}

impl RequestRepository for InMemoryRequestRepository {
    fn insert(&self, request: NewRequest) -> Result<RequestRecord, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let clash = state.records.values().any(|record| {
            record.user_id == request.user_id
                && record.start_date == request.start_date
                && record.end_date == request.end_date
        });
        if clash {
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
        // Stable listing order by insertion; callers must not rely on it.
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
