use std::collections::HashMap;
use std::sync::Arc;

use super::directory::{DirectoryError, UserDirectory};
use super::domain::{
    CreateRequestInput, RequestId, RequestQuery, RequestStatus, TransitionInput, UserId,
    UserIdentity, UserRole,
};
use super::dto::{UserDto, VacationRequestDto};
use super::repository::{
    NewRequest, RepositoryError, RequestFilter, RequestKey, RequestPatch, RequestRepository,
};
use super::validation::{self, ValidationError};

/// Lifecycle service composing the user directory and the request store.
///
/// All business rules live here: input validation, the duplicate pre-check,
/// the forced `Pending` initial status, and the full-overwrite transition.
pub struct VacationRequestService<D, R> {
    directory: Arc<D>,
    repository: Arc<R>,
}

impl<D, R> VacationRequestService<D, R>
where
    D: UserDirectory + 'static,
    R: RequestRepository + 'static,
{
    pub fn new(directory: Arc<D>, repository: Arc<R>) -> Self {
        Self {
            directory,
            repository,
        }
    }

    /// Submit a new request. The caller cannot set an initial status; every
    /// created request is `Pending` with no comments.
    pub fn create(
        &self,
        input: CreateRequestInput,
    ) -> Result<VacationRequestDto, RequestServiceError> {
        validation::validate_email(&input.user_email)?;
        let start = validation::parse_date("start date", &input.start_date)?;
        let end = validation::parse_date("end date", &input.end_date)?;
        validation::check_range(start, end)?;

        let user = self.resolve_user(&input.user_email)?;

        let key = RequestKey {
            user_id: user.id.clone(),
            start_date: start,
            end_date: end,
        };
        if self.repository.find_by_key(&key)?.is_some() {
            return Err(RequestServiceError::DuplicateRequest);
        }

        let inserted = match self.repository.insert(NewRequest {
            user_id: user.id.clone(),
            start_date: start,
            end_date: end,
            reason: input.reason,
            status: RequestStatus::Pending,
        }) {
            Ok(record) => record,
            // Two identical creates can both pass the pre-check; the store's
            // uniqueness constraint settles the loser.
            Err(RepositoryError::Conflict) => return Err(RequestServiceError::DuplicateRequest),
            Err(other) => return Err(other.into()),
        };

        Ok(VacationRequestDto::from_record(inserted, Some(user)))
    }

    /// List requests, optionally narrowed by owner email and/or status. Both
    /// narrows are ANDed when present; no filter means everything. Each
    /// returned request is joined with its owner identity.
    pub fn list(
        &self,
        query: RequestQuery,
    ) -> Result<Vec<VacationRequestDto>, RequestServiceError> {
        let mut filter = RequestFilter::default();
        let mut owners: HashMap<UserId, UserIdentity> = HashMap::new();

        if let Some(email) = query.user_email.as_deref() {
            let user = self.resolve_user(email)?;
            filter.user_id = Some(user.id.clone());
            owners.insert(user.id.clone(), user);
        }
        filter.status = query.status;

        let records = self.repository.find_all(&filter)?;

        let mut listed = Vec::with_capacity(records.len());
        for record in records {
            let owner = match owners.get(&record.user_id) {
                Some(known) => Some(known.clone()),
                None => {
                    let fetched = self.directory.find_by_id(&record.user_id)?;
                    if let Some(found) = fetched.clone() {
                        owners.insert(record.user_id.clone(), found);
                    }
                    fetched
                }
            };
            listed.push(VacationRequestDto::from_record(record, owner));
        }

        Ok(listed)
    }

    /// Approve or reject the request matching (user, start, end). The patch
    /// is a full overwrite: absent reason/comments clear the stored values.
    /// Re-transitioning an already-decided request is allowed; validators
    /// can always override an earlier decision.
    pub fn transition(
        &self,
        input: TransitionInput,
    ) -> Result<VacationRequestDto, RequestServiceError> {
        validation::validate_email(&input.user_email)?;
        // Wire dates may carry a time component here; comparisons against
        // stored rows are on the calendar date alone.
        let start = validation::normalize_date("start date", &input.start_date)?;
        let end = validation::normalize_date("end date", &input.end_date)?;

        let user = self.resolve_user(&input.user_email)?;
        let key = RequestKey {
            user_id: user.id.clone(),
            start_date: start,
            end_date: end,
        };

        if self.repository.find_by_key(&key)?.is_none() {
            return Err(RequestServiceError::RequestNotFound);
        }

        let patched = self.repository.update_where(
            &key,
            RequestPatch {
                reason: input.reason,
                comments: input.comments,
                status: input.status,
            },
        )?;
        if patched == 0 {
            // The row vanished between lookup and update.
            return Err(RequestServiceError::RequestNotFound);
        }

        let record = self
            .repository
            .find_by_key(&key)?
            .ok_or(RequestServiceError::RequestNotFound)?;

        Ok(VacationRequestDto::from_record(record, Some(user)))
    }

    /// Administrative removal by identifier. Returns whether a row was
    /// removed; there is no business rule beyond existence.
    pub fn delete(&self, id: &RequestId) -> Result<bool, RequestServiceError> {
        let removed = self.repository.delete(id)?;
        Ok(removed > 0)
    }

    /// Directory listing backing the requester picker, ordered by name.
    pub fn requesters(&self) -> Result<Vec<UserDto>, RequestServiceError> {
        let mut users = self.directory.list_by_role(UserRole::Requester)?;
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    fn resolve_user(&self, email: &str) -> Result<UserIdentity, RequestServiceError> {
        self.directory
            .find_by_email(email)?
            .ok_or(RequestServiceError::UserNotFound)
    }
}

/// Error raised by the lifecycle service. The kind is what the HTTP boundary
/// maps to a status code; no string-sniffing required.
#[derive(Debug, thiserror::Error)]
pub enum RequestServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("user not found")]
    UserNotFound,
    #[error("a request already exists for this user in this date range")]
    DuplicateRequest,
    #[error("vacation request not found")]
    RequestNotFound,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("request store failure: {0}")]
    Storage(RepositoryError),
}

impl From<RepositoryError> for RequestServiceError {
    fn from(value: RepositoryError) -> Self {
        RequestServiceError::Storage(value)
    }
}
