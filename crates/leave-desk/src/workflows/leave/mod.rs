//! Vacation request intake, listing, and validator sign-off.
//!
//! The lifecycle service takes its collaborators (a read-only user directory
//! and a request store) as injected capabilities so the rules can be
//! exercised against fakes. One request exists per (user, start, end) tuple;
//! every request starts `Pending` and a validator moves it to `Approved` or
//! `Rejected` through the transition operation.

pub mod directory;
pub mod domain;
pub mod dto;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryError, UserDirectory};
pub use domain::{
    CreateRequestInput, RequestId, RequestQuery, RequestStatus, TransitionInput, UserId,
    UserIdentity, UserRole,
};
pub use dto::{UserDto, VacationRequestDto};
pub use repository::{
    NewRequest, RepositoryError, RequestFilter, RequestKey, RequestPatch, RequestRecord,
    RequestRepository,
};
pub use router::request_router;
pub use service::{RequestServiceError, VacationRequestService};
pub use validation::ValidationError;
