use serde::{Deserialize, Serialize};

/// Identifier wrapper for directory users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for persisted vacation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Role attached to every directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Requester,
    Validator,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Requester => "Requester",
            UserRole::Validator => "Validator",
        }
    }
}

/// Lifecycle states a vacation request moves through. Serde enforces the
/// closed three-value domain at the boundary; anything else fails
/// deserialization before it reaches the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

/// A person who can request or validate leave. Created out-of-band by the
/// directory seed; never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub name: String,
    pub role: UserRole,
    pub email: Option<String>,
}

/// Inbound payload for submitting a request. Dates arrive as strings and are
/// validated before anything touches the store; a caller-supplied status is
/// not accepted here, so every created request starts `Pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestInput {
    pub user_email: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Inbound payload for the approve/reject transition. This is a full
/// overwrite of the mutable fields: absent `reason`/`comments` clear the
/// stored values to null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionInput {
    pub user_email: String,
    pub start_date: String,
    pub end_date: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Listing filter; present fields are ANDed, an empty query matches all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestQuery {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}
