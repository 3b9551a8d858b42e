use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{RequestStatus, UserIdentity, UserRole};
use super::repository::RequestRecord;

/// Boundary representation of a directory user, stripped to what the client
/// renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}

impl From<UserIdentity> for UserDto {
    fn from(user: UserIdentity) -> Self {
        Self {
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Boundary representation of a vacation request joined with its owner,
/// distinct from the persisted record shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequestDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

impl VacationRequestDto {
    pub fn from_record(record: RequestRecord, user: Option<UserIdentity>) -> Self {
        Self {
            start_date: record.start_date,
            end_date: record.end_date,
            reason: record.reason,
            status: record.status,
            comments: record.comments,
            created_at: record.created_at,
            updated_at: record.updated_at,
            user: user.map(UserDto::from),
        }
    }
}
