use super::domain::{UserId, UserIdentity, UserRole};

/// Read-only lookup of people who can request or validate leave. Backed by a
/// seeded users table; the lifecycle service never creates or mutates users.
pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<UserIdentity>, DirectoryError>;
    fn find_by_id(&self, id: &UserId) -> Result<Option<UserIdentity>, DirectoryError>;
    fn list_by_role(&self, role: UserRole) -> Result<Vec<UserIdentity>, DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}
