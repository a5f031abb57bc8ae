//! crates/miniblog_core/src/domain.rs
//!
//! Pure data structures for the application, independent of any database or
//! serialization format.

/// A single blog post: a title/text pair with a storage-assigned id.
///
/// Entries are immutable once created; ids increase monotonically, so a
/// larger id always means a newer entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub text: String,
}

/// The reason a login attempt was rejected.
///
/// The `Display` text is shown verbatim on the re-rendered login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Invalid password")]
    InvalidPassword,
}

/// The fixed administrator credentials loaded from configuration.
///
/// Credentials are compared as plain strings; hardening credential storage
/// (hashing, salting) is explicitly out of scope for this application.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    /// Checks a submitted username/password pair. The username is compared
    /// first; the password is only consulted when the username matched.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), LoginError> {
        if username != self.username {
            return Err(LoginError::InvalidUsername);
        }
        if password != self.password {
            return Err(LoginError::InvalidPassword);
        }
        Ok(())
    }
}
