use std::fmt;

/// Failure taxonomy for the account API.
///
/// `InvalidCredentials` deliberately covers both unknown-email and
/// wrong-password so the response never reveals which emails exist.
#[derive(Debug)]
pub enum AppError {
    DuplicateEmail,
    InvalidCredentials,
    AccountBlocked,
    InvalidId(String),
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "Invalid email or password"),
            AppError::AccountBlocked => write!(f, "User is blocked"),
            AppError::InvalidId(id) => write!(f, "Invalid user id: {}", id),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_match_the_wire() {
        assert_eq!(AppError::DuplicateEmail.to_string(), "Email already registered");
        assert_eq!(AppError::InvalidCredentials.to_string(), "Invalid email or password");
        assert_eq!(AppError::AccountBlocked.to_string(), "User is blocked");
        assert_eq!(
            AppError::InvalidId("zzz".to_string()).to_string(),
            "Invalid user id: zzz"
        );
    }
}
