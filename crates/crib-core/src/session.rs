//! Identity of one OTP challenge.

use anyhow::{Result, bail};

/// The account an OTP was issued for.
///
/// Created when the verification screen is entered; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    pub user_id: String,
    pub email: String,
}

impl VerificationSession {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let user_id = user_id.into().trim().to_string();
        let email = email.into().trim().to_string();
        if user_id.is_empty() {
            bail!("user id is required");
        }
        if email.is_empty() {
            bail!("email is required");
        }
        Ok(Self { user_id, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_requires_fields() {
        let session = VerificationSession::new(" u1 ", "a@b.c\n").unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.email, "a@b.c");

        assert!(VerificationSession::new("", "a@b.c").is_err());
        assert!(VerificationSession::new("u1", "  ").is_err());
    }
}
