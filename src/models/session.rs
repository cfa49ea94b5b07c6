//! Portal session: a minimal identity held in the local store.
//!
//! There is no token and no expiry: the session lives exactly as long
//! as the `user` key in the store. Absence of the key is `LoggedOut`.

use std::sync::OnceLock;

use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::Role;

/// Minimum accepted password length at login.
pub const MIN_PASSWORD_LEN: usize = 6;

const ACCOUNT_ID_LEN: usize = 9;

/// The signed-in identity persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Tagged session state. Every view resolves one of these before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    LoggedOut,
    LoggedIn(UserAccount),
}

impl Session {
    pub fn account(&self) -> Option<&UserAccount> {
        match self {
            Self::LoggedOut => None,
            Self::LoggedIn(account) => Some(account),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.account().map(|a| a.role)
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

/// Errors from login form validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

impl UserAccount {
    /// Build an account from login credentials.
    ///
    /// The password is validated for shape but never checked against
    /// anything: there is no credential backend. The display name is
    /// derived from the email local part and the id is a fresh random
    /// 9-character handle.
    pub fn login(email: &str, password: &str, role: Role) -> Result<Self, CredentialError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(CredentialError::InvalidEmail);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(CredentialError::PasswordTooShort);
        }

        let name = email
            .split('@')
            .next()
            .unwrap_or(email)
            .to_string();

        Ok(Self {
            id: random_account_id(),
            email: email.to_string(),
            name,
            role,
        })
    }
}

/// Loose email shape check: one `@`, something on both sides, a dot
/// in the domain. Matches what the login form accepts.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    });
    re.is_match(email)
}

fn random_account_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ACCOUNT_ID_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_derives_name_from_email() {
        let account = UserAccount::login("hr@company.com", "password", Role::Hr).unwrap();
        assert_eq!(account.name, "hr");
        assert_eq!(account.email, "hr@company.com");
        assert_eq!(account.role, Role::Hr);
        assert_eq!(account.id.len(), 9);
    }

    #[test]
    fn login_rejects_bad_email() {
        assert_eq!(
            UserAccount::login("not-an-email", "password", Role::User),
            Err(CredentialError::InvalidEmail)
        );
        assert_eq!(
            UserAccount::login("a@b", "password", Role::User),
            Err(CredentialError::InvalidEmail)
        );
        assert_eq!(
            UserAccount::login("", "password", Role::User),
            Err(CredentialError::InvalidEmail)
        );
    }

    #[test]
    fn login_rejects_short_password() {
        assert_eq!(
            UserAccount::login("user@email.com", "abc", Role::User),
            Err(CredentialError::PasswordTooShort)
        );
    }

    #[test]
    fn login_ids_are_unique() {
        let a = UserAccount::login("user@email.com", "password", Role::User).unwrap();
        let b = UserAccount::login("user@email.com", "password", Role::User).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn session_accessors() {
        let account = UserAccount::login("user@email.com", "password", Role::User).unwrap();
        let session = Session::LoggedIn(account.clone());
        assert!(session.is_logged_in());
        assert_eq!(session.role(), Some(Role::User));
        assert_eq!(session.account(), Some(&account));

        assert!(!Session::LoggedOut.is_logged_in());
        assert_eq!(Session::LoggedOut.role(), None);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@email.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("user@@email.com"));
        assert!(!is_valid_email("user @email.com"));
        assert!(!is_valid_email("user@email"));
    }
}
