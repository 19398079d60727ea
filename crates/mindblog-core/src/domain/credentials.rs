use crate::ports::{AuthError, PasswordService};

/// The single admin account, loaded once at startup.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password_hash: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Check a login attempt. Both a wrong email and a wrong password yield
    /// `InvalidCredentials`.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        passwords: &dyn PasswordService,
    ) -> Result<(), AuthError> {
        if email != self.email {
            return Err(AuthError::InvalidCredentials);
        }

        if passwords.verify(password, &self.password_hash)? {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

// The hash never leaves this type, not even through Debug.
impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &mask_email(&self.email))
            .finish_non_exhaustive()
    }
}

/// Mask an email for logging: `jane@example.com` -> `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}
