//! Login Check
//!
//! Credentials are a fixed list compared in memory; there is no backend
//! session.

const CREDENTIALS: &[(&str, &str)] = &[("admin@example.com", "admin")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    MissingFields,
    InvalidCredentials,
}

impl LoginError {
    pub fn message(&self) -> &'static str {
        match self {
            LoginError::MissingFields => "Email dan password wajib diisi",
            LoginError::InvalidCredentials => "Email atau password salah",
        }
    }
}

/// Returns the normalized email on success
pub fn check_credentials(email: &str, password: &str) -> Result<String, LoginError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingFields);
    }
    CREDENTIALS
        .iter()
        .find(|(e, p)| e.eq_ignore_ascii_case(email) && *p == password)
        .map(|(e, _)| e.to_string())
        .ok_or(LoginError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_credentials() {
        assert_eq!(
            check_credentials(" Admin@Example.com ", "admin").unwrap(),
            "admin@example.com"
        );
        assert_eq!(check_credentials("admin@example.com", "nope"), Err(LoginError::InvalidCredentials));
        assert_eq!(check_credentials("", "admin"), Err(LoginError::MissingFields));
        assert_eq!(check_credentials("admin@example.com", ""), Err(LoginError::MissingFields));
    }
}
