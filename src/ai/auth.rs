//! Authentication for AI services.

use std::env;
use thiserror::Error;

/// Manages authentication keys for AI service APIs.
#[derive(Clone)]
pub struct Auth {
    api_key: String,
}

impl Auth {
    /// Creates a new `Auth` structure using the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self { api_key }
    }

    /// Retrieves an API key from the environment.
    ///
    /// Returns an error naming `envvar` if the API key cannot be retrieved
    /// from the environment. An empty variable counts as missing.
    pub fn from_env(envvar: impl Into<String>) -> AuthResult {
        let envvar = envvar.into();
        match env::var(&envvar) {
            Ok(api_key) if !api_key.is_empty() => Ok(Self { api_key }),
            Ok(_) | Err(env::VarError::NotPresent) => Err(AuthError::Missing(envvar)),
            Err(env::VarError::NotUnicode(_)) => Err(AuthError::NotUnicode(envvar)),
        }
    }

    /// The actual API key.
    ///
    /// # Examples
    ///
    /// ```
    /// use xdraft::ai::Auth;
    /// let auth = Auth::new("ThisIsMyApiKey");
    /// assert_eq!(auth.api_key(), "ThisIsMyApiKey");
    /// ```
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keeps keys out of logs.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Standard result type for [`Auth`] creation.
pub type AuthResult = Result<Auth, AuthError>;

/// Indicates an error when creating an authentication key.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AuthError {
    /// The environment variable holding the key is not set.
    #[error("{0} not found in environment variables")]
    Missing(String),

    /// The environment variable holding the key is not valid Unicode.
    #[error("{0} is not valid unicode")]
    NotUnicode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use temp_env::{with_var, with_var_unset};

    #[test]
    fn it_creates_an_auth_key_from_the_environment() {
        let key_name = "XDRAFT_AUTH_TEST_KEY";
        let key_value = "ThisIsMyApiKey";
        with_var(key_name, Some(key_value), || {
            let auth = Auth::from_env(key_name);
            assert!(auth.is_ok());
            let auth = auth.unwrap();
            assert_eq!(auth.api_key(), key_value);
        })
    }

    #[test]
    fn it_returns_an_error_if_a_key_is_not_set_in_environment() {
        let key_name = "XDRAFT_AUTH_TEST_KEY";
        with_var_unset(key_name, || {
            let auth = Auth::from_env(key_name);
            assert_eq!(
                auth.unwrap_err(),
                AuthError::Missing(String::from(key_name))
            );
        })
    }

    #[test]
    fn it_treats_an_empty_key_as_missing() {
        let key_name = "XDRAFT_AUTH_TEST_KEY";
        with_var(key_name, Some(""), || {
            let auth = Auth::from_env(key_name);
            assert!(matches!(auth.unwrap_err(), AuthError::Missing(_)));
        })
    }

    #[test]
    fn it_returns_an_error_if_a_key_is_not_unicode() {
        let key_name = "XDRAFT_AUTH_TEST_KEY";
        let bytes = vec![0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff];
        let key_value = unsafe { OsString::from_encoded_bytes_unchecked(bytes) };
        with_var(key_name, Some(key_value), || {
            let auth = Auth::from_env(key_name);
            assert!(matches!(auth.unwrap_err(), AuthError::NotUnicode(_)))
        })
    }

    #[test]
    fn it_names_the_missing_variable() {
        let err = AuthError::Missing(String::from("GEMINI_API_KEY"));
        assert_eq!(
            err.to_string(),
            "GEMINI_API_KEY not found in environment variables"
        );
    }

    #[test]
    fn it_does_not_leak_keys_in_debug_output() {
        let auth = Auth::new("sk-secret");
        assert!(!format!("{auth:?}").contains("sk-secret"));
    }
}
