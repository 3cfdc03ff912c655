//! SMS provider secrets
//!
//! Credentials are looked up when a notification is sent rather than at
//! startup, so rotating them in the environment takes effect without a
//! restart and a service without SMS configured still serves data.

use std::fmt;
use thiserror::Error;

pub const ACCOUNT_SID_VAR: &str = "TWILIO_ACCOUNT_SID";
pub const AUTH_TOKEN_VAR: &str = "TWILIO_AUTH_TOKEN";
pub const FROM_NUMBER_VAR: &str = "TWILIO_PHONE_NUMBER";
pub const TO_NUMBER_VAR: &str = "YOUR_PHONE_NUMBER";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("Missing secret: {0} is not set")]
    Missing(&'static str),
}

/// Account identity, auth token, sender and recipient for SMS delivery
#[derive(Clone, PartialEq, Eq)]
pub struct SmsCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub to_number: String,
}

impl SmsCredentials {
    /// Read all four values from the process environment
    pub fn from_env() -> Result<Self, SecretError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary lookup; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SecretError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(SecretError::Missing(name))
        };

        Ok(Self {
            account_sid: fetch(ACCOUNT_SID_VAR)?,
            auth_token: fetch(AUTH_TOKEN_VAR)?,
            from_number: fetch(FROM_NUMBER_VAR)?,
            to_number: fetch(TO_NUMBER_VAR)?,
        })
    }
}

impl fmt::Debug for SmsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("to_number", &self.to_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_resolves_all_four_values() {
        let creds = SmsCredentials::from_lookup(lookup_from(&[
            (ACCOUNT_SID_VAR, "AC123"),
            (AUTH_TOKEN_VAR, "secret"),
            (FROM_NUMBER_VAR, "+15550001"),
            (TO_NUMBER_VAR, "+15550002"),
        ]))
        .unwrap();

        assert_eq!(creds.account_sid, "AC123");
        assert_eq!(creds.to_number, "+15550002");
    }

    #[test]
    fn test_empty_value_is_missing() {
        let err = SmsCredentials::from_lookup(lookup_from(&[
            (ACCOUNT_SID_VAR, "AC123"),
            (AUTH_TOKEN_VAR, "  "),
        ]))
        .unwrap_err();

        assert_eq!(err, SecretError::Missing(AUTH_TOKEN_VAR));
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = SmsCredentials {
            account_sid: "AC123".into(),
            auth_token: "hunter2".into(),
            from_number: "+1".into(),
            to_number: "+2".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
