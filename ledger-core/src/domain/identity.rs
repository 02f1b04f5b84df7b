//! Account identity (PESEL for people, NIP for companies)

use std::fmt;

/// Value stored in place of an identity that failed validation
pub const INVALID_SENTINEL: &str = "Invalid";

/// Length of a personal national id (PESEL)
pub const PESEL_LENGTH: usize = 11;

/// Length of a business tax id (NIP)
pub const NIP_LENGTH: usize = 10;

/// Identity of an account.
///
/// Malformed input never fails construction; it becomes `Invalid` and is
/// rendered as the `"Invalid"` sentinel. `Invalid` compares equal to itself,
/// so a registry holds at most one account without a valid identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Valid(String),
    Invalid,
}

impl Identity {
    /// Validate a personal id: exactly 11 ASCII digits
    pub fn pesel(raw: Option<&str>) -> Self {
        Self::parse(raw, PESEL_LENGTH)
    }

    /// Validate a business tax id: exactly 10 ASCII digits
    pub fn nip(raw: Option<&str>) -> Self {
        Self::parse(raw, NIP_LENGTH)
    }

    fn parse(raw: Option<&str>, length: usize) -> Self {
        match raw {
            Some(s) if s.len() == length && s.bytes().all(|b| b.is_ascii_digit()) => {
                Identity::Valid(s.to_string())
            }
            _ => Identity::Invalid,
        }
    }

    /// Rebuild an identity from its stored form without re-validating it
    pub fn restore(stored: &str) -> Self {
        if stored == INVALID_SENTINEL {
            Identity::Invalid
        } else {
            Identity::Valid(stored.to_string())
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Identity::Valid(_))
    }

    /// Stored/displayed form; the sentinel for invalid identities
    pub fn as_str(&self) -> &str {
        match self {
            Identity::Valid(s) => s,
            Identity::Invalid => INVALID_SENTINEL,
        }
    }

    /// Whether a lookup key refers to this identity
    pub fn matches(&self, key: &str) -> bool {
        self.as_str() == key
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
