use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A resolved user profile, the input to every access decision.
///
/// Identities are derived fresh on each login and carried inside the
/// bearer token afterwards; nothing is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Lower-cased email with every character outside `[a-z0-9]` removed.
    pub id: String,
    /// Normalized (lower-cased) email.
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Home group name.
    pub team: String,
    pub is_admin: bool,
}

impl Identity {
    /// Build an identity from an already-normalized email.
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        team: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        let email = email.into();
        Self {
            id: user_id_for(&email),
            email,
            display_name: display_name.into(),
            team: team.into(),
            is_admin,
        }
    }
}

/// Stable user id derived from a normalized email.
pub fn user_id_for(email: &str) -> String {
    email
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Basic `local@domain.tld` shape check: no whitespace, exactly one `@`,
/// and a dot somewhere after it.
pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_strips_punctuation() {
        assert_eq!(user_id_for("jane.smith@enverus.com"), "janesmithenveruscom");
        assert_eq!(user_id_for("a_b-c+1@x.io"), "abc1xio");
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jane.smith@enverus.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("jane.smith"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane smith@enverus.com"));
        assert!(!is_valid_email("jane@@enverus.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn identity_serializes_with_wire_names() {
        let identity = Identity::new("john.doe@enverus.com", "John Doe", "Sales", false);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["id"], "johndoeenveruscom");
        assert_eq!(json["name"], "John Doe");
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["team"], "Sales");
    }
}
