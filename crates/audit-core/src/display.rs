//! Display-string lookups.
//!
//! Stored values such as `resource_type` and `backend` are translation keys.
//! [`DisplayCatalog`] maps them to display text at read time and falls back
//! to the key itself when no entry exists.

use std::collections::HashMap;

/// Login failure reasons and their messages.
///
/// Codes written by older releases are kept so historic entries still render.
const LOGIN_REASONS: &[(&str, &str)] = &[
    ("password_failed", "Username/password check failed"),
    ("password_decrypt_failed", "Password decrypt failed"),
    ("mfa_failed", "MFA failed"),
    ("mfa_unset", "MFA unset"),
    ("user_not_exist", "Username does not exist"),
    ("password_expired", "Password expired"),
    ("user_invalid", "Disabled or expired"),
    ("block_login", "This account is blocked"),
    ("backend_not_match", "Authentication backend not match"),
    ("acl_not_allow", "ACL is not allowed"),
    ("login_ip_not_allowed", "Login IP is not allowed"),
    ("login_confirm_required", "Login confirm required"),
    ("login_confirm_wait", "Wait login confirm ticket for accept"),
    ("login_confirm_rejected", "Login confirm ticket was rejected"),
    // pre-rename codes
    ("0", "-"),
    ("1", "Username/password check failed"),
    ("2", "MFA authentication failed"),
    ("3", "Username does not exist"),
    ("4", "Password expired"),
];

/// Render a login failure reason code. Unknown codes are returned verbatim.
#[must_use]
pub fn login_reason_display(code: &str) -> String {
    LOGIN_REASONS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or_else(|| code.to_string(), |(_, message)| (*message).to_string())
}

/// Translation lookup keyed by stored code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayCatalog {
    resource_types: HashMap<String, String>,
    backends: HashMap<String, String>,
}

impl DisplayCatalog {
    #[must_use]
    pub const fn new(
        resource_types: HashMap<String, String>,
        backends: HashMap<String, String>,
    ) -> Self {
        Self {
            resource_types,
            backends,
        }
    }

    #[must_use]
    pub fn resource_type(&self, key: &str) -> String {
        self.resource_types
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    #[must_use]
    pub fn backend(&self, key: &str) -> String {
        self.backends
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
