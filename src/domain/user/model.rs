//! User domain entity

use chrono::{DateTime, Utc};

/// Unified role vocabulary for the whole service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical form of an account email: trimmed and lowercased.
///
/// Registration stores emails in this form; every credential lookup must
/// apply the same normalization, or a mixed-case login misses the row.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// An account: a customer or an administrator.
#[derive(Debug, Clone)]
pub struct User {
    /// UUID string
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        assert_eq!(Role::parse("customer"), Some(Role::Customer));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("operator"), None);
        assert_eq!(Role::Customer.as_str(), "customer");
    }

    #[test]
    fn email_normalization_trims_and_lowercases() {
        assert_eq!(normalize_email("Aziz@Example.com"), "aziz@example.com");
        assert_eq!(normalize_email("  olim@voltport.uz "), "olim@voltport.uz");
        assert_eq!(normalize_email("admin@voltport.local"), "admin@voltport.local");
    }
}
