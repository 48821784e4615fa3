use serde::{Deserialize, Serialize};
use std::fmt;

pub mod search;
pub mod stats;
pub mod validate;

pub use search::SweetSearchQuery;
pub use stats::InventoryStats;

// =========================================================
// Constants
// =========================================================

/// Items at or below this quantity count as "low stock" on the dashboard.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

// =========================================================
// Domain models
// =========================================================

/// Account role as issued by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Parses the wire/storage spelling (`USER` / `ADMIN`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory item. Owned and validated by the server; the client only
/// renders it and submits candidate mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweet {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

// =========================================================
// Wire protocol (request/response bodies)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Issued by both `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// Candidate create/update payload for a sweet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweetRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_round_trip() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn login_request_uses_camel_case() {
        let req = LoginRequest {
            username_or_email: "alice".into(),
            password: "secret".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"usernameOrEmail\":\"alice\""));
    }

    #[test]
    fn sweet_deserializes_from_server_shape() {
        let sweet: Sweet = serde_json::from_str(
            r#"{"id":7,"name":"Fudge","category":"Chocolate","price":2.5,"quantity":12}"#,
        )
        .unwrap();
        assert_eq!(sweet.id, 7);
        assert_eq!(sweet.price, 2.5);
        assert_eq!(sweet.quantity, 12);
    }
}
