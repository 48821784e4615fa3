//! Route definitions.
//!
//! Pure domain layer with no DOM or web_sys dependency, so the guard
//! rules are testable natively.

use std::fmt::Display;

/// All application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Inventory dashboard (default route, requires authentication).
    #[default]
    Dashboard,
    /// Login page.
    Login,
    /// Registration page.
    Register,
    /// Page not found.
    NotFound,
}

impl AppRoute {
    /// Parses a URL path into a route.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/dashboard" => Self::Dashboard,
            "/login" => Self::Login,
            "/register" => Self::Register,
            _ => Self::NotFound,
        }
    }

    /// Canonical URL path for this route.
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::NotFound => "/404",
        }
    }

    /// Guard rule: whether the route is only reachable with a session.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Whether an authenticated user should be moved off this route.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Where an unauthenticated user lands when a guard rejects them.
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// Where an authenticated user lands when leaving the auth pages.
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_to_the_expected_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
    }

    #[test]
    fn only_the_dashboard_is_guarded() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn auth_pages_bounce_authenticated_users() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::Dashboard.should_redirect_when_authenticated());
        assert!(!AppRoute::NotFound.should_redirect_when_authenticated());
    }

    #[test]
    fn redirect_targets() {
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Dashboard);
    }

    #[test]
    fn canonical_paths_round_trip() {
        for route in [AppRoute::Dashboard, AppRoute::Login, AppRoute::Register] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }
}
