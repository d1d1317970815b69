//! Navigation gate for protected views

use crate::tokens::TokenStore;

/// Client-side routes of the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Products,
    Users,
    Settings,
    NotFound,
}

impl Route {
    /// Every routable path, in navigation order
    pub const ALL: [Self; 6] = [
        Self::Root,
        Self::Login,
        Self::Dashboard,
        Self::Products,
        Self::Users,
        Self::Settings,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
            Self::Users => "/users",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }

    /// Whether the route needs a session
    pub const fn requires_auth(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Products | Self::Users | Self::Settings
        )
    }
}

/// Outcome of a navigation check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Render the requested view
    Allow,
    /// Navigate here instead
    Redirect(Route),
}

/// Decides whether a route may be shown given the current session
#[derive(Clone, Debug)]
pub struct RouteGuard {
    tokens: TokenStore,
}

impl RouteGuard {
    pub const fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    pub fn check(&self, route: Route) -> Access {
        decide(route, self.is_authenticated())
    }
}

/// Routing decision for a known session state
pub const fn decide(route: Route, authenticated: bool) -> Access {
    match route {
        Route::Root => Access::Redirect(Route::Login),
        Route::Login if authenticated => Access::Redirect(Route::Dashboard),
        route if route.requires_auth() && !authenticated => Access::Redirect(Route::Login),
        _ => Access::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_paths_are_distinct() {
        for (i, route) in Route::ALL.iter().enumerate() {
            assert!(route.path().starts_with('/'));
            assert!(Route::ALL[i + 1..].iter().all(|other| other.path() != route.path()));
        }
        assert!(!Route::ALL.contains(&Route::NotFound));
    }

    #[test]
    fn test_protected_routes_redirect_when_logged_out() {
        let guard = RouteGuard::new(TokenStore::load(Arc::new(MemoryStorage::new())));

        for route in [Route::Dashboard, Route::Products, Route::Users, Route::Settings] {
            assert_eq!(guard.check(route), Access::Redirect(Route::Login));
        }
        assert_eq!(guard.check(Route::Login), Access::Allow);
        assert_eq!(guard.check(Route::Root), Access::Redirect(Route::Login));
        assert_eq!(guard.check(Route::NotFound), Access::Allow);
    }

    #[test]
    fn test_guard_follows_token_store() {
        let tokens = TokenStore::load(Arc::new(MemoryStorage::new()));
        let guard = RouteGuard::new(tokens.clone());

        tokens.set_tokens("a", "r").unwrap();
        assert!(guard.is_authenticated());
        assert_eq!(guard.check(Route::Products), Access::Allow);
        assert_eq!(guard.check(Route::Login), Access::Redirect(Route::Dashboard));

        tokens.logout().unwrap();
        assert_eq!(guard.check(Route::Products), Access::Redirect(Route::Login));
    }
}
