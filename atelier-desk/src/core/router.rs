//! Route table and authentication guard
//!
//! | Path | Route | Auth |
//! |------|-------|------|
//! | `/`, `/login` | Login | no |
//! | `/logout` | Logout | no |
//! | `/dashboard` | Home | yes |
//! | `/dashboard/profil` | Profile | yes |
//! | `/dashboard/calendrier` | Calendar | yes |
//! | `/dashboard/caisse` | Cash | yes |
//! | `/dashboard/caisse-par-semaine` | WeeklyCash | yes |
//! | `/dashboard/utilisateurs` | Users | yes |
//! | `/dashboard/modeles` | Modeles | yes |
//! | `/dashboard/commandes` | Orders | yes |
//! | `/dashboard/clients` | Customers | yes |
//! | `/dashboard/blank` | Blank | yes |
//!
//! Legacy `/TailAdmin/...` links land on the dashboard; anything else goes
//! back to the sign-in page.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Logout,
    Home,
    Profile,
    Calendar,
    Cash,
    WeeklyCash,
    Users,
    Modeles,
    Orders,
    Customers,
    Blank,
}

impl Route {
    pub const ALL: [Route; 12] = [
        Route::Login,
        Route::Logout,
        Route::Home,
        Route::Profile,
        Route::Calendar,
        Route::Cash,
        Route::WeeklyCash,
        Route::Users,
        Route::Modeles,
        Route::Orders,
        Route::Customers,
        Route::Blank,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Logout => "/logout",
            Route::Home => "/dashboard",
            Route::Profile => "/dashboard/profil",
            Route::Calendar => "/dashboard/calendrier",
            Route::Cash => "/dashboard/caisse",
            Route::WeeklyCash => "/dashboard/caisse-par-semaine",
            Route::Users => "/dashboard/utilisateurs",
            Route::Modeles => "/dashboard/modeles",
            Route::Orders => "/dashboard/commandes",
            Route::Customers => "/dashboard/clients",
            Route::Blank => "/dashboard/blank",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Connexion",
            Route::Logout => "Déconnexion",
            Route::Home => "Tableau de bord",
            Route::Profile => "Profil",
            Route::Calendar => "Calendrier",
            Route::Cash => "Caisse",
            Route::WeeklyCash => "Caisse par semaine",
            Route::Users => "Utilisateurs",
            Route::Modeles => "Modèles",
            Route::Orders => "Commandes",
            Route::Customers => "Clients",
            Route::Blank => "Page vierge",
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::Logout)
    }

    /// Exact path match, trailing slash ignored
    pub fn from_path(path: &str) -> Option<Route> {
        let path = normalize(path);
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of resolving a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    /// Target differs from the requested path
    pub redirected: bool,
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Resolve `path` for a user who is (or is not) signed in
pub fn resolve(path: &str, authenticated: bool) -> Navigation {
    let normalized = normalize(path);
    let requested = if normalized == "/" {
        None
    } else if normalized == "/TailAdmin" || normalized.starts_with("/TailAdmin/") {
        Some(Route::Home)
    } else {
        Route::from_path(normalized)
    };

    let route = match requested {
        Some(route) if route.requires_auth() && !authenticated => Route::Login,
        Some(Route::Login) if authenticated => Route::Home,
        Some(route) => route,
        None => Route::Login,
    };

    let redirected = route.path() != normalized;
    if redirected {
        tracing::debug!(from = %normalized, to = %route, "Redirect");
    }
    Navigation { route, redirected }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_routes_need_a_session() {
        let nav = resolve("/dashboard/commandes", false);
        assert_eq!(nav.route, Route::Login);
        assert!(nav.redirected);

        let nav = resolve("/dashboard/commandes/", true);
        assert_eq!(nav.route, Route::Orders);
        assert!(!nav.redirected);
    }

    #[test]
    fn test_root_and_unknown_paths_go_to_login() {
        assert_eq!(resolve("/", false).route, Route::Login);
        assert_eq!(resolve("/nimporte-quoi", true).route, Route::Login);
        assert_eq!(resolve("", false).route, Route::Login);
    }

    #[test]
    fn test_signed_in_user_skips_login() {
        assert_eq!(resolve("/login", true).route, Route::Home);
        assert_eq!(resolve("/login", false).route, Route::Login);
        assert_eq!(resolve("/logout", false).route, Route::Logout);
    }

    #[test]
    fn test_legacy_prefix_lands_on_dashboard() {
        assert_eq!(resolve("/TailAdmin/tables", true).route, Route::Home);
        assert_eq!(resolve("/TailAdmin", false).route, Route::Login);
    }

    #[test]
    fn test_every_route_resolves_to_itself() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
            assert_eq!(resolve(route.path(), true).route, match route {
                Route::Login => Route::Home,
                other => other,
            });
        }
    }
}
