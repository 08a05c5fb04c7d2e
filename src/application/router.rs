// src/application/router.rs
use crate::domain::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    Notes,
    Summaries,
    Flashcards,
}

impl Route {
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Notes | Route::Summaries | Route::Flashcards)
    }
}

/// Where a request for `requested` actually lands.
///
/// Protected routes without a session, and the root, go to the login entry point.
pub fn resolve(requested: Route, session: Option<&Session>) -> Route {
    match requested {
        Route::Root => Route::Login,
        route if route.is_protected() && session.is_none() => Route::Login,
        route => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_session_when_opening_protected_route_then_redirects_to_login() {
        for route in [Route::Notes, Route::Summaries, Route::Flashcards] {
            assert_eq!(resolve(route, None), Route::Login);
        }
    }

    #[test]
    fn given_session_when_opening_protected_route_then_allows_it() {
        let session = Session::new("t");

        assert_eq!(resolve(Route::Notes, Some(&session)), Route::Notes);
    }

    #[test]
    fn given_public_routes_when_resolving_then_never_redirect() {
        assert_eq!(resolve(Route::Register, None), Route::Register);
        assert_eq!(resolve(Route::Login, None), Route::Login);
        assert_eq!(resolve(Route::Root, Some(&Session::new("t"))), Route::Login);
    }
}
