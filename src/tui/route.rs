use std::fmt;

/// Pages of the application, addressed with path syntax: `/`, `/create`, `/edit/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    /// `None` when the path carried a missing or non-numeric identifier.
    Edit(Option<u64>),
}

impl Route {
    /// Parses a route path. Unknown paths fall back to the list.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.trim().split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::List,
            ["create"] => Route::Create,
            ["edit"] => Route::Edit(None),
            ["edit", id] => Route::Edit(id.parse::<u64>().ok().filter(|id| *id > 0)),
            _ => Route::List,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Create => write!(f, "/create"),
            Route::Edit(Some(id)) => write!(f, "/edit/{}", id),
            Route::Edit(None) => write!(f, "/edit"),
        }
    }
}

/// Navigation history. The current route is the top of the stack.
#[derive(Debug)]
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Router { history: vec![start] }
    }

    pub fn current(&self) -> Route {
        self.history.last().copied().unwrap_or(Route::List)
    }

    pub fn push(&mut self, route: Route) {
        self.history.push(route);
    }

    /// Replaces the current entry, used for redirects.
    pub fn replace(&mut self, route: Route) {
        self.history.pop();
        self.history.push(route);
    }

    /// Goes back one entry. With nothing to go back to, lands on the list.
    pub fn back(&mut self) -> Route {
        self.history.pop();
        if self.history.is_empty() {
            self.history.push(Route::List);
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse(""), Route::List);
        assert_eq!(Route::parse("/create"), Route::Create);
        assert_eq!(Route::parse("/edit/12"), Route::Edit(Some(12)));
        assert_eq!(Route::parse("/edit/12/"), Route::Edit(Some(12)));
    }

    #[test]
    fn bad_edit_ids_parse_to_none() {
        assert_eq!(Route::parse("/edit"), Route::Edit(None));
        assert_eq!(Route::parse("/edit/abc"), Route::Edit(None));
        assert_eq!(Route::parse("/edit/0"), Route::Edit(None));
        assert_eq!(Route::parse("/edit/-3"), Route::Edit(None));
    }

    #[test]
    fn display_round_trips_valid_routes() {
        for r in [Route::List, Route::Create, Route::Edit(Some(5))] {
            assert_eq!(Route::parse(&r.to_string()), r);
        }
    }

    #[test]
    fn back_falls_back_to_list() {
        let mut router = Router::new(Route::Create);
        assert_eq!(router.back(), Route::List);

        router.push(Route::Edit(Some(3)));
        router.replace(Route::List);
        assert_eq!(router.current(), Route::List);
        assert_eq!(router.back(), Route::List);
    }
}
