//! Navigation effects
//!
//! The route gate only decides; the navigator carries the decision out.
//! Protected views re-check the session on every entry, and a redirect
//! replaces the requested entry rather than stacking on top of it.

use hrportal_auth::{decide, AuthFailure, GateDecision, SessionGuard, LOGIN_PATH};
use serde::Serialize;

use crate::routes::{normalize_path, Access, Page, RouteTable, DEFAULT_LANDING};

/// Outcome of one navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation {
    Rendered {
        path: String,
        page: Page,
    },
    /// Session check has not settled; nothing was committed to history
    Loading {
        path: String,
    },
    Redirected {
        requested: String,
        to: String,
        page: Page,
    },
}

impl Navigation {
    /// Location the user ends up on.
    pub fn location(&self) -> &str {
        match self {
            Navigation::Rendered { path, .. } | Navigation::Loading { path } => path,
            Navigation::Redirected { to, .. } => to,
        }
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Navigation::Rendered { page, .. } | Navigation::Redirected { page, .. } => Some(*page),
            Navigation::Loading { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct Navigator {
    routes: RouteTable,
    history: Vec<String>,
    return_to: Option<String>,
}

impl Navigator {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            history: vec!["/".to_string()],
            return_to: None,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Path to return to after the next successful login.
    pub fn pending_return(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    pub fn remember_return(&mut self, path: &str) {
        self.return_to = Some(normalize_path(path));
    }

    pub fn navigate(&mut self, guard: &mut SessionGuard, path: &str) -> Navigation {
        let path = normalize_path(path);
        let (page, access) = {
            let route = self.routes.resolve(&path);
            (route.page, route.access.clone())
        };

        let required = match access {
            Access::Public => {
                self.history.push(path.clone());
                return Navigation::Rendered { path, page };
            }
            Access::Protected(required) => required,
        };

        guard.check_auth();

        match decide(guard.status(), &required, &path) {
            GateDecision::Render => {
                self.history.push(path.clone());
                Navigation::Rendered { path, page }
            }
            GateDecision::Loading => Navigation::Loading { path },
            GateDecision::Redirect(redirect) => {
                if let Some(from) = redirect.return_to() {
                    self.return_to = Some(from.to_string());
                }
                let to = redirect.target().to_string();
                let page = self.routes.resolve(&to).page;
                tracing::debug!(requested = %path, to = %to, "Navigation redirected");
                self.history.push(to.clone());
                Navigation::Redirected {
                    requested: path,
                    to,
                    page,
                }
            }
        }
    }

    /// Sign in, then continue to the remembered path or the dashboard.
    ///
    /// On failure the navigator stays where it is and keeps the pending
    /// return path for the next attempt.
    pub async fn login(
        &mut self,
        guard: &mut SessionGuard,
        email: &str,
        password: &str,
    ) -> Result<Navigation, AuthFailure> {
        guard.login(email, password).await?;

        let destination = self
            .return_to
            .take()
            .unwrap_or_else(|| DEFAULT_LANDING.to_string());
        Ok(self.navigate(guard, &destination))
    }

    pub fn logout(&mut self, guard: &mut SessionGuard) -> Navigation {
        guard.logout();
        self.return_to = None;
        self.navigate(guard, LOGIN_PATH)
    }

    /// Pop the current entry; the first entry is never removed.
    pub fn back(&mut self) -> &str {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.current()
    }
}
