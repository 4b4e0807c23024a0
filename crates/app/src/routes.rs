//! Portal route table

use hrportal_auth::{
    decide, GateDecision, Redirect, RequiredRoles, Role, SessionStatus, LOGIN_PATH,
    UNAUTHORIZED_PATH,
};
use serde::Serialize;

/// Where a signed-in user lands when no return path is pending.
pub const DEFAULT_LANDING: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Login,
    Unauthorized,
    Dashboard,
    Leave,
    Attendance,
    Hr,
    Profile,
    Settings,
    NotFound,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Login => "Sign in",
            Page::Unauthorized => "Access denied",
            Page::Dashboard => "Dashboard",
            Page::Leave => "Leave",
            Page::Attendance => "Attendance",
            Page::Hr => "HR",
            Page::Profile => "Profile",
            Page::Settings => "Settings",
            Page::NotFound => "Page not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected(RequiredRoles),
}

#[derive(Debug, Clone)]
pub struct PortalRoute {
    pub path: &'static str,
    pub page: Page,
    pub access: Access,
}

impl PortalRoute {
    fn public(path: &'static str, page: Page) -> Self {
        Self {
            path,
            page,
            access: Access::Public,
        }
    }

    fn protected(path: &'static str, page: Page, required: RequiredRoles) -> Self {
        Self {
            path,
            page,
            access: Access::Protected(required),
        }
    }

    /// Short label of what the gate would do for `status` on this route.
    pub fn preview(&self, status: SessionStatus<'_>) -> &'static str {
        let Access::Protected(required) = &self.access else {
            return "public";
        };
        match decide(status, required, self.path) {
            GateDecision::Render => "allowed",
            GateDecision::Loading => "checking",
            GateDecision::Redirect(Redirect::Login { .. }) => "sign-in required",
            GateDecision::Redirect(Redirect::Unauthorized) => "forbidden",
        }
    }
}

/// Entry of the main navigation menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: &'static str,
    pub path: &'static str,
    /// Whether the gate would render this page for the current session
    pub permitted: bool,
}

const MAIN_MENU: [(&str, &str); 4] = [
    ("Dashboard", "/dashboard"),
    ("Leave", "/leave"),
    ("Attendance", "/attendance"),
    ("HR", "/hr"),
];

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<PortalRoute>,
    not_found: PortalRoute,
}

impl RouteTable {
    /// The HR portal's routes.
    pub fn portal() -> Self {
        let hr_admins = RequiredRoles::any_of([Role::ADMIN, Role::HR_ADMIN]);

        Self {
            routes: vec![
                PortalRoute::public("/", Page::Home),
                PortalRoute::public(LOGIN_PATH, Page::Login),
                PortalRoute::public(UNAUTHORIZED_PATH, Page::Unauthorized),
                PortalRoute::protected("/dashboard", Page::Dashboard, RequiredRoles::none()),
                PortalRoute::protected("/leave", Page::Leave, RequiredRoles::none()),
                PortalRoute::protected("/attendance", Page::Attendance, RequiredRoles::none()),
                PortalRoute::protected("/hr", Page::Hr, hr_admins),
                PortalRoute::protected("/profile", Page::Profile, RequiredRoles::none()),
                PortalRoute::protected("/settings", Page::Settings, RequiredRoles::none()),
            ],
            not_found: PortalRoute::public("*", Page::NotFound),
        }
    }

    pub fn routes(&self) -> &[PortalRoute] {
        &self.routes
    }

    /// Case-insensitive match on the normalized path; unknown paths get the
    /// not-found page.
    pub fn resolve(&self, path: &str) -> &PortalRoute {
        let path = normalize_path(path);
        self.routes
            .iter()
            .find(|route| route.path.eq_ignore_ascii_case(&path))
            .unwrap_or(&self.not_found)
    }

    pub fn menu(&self, status: SessionStatus<'_>) -> Vec<MenuItem> {
        MAIN_MENU
            .iter()
            .map(|&(name, path)| {
                let permitted = match &self.resolve(path).access {
                    Access::Public => true,
                    Access::Protected(required) => {
                        decide(status, required, path) == GateDecision::Render
                    }
                };
                MenuItem {
                    name,
                    path,
                    permitted,
                }
            })
            .collect()
    }
}

/// Drop query/fragment and any trailing slash; always starts with `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
