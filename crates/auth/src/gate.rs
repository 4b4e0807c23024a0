//! Route gate
//!
//! Pure decision of whether a protected view renders, waits, or
//! redirects. Performing the redirect is the caller's job.

use std::collections::BTreeSet;

use crate::guard::SessionStatus;
use crate::types::Role;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Roles allowed into a view. Empty means any authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredRoles(BTreeSet<Role>);

impl RequiredRoles {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any_of<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact membership; no wildcard or hierarchy.
    pub fn permits(&self, role: &Role) -> bool {
        self.0.is_empty() || self.0.contains(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

/// Where the gate sends a navigation it will not render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Not signed in; `from` is where to return after login
    Login { from: String },
    /// Signed in without a permitted role
    Unauthorized,
}

impl Redirect {
    pub fn target(&self) -> &'static str {
        match self {
            Redirect::Login { .. } => LOGIN_PATH,
            Redirect::Unauthorized => UNAUTHORIZED_PATH,
        }
    }

    pub fn return_to(&self) -> Option<&str> {
        match self {
            Redirect::Login { from } => Some(from),
            Redirect::Unauthorized => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    /// Session check has not settled; show a neutral loading state
    Loading,
    Redirect(Redirect),
}

pub fn decide(
    status: SessionStatus<'_>,
    required: &RequiredRoles,
    requested_path: &str,
) -> GateDecision {
    match status {
        SessionStatus::Checking => GateDecision::Loading,
        SessionStatus::Anonymous => GateDecision::Redirect(Redirect::Login {
            from: requested_path.to_string(),
        }),
        SessionStatus::Authenticated(identity) if required.permits(&identity.role) => {
            GateDecision::Render
        }
        SessionStatus::Authenticated(_) => GateDecision::Redirect(Redirect::Unauthorized),
    }
}
