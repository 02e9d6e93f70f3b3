//! Route protection and navigation decisions.

use serde::Serialize;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;

/// Routes a storefront client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SiteRoute {
    Landing,
    Products,
    Cart,
    Checkout,
    Profile,
    Auth,
}

impl SiteRoute {
    pub const ALL: [SiteRoute; 6] = [
        SiteRoute::Landing,
        SiteRoute::Products,
        SiteRoute::Cart,
        SiteRoute::Checkout,
        SiteRoute::Profile,
        SiteRoute::Auth,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            SiteRoute::Landing => "/",
            SiteRoute::Products => "/products",
            SiteRoute::Cart => "/cart",
            SiteRoute::Checkout => "/checkout",
            SiteRoute::Profile => "/profile",
            SiteRoute::Auth => "/auth",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        SiteRoute::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Only the profile view is wrapped by the gate; checkout checks
    /// identity when the order is placed.
    pub fn requires_auth(&self) -> bool {
        matches!(self, SiteRoute::Profile)
    }
}

/// Who is looking at a view.
///
/// The server only ever builds `Anonymous` or `Authenticated` from a
/// request; `Pending` is for clients that are still restoring a saved
/// session and have not decided yet.
#[derive(Debug, Clone)]
pub enum AuthStatus {
    /// Session restore still in flight.
    Pending,
    Anonymous,
    Authenticated(AuthUser),
}

impl From<Option<AuthUser>> for AuthStatus {
    fn from(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => AuthStatus::Authenticated(user),
            None => AuthStatus::Anonymous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GateDecision {
    Loading,
    /// `replace` keeps back-navigation from returning to the guarded view.
    Redirect { to: String, replace: bool },
    Render,
}

impl GateDecision {
    pub fn redirect(route: SiteRoute) -> Self {
        GateDecision::Redirect {
            to: route.path().to_string(),
            replace: true,
        }
    }
}

/// Decision for a view that needs an identity.
pub fn guard(status: &AuthStatus) -> GateDecision {
    match status {
        AuthStatus::Pending => GateDecision::Loading,
        AuthStatus::Anonymous => GateDecision::redirect(SiteRoute::Auth),
        AuthStatus::Authenticated(_) => GateDecision::Render,
    }
}

/// Decision for any site route, given who is signed in and whether the
/// session cart has entries.
pub fn resolve(route: SiteRoute, status: &AuthStatus, cart_is_empty: bool) -> GateDecision {
    if route.requires_auth() {
        return guard(status);
    }
    if route == SiteRoute::Checkout && cart_is_empty {
        return GateDecision::redirect(SiteRoute::Cart);
    }
    GateDecision::Render
}
