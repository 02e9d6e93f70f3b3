use serde::Serialize;
use utoipa::ToSchema;

use crate::auth_gate::{GateDecision, SiteRoute};

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationView {
    pub route: SiteRoute,
    pub decision: GateDecision,
}
