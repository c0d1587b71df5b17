use axum::{extract::State, Json};
use tracing::debug;

use crate::{
    model::LeadBmc,
    web::{types::LeadView, WebResult},
    AppState,
};

/// Every captured lead, most recent first.
/// No pagination and no access control.
#[tracing::instrument(name = "admin_list_leads", skip_all)]
pub async fn list_leads(State(app_state): State<AppState>) -> WebResult<Json<Vec<LeadView>>> {
    let leads = LeadBmc::list(&app_state.model_mgr).await?;
    debug!(count = leads.len());

    Ok(Json(leads.into_iter().map(LeadView::from).collect()))
}
