use api_types::budget::Budget;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Budget>>, ServerError> {
    let budgets = state
        .engine
        .budgets()
        .await?
        .into_iter()
        .map(|budget| Budget {
            id: budget.id,
            name: budget.name,
            max: budget.max,
            current: budget.current,
        })
        .collect();

    Ok(Json(budgets))
}
