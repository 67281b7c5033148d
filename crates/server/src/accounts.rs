use api_types::account::Account;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Account>>, ServerError> {
    let accounts = state
        .engine
        .accounts()
        .await?
        .into_iter()
        .map(|account| Account {
            id: account.id,
            name: account.name,
            balance: account.balance,
        })
        .collect();

    Ok(Json(accounts))
}
