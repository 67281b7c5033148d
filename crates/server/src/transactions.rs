//! Transactions API endpoints

use api_types::transaction::{
    TransactionKind as ApiKind, TransactionNew, TransactionUpdate, TransactionView,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::Utc;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::In => ApiKind::In,
        engine::TransactionKind::Out => ApiKind::Out,
    }
}

fn map_api_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::In => engine::TransactionKind::In,
        ApiKind::Out => engine::TransactionKind::Out,
    }
}

fn view(tx: engine::EnrichedTransaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        date: tx.date.fixed_offset(),
        description: tx.description,
        kind: map_kind(tx.kind),
        amount: tx.amount,
        account_name: tx.account_name,
        budget_name: tx.budget_name,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.transactions().await?;
    tracing::debug!("listing {} transactions", transactions.len());

    Ok(Json(transactions.into_iter().map(view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = id?;
    tracing::debug!("get transaction {id}");

    let tx = state.engine.transaction(id).await?;
    Ok(Json(view(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload?;

    let mut cmd = engine::NewTransactionCmd::new(
        payload.description,
        map_api_kind(payload.kind),
        payload.amount,
        payload.account_id,
    );
    if let Some(budget_id) = payload.budget_id {
        cmd = cmd.budget_id(budget_id);
    }
    if let Some(date) = payload.date {
        cmd = cmd.date(date.with_timezone(&Utc));
    }

    let tx = state.engine.create_transaction(cmd).await?;
    tracing::info!(
        "created transaction {} on account \"{}\"",
        tx.id,
        tx.account_name
    );

    Ok((StatusCode::CREATED, Json(view(tx))))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let mut cmd = engine::UpdateTransactionCmd::new(id);
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    if let Some(amount) = payload.amount {
        cmd = cmd.amount(amount);
    }
    if let Some(account_id) = payload.account_id {
        cmd = cmd.account_id(account_id);
    }
    if let Some(budget_id) = payload.budget_id {
        cmd = cmd.budget_id(budget_id);
    }

    state.engine.update_transaction(cmd).await?;
    tracing::info!("updated transaction {id}");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;

    state.engine.delete_transaction(id).await?;
    tracing::info!("deleted transaction {id}");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn search(
    State(state): State<ServerState>,
    Path(pattern): Path<String>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state.engine.search_transactions(&pattern).await?;
    tracing::debug!(
        "search \"{pattern}\" matched {} transactions",
        transactions.len()
    );

    Ok(Json(transactions.into_iter().map(view).collect()))
}
