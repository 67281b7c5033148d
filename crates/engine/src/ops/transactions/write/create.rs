use chrono::Utc;
use sea_orm::TransactionTrait;

use crate::{
    EngineError, EnrichedTransaction, NewTransactionCmd, ResultEngine, TransactionKind,
};

use super::super::helpers::{NewTransactionRow, enrich, insert_with_effects};
use super::super::super::{Engine, normalize_required_text, validate_amount, with_tx};

impl Engine {
    /// Create a transaction and apply it to its account and budget.
    ///
    /// - `in`: the amount is added to the account balance. A `budget_id` is
    ///   ignored and stored as null.
    /// - `out`: the amount is subtracted from the account balance and from
    ///   the budget `current`. `budget_id` is mandatory.
    ///
    /// The date defaults to now.
    pub async fn create_transaction(
        &self,
        cmd: NewTransactionCmd,
    ) -> ResultEngine<EnrichedTransaction> {
        let description = normalize_required_text(&cmd.description, "description")?;
        validate_amount(cmd.amount, "amount")?;
        let budget_id = match cmd.kind {
            TransactionKind::In => None,
            TransactionKind::Out => Some(
                cmd.budget_id
                    .ok_or_else(|| EngineError::MissingField("budget_id".to_string()))?,
            ),
        };
        let row = NewTransactionRow {
            date: cmd.date.unwrap_or_else(Utc::now),
            description,
            kind: cmd.kind,
            amount: cmd.amount,
            account_id: cmd.account_id,
            budget_id,
        };

        with_tx!(self, |db_tx| {
            let model = insert_with_effects(&db_tx, row).await?;
            let transaction_id = model.id;
            enrich(&db_tx, vec![model]).await?.pop().ok_or_else(|| {
                EngineError::KeyNotFound(format!("transaction {transaction_id}"))
            })
        })
    }
}
