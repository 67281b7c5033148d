use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, Transaction, TransactionKind, UpdateTransactionCmd, transactions,
};

use super::super::helpers::PendingDeltas;
use super::super::super::{Engine, normalize_required_text, validate_amount, with_tx};

impl Engine {
    /// Partially updates an existing transaction.
    ///
    /// The fields present in `cmd` are applied one after the other, in this
    /// order, each one looking at the result of the previous:
    /// - `description`: replaced, no side effect
    /// - `amount`: the old amount is reverted and the new one applied on the
    ///   current account (and budget, for `out`)
    /// - `account_id`: the effect of the amount moves from the old account to
    ///   the new one
    /// - `budget_id`: the amount is given back to the old budget and taken
    ///   from the new one; only valid for `out`
    ///
    /// The type of a transaction never changes.
    pub async fn update_transaction(&self, cmd: UpdateTransactionCmd) -> ResultEngine<()> {
        if cmd.is_empty() {
            return Err(EngineError::EmptyUpdate);
        }
        let transaction_id = cmd.transaction_id;
        let new_description = cmd
            .description
            .as_deref()
            .map(|description| normalize_required_text(description, "description"))
            .transpose()?;
        if let Some(amount) = cmd.amount {
            validate_amount(amount, "amount")?;
        }

        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound(format!("transaction {transaction_id}"))
                })?;
            let tx = Transaction::try_from(model)?;
            if tx.kind == TransactionKind::In && cmd.budget_id.is_some() {
                return Err(EngineError::InvalidField(
                    "budget_id cannot be set on an in transaction".to_string(),
                ));
            }

            let mut deltas = PendingDeltas::default();
            let mut tx_active = transactions::ActiveModel {
                id: ActiveValue::Set(tx.id),
                ..Default::default()
            };
            let mut amount = tx.amount;

            if let Some(description) = new_description {
                tx_active.description = ActiveValue::Set(description);
            }

            if let Some(new_amount) = cmd.amount {
                deltas.revert(tx.kind, amount, tx.account_id, tx.budget_id)?;
                deltas.apply(tx.kind, new_amount, tx.account_id, tx.budget_id)?;
                amount = new_amount;
                tx_active.amount = ActiveValue::Set(new_amount);
            }

            if let Some(new_account_id) = cmd.account_id {
                let signed_amount = tx.kind.signed_amount(amount);
                deltas.account(tx.account_id, -signed_amount)?;
                deltas.account(new_account_id, signed_amount)?;
                tx_active.account_id = ActiveValue::Set(new_account_id);
            }

            if let Some(new_budget_id) = cmd.budget_id {
                deltas.budget(tx.out_budget_id()?, amount)?;
                deltas.budget(new_budget_id, -amount)?;
                tx_active.budget_id = ActiveValue::Set(Some(new_budget_id));
            }

            deltas.persist(&db_tx).await?;
            tx_active.update(&db_tx).await?;

            Ok(())
        })
    }
}
