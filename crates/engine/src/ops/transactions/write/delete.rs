use sea_orm::{TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, Transaction, transactions};

use super::super::helpers::PendingDeltas;
use super::super::super::{Engine, with_tx};

impl Engine {
    /// Delete a transaction, reverting its effect on the account balance and,
    /// for `out`, on the budget.
    pub async fn delete_transaction(&self, transaction_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound(format!("transaction {transaction_id}"))
                })?;
            let tx = Transaction::try_from(model)?;

            let mut deltas = PendingDeltas::default();
            deltas.revert(tx.kind, tx.amount, tx.account_id, tx.budget_id)?;
            deltas.persist(&db_tx).await?;

            transactions::Entity::delete_by_id(tx.id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
