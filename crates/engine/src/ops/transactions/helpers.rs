use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseTransaction, QueryFilter, prelude::*, sea_query::Expr,
};

use crate::{
    EngineError, EnrichedTransaction, ResultEngine, Transaction, TransactionKind, accounts,
    budgets, transactions,
};

/// Changes to account balances and budget counters collected while a write
/// is applied, keyed by id.
///
/// Nothing touches the database until [`PendingDeltas::persist`] runs, which
/// writes every change inside the caller's DB transaction.
#[derive(Debug, Default)]
pub(in crate::ops) struct PendingDeltas {
    accounts: BTreeMap<i32, i64>,
    budgets: BTreeMap<i32, i64>,
}

impl PendingDeltas {
    pub(in crate::ops) fn account(&mut self, account_id: i32, delta: i64) -> ResultEngine<()> {
        accumulate(&mut self.accounts, account_id, delta)
            .ok_or_else(|| out_of_range("account", account_id))
    }

    pub(in crate::ops) fn budget(&mut self, budget_id: i32, delta: i64) -> ResultEngine<()> {
        accumulate(&mut self.budgets, budget_id, delta)
            .ok_or_else(|| out_of_range("budget", budget_id))
    }

    /// Record the effect a transaction has when it exists.
    pub(in crate::ops) fn apply(
        &mut self,
        kind: TransactionKind,
        amount: i64,
        account_id: i32,
        budget_id: Option<i32>,
    ) -> ResultEngine<()> {
        self.record(kind, amount, account_id, budget_id, 1)
    }

    /// Record the opposite of [`PendingDeltas::apply`].
    pub(in crate::ops) fn revert(
        &mut self,
        kind: TransactionKind,
        amount: i64,
        account_id: i32,
        budget_id: Option<i32>,
    ) -> ResultEngine<()> {
        self.record(kind, amount, account_id, budget_id, -1)
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount: i64,
        account_id: i32,
        budget_id: Option<i32>,
        sign: i64,
    ) -> ResultEngine<()> {
        self.account(account_id, sign * kind.signed_amount(amount))?;
        if kind == TransactionKind::Out {
            let budget_id =
                budget_id.ok_or_else(|| EngineError::MissingField("budget_id".to_string()))?;
            self.budget(budget_id, -sign * amount)?;
        }
        Ok(())
    }

    /// Write the collected changes as relative updates.
    ///
    /// Every id must exist, a zero delta included: this is also how a write
    /// referencing an unknown account or budget gets rejected. A row whose
    /// counter would leave the `i64` range is not updated either.
    pub(in crate::ops) async fn persist(self, db_tx: &DatabaseTransaction) -> ResultEngine<()> {
        for (account_id, delta) in self.accounts {
            let result = accounts::Entity::update_many()
                .col_expr(
                    accounts::Column::Balance,
                    Expr::col(accounts::Column::Balance).add(delta),
                )
                .filter(accounts::Column::Id.eq(account_id))
                .filter(in_range(accounts::Column::Balance, delta))
                .exec(db_tx)
                .await?;
            if result.rows_affected == 0 {
                let exists = accounts::Entity::find_by_id(account_id)
                    .one(db_tx)
                    .await?
                    .is_some();
                return Err(if exists {
                    out_of_range("account", account_id)
                } else {
                    EngineError::InvalidReference(format!("account {account_id} not exists"))
                });
            }
        }

        for (budget_id, delta) in self.budgets {
            let result = budgets::Entity::update_many()
                .col_expr(
                    budgets::Column::Current,
                    Expr::col(budgets::Column::Current).add(delta),
                )
                .filter(budgets::Column::Id.eq(budget_id))
                .filter(in_range(budgets::Column::Current, delta))
                .exec(db_tx)
                .await?;
            if result.rows_affected == 0 {
                let exists = budgets::Entity::find_by_id(budget_id)
                    .one(db_tx)
                    .await?
                    .is_some();
                return Err(if exists {
                    out_of_range("budget", budget_id)
                } else {
                    EngineError::InvalidReference(format!("budget {budget_id} not exists"))
                });
            }
        }

        Ok(())
    }
}

fn accumulate(deltas: &mut BTreeMap<i32, i64>, id: i32, delta: i64) -> Option<()> {
    let entry = deltas.entry(id).or_insert(0);
    *entry = entry.checked_add(delta)?;
    Some(())
}

/// Condition keeping `column + delta` inside the `i64` range.
///
/// SQLite silently turns an overflowing integer sum into a REAL.
fn in_range<C: ColumnTrait>(column: C, delta: i64) -> sea_orm::sea_query::SimpleExpr {
    if delta >= 0 {
        column.lte(i64::MAX - delta)
    } else {
        column.gte(i64::MIN - delta)
    }
}

pub(in crate::ops) fn out_of_range(target: &str, id: i32) -> EngineError {
    EngineError::InvalidField(format!("{target} {id} amount out of range"))
}

/// A validated transaction ready to be stored.
#[derive(Debug)]
pub(in crate::ops) struct NewTransactionRow {
    pub date: DateTime<Utc>,
    pub description: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub account_id: i32,
    pub budget_id: Option<i32>,
}

/// Apply the effects of `row` on its account and budget, then insert it.
pub(in crate::ops) async fn insert_with_effects(
    db_tx: &DatabaseTransaction,
    row: NewTransactionRow,
) -> ResultEngine<transactions::Model> {
    let mut deltas = PendingDeltas::default();
    deltas.apply(row.kind, row.amount, row.account_id, row.budget_id)?;
    deltas.persist(db_tx).await?;

    let model = transactions::ActiveModel {
        id: ActiveValue::NotSet,
        date: ActiveValue::Set(row.date),
        description: ActiveValue::Set(row.description),
        kind: ActiveValue::Set(row.kind.as_str().to_string()),
        amount: ActiveValue::Set(row.amount),
        account_id: ActiveValue::Set(row.account_id),
        budget_id: ActiveValue::Set(row.budget_id),
    }
    .insert(db_tx)
    .await?;

    Ok(model)
}

/// Attach account and budget names to transaction rows.
///
/// The referenced accounts and budgets are loaded with one query each, the
/// join happens here.
pub(in crate::ops) async fn enrich<C>(
    db: &C,
    models: Vec<transactions::Model>,
) -> ResultEngine<Vec<EnrichedTransaction>>
where
    C: ConnectionTrait,
{
    let account_ids: BTreeSet<i32> = models.iter().map(|m| m.account_id).collect();
    let budget_ids: BTreeSet<i32> = models.iter().filter_map(|m| m.budget_id).collect();

    let account_names: HashMap<i32, String> = if account_ids.is_empty() {
        HashMap::new()
    } else {
        accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|account| (account.id, account.name))
            .collect()
    };

    let budget_names: HashMap<i32, String> = if budget_ids.is_empty() {
        HashMap::new()
    } else {
        budgets::Entity::find()
            .filter(budgets::Column::Id.is_in(budget_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|budget| (budget.id, budget.name))
            .collect()
    };

    models
        .into_iter()
        .map(|model| {
            let account_name = account_names.get(&model.account_id).cloned().ok_or_else(|| {
                EngineError::InvalidReference(format!("account {} not exists", model.account_id))
            })?;
            let budget_name = match model.budget_id {
                Some(budget_id) => Some(budget_names.get(&budget_id).cloned().ok_or_else(
                    || EngineError::InvalidReference(format!("budget {budget_id} not exists")),
                )?),
                None => None,
            };
            let tx = Transaction::try_from(model)?;
            Ok(EnrichedTransaction::new(tx, account_name, budget_name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_effect_touches_account_and_budget() {
        let mut deltas = PendingDeltas::default();
        deltas.apply(TransactionKind::Out, 30, 1, Some(2)).unwrap();

        assert_eq!(deltas.accounts.get(&1), Some(&-30));
        assert_eq!(deltas.budgets.get(&2), Some(&-30));
    }

    #[test]
    fn in_effect_ignores_budget() {
        let mut deltas = PendingDeltas::default();
        deltas.apply(TransactionKind::In, 100, 1, Some(2)).unwrap();

        assert_eq!(deltas.accounts.get(&1), Some(&100));
        assert!(deltas.budgets.is_empty());
    }

    #[test]
    fn revert_cancels_apply() {
        let mut deltas = PendingDeltas::default();
        deltas.apply(TransactionKind::Out, 30, 1, Some(2)).unwrap();
        deltas.revert(TransactionKind::Out, 30, 1, Some(2)).unwrap();

        assert_eq!(deltas.accounts.get(&1), Some(&0));
        assert_eq!(deltas.budgets.get(&2), Some(&0));
    }

    #[test]
    fn out_effect_requires_budget() {
        let mut deltas = PendingDeltas::default();

        assert_eq!(
            deltas.apply(TransactionKind::Out, 30, 1, None),
            Err(EngineError::MissingField("budget_id".to_string()))
        );
    }

    #[test]
    fn accumulated_delta_overflow_is_rejected() {
        let mut deltas = PendingDeltas::default();
        deltas.apply(TransactionKind::In, i64::MAX, 1, None).unwrap();

        assert_eq!(
            deltas.apply(TransactionKind::In, 1, 1, None),
            Err(EngineError::InvalidField(
                "account 1 amount out of range".to_string()
            ))
        );
        assert_eq!(deltas.accounts.get(&1), Some(&i64::MAX));
    }
}
