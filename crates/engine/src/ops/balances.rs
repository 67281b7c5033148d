use std::collections::HashMap;

use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{ResultEngine, Transaction, TransactionKind, accounts, budgets, transactions};

use super::transactions::out_of_range;
use super::{Engine, with_tx};

/// What [`Engine::recompute_balances`] had to correct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceReport {
    pub accounts_fixed: usize,
    pub budgets_fixed: usize,
}

impl BalanceReport {
    /// True when every stored counter already matched the transactions.
    pub fn is_clean(&self) -> bool {
        self.accounts_fixed == 0 && self.budgets_fixed == 0
    }
}

impl Engine {
    /// Recomputes the derived counters from the existing transactions.
    ///
    /// - `account.balance` is the signed sum of its transactions, from zero.
    /// - `budget.current` is `budget.max` minus its `out` amounts.
    ///
    /// Only the rows that drifted are written.
    pub async fn recompute_balances(&self) -> ResultEngine<BalanceReport> {
        with_tx!(self, |db_tx| {
            let account_models = accounts::Entity::find()
                .order_by_asc(accounts::Column::Id)
                .all(&db_tx)
                .await?;
            let budget_models = budgets::Entity::find()
                .order_by_asc(budgets::Column::Id)
                .all(&db_tx)
                .await?;
            let tx_models = transactions::Entity::find()
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;

            let mut balances: HashMap<i32, i64> = HashMap::new();
            let mut spent: HashMap<i32, i64> = HashMap::new();
            for model in tx_models {
                let tx = Transaction::try_from(model)?;
                let balance = balances.entry(tx.account_id).or_insert(0);
                *balance = balance
                    .checked_add(tx.kind.signed_amount(tx.amount))
                    .ok_or_else(|| out_of_range("account", tx.account_id))?;
                if tx.kind == TransactionKind::Out {
                    let budget_id = tx.out_budget_id()?;
                    let budget_spent = spent.entry(budget_id).or_insert(0);
                    *budget_spent = budget_spent
                        .checked_add(tx.amount)
                        .ok_or_else(|| out_of_range("budget", budget_id))?;
                }
            }

            let mut report = BalanceReport::default();

            for account in account_models {
                let expected = balances.get(&account.id).copied().unwrap_or(0);
                if account.balance != expected {
                    accounts::ActiveModel {
                        id: ActiveValue::Set(account.id),
                        balance: ActiveValue::Set(expected),
                        ..Default::default()
                    }
                    .update(&db_tx)
                    .await?;
                    report.accounts_fixed += 1;
                }
            }

            for budget in budget_models {
                let expected = budget
                    .max
                    .checked_sub(spent.get(&budget.id).copied().unwrap_or(0))
                    .ok_or_else(|| out_of_range("budget", budget.id))?;
                if budget.current != expected {
                    budgets::ActiveModel {
                        id: ActiveValue::Set(budget.id),
                        current: ActiveValue::Set(expected),
                        ..Default::default()
                    }
                    .update(&db_tx)
                    .await?;
                    report.budgets_fixed += 1;
                }
            }

            Ok(report)
        })
    }
}
