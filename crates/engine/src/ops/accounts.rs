use chrono::Utc;

use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{Account, ResultEngine, TransactionKind, accounts};

use super::transactions::{NewTransactionRow, insert_with_effects};
use super::{Engine, normalize_required_text, validate_amount, with_tx};

/// Description of the transaction recording an opening balance.
pub const OPENING_BALANCE: &str = "Opening balance";

impl Engine {
    /// Return all the accounts.
    pub async fn accounts(&self) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Add a new account.
    ///
    /// The account starts from a zero balance. A positive `opening_balance`
    /// is recorded as an `in` transaction, so the balance always matches the
    /// transactions of the account.
    pub async fn new_account(&self, name: &str, opening_balance: i64) -> ResultEngine<Account> {
        let name = normalize_required_text(name, "account name")?;
        validate_amount(opening_balance, "opening balance")?;
        with_tx!(self, |db_tx| {
            let model = accounts::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                balance: ActiveValue::Set(0),
            }
            .insert(&db_tx)
            .await?;

            if opening_balance > 0 {
                insert_with_effects(
                    &db_tx,
                    NewTransactionRow {
                        date: Utc::now(),
                        description: OPENING_BALANCE.to_string(),
                        kind: TransactionKind::In,
                        amount: opening_balance,
                        account_id: model.id,
                        budget_id: None,
                    },
                )
                .await?;
            }

            Ok(Account {
                id: model.id,
                name: model.name,
                balance: opening_balance,
            })
        })
    }
}
