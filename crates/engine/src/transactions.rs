//! Transaction primitives.
//!
//! A `Transaction` moves `amount` into (`in`) or out of (`out`) an account.
//! An `out` transaction also consumes the same amount from a budget.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    In,
    Out,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Effect of `amount` on the balance of the account.
    pub fn signed_amount(self, amount: i64) -> i64 {
        match self {
            Self::In => amount,
            Self::Out => -amount,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(EngineError::InvalidField(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub description: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub account_id: i32,
    /// Always `Some` for `out`, always `None` for `in`.
    pub budget_id: Option<i32>,
}

impl Transaction {
    /// Budget of an `out` transaction.
    pub fn out_budget_id(&self) -> ResultEngine<i32> {
        self.budget_id.ok_or_else(|| {
            EngineError::InvalidField(format!("transaction {} has no budget", self.id))
        })
    }
}

/// A transaction together with the names of the account and budget it
/// references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub description: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub account_name: String,
    pub budget_name: Option<String>,
}

impl EnrichedTransaction {
    pub fn new(tx: Transaction, account_name: String, budget_name: Option<String>) -> Self {
        Self {
            id: tx.id,
            date: tx.date,
            description: tx.description,
            kind: tx.kind,
            amount: tx.amount,
            account_name,
            budget_name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: DateTimeUtc,
    pub description: String,
    pub kind: String,
    pub amount: i64,
    pub account_id: i32,
    pub budget_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Budget,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budget.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            date: model.date,
            description: model.description,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: model.amount,
            account_id: model.account_id,
            budget_id: model.budget_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn model(kind: &str, budget_id: Option<i32>) -> Model {
        Model {
            id: 7,
            date: Utc.timestamp_opt(0, 0).unwrap(),
            description: String::from("Groceries Store"),
            kind: kind.to_string(),
            amount: 30,
            account_id: 1,
            budget_id,
        }
    }

    #[test]
    fn kind_round_trips_through_storage_string() {
        for kind in [TransactionKind::In, TransactionKind::Out] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            TransactionKind::try_from("transfer"),
            Err(EngineError::InvalidField(
                "invalid transaction type: transfer".to_string()
            ))
        );
    }

    #[test]
    fn signed_amount() {
        assert_eq!(TransactionKind::In.signed_amount(100), 100);
        assert_eq!(TransactionKind::Out.signed_amount(30), -30);
    }

    #[test]
    fn transaction_from_model() {
        let tx = Transaction::try_from(model("out", Some(3))).unwrap();

        assert_eq!(tx.kind, TransactionKind::Out);
        assert_eq!(tx.out_budget_id().unwrap(), 3);
        assert_eq!(tx.description, "Groceries Store");
    }

    #[test]
    fn out_transaction_without_budget() {
        let tx = Transaction::try_from(model("out", None)).unwrap();

        assert_eq!(
            tx.out_budget_id(),
            Err(EngineError::InvalidField(
                "transaction 7 has no budget".to_string()
            ))
        );
    }

    #[test]
    #[should_panic(expected = "InvalidField(\"invalid transaction type: xyz\")")]
    fn fail_transaction_from_model() {
        Transaction::try_from(model("xyz", None)).unwrap();
    }
}
