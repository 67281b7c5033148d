//! The module contains `Account` struct and its storage model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An account.
///
/// An account is a pool of money: a bank account, a wallet, a savings jar.
/// Its balance is never written directly by clients, it follows the
/// transactions referencing the account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub name: String,
    /// Balance in the smallest currency unit. It can go negative.
    pub balance: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            balance: value.balance,
        }
    }
}
