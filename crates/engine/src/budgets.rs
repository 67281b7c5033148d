//! The module contains `Budget` struct and its storage model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A spending allowance.
///
/// `max` is the nominal ceiling and is never enforced: `current` is what is
/// left and goes negative once the budget is overspent. Only `out`
/// transactions touch a budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i32,
    pub name: String,
    pub max: i64,
    pub current: i64,
}

impl Budget {
    /// Amount consumed so far.
    pub fn spent(&self) -> i64 {
        self.max - self.current
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub max: i64,
    pub current: i64,
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

impl From<Model> for Budget {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            max: value.max,
            current: value.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spent_follows_current() {
        let budget = Budget {
            id: 1,
            name: String::from("Groceries"),
            max: 50,
            current: 20,
        };

        assert_eq!(budget.spent(), 30);
    }

    #[test]
    fn overspent_budget() {
        let budget = Budget {
            id: 1,
            name: String::from("Groceries"),
            max: 50,
            current: -10,
        };

        assert_eq!(budget.spent(), 60);
    }
}
