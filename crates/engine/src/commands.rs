//! Command structs for engine operations.
//!
//! These types group parameters for write operations (create/update),
//! keeping call sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

use crate::TransactionKind;

/// Create a transaction.
#[derive(Clone, Debug)]
pub struct NewTransactionCmd {
    pub description: String,
    pub kind: TransactionKind,
    pub amount: i64,
    pub account_id: i32,
    /// Mandatory for `out`, ignored for `in`.
    pub budget_id: Option<i32>,
    /// Defaults to the creation time.
    pub date: Option<DateTime<Utc>>,
}

impl NewTransactionCmd {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        kind: TransactionKind,
        amount: i64,
        account_id: i32,
    ) -> Self {
        Self {
            description: description.into(),
            kind,
            amount,
            account_id,
            budget_id: None,
            date: None,
        }
    }

    #[must_use]
    pub fn budget_id(mut self, budget_id: i32) -> Self {
        self.budget_id = Some(budget_id);
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Partially update a transaction.
///
/// The type of a transaction cannot be changed, so it is not part of the
/// command.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub transaction_id: i32,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub account_id: Option<i32>,
    pub budget_id: Option<i32>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(transaction_id: i32) -> Self {
        Self {
            transaction_id,
            description: None,
            amount: None,
            account_id: None,
            budget_id: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn account_id(mut self, account_id: i32) -> Self {
        self.account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn budget_id(mut self, budget_id: i32) -> Self {
        self.budget_id = Some(budget_id);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.account_id.is_none()
            && self.budget_id.is_none()
    }
}
