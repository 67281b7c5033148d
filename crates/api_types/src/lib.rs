use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Account {
        pub id: i32,
        pub name: String,
        pub balance: i64,
    }
}

pub mod budget {
    use super::*;

    /// A spending allowance. `current` is what is left of `max`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Budget {
        pub id: i32,
        pub name: String,
        pub max: i64,
        pub current: i64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        In,
        Out,
    }

    /// Request body of `POST /transactions`.
    ///
    /// `budget_id` is required for `out` and ignored for `in`. `date`
    /// defaults to the time of the request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub description: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub account_id: i32,
        #[serde(default)]
        pub budget_id: Option<i32>,
        #[serde(default)]
        pub date: Option<DateTime<FixedOffset>>,
    }

    /// Request body of `PATCH /transactions/{id}`. Absent and `null` fields
    /// are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub amount: Option<i64>,
        #[serde(default)]
        pub account_id: Option<i32>,
        #[serde(default)]
        pub budget_id: Option<i32>,
    }

    /// A transaction as returned by the API, with the names of its account
    /// and budget in place of their ids.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i32,
        pub date: DateTime<FixedOffset>,
        pub description: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub account_name: String,
        pub budget_name: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::*;

    #[test]
    fn update_treats_null_as_absent() {
        let update: TransactionUpdate =
            serde_json::from_str(r#"{"amount": 10, "budget_id": null}"#).unwrap();

        assert_eq!(update.amount, Some(10));
        assert_eq!(update.budget_id, None);
        assert_eq!(update.description, None);
    }

    #[test]
    fn new_transaction_uses_type_key() {
        let new: TransactionNew = serde_json::from_str(
            r#"{"description": "Rent", "type": "out", "amount": 700, "account_id": 1, "budget_id": 2}"#,
        )
        .unwrap();

        assert_eq!(new.kind, TransactionKind::Out);
        assert_eq!(new.budget_id, Some(2));
        assert_eq!(new.date, None);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let new = serde_json::from_str::<TransactionNew>(
            r#"{"description": "Rent", "type": "transfer", "amount": 700, "account_id": 1}"#,
        );

        assert!(new.is_err());
    }
}
