use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod accounts;
mod balances;
mod budgets;
mod transactions;

pub use accounts::OPENING_BALANCE;
pub use balances::BalanceReport;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: i64, label: &str) -> ResultEngine<()> {
    if amount < 0 {
        return Err(EngineError::InvalidField(format!("{label} must be >= 0")));
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(
            normalize_required_text("  Groceries ", "description").unwrap(),
            "Groceries"
        );
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            normalize_required_text("   ", "description"),
            Err(EngineError::InvalidField(
                "description must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(validate_amount(0, "amount").is_ok());
        assert_eq!(
            validate_amount(-1, "amount"),
            Err(EngineError::InvalidField("amount must be >= 0".to_string()))
        );
    }
}
