//! Bookkeeping engine of the ledger.
//!
//! Accounts and budgets carry derived counters (`balance`, `current`) that
//! the engine keeps in lockstep with the transactions referencing them. Every
//! write runs inside a single database transaction, so a transaction row and
//! its effects on accounts and budgets are committed together.

pub use accounts::Account;
pub use budgets::Budget;
pub use commands::{NewTransactionCmd, UpdateTransactionCmd};
pub use error::EngineError;
pub use ops::{BalanceReport, Engine, EngineBuilder, OPENING_BALANCE};
pub use transactions::{EnrichedTransaction, Transaction, TransactionKind};

mod accounts;
mod budgets;
mod commands;
mod error;
mod ops;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
