mod helpers;
mod list;
mod write;

pub(in crate::ops) use helpers::{NewTransactionRow, insert_with_effects, out_of_range};
