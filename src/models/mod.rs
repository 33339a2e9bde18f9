mod category;
mod transaction;

pub(crate) use category::{Category, CATEGORIES};
pub(crate) use transaction::{
    parse_timestamp, NewTransactionInput, Transaction, TransactionPatch, CURRENCY,
};
