//! Account data: profile, transactions, and the stored bundle

mod data;
mod loader;

pub use data::{Profile, Transaction, TransactionKind};
pub use loader::{
    load_bundle, load_bundle_from_reader, load_bundle_from_str, save_bundle, AccountBundle,
};
