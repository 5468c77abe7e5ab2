pub mod transaction;
pub mod history;

pub use history::TransactionStack;
pub use transaction::Transaction;
