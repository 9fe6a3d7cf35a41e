pub mod transaction_row;
pub mod transaction_table;
