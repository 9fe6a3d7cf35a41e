pub mod configs;
pub mod transaction;
