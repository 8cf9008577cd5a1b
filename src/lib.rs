pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;
pub mod table;
