pub mod comparison_table;
pub mod parser;
