pub mod conversion;
pub mod unit_table;
