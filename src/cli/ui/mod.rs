pub mod chart;
pub mod table;
pub mod test_mode;
