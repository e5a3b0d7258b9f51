pub mod phase;
pub mod project;
pub mod reference_tables;
pub mod risk;
pub mod tables;
