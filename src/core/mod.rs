pub mod confirm;
pub mod pattern;
pub mod scan;
