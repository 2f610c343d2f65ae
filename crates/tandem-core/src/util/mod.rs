pub mod field;
pub mod week;
