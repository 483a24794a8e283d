pub mod calloffs;
pub mod employees;
pub mod reports;
