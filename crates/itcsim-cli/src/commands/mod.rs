pub mod models;
pub mod simulate;
