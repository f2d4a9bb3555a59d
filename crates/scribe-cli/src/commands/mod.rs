pub mod classify;
pub mod generate;
pub mod schema;
