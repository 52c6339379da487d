//! PostgreSQL integration
//!
//! Reads category rows from the GRC database through a `deadpool-postgres`
//! pool and decodes them into domain rows.

pub mod client;
pub mod rows;

pub use client::PostgresRowSource;
pub use rows::decode_row;
