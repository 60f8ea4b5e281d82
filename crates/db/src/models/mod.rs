//! Row structs matching database tables.
//!
//! Each row converts into its domain type from `cinedex_core`.

pub mod movie;
