//! Trait definitions
//!
//! This module defines the traits models implement to be stored.

pub mod table_model;

pub use table_model::TableModel;
