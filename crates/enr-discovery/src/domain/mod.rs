//! Domain Layer - Pure logic with no I/O
//!
//! This module contains:
//! - Node records and their codec (ENR)
//! - Identifiers and connectable addresses
//! - Translation of records into discovered peers
//! - Configuration and error types

pub mod config;
pub mod enr;
pub mod entities;
pub mod errors;
pub mod ingestion;
pub mod value_objects;

pub use config::*;
pub use enr::*;
pub use entities::*;
pub use errors::*;
pub use ingestion::*;
pub use value_objects::*;
