// src/transfer/mod.rs
//!
//! Transfer Module
//!
//! Copies external files into the vault under collision-safe names and hands
//! vault files back out as downloads.
//!

pub mod conflict;
pub mod error;
pub mod export;
pub mod operator;
pub mod types;


pub use error::TransferError;
pub use export::{ExportCapability, ExportEnvironment};
pub use operator::TransferOperator;
pub use types::*;
