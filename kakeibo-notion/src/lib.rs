//! kakeibo-notion: the ledger-store boundary.
//!
//! The external document store types every property by a `type` discriminator
//! with a different shape per type. This crate decodes those shapes exactly
//! once, into the strongly-typed records kakeibo-core consumes, and owns all
//! request/response payloads for the store's API.

pub mod blocks;
pub mod client;
pub mod ledger;
pub mod property;

pub use client::{NotionClient, Page};
pub use ledger::{decode_record, FixedCostRow};
pub use property::{FormulaValue, LedgerField};
