//! Data access and ingestion logic for convoy.
//!
//! Responsibilities:
//! - Read customer tables from CSV into validated [`CustomerSet`]s.
//! - Append new customers to an existing table without disturbing its layout.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `convoy-core`).
//! - Numeric validation beyond parsing is delegated to [`CustomerSet::new`].
//!
//! Invariants:
//! - No global mutable state.
//! - Filesystem access goes through `convoy-fs` capabilities.
//!
//! [`CustomerSet`]: convoy_core::CustomerSet
//! [`CustomerSet::new`]: convoy_core::CustomerSet::new

#![forbid(unsafe_code)]

mod customers;

pub use customers::{
    CustomerColumn, CustomerCsvError, CustomerRecord, append_customer, into_customer_set,
    load_customer_set, read_customers, read_customers_from,
};
