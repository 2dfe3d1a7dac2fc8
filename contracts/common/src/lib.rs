//! Shared building blocks for the farm contract suite.
//!
//! This crate provides:
//! - [`admin_tiers`]: the tiered admin registry every contract uses as its
//!   access-control gate.
//! - [`ttl`]: the storage time-to-live policy applied to instance and
//!   persistent entries.

#![no_std]

pub mod admin_tiers;
pub mod ttl;

pub use admin_tiers::*;
