//! Subnet arithmetic and allocation.
//!
//! This module contains the algorithms built on the address codec:
//! - [`calculator`] - Full description of one network
//! - [`split`] - Equal split into N subnets
//! - [`vlsm`] - Variable length subnet allocation

mod calculator;
mod split;
mod vlsm;

// Re-export public functions
pub use calculator::{compute_subnet, describe, total_hosts, usable_hosts};
pub use split::{bits_needed, split_equally};
pub use vlsm::{allocate_vlsm, required_prefix, unplaced_requirements};
