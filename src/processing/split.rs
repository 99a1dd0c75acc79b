//! Equal split of one network into N same-size subnets.

use super::calculator::{compute_subnet, describe, total_hosts};
use crate::models::{SubnetDescriptor, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Prefix bits needed to address `count` subnets, ceil(log2(count)).
pub fn bits_needed(count: u64) -> u32 {
    if count <= 1 {
        0
    } else {
        u64::BITS - (count - 1).leading_zeros()
    }
}

/// Split a network into `count` consecutive subnets of equal size.
///
/// The new prefix is rounded up to the next power of two, so the network
/// may hold more slots than requested; only the first `count` are returned.
/// Returns an empty list on invalid input or when `count` needs more prefix
/// bits than the network has left.
pub fn split_equally(address: &str, len: u8, count: u64) -> Vec<SubnetDescriptor> {
    if count < 1 {
        log::warn!("split_equally({address}/{len}): subnet count must be at least 1");
        return vec![];
    }
    let base = match compute_subnet(address, len) {
        Ok(base) => base,
        Err(e) => {
            log::warn!("split_equally({address}/{len}): {e}");
            return vec![];
        }
    };

    let new_len = u32::from(len) + bits_needed(count);
    if new_len > u32::from(MAX_LENGTH) {
        log::warn!(
            "split_equally({}): {count} subnets need /{new_len}, longer than /{MAX_LENGTH}",
            base.cidr
        );
        return vec![];
    }
    let new_len = new_len as u8;

    let mut subnets = Vec::new();
    let Ok(subnet_size) = total_hosts(new_len) else {
        return subnets;
    };
    log::info!(
        "#Start split_equally() {} into {count} x /{new_len} ({subnet_size} addresses each)",
        base.cidr
    );

    let mut next_ip = u32::from(base.network) as u64;
    for _ in 0..count {
        match describe(Ipv4Addr::from(next_ip as u32), new_len) {
            Ok(subnet) => subnets.push(subnet),
            Err(e) => log::warn!("split_equally(): {e}"),
        }
        next_ip += subnet_size;
    }
    subnets
}
