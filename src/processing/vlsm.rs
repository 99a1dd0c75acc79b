//! VLSM allocation.
//!
//! Packs variably sized subnets into one base network, largest demand first,
//! each sized to the tightest prefix whose usable capacity covers the demand.

use super::calculator::{compute_subnet, describe, total_hosts, usable_hosts};
use crate::models::{VlsmAllocation, VlsmRequirement, MAX_LENGTH};
use itertools::Itertools;
use std::cmp::Reverse;
use std::error::Error;
use std::net::Ipv4Addr;

/// Longest prefix whose usable capacity is at least `hosts_needed`.
///
/// Returns `None` when no IPv4 block is big enough.
pub fn required_prefix(hosts_needed: u64) -> Option<u8> {
    (0..=MAX_LENGTH)
        .rev()
        .find(|&len| usable_hosts(len).map_or(false, |hosts| hosts >= hosts_needed))
}

/// Allocate one subnet per requirement inside `address/len`.
///
/// Requirements are placed in descending `hosts_needed` order (ties keep
/// their input order). A requirement whose block no longer fits is left out
/// and the cursor does not move, so later smaller ones may still fit.
/// Compare the output length with the input to detect dropped requirements,
/// or use [`unplaced_requirements`].
pub fn allocate_vlsm(
    address: &str,
    len: u8,
    requirements: &[VlsmRequirement],
) -> Vec<VlsmAllocation> {
    match try_allocate_vlsm(address, len, requirements) {
        Ok(allocations) => allocations,
        Err(e) => {
            log::warn!("allocate_vlsm({address}/{len}): {e}");
            vec![]
        }
    }
}

fn try_allocate_vlsm(
    address: &str,
    len: u8,
    requirements: &[VlsmRequirement],
) -> Result<Vec<VlsmAllocation>, Box<dyn Error>> {
    let base = compute_subnet(address, len)?;
    let network_start = u32::from(base.network) as u64;
    let network_end = network_start + total_hosts(len)?;
    let mut cursor = network_start;

    log::info!(
        "#Start allocate_vlsm() base={} requirements={}",
        base.cidr,
        requirements.len()
    );

    let mut allocations = Vec::new();
    for req in requirements
        .iter()
        .sorted_by_key(|r| Reverse(r.hosts_needed))
    {
        let Some(block_len) = required_prefix(req.hosts_needed) else {
            log::warn!(
                "Skip '{}': {} hosts exceeds any IPv4 block",
                req.name,
                req.hosts_needed
            );
            continue;
        };
        let block_size = total_hosts(block_len)?;
        if cursor + block_size > network_end {
            log::warn!(
                "Skip '{}': /{block_len} for {} hosts does not fit in {} (next free {})",
                req.name,
                req.hosts_needed,
                base.cidr,
                Ipv4Addr::from(cursor as u32)
            );
            continue;
        }

        let subnet = describe(Ipv4Addr::from(cursor as u32), block_len)?;
        log::debug!(
            "Placed '{}' ({} hosts) at {}",
            req.name,
            req.hosts_needed,
            subnet.cidr
        );
        allocations.push(VlsmAllocation {
            name: req.name.clone(),
            hosts_needed: req.hosts_needed,
            subnet,
        });
        cursor += block_size;
    }

    log::info!(
        "allocate_vlsm() placed {}/{} used {} of {} addresses",
        allocations.len(),
        requirements.len(),
        cursor - network_start,
        network_end - network_start
    );
    Ok(allocations)
}

/// Requirements that did not make it into `allocations`, in input order.
///
/// Matching is by name and demand, one allocation per requirement.
pub fn unplaced_requirements<'a>(
    requirements: &'a [VlsmRequirement],
    allocations: &[VlsmAllocation],
) -> Vec<&'a VlsmRequirement> {
    let mut placed: Vec<&VlsmAllocation> = allocations.iter().collect();
    requirements
        .iter()
        .filter(|req| {
            match placed
                .iter()
                .position(|a| a.name == req.name && a.hosts_needed == req.hosts_needed)
            {
                Some(i) => {
                    placed.swap_remove(i);
                    false
                }
                None => true,
            }
        })
        .collect()
}
