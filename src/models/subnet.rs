//! Subnet descriptor and VLSM data model.

use super::{AddressClass, Cidr};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Everything derived from one (address, prefix) pair.
///
/// Built by [`crate::processing::describe`], never mutated afterwards.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetDescriptor {
    /// Network address (host bits cleared).
    pub network: Ipv4Addr,
    pub network_binary: String,
    /// Highest address of the block.
    pub broadcast: Ipv4Addr,
    pub broadcast_binary: String,
    pub first_usable: Ipv4Addr,
    pub last_usable: Ipv4Addr,
    /// Usable host count, see [`crate::processing::usable_hosts`].
    pub usable_hosts: u64,
    /// 2^(32-prefix), up to 2^32 for /0.
    pub total_hosts: u64,
    pub wildcard_mask: Ipv4Addr,
    /// Network address and prefix, "a.b.c.d/p".
    pub cidr: Cidr,
    pub mask: Ipv4Addr,
    pub mask_bits: u8,
    /// Classful class of the network address. Informational only.
    pub ip_class: AddressClass,
}

/// A named host-count demand for a VLSM run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VlsmRequirement {
    pub name: String,
    pub hosts_needed: u64,
}

impl VlsmRequirement {
    pub fn new(name: &str, hosts_needed: u64) -> VlsmRequirement {
        VlsmRequirement {
            name: name.to_string(),
            hosts_needed,
        }
    }
}

/// A placed VLSM block: the requirement it serves and the subnet it got.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VlsmAllocation {
    pub name: String,
    pub hosts_needed: u64,
    #[serde(flatten)]
    pub subnet: SubnetDescriptor,
}

impl VlsmAllocation {
    /// True when the block holds at least the requested hosts.
    pub fn is_satisfied(&self) -> bool {
        self.subnet.usable_hosts >= self.hosts_needed
    }
}
