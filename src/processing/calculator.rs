//! Subnet calculator.
//!
//! Derives the full [`SubnetDescriptor`] for an address and prefix length.

use crate::models::{
    get_cidr_mask, parse_address, to_binary, wildcard_mask, AddressClass, Cidr, SubnetDescriptor,
    MAX_LENGTH,
};
use std::error::Error;
use std::net::Ipv4Addr;

/// Number of addresses in a block of the given prefix length, 2^(32-len).
///
/// Returned as u64 so that /0 (2^32) is representable.
pub fn total_hosts(len: u8) -> Result<u64, Box<dyn Error>> {
    if len > MAX_LENGTH {
        return Err(format!("Prefix length /{len} is too long").into());
    }
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Usable host addresses for a prefix length.
///
/// /32 is a single host, /31 is a point-to-point link with both addresses
/// usable, anything wider loses the network and broadcast addresses.
pub fn usable_hosts(len: u8) -> Result<u64, Box<dyn Error>> {
    let total = total_hosts(len)?;
    Ok(match len {
        32 => 1,
        31 => 2,
        _ => total.saturating_sub(2),
    })
}

/// Calculate subnet information for a dotted-decimal address and prefix.
///
/// # Examples
/// ```
/// use subnet_calculator::compute_subnet;
/// let subnet = compute_subnet("192.168.1.77", 24).unwrap();
/// assert_eq!(subnet.network.to_string(), "192.168.1.0");
/// assert_eq!(subnet.usable_hosts, 254);
/// ```
pub fn compute_subnet(address: &str, len: u8) -> Result<SubnetDescriptor, Box<dyn Error>> {
    let addr = parse_address(address)?;
    describe(addr, len)
}

/// Calculate subnet information for a parsed address.
pub fn describe(addr: Ipv4Addr, len: u8) -> Result<SubnetDescriptor, Box<dyn Error>> {
    let mask_bits = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask_bits;
    let total = total_hosts(len)?;
    // network + total - 1 never exceeds u32::MAX once the host bits are cleared
    let broadcast_bits = (network_bits as u64 + total - 1) as u32;

    let (first_bits, last_bits) = match len {
        32 => (network_bits, network_bits),
        31 => (network_bits, broadcast_bits),
        _ => (network_bits + 1, broadcast_bits - 1),
    };

    let network = Ipv4Addr::from(network_bits);
    let broadcast = Ipv4Addr::from(broadcast_bits);
    let mask = Ipv4Addr::from(mask_bits);
    log::debug!("describe({addr}/{len}) network={network} broadcast={broadcast} total={total}");

    Ok(SubnetDescriptor {
        network,
        network_binary: to_binary(network),
        broadcast,
        broadcast_binary: to_binary(broadcast),
        first_usable: Ipv4Addr::from(first_bits),
        last_usable: Ipv4Addr::from(last_bits),
        usable_hosts: usable_hosts(len)?,
        total_hosts: total,
        wildcard_mask: wildcard_mask(mask),
        cidr: Cidr {
            addr: network,
            prefix: len,
        },
        mask,
        mask_bits: len,
        ip_class: AddressClass::of(network),
    })
}
