//! Domain models for the subnet calculator.
//!
//! This module contains the address codec and the value types built on it:
//! - [`Cidr`] - IPv4 address with a prefix length
//! - [`AddressClass`] - classful address class
//! - [`SubnetDescriptor`] - derived facts for one network
//! - [`VlsmRequirement`] and [`VlsmAllocation`] - VLSM input and output

mod ipv4;
mod subnet;

// Re-export public types
pub use ipv4::{
    address_to_int, broadcast_addr, cut_addr, get_cidr_mask, int_to_address, is_valid_address,
    mask_for_prefix, mask_to_cidr, parse_address, parse_cidr_notation, to_binary, wildcard_mask,
    AddressClass, Cidr, MAX_LENGTH,
};
pub use subnet::{SubnetDescriptor, VlsmAllocation, VlsmRequirement};
