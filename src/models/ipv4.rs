//! IPv4 address codec and CIDR notation utilities.
//!
//! Conversions between dotted-decimal text, the 32-bit integer form and the
//! dotted binary form, plus mask helpers and the [`Cidr`] struct.
//! All address arithmetic is done on `u32` (or `u64` where a block size can
//! reach 2^32).

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse a dotted-decimal IPv4 address.
///
/// Exactly four parts separated by `.`, each made of ASCII digits only and
/// in the range 0..=255. Leading zeros are accepted (`010` is 10).
///
/// # Examples
/// ```
/// use subnet_calculator::models::parse_address;
/// assert_eq!(parse_address("192.168.1.7").unwrap().octets(), [192, 168, 1, 7]);
/// assert!(parse_address("192.168.1").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Addr, Box<dyn Error>> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(format!("Invalid address {text}: expected 4 octets, got {}", parts.len()).into());
    }
    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts.iter()) {
        *octet = parse_octet(part).ok_or_else(|| format!("Invalid octet '{part}' in {text}"))?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // digits only, so '+' and whitespace never reach the integer parser
    let value: u32 = part.parse().ok()?;
    u8::try_from(value).ok()
}

/// Check dotted-decimal syntax without keeping the value.
pub fn is_valid_address(text: &str) -> bool {
    parse_address(text).is_ok()
}

/// Dotted-decimal text to its big-endian 32-bit value.
pub fn address_to_int(text: &str) -> Result<u32, Box<dyn Error>> {
    Ok(u32::from(parse_address(text)?))
}

/// 32-bit value back to an address (octet 0 = bits 31..24).
pub fn int_to_address(bits: u32) -> Ipv4Addr {
    Ipv4Addr::from(bits)
}

/// Dotted binary form, e.g. `11000000.10101000.00000001.00000000`.
///
/// Built octet by octet.
pub fn to_binary(addr: Ipv4Addr) -> String {
    addr.octets()
        .iter()
        .map(|o| format!("{o:08b}"))
        .collect::<Vec<String>>()
        .join(".")
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calculator::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err(format!("Prefix length /{len} is too long").into())
    } else {
        // u64 so that a shift by 32 (prefix 0) is defined
        let mask = (u32::MAX as u64) << (MAX_LENGTH - len);
        Ok(mask as u32)
    }
}

/// Subnet mask for a prefix length, as an address.
pub fn mask_for_prefix(len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Prefix length for a subnet mask.
///
/// The mask must be contiguous ones followed by zeros.
pub fn mask_to_cidr(mask: Ipv4Addr) -> Result<u8, Box<dyn Error>> {
    let bits = u32::from(mask);
    if bits.leading_ones() + bits.trailing_zeros() != u32::from(MAX_LENGTH) {
        return Err(format!("Mask {mask} is not contiguous").into());
    }
    Ok(bits.leading_ones() as u8)
}

/// Bitwise complement of the mask.
pub fn wildcard_mask(mask: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(!u32::from(mask))
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// Classful address class, informational only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AddressClass {
    A,
    B,
    C,
    DMulticast,
    EReserved,
    /// First octet 0 or 127.
    Unknown,
}

impl AddressClass {
    /// Classify by the first octet: 1-126 A, 128-191 B, 192-223 C,
    /// 224-239 D, 240-255 E.
    pub fn of(addr: Ipv4Addr) -> AddressClass {
        match addr.octets()[0] {
            1..=126 => AddressClass::A,
            128..=191 => AddressClass::B,
            192..=223 => AddressClass::C,
            224..=239 => AddressClass::DMulticast,
            240..=255 => AddressClass::EReserved,
            _ => AddressClass::Unknown,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::DMulticast => "D (Multicast)",
            AddressClass::EReserved => "E (Reserved)",
            AddressClass::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl Serialize for AddressClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Parse "a.b.c.d/p" into address and prefix length.
///
/// Surrounding whitespace of the whole string and of each half is ignored.
/// The address is kept as given, not reduced to its network address.
pub fn parse_cidr_notation(text: &str) -> Result<Cidr, Box<dyn Error>> {
    let parts: Vec<&str> = text.trim().split('/').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid address/prefix '{text}'").into());
    }
    let addr = parse_address(parts[0].trim())?;
    let prefix = parts[1].trim();
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid prefix length '{prefix}'").into());
    }
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| format!("Invalid prefix length '{prefix}'"))?;
    if prefix > MAX_LENGTH {
        return Err(format!("Prefix length /{prefix} is too long").into());
    }
    Ok(Cidr { addr, prefix })
}

/// IPv4 address with a prefix length, written "a.b.c.d/p".
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl Cidr {
    /// Network address of the block.
    pub fn lo(&self) -> Ipv4Addr {
        let mask = (u32::MAX as u64) << (MAX_LENGTH - self.prefix.min(MAX_LENGTH));
        Ipv4Addr::from(u32::from(self.addr) & mask as u32)
    }

    /// Broadcast (highest) address of the block.
    pub fn hi(&self) -> Ipv4Addr {
        let size = 1u64 << (MAX_LENGTH - self.prefix.min(MAX_LENGTH));
        Ipv4Addr::from((u32::from(self.lo()) as u64 + size - 1) as u32)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.lo() <= addr && addr <= self.hi()
    }

    pub fn overlaps(&self, other: &Cidr) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }
}

impl FromStr for Cidr {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr_notation(s)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_cidr_notation(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}
