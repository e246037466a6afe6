//! Subnet parsing and host address allocation.
//!
//! Every platform compiled in one run draws its address from a single
//! allocator so that addresses are unique and follow specification-row
//! order exactly. Allocation is synchronous by design; the cursor is the
//! only mutable state in the compile path.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("invalid network specification '{0}' (expected IPv4 CIDR, e.g. 10.0.0.0/24)")]
    InvalidNetwork(String),

    #[error("address space of {0} exhausted")]
    AddressSpaceExhausted(Subnet),
}

/// An IPv4 subnet in CIDR notation.
///
/// Host bits in the input are masked away, so `10.0.0.7/24` and
/// `10.0.0.0/24` denote the same subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    network: Ipv4Addr,
    prefix: u8,
}

impl Subnet {
    /// The network address (all host bits zero).
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// The prefix length.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The broadcast address (all host bits one).
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) | !self.mask())
    }

    /// Whether `addr` falls inside this subnet, network and broadcast
    /// addresses included.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & self.mask() == u32::from(self.network)
    }

    fn mask(&self) -> u32 {
        if self.prefix == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix)
        }
    }
}

impl FromStr for Subnet {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkError::InvalidNetwork(s.to_string());

        let (addr_str, prefix_str) = s.split_once('/').ok_or_else(invalid)?;
        let addr = Ipv4Addr::from_str(addr_str.trim()).map_err(|_| invalid())?;
        let prefix: u8 = prefix_str.trim().parse().map_err(|_| invalid())?;
        if prefix > 32 {
            return Err(invalid());
        }

        let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
        Ok(Subnet {
            network: Ipv4Addr::from(u32::from(addr) & mask),
            prefix,
        })
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

/// Hands out host addresses from a subnet, one per call, strictly
/// increasing.
///
/// The network address and the first host address are reserved (network
/// identity and gateway/host machine respectively), so the first address
/// returned to a caller is network + 2. The skip count is load-bearing:
/// changing it collides allocations with reserved infrastructure
/// addresses.
#[derive(Debug)]
pub struct AddressAllocator {
    subnet: Subnet,
    // u64 so the cursor can sit one past 255.255.255.255 without wrapping
    cursor: u64,
}

impl AddressAllocator {
    pub fn new(subnet: Subnet) -> Self {
        Self {
            subnet,
            cursor: u64::from(u32::from(subnet.network())) + 2,
        }
    }

    /// Return the next free host address and advance the cursor.
    ///
    /// Fails once the cursor reaches the broadcast address. `/31` and
    /// `/32` subnets have no room after the reserved addresses and fail
    /// on the first call.
    pub fn allocate(&mut self) -> Result<Ipv4Addr, NetworkError> {
        if self.cursor >= u64::from(u32::from(self.subnet.broadcast())) {
            return Err(NetworkError::AddressSpaceExhausted(self.subnet));
        }
        let addr = Ipv4Addr::from(self.cursor as u32);
        self.cursor += 1;
        Ok(addr)
    }

    pub fn subnet(&self) -> Subnet {
        self.subnet
    }
}
