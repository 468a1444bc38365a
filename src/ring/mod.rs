//! Immutable consistent-hashing ring mapping token positions to owning hosts.

use crate::cluster::host::HostRef;
use crate::core::{Result, Token, TopologyError};
use crate::partitioner::Partitioner;
use std::collections::HashSet;
use std::net::IpAddr;
use tracing::{Level, event};

/// One `(token, owner)` pair of the ring.
#[derive(Debug, Clone)]
pub struct RingEntry {
    pub token: Token,
    pub host: HostRef,
}

/// Token ring built for one `(partitioner, host set)` pair.
///
/// Entries are sorted ascending by token, ties broken by connect address.
/// A ring is never edited; topology changes always build a new one.
#[derive(Debug, Clone)]
pub struct TokenRing {
    partitioner: Partitioner,
    entries: Vec<RingEntry>,
    hosts: Vec<HostRef>,
}

// Ring behavior is split by concern, matching the routing table layout.
include!("construct.rs");
include!("lookups.rs");
