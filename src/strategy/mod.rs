//! Replication strategies compute, from a token ring, which hosts own the
//! replicas of every token range of a keyspace.

mod network_topology;
mod replica_map;
mod simple;

use crate::ring::TokenRing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{Level, event};

pub use replica_map::{ReplicaMap, TokenReplicas};

const STRATEGY_CLASS_PREFIX: &str = "org.apache.cassandra.locator.";
const CLASS_OPTION: &str = "class";
const REPLICATION_FACTOR_OPTION: &str = "replication_factor";

/// Replication settings of a keyspace as stored in its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationStrategyDescriptor {
    pub class: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ReplicationStrategyDescriptor {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn simple(replication_factor: usize) -> Self {
        Self::new("SimpleStrategy").with_option(REPLICATION_FACTOR_OPTION, replication_factor.to_string())
    }

    pub fn network_topology<I, S>(datacenter_factors: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        datacenter_factors
            .into_iter()
            .fold(Self::new("NetworkTopologyStrategy"), |descriptor, (dc, factor)| {
                descriptor.with_option(dc, factor.to_string())
            })
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationStrategy {
    Simple {
        replication_factor: usize,
    },
    NetworkTopology {
        datacenter_factors: BTreeMap<String, usize>,
    },
}

impl ReplicationStrategy {
    /// Interprets a keyspace's replication settings.
    ///
    /// Returns `None` for unsupported classes and malformed factors; callers
    /// leave the keyspace without replica information in that case.
    pub fn from_descriptor(descriptor: &ReplicationStrategyDescriptor) -> Option<Self> {
        let class = descriptor.class.trim();
        let class = class.strip_prefix(STRATEGY_CLASS_PREFIX).unwrap_or(class);

        match class {
            "SimpleStrategy" => {
                let Some(raw) = descriptor.options.get(REPLICATION_FACTOR_OPTION) else {
                    event!(
                        Level::WARN,
                        class = %descriptor.class,
                        "replication_factor missing from SimpleStrategy options"
                    );
                    return None;
                };
                let replication_factor = parse_replication_factor(raw)?;
                Some(ReplicationStrategy::Simple { replication_factor })
            }
            "NetworkTopologyStrategy" => {
                let mut datacenter_factors = BTreeMap::new();
                for (dc, raw) in &descriptor.options {
                    if dc == CLASS_OPTION || dc == REPLICATION_FACTOR_OPTION {
                        continue;
                    }
                    datacenter_factors.insert(dc.clone(), parse_replication_factor(raw)?);
                }
                Some(ReplicationStrategy::NetworkTopology { datacenter_factors })
            }
            _ => {
                event!(
                    Level::WARN,
                    class = %descriptor.class,
                    "unsupported replication strategy"
                );
                None
            }
        }
    }

    /// Computes the replica map of this strategy over `ring`.
    pub fn replica_map(&self, ring: &TokenRing) -> ReplicaMap {
        match self {
            ReplicationStrategy::Simple { replication_factor } => {
                simple::simple_replica_map(ring, *replication_factor)
            }
            ReplicationStrategy::NetworkTopology { datacenter_factors } => {
                network_topology::network_topology_replica_map(ring, datacenter_factors)
            }
        }
    }
}

/// Parses `"3"` or the transient form `"3/1"`, keeping the full replica count.
fn parse_replication_factor(raw: &str) -> Option<usize> {
    let full = raw.split('/').next().unwrap_or(raw).trim();
    match full.parse::<usize>() {
        Ok(factor) => Some(factor),
        Err(err) => {
            event!(
                Level::WARN,
                value = %raw,
                error = %err,
                "invalid replication factor"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::host::{HostDescriptor, HostRef};
    use crate::core::Token;
    use std::net::IpAddr;

    fn addr(last_octet: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last_octet])
    }

    fn host(last_octet: u8, dc: &str, rack: &str, token: &str) -> HostRef {
        HostDescriptor::new(addr(last_octet))
            .with_datacenter(dc)
            .with_rack(rack)
            .with_tokens([token])
            .into_ref()
    }

    fn addresses(replicas: &[HostRef]) -> Vec<IpAddr> {
        replicas.iter().map(|h| h.connect_address).collect()
    }

    #[test]
    fn simple_strategy_walks_distinct_hosts_clockwise() {
        let hosts = vec![
            host(1, "dc1", "r1", "0"),
            host(2, "dc1", "r1", "25"),
            host(3, "dc1", "r1", "50"),
            host(4, "dc1", "r1", "75"),
        ];
        let ring = TokenRing::build("Murmur3Partitioner", &hosts).unwrap();
        let map = ReplicationStrategy::Simple {
            replication_factor: 2,
        }
        .replica_map(&ring);

        assert_eq!(map.len(), 4);
        assert_eq!(
            addresses(map.replicas_for(&Token::Murmur3(10))),
            vec![addr(2), addr(3)]
        );
        assert_eq!(
            addresses(map.replicas_for(&Token::Murmur3(80))),
            vec![addr(1), addr(2)]
        );
    }

    #[test]
    fn simple_strategy_caps_at_host_count() {
        let hosts = vec![host(1, "dc1", "r1", "0"), host(2, "dc1", "r1", "10")];
        let ring = TokenRing::build("Murmur3Partitioner", &hosts).unwrap();
        let map = ReplicationStrategy::Simple {
            replication_factor: 5,
        }
        .replica_map(&ring);
        assert_eq!(map.replicas_for(&Token::Murmur3(5)).len(), 2);
    }

    #[test]
    fn network_topology_fills_each_datacenter_quota() {
        let hosts = vec![
            host(1, "dc1", "r1", "0"),
            host(2, "dc2", "r1", "10"),
            host(3, "dc1", "r1", "20"),
            host(4, "dc2", "r1", "30"),
            host(5, "dc1", "r1", "40"),
        ];
        let ring = TokenRing::build("Murmur3Partitioner", &hosts).unwrap();
        let strategy = ReplicationStrategy::from_descriptor(
            &ReplicationStrategyDescriptor::network_topology([("dc1", 2), ("dc2", 1)]),
        )
        .unwrap();
        let map = strategy.replica_map(&ring);

        assert_eq!(
            addresses(map.replicas_for(&Token::Murmur3(0))),
            vec![addr(1), addr(2), addr(3)]
        );
        assert_eq!(
            addresses(map.replicas_for(&Token::Murmur3(35))),
            vec![addr(5), addr(1), addr(2)]
        );
    }

    #[test]
    fn network_topology_prefers_unused_racks() {
        let hosts = vec![
            host(1, "dc1", "r1", "0"),
            host(2, "dc1", "r1", "10"),
            host(3, "dc1", "r2", "20"),
            host(4, "dc1", "r2", "30"),
        ];
        let ring = TokenRing::build("Murmur3Partitioner", &hosts).unwrap();
        let map = ReplicationStrategy::NetworkTopology {
            datacenter_factors: BTreeMap::from([("dc1".to_string(), 3)]),
        }
        .replica_map(&ring);

        // host 2 shares rack r1 with host 1 and is deferred until r2 is used.
        assert_eq!(
            addresses(map.replicas_for(&Token::Murmur3(0))),
            vec![addr(1), addr(3), addr(2)]
        );
    }

    #[test]
    fn network_topology_ignores_unconfigured_datacenters() {
        let hosts = vec![host(1, "dc1", "r1", "0"), host(2, "dc9", "r1", "10")];
        let ring = TokenRing::build("Murmur3Partitioner", &hosts).unwrap();
        let map = ReplicationStrategy::NetworkTopology {
            datacenter_factors: BTreeMap::from([("dc1".to_string(), 3), ("dc9".to_string(), 0)]),
        }
        .replica_map(&ring);

        assert_eq!(
            addresses(map.replicas_for(&Token::Murmur3(5))),
            vec![addr(1)]
        );
    }

    #[test]
    fn descriptor_parsing_accepts_qualified_names_and_transient_factors() {
        let simple = ReplicationStrategyDescriptor::new("org.apache.cassandra.locator.SimpleStrategy")
            .with_option("replication_factor", "3/1");
        assert_eq!(
            ReplicationStrategy::from_descriptor(&simple),
            Some(ReplicationStrategy::Simple {
                replication_factor: 3
            })
        );

        let nts = ReplicationStrategyDescriptor::network_topology([("dc1", 3)])
            .with_option("class", "NetworkTopologyStrategy");
        assert_eq!(
            ReplicationStrategy::from_descriptor(&nts),
            Some(ReplicationStrategy::NetworkTopology {
                datacenter_factors: BTreeMap::from([("dc1".to_string(), 3)])
            })
        );
    }

    #[test]
    fn descriptor_parsing_rejects_unsupported_or_malformed() {
        assert_eq!(
            ReplicationStrategy::from_descriptor(&ReplicationStrategyDescriptor::new(
                "LocalStrategy"
            )),
            None
        );
        assert_eq!(
            ReplicationStrategy::from_descriptor(&ReplicationStrategyDescriptor::new(
                "SimpleStrategy"
            )),
            None
        );
        assert_eq!(
            ReplicationStrategy::from_descriptor(
                &ReplicationStrategyDescriptor::new("NetworkTopologyStrategy")
                    .with_option("dc1", "three")
            ),
            None
        );
    }
}
