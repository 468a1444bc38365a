use super::host::HostDescriptor;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaChange {
    Created,
    Updated,
    Dropped,
}

/// A keyspace schema change pushed by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyspaceUpdateEvent {
    pub keyspace: String,
    pub change: SchemaChange,
}

impl KeyspaceUpdateEvent {
    pub fn new(keyspace: impl Into<String>, change: SchemaChange) -> Self {
        Self {
            keyspace: keyspace.into(),
            change,
        }
    }
}

/// Already-decoded membership and schema notifications.
///
/// Produced by discovery and by the protocol event stream; consumed by
/// [`super::ClusterMetadataManager::apply_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyEvent {
    HostAdded(HostDescriptor),
    HostsDiscovered(Vec<HostDescriptor>),
    HostRemoved(IpAddr),
    PartitionerChanged(String),
    KeyspaceChanged(KeyspaceUpdateEvent),
}

impl TopologyEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            TopologyEvent::HostAdded(_) => "host_added",
            TopologyEvent::HostsDiscovered(_) => "hosts_discovered",
            TopologyEvent::HostRemoved(_) => "host_removed",
            TopologyEvent::PartitionerChanged(_) => "partitioner_changed",
            TopologyEvent::KeyspaceChanged(_) => "keyspace_changed",
        }
    }
}
