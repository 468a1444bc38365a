// ============================================================================
// cqlroute Library
// ============================================================================

pub mod core;
pub mod partitioner;
pub mod ring;
pub mod strategy;
pub mod cluster;
pub mod config;

// Re-export main types for convenience
pub use crate::core::{Result, Token, TopologyError};
pub use partitioner::Partitioner;
pub use ring::{RingEntry, TokenRing};
pub use strategy::{ReplicaMap, ReplicationStrategy, ReplicationStrategyDescriptor, TokenReplicas};
pub use config::{TopologyConfig, TopologyListener};

// Re-export cluster tracking API
pub use cluster::{
    ActiveKeyspace, ClusterBindings, ClusterMetadata, ClusterMetadataManager, HostDescriptor,
    HostRef, HostRegistry, InMemoryKeyspaceResolver, KeyspaceResolver, KeyspaceUpdateEvent,
    SchemaChange, TopologyEvent, spawn_event_listener,
};
