use super::events::{KeyspaceUpdateEvent, TopologyEvent};
use super::host::HostRef;
use super::metadata::ClusterMetadata;
use super::registry::HostRegistry;
use super::resolver::ClusterBindings;
use crate::core::{Result, TopologyError};
use crate::ring::TokenRing;
use crate::strategy::{ReplicaMap, ReplicationStrategy};
use arc_swap::ArcSwapOption;
use chrono::Utc;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Level, event};

const UNBOUND_SESSION: &str = "unbound";

/// Writer-owned state. Only touched with the manager lock held.
struct ManagerState {
    bindings: Option<ClusterBindings>,
    partitioner: Option<String>,
    generation: u64,
}

impl ManagerState {
    fn session(&self) -> &str {
        self.bindings
            .as_ref()
            .map_or(UNBOUND_SESSION, |bindings| bindings.session.as_str())
    }

    fn active_keyspace(&self) -> Option<String> {
        self.bindings
            .as_ref()
            .map(|bindings| bindings.keyspace.active_keyspace())
            .filter(|keyspace| !keyspace.trim().is_empty())
    }
}

/// Tracks cluster membership and publishes token-aware routing snapshots.
///
/// Writers are serialized by one lock guarding the bindings, the partitioner
/// and host registry mutation. Every write builds a shallow copy of the
/// current [`ClusterMetadata`], replaces the affected fields and publishes
/// the copy before releasing the lock. Readers load the published snapshot
/// without locking.
pub struct ClusterMetadataManager {
    state: Mutex<ManagerState>,
    hosts: HostRegistry,
    metadata: ArcSwapOption<ClusterMetadata>,
}

impl Default for ClusterMetadataManager {
    fn default() -> Self {
        Self::new()
    }
}

// Manager behavior is split by concern to keep topology logic navigable.
include!("manager/operations.rs");
include!("manager/publication.rs");
include!("manager/listener.rs");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::host::HostDescriptor;

    #[test]
    fn working_copy_shares_unchanged_fields() {
        let manager = ClusterMetadataManager::new();
        manager.set_partitioner("Murmur3Partitioner").unwrap();
        manager
            .add_host(HostDescriptor::new([10, 0, 0, 1].into()).with_tokens(["0"]))
            .unwrap();

        let published = manager.metadata().unwrap();
        let working = manager.metadata_for_update();
        assert!(Arc::ptr_eq(
            working.token_ring.as_ref().unwrap(),
            published.token_ring.as_ref().unwrap()
        ));
        assert!(Arc::ptr_eq(&working.replicas, &published.replicas));
        assert_eq!(working.generation, published.generation);
    }

    #[test]
    fn working_copy_starts_empty_before_first_publish() {
        let manager = ClusterMetadataManager::new();
        let working = manager.metadata_for_update();
        assert!(working.token_ring.is_none());
        assert!(working.replicas.is_empty());
        assert_eq!(working.generation, 0);
    }

    #[test]
    fn empty_partitioner_means_unknown() {
        let manager = ClusterMetadataManager::new();
        assert!(!manager.set_partitioner("  ").unwrap());
        assert!(manager.metadata().is_none());
        assert_eq!(manager.partitioner().unwrap(), None);
    }
}
