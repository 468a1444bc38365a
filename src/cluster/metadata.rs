use super::host::HostRef;
use crate::core::Token;
use crate::ring::TokenRing;
use crate::strategy::ReplicaMap;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable view of cluster topology published by the metadata manager.
///
/// Every field is shared by reference; an update clones the snapshot
/// shallowly, swaps the changed fields and publishes the copy as a whole, so a
/// reader holding an older snapshot keeps a consistent (ring, replicas) pair.
#[derive(Debug, Clone)]
pub struct ClusterMetadata {
    pub(crate) token_ring: Option<Arc<TokenRing>>,
    pub(crate) replicas: Arc<HashMap<String, Arc<ReplicaMap>>>,
    pub(crate) generation: u64,
    pub(crate) published_at: DateTime<Utc>,
}

impl ClusterMetadata {
    pub(crate) fn empty() -> Self {
        Self {
            token_ring: None,
            replicas: Arc::new(HashMap::new()),
            generation: 0,
            published_at: Utc::now(),
        }
    }

    /// Returns the token ring.
    ///
    /// `None` until a partitioner is known and at least one host with tokens
    /// has been registered.
    pub fn token_ring(&self) -> Option<&Arc<TokenRing>> {
        self.token_ring.as_ref()
    }

    pub fn replica_map(&self, keyspace: &str) -> Option<&Arc<ReplicaMap>> {
        self.replicas.get(keyspace)
    }

    /// Keyspaces with replica information, sorted.
    pub fn keyspaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.replicas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn replicas_for_token(&self, keyspace: &str, token: &Token) -> Option<&[HostRef]> {
        self.replicas
            .get(keyspace)
            .map(|map| map.replicas_for(token))
    }

    /// Replicas for a serialized partition key.
    ///
    /// `None` means the caller should route without token awareness: the
    /// ring is unknown, the keyspace has no replica map, or the partitioner
    /// cannot hash keys.
    pub fn replicas_for_key(&self, keyspace: &str, partition_key: &[u8]) -> Option<&[HostRef]> {
        let ring = self.token_ring.as_ref()?;
        let token = ring.partitioner().hash(partition_key).ok()?;
        self.replicas_for_token(keyspace, &token)
    }

    /// Publish counter, starting at 1 for the first published snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}
