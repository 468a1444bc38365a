use super::replica_map::{ReplicaMap, TokenReplicas};
use crate::ring::TokenRing;

/// Replicas of every ring token are the first `replication_factor` distinct
/// hosts walking clockwise from its owner.
pub(super) fn simple_replica_map(ring: &TokenRing, replication_factor: usize) -> ReplicaMap {
    let mut entries: Vec<TokenReplicas> = Vec::with_capacity(ring.len());
    for entry in ring.entries() {
        if entries.last().is_some_and(|last| last.token == entry.token) {
            continue;
        }
        entries.push(TokenReplicas {
            token: entry.token.clone(),
            replicas: ring.replica_walk(&entry.token, replication_factor),
        });
    }
    ReplicaMap::from_sorted(entries)
}
