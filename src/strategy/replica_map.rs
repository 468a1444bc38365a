use crate::cluster::host::HostRef;
use crate::core::Token;

/// Ordered replica set owning the range that ends at `token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReplicas {
    pub token: Token,
    pub replicas: Vec<HostRef>,
}

/// Per-keyspace mapping from ring token to the replicas owning it.
///
/// Entries are sorted by token; lookups use the same "first token >= query,
/// wrapping to the start" rule as the token ring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicaMap {
    entries: Vec<TokenReplicas>,
}

impl ReplicaMap {
    pub(crate) fn from_sorted(entries: Vec<TokenReplicas>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenReplicas> {
        self.entries.iter()
    }

    /// Replicas for the range containing `token`, primary first.
    pub fn replicas_for(&self, token: &Token) -> &[HostRef] {
        if self.entries.is_empty() {
            return &[];
        }
        let idx = self.entries.partition_point(|entry| entry.token < *token);
        let idx = if idx == self.entries.len() { 0 } else { idx };
        &self.entries[idx].replicas
    }
}
