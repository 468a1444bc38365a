use crate::core::{Result, TopologyError};
use crate::strategy::ReplicationStrategyDescriptor;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Looks up the replication settings of a keyspace from schema metadata.
pub trait KeyspaceResolver: Send + Sync {
    fn resolve_keyspace(&self, keyspace: &str) -> Result<ReplicationStrategyDescriptor>;
}

/// Supplies the keyspace the owning session currently uses.
pub trait ActiveKeyspace: Send + Sync {
    fn active_keyspace(&self) -> String;
}

impl<F> ActiveKeyspace for F
where
    F: Fn() -> String + Send + Sync,
{
    fn active_keyspace(&self) -> String {
        self()
    }
}

/// A session bound to one keyspace for its whole lifetime.
impl ActiveKeyspace for String {
    fn active_keyspace(&self) -> String {
        self.clone()
    }
}

/// Collaborators bound to a metadata manager by its owning session.
#[derive(Clone)]
pub struct ClusterBindings {
    pub session: String,
    pub resolver: Arc<dyn KeyspaceResolver>,
    pub keyspace: Arc<dyn ActiveKeyspace>,
}

impl ClusterBindings {
    pub fn new(
        session: impl Into<String>,
        resolver: Arc<dyn KeyspaceResolver>,
        keyspace: Arc<dyn ActiveKeyspace>,
    ) -> Self {
        Self {
            session: session.into(),
            resolver,
            keyspace,
        }
    }
}

/// An in-memory schema table implementing `KeyspaceResolver`.
///
/// Clones share the same table, so a test or tool can keep a handle and
/// redefine keyspaces while the manager resolves through another.
#[derive(Clone, Default)]
pub struct InMemoryKeyspaceResolver {
    keyspaces: Arc<RwLock<HashMap<String, ReplicationStrategyDescriptor>>>,
}

impl InMemoryKeyspaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a keyspace definition.
    pub fn define(
        &self,
        keyspace: impl Into<String>,
        descriptor: ReplicationStrategyDescriptor,
    ) -> Result<()> {
        let keyspace = keyspace.into();
        if keyspace.trim().is_empty() {
            return Err(TopologyError::ConfigError(
                "keyspace name must not be empty".to_string(),
            ));
        }
        self.keyspaces.write()?.insert(keyspace, descriptor);
        Ok(())
    }

    /// Removes a keyspace. Returns true if it was defined.
    pub fn drop_keyspace(&self, keyspace: &str) -> Result<bool> {
        Ok(self.keyspaces.write()?.remove(keyspace).is_some())
    }

    /// Defined keyspace names in name order.
    pub fn keyspace_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.keyspaces.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl KeyspaceResolver for InMemoryKeyspaceResolver {
    fn resolve_keyspace(&self, keyspace: &str) -> Result<ReplicationStrategyDescriptor> {
        self.keyspaces
            .read()?
            .get(keyspace)
            .cloned()
            .ok_or_else(|| TopologyError::KeyspaceNotFound(keyspace.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_defined_keyspaces() {
        let resolver = InMemoryKeyspaceResolver::new();
        resolver
            .define("ks1", ReplicationStrategyDescriptor::simple(3))
            .unwrap();

        assert_eq!(
            resolver.resolve_keyspace("ks1").unwrap(),
            ReplicationStrategyDescriptor::simple(3)
        );
        assert!(matches!(
            resolver.resolve_keyspace("missing"),
            Err(TopologyError::KeyspaceNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn clones_share_the_schema_table() {
        let resolver = InMemoryKeyspaceResolver::new();
        let handle = resolver.clone();
        handle
            .define("ks1", ReplicationStrategyDescriptor::simple(1))
            .unwrap();
        assert!(resolver.resolve_keyspace("ks1").is_ok());

        assert!(handle.drop_keyspace("ks1").unwrap());
        assert!(!handle.drop_keyspace("ks1").unwrap());
        assert!(resolver.resolve_keyspace("ks1").is_err());
    }

    #[test]
    fn rejects_empty_keyspace_name() {
        let resolver = InMemoryKeyspaceResolver::new();
        assert!(matches!(
            resolver.define("  ", ReplicationStrategyDescriptor::simple(1)),
            Err(TopologyError::ConfigError(_))
        ));
    }

    #[test]
    fn closures_and_strings_supply_the_active_keyspace() {
        let keyspace = || "app".to_string();
        assert_eq!(keyspace.active_keyspace(), "app");

        let fixed: Arc<dyn ActiveKeyspace> = Arc::new("ks".to_string());
        assert_eq!(fixed.active_keyspace(), "ks");
    }

    #[test]
    fn lists_defined_keyspaces_in_name_order() {
        let resolver = InMemoryKeyspaceResolver::new();
        for name in ["ks2", "app", "ks1"] {
            resolver
                .define(name, ReplicationStrategyDescriptor::simple(1))
                .unwrap();
        }
        resolver.drop_keyspace("ks1").unwrap();
        assert_eq!(resolver.keyspace_names().unwrap(), vec!["app", "ks2"]);
    }
}
