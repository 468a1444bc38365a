use crate::cluster::{
    ClusterBindings, ClusterMetadataManager, HostDescriptor, InMemoryKeyspaceResolver,
    KeyspaceUpdateEvent, SchemaChange, TopologyEvent, spawn_event_listener,
};
use crate::core::{Result, TopologyError};
use crate::strategy::ReplicationStrategyDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Topology tracking configuration
///
/// Describes the owning session and, optionally, a static cluster layout
/// (hosts, partitioner, keyspace schemas) used by embedded setups and the
/// developer tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Label attached to every log event of the owning session
    pub session_name: String,

    /// Keyspace the session routes for
    pub keyspace: String,

    /// Partitioner class name, if known up front
    pub partitioner: Option<String>,

    /// Buffer size of the topology event channel
    pub event_channel_capacity: usize,

    /// Keyspace replication settings served by the in-memory resolver
    pub keyspaces: BTreeMap<String, ReplicationStrategyDescriptor>,

    /// Hosts registered at startup
    pub hosts: Vec<HostDescriptor>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            session_name: "default".to_string(),
            keyspace: String::new(),
            partitioner: None,
            event_channel_capacity: 256,
            keyspaces: BTreeMap::new(),
            hosts: Vec::new(),
        }
    }
}

impl TopologyConfig {
    /// Create a new configuration for a session bound to `keyspace`
    pub fn new(session_name: &str, keyspace: &str) -> Self {
        Self {
            session_name: session_name.to_string(),
            keyspace: keyspace.to_string(),
            ..Self::default()
        }
    }

    /// Set the partitioner class name
    pub fn partitioner(mut self, partitioner: &str) -> Self {
        self.partitioner = Some(partitioner.to_string());
        self
    }

    /// Set the event channel capacity
    pub fn event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    /// Define a keyspace served by the in-memory resolver
    pub fn keyspace_definition(
        mut self,
        keyspace: &str,
        descriptor: ReplicationStrategyDescriptor,
    ) -> Self {
        self.keyspaces.insert(keyspace.to_string(), descriptor);
        self
    }

    /// Add a startup host
    pub fn host(mut self, host: HostDescriptor) -> Self {
        self.hosts.push(host);
        self
    }

    /// Parse from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| TopologyError::ConfigError(format!("invalid topology config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TopologyError::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session_name.trim().is_empty() {
            return Err(TopologyError::ConfigError(
                "session_name must not be empty".to_string(),
            ));
        }
        if self.event_channel_capacity == 0 {
            return Err(TopologyError::ConfigError(
                "event_channel_capacity must be >= 1".to_string(),
            ));
        }
        for name in self.keyspaces.keys() {
            if name.trim().is_empty() {
                return Err(TopologyError::ConfigError(
                    "keyspace names must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Builds an initialized manager from this configuration.
    ///
    /// Every configured keyspace gets a replica map, not only the session's
    /// own. Returns the resolver handle as well so callers can apply schema
    /// changes and announce them with `keyspace_changed`.
    pub fn into_manager(self) -> Result<(ClusterMetadataManager, InMemoryKeyspaceResolver)> {
        self.validate()?;

        let resolver = InMemoryKeyspaceResolver::new();
        for (name, descriptor) in self.keyspaces {
            resolver.define(name, descriptor)?;
        }

        let active = self.keyspace.clone();
        let manager = ClusterMetadataManager::new();
        manager.init(ClusterBindings::new(
            self.session_name,
            Arc::new(resolver.clone()),
            Arc::new(self.keyspace),
        ))?;
        if let Some(partitioner) = self.partitioner.as_deref() {
            manager.set_partitioner(partitioner)?;
        }
        if !self.hosts.is_empty() {
            manager.add_hosts(self.hosts)?;
            for name in resolver.keyspace_names()? {
                if name != active {
                    let update = KeyspaceUpdateEvent::new(name, SchemaChange::Created);
                    manager.keyspace_changed(&update)?;
                }
            }
        }
        Ok((manager, resolver))
    }

    /// Builds the manager and starts a listener fed by a channel of
    /// `event_channel_capacity` events.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_listener(self) -> Result<TopologyListener> {
        let capacity = self.event_channel_capacity;
        let (manager, resolver) = self.into_manager()?;
        let manager = Arc::new(manager);
        let (events, rx) = mpsc::channel(capacity);
        let handle = spawn_event_listener(Arc::clone(&manager), rx);
        Ok(TopologyListener {
            manager,
            resolver,
            events,
            handle,
        })
    }
}

/// A configured manager driven by a topology event channel.
///
/// The listener stops once every clone of `events` is dropped.
pub struct TopologyListener {
    pub manager: Arc<ClusterMetadataManager>,
    pub resolver: InMemoryKeyspaceResolver,
    pub events: mpsc::Sender<TopologyEvent>,
    pub handle: JoinHandle<()>,
}
