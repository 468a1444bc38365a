// Cluster topology tracking is split by responsibility: node descriptors and
// their registry, the published snapshot, collaborator seams, event types and
// the manager that ties them together.

pub mod events;
pub mod host;
pub mod manager;
pub mod metadata;
pub mod registry;
pub mod resolver;

pub use events::{KeyspaceUpdateEvent, SchemaChange, TopologyEvent};
pub use host::{HostDescriptor, HostRef};
pub use manager::{ClusterMetadataManager, spawn_event_listener};
pub use metadata::ClusterMetadata;
pub use registry::HostRegistry;
pub use resolver::{
    ActiveKeyspace, ClusterBindings, InMemoryKeyspaceResolver, KeyspaceResolver,
};
