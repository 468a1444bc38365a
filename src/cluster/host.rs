use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to a host descriptor.
pub type HostRef = Arc<HostDescriptor>;

/// Describes a storage node as reported by discovery.
///
/// Identity is the connect address. Descriptors are never mutated after they
/// are handed to the metadata manager; a changed node is a new descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDescriptor {
    pub connect_address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub host_id: Option<Uuid>,
    #[serde(default)]
    pub datacenter: Option<String>,
    #[serde(default)]
    pub rack: Option<String>,
    /// Raw token strings in the format of the cluster's partitioner.
    #[serde(default)]
    pub tokens: Vec<String>,
}

fn default_port() -> u16 {
    9042
}

impl HostDescriptor {
    pub fn new(connect_address: IpAddr) -> Self {
        Self {
            connect_address,
            port: default_port(),
            host_id: None,
            datacenter: None,
            rack: None,
            tokens: Vec::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host_id(mut self, host_id: Uuid) -> Self {
        self.host_id = Some(host_id);
        self
    }

    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    pub fn with_rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = Some(rack.into());
        self
    }

    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn connect_address(&self) -> IpAddr {
        self.connect_address
    }

    pub fn datacenter(&self) -> &str {
        self.datacenter.as_deref().unwrap_or("")
    }

    pub fn rack(&self) -> &str {
        self.rack.as_deref().unwrap_or("")
    }

    pub fn into_ref(self) -> HostRef {
        Arc::new(self)
    }
}

impl fmt::Display for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.connect_address {
            IpAddr::V4(addr) => write!(f, "{}:{}", addr, self.port),
            IpAddr::V6(addr) => write!(f, "[{}]:{}", addr, self.port),
        }
    }
}
