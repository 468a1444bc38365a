use super::host::HostRef;
use arc_swap::ArcSwap;
use std::net::IpAddr;
use std::sync::Arc;

/// Copy-on-write list of known hosts, unique by connect address.
///
/// `get` never blocks and always observes a complete list. `add` and `remove`
/// replace the whole backing vector; they must be serialized by the caller
/// (the metadata manager holds its write lock around every mutation).
pub struct HostRegistry {
    hosts: ArcSwap<Vec<HostRef>>,
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRegistry {
    pub fn new() -> Self {
        Self {
            hosts: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Returns the current host list.
    pub fn get(&self) -> Arc<Vec<HostRef>> {
        self.hosts.load_full()
    }

    /// Registers a host. Returns false if the address is already known.
    pub fn add(&self, host: impl Into<HostRef>) -> bool {
        let host = host.into();
        let current = self.hosts.load();
        if current
            .iter()
            .any(|known| known.connect_address == host.connect_address)
        {
            return false;
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(host);
        self.hosts.store(Arc::new(next));
        true
    }

    /// Removes the host with the given connect address.
    ///
    /// Returns true if the host was present.
    pub fn remove(&self, address: IpAddr) -> bool {
        let current = self.hosts.load();
        let Some(idx) = current
            .iter()
            .position(|known| known.connect_address == address)
        else {
            return false;
        };

        let mut next = (**current).clone();
        next.remove(idx);
        self.hosts.store(Arc::new(next));
        true
    }

    pub fn contains(&self, address: IpAddr) -> bool {
        self.hosts
            .load()
            .iter()
            .any(|known| known.connect_address == address)
    }

    pub fn find(&self, address: IpAddr) -> Option<HostRef> {
        self.hosts
            .load()
            .iter()
            .find(|known| known.connect_address == address)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.hosts.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::host::HostDescriptor;

    fn host(last_octet: u8) -> HostDescriptor {
        HostDescriptor::new(IpAddr::from([10, 0, 0, last_octet]))
    }

    #[test]
    fn add_reports_membership_change() {
        let registry = HostRegistry::new();
        assert!(registry.add(host(1)));
        assert!(registry.add(host(2)));
        assert!(!registry.add(host(1)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_address_with_different_attributes_is_rejected() {
        let registry = HostRegistry::new();
        assert!(registry.add(host(1).with_datacenter("dc1")));
        assert!(!registry.add(host(1).with_datacenter("dc2")));
        assert_eq!(registry.get()[0].datacenter(), "dc1");
    }

    #[test]
    fn remove_reports_membership_change() {
        let registry = HostRegistry::new();
        registry.add(host(1));
        registry.add(host(2));

        assert!(registry.remove(IpAddr::from([10, 0, 0, 1])));
        assert!(!registry.remove(IpAddr::from([10, 0, 0, 1])));
        assert!(!registry.contains(IpAddr::from([10, 0, 0, 1])));
        assert!(registry.contains(IpAddr::from([10, 0, 0, 2])));
    }

    #[test]
    fn find_returns_the_registered_descriptor() {
        let registry = HostRegistry::new();
        registry.add(host(1).with_rack("r7"));

        let found = registry.find(IpAddr::from([10, 0, 0, 1])).unwrap();
        assert_eq!(found.rack(), "r7");
        assert!(registry.find(IpAddr::from([10, 0, 0, 9])).is_none());
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let registry = HostRegistry::new();
        registry.add(host(1));
        let before = registry.get();

        registry.add(host(2));
        registry.remove(IpAddr::from([10, 0, 0, 1]));

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].connect_address, IpAddr::from([10, 0, 0, 1]));
        assert_eq!(registry.get().len(), 1);
        assert_eq!(
            registry.get()[0].connect_address,
            IpAddr::from([10, 0, 0, 2])
        );
    }

    #[test]
    fn preserves_insertion_order() {
        let registry = HostRegistry::new();
        for octet in [3, 1, 2] {
            registry.add(host(octet));
        }
        let order: Vec<_> = registry
            .get()
            .iter()
            .map(|h| h.connect_address)
            .collect();
        assert_eq!(
            order,
            vec![
                IpAddr::from([10, 0, 0, 3]),
                IpAddr::from([10, 0, 0, 1]),
                IpAddr::from([10, 0, 0, 2])
            ]
        );
    }
}
