impl ClusterMetadataManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ManagerState {
                bindings: None,
                partitioner: None,
                generation: 0,
            }),
            hosts: HostRegistry::new(),
            metadata: ArcSwapOption::empty(),
        }
    }

    /// Binds the owning session's collaborators.
    ///
    /// A manager belongs to exactly one session. Every call after the first
    /// is rejected with `AlreadyInitialized` and leaves the first bindings
    /// in place.
    pub fn init(&self, bindings: ClusterBindings) -> Result<()> {
        let mut state = self.state.lock()?;
        if let Some(existing) = state.bindings.as_ref() {
            event!(
                Level::ERROR,
                session = %existing.session,
                rejected_session = %bindings.session,
                "sharing a cluster metadata manager between sessions is not supported"
            );
            return Err(TopologyError::AlreadyInitialized);
        }
        state.bindings = Some(bindings);
        Ok(())
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.state.lock()?.bindings.is_some())
    }

    /// Records the cluster partitioner and rebuilds the ring.
    ///
    /// Returns false without publishing when the partitioner is unchanged. An
    /// empty name means "not known yet".
    pub fn set_partitioner(&self, partitioner: &str) -> Result<bool> {
        let partitioner = partitioner.trim();
        let next = (!partitioner.is_empty()).then(|| partitioner.to_string());

        let mut state = self.state.lock()?;
        if state.partitioner == next {
            return Ok(false);
        }
        state.partitioner = next;
        self.rebuild_topology(&mut state);
        Ok(true)
    }

    pub fn partitioner(&self) -> Result<Option<String>> {
        Ok(self.state.lock()?.partitioner.clone())
    }

    /// Registers a host. Returns false without publishing if its address is
    /// already known.
    pub fn add_host(&self, host: impl Into<HostRef>) -> Result<bool> {
        let mut state = self.state.lock()?;
        if !self.hosts.add(host) {
            return Ok(false);
        }
        self.rebuild_topology(&mut state);
        Ok(true)
    }

    /// Registers a batch of hosts, typically from initial discovery.
    ///
    /// Always rebuilds and publishes once, even when no host was new.
    /// Returns how many hosts were new.
    pub fn add_hosts<I, H>(&self, hosts: I) -> Result<usize>
    where
        I: IntoIterator<Item = H>,
        H: Into<HostRef>,
    {
        let mut state = self.state.lock()?;
        let mut added = 0;
        for host in hosts {
            if self.hosts.add(host) {
                added += 1;
            }
        }
        self.rebuild_topology(&mut state);
        Ok(added)
    }

    /// Forgets the host with the given connect address. Returns false without
    /// publishing if it was not known.
    pub fn remove_host(&self, address: IpAddr) -> Result<bool> {
        let mut state = self.state.lock()?;
        if !self.hosts.remove(address) {
            return Ok(false);
        }
        self.rebuild_topology(&mut state);
        Ok(true)
    }

    /// Recomputes replicas of the changed keyspace only; the ring and every
    /// other keyspace are carried over.
    pub fn keyspace_changed(&self, update: &KeyspaceUpdateEvent) -> Result<()> {
        let mut state = self.state.lock()?;
        let mut meta = self.metadata_for_update();
        self.update_replicas(&state, &mut meta, Some(update.keyspace.as_str()));
        self.publish(&mut state, meta);
        Ok(())
    }

    /// Latest published snapshot, or `None` before the first publish.
    ///
    /// Never blocks. The snapshot must be treated as read-only; it is never
    /// modified after publication.
    pub fn metadata(&self) -> Option<Arc<ClusterMetadata>> {
        self.metadata.load_full()
    }

    pub fn token_ring(&self) -> Option<Arc<TokenRing>> {
        self.metadata()
            .and_then(|meta| meta.token_ring().cloned())
    }

    /// Currently registered hosts.
    pub fn hosts(&self) -> Arc<Vec<HostRef>> {
        self.hosts.get()
    }

    pub fn host(&self, address: IpAddr) -> Option<HostRef> {
        self.hosts.find(address)
    }
}
