impl ClusterMetadataManager {
    /// Returns a shallow copy of the current snapshot, or an empty one.
    ///
    /// Must be called with the state lock held, and the copy published before
    /// the lock is released.
    fn metadata_for_update(&self) -> ClusterMetadata {
        self.metadata
            .load()
            .as_deref()
            .cloned()
            .unwrap_or_else(ClusterMetadata::empty)
    }

    /// Rebuilds the ring and the active keyspace's replicas, then publishes.
    fn rebuild_topology(&self, state: &mut ManagerState) {
        let mut meta = self.metadata_for_update();
        self.reset_token_ring(state, &mut meta);
        let keyspace = state.active_keyspace();
        self.update_replicas(state, &mut meta, keyspace.as_deref());
        self.publish(state, meta);
    }

    /// Replaces the ring from the current hosts and partitioner.
    ///
    /// On failure the previous ring, possibly none, stays in place.
    fn reset_token_ring(&self, state: &ManagerState, meta: &mut ClusterMetadata) {
        let Some(partitioner) = state.partitioner.as_deref() else {
            return;
        };

        match TokenRing::build(partitioner, &self.hosts.get()) {
            Ok(ring) => meta.token_ring = Some(Arc::new(ring)),
            Err(err) => {
                event!(
                    Level::WARN,
                    session = %state.session(),
                    partitioner = %partitioner,
                    error = %err,
                    "unable to update the token ring"
                );
            }
        }
    }

    /// Recomputes replicas for `keyspace` and carries every other keyspace
    /// over unchanged. A keyspace that cannot be resolved is left out.
    fn update_replicas(&self, state: &ManagerState, meta: &mut ClusterMetadata, keyspace: Option<&str>) {
        let Some(keyspace) = keyspace else {
            return;
        };

        let mut replicas = HashMap::with_capacity(meta.replicas.len() + 1);
        if let Some(map) = self.compute_replica_map(state, meta, keyspace) {
            replicas.insert(keyspace.to_string(), map);
        }
        for (name, map) in meta.replicas.iter() {
            if name != keyspace {
                replicas.insert(name.clone(), map.clone());
            }
        }
        meta.replicas = Arc::new(replicas);
    }

    fn compute_replica_map(
        &self,
        state: &ManagerState,
        meta: &ClusterMetadata,
        keyspace: &str,
    ) -> Option<Arc<ReplicaMap>> {
        let bindings = state.bindings.as_ref()?;
        let descriptor = match bindings.resolver.resolve_keyspace(keyspace) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                event!(
                    Level::DEBUG,
                    session = %bindings.session,
                    keyspace = %keyspace,
                    error = %err,
                    "keyspace not resolved; replicas omitted"
                );
                return None;
            }
        };
        let strategy = ReplicationStrategy::from_descriptor(&descriptor)?;
        let ring = meta.token_ring.as_ref()?;
        Some(Arc::new(strategy.replica_map(ring)))
    }

    fn publish(&self, state: &mut ManagerState, mut meta: ClusterMetadata) {
        state.generation = state.generation.saturating_add(1);
        meta.generation = state.generation;
        meta.published_at = Utc::now();
        event!(
            Level::DEBUG,
            session = %state.session(),
            generation = meta.generation,
            ring_entries = meta.token_ring.as_ref().map_or(0, |ring| ring.len()),
            keyspaces = meta.replicas.len(),
            "cluster metadata published"
        );
        self.metadata.store(Some(Arc::new(meta)));
    }
}
