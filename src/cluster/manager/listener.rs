impl ClusterMetadataManager {
    /// Dispatches a decoded topology or schema event.
    pub fn apply_event(&self, topology_event: TopologyEvent) -> Result<()> {
        match topology_event {
            TopologyEvent::HostAdded(host) => self.add_host(host).map(|_| ()),
            TopologyEvent::HostsDiscovered(hosts) => self.add_hosts(hosts).map(|_| ()),
            TopologyEvent::HostRemoved(address) => self.remove_host(address).map(|_| ()),
            TopologyEvent::PartitionerChanged(partitioner) => {
                self.set_partitioner(&partitioner).map(|_| ())
            }
            TopologyEvent::KeyspaceChanged(update) => self.keyspace_changed(&update),
        }
    }
}

/// Applies events from `events` until every sender is dropped.
///
/// Each event runs on the blocking pool since a write may wait on the
/// keyspace resolver while holding the manager lock.
pub fn spawn_event_listener(
    manager: Arc<ClusterMetadataManager>,
    mut events: mpsc::Receiver<TopologyEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(topology_event) = events.recv().await {
            let kind = topology_event.kind();
            let target = Arc::clone(&manager);
            let applied = tokio::task::spawn_blocking(move || target.apply_event(topology_event)).await;
            match applied {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    event!(Level::ERROR, kind = kind, error = %err, "topology event rejected");
                }
                Err(err) => {
                    event!(Level::ERROR, kind = kind, error = %err, "topology event task failed");
                }
            }
        }
        event!(Level::DEBUG, "topology event channel closed");
    })
}
