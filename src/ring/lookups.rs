impl TokenRing {
    pub fn partitioner(&self) -> Partitioner {
        self.partitioner
    }

    /// Number of `(token, host)` entries on the ring.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, &HostRef)> {
        self.entries.iter().map(|entry| (&entry.token, &entry.host))
    }

    /// Distinct hosts in ring order of their first token.
    pub fn hosts(&self) -> &[HostRef] {
        &self.hosts
    }

    /// Tokens owned by the host with the given connect address.
    pub fn tokens_of(&self, address: IpAddr) -> Vec<Token> {
        self.entries
            .iter()
            .filter(|entry| entry.host.connect_address == address)
            .map(|entry| entry.token.clone())
            .collect()
    }

    /// Index of the first entry whose token is >= `token`, wrapping to 0.
    pub(crate) fn index_of(&self, token: &Token) -> usize {
        let idx = self.entries.partition_point(|entry| entry.token < *token);
        if idx == self.entries.len() { 0 } else { idx }
    }

    /// Entries walked clockwise starting at `start`, each entry visited once.
    pub(crate) fn walk_from(&self, start: usize) -> impl Iterator<Item = &RingEntry> {
        let len = self.entries.len();
        (0..len).map(move |offset| &self.entries[(start + offset) % len])
    }

    /// Returns the host owning `token`.
    pub fn owner_of(&self, token: &Token) -> &HostRef {
        &self.entries[self.index_of(token)].host
    }

    /// Hashes a partition key with the ring's partitioner and returns its owner.
    pub fn owner_of_key(&self, partition_key: &[u8]) -> Result<&HostRef> {
        let token = self.partitioner.hash(partition_key)?;
        Ok(self.owner_of(&token))
    }

    /// Walks clockwise from the owner of `token`, collecting up to `count`
    /// distinct hosts.
    pub fn replica_walk(&self, token: &Token, count: usize) -> Vec<HostRef> {
        let mut replicas = Vec::with_capacity(count.min(self.hosts.len()));
        if count == 0 {
            return replicas;
        }
        let mut seen = HashSet::new();
        for entry in self.walk_from(self.index_of(token)) {
            if seen.insert(entry.host.connect_address) {
                replicas.push(entry.host.clone());
                if replicas.len() == count {
                    break;
                }
            }
        }
        replicas
    }
}
