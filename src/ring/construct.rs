impl TokenRing {
    /// Builds a ring from a partitioner class name and the current hosts.
    ///
    /// Tokens that fail to parse are skipped. Fails with `UnknownPartitioner`
    /// for an unrecognized name and `NoTokensAvailable` when no host
    /// contributes a valid token.
    pub fn build(partitioner_name: &str, hosts: &[HostRef]) -> Result<Self> {
        let partitioner = Partitioner::from_name(partitioner_name)?;

        let mut entries = Vec::new();
        for host in hosts {
            for raw in &host.tokens {
                match partitioner.parse_token(raw) {
                    Ok(token) => entries.push(RingEntry {
                        token,
                        host: host.clone(),
                    }),
                    Err(err) => {
                        event!(
                            Level::WARN,
                            host = %host,
                            error = %err,
                            "skipping unparsable host token"
                        );
                    }
                }
            }
        }

        if entries.is_empty() {
            return Err(TopologyError::NoTokensAvailable(
                partitioner.name().to_string(),
            ));
        }

        entries.sort_by(|a, b| {
            a.token
                .cmp(&b.token)
                .then_with(|| a.host.connect_address.cmp(&b.host.connect_address))
        });

        let mut seen = HashSet::new();
        let hosts = entries
            .iter()
            .filter(|entry| seen.insert(entry.host.connect_address))
            .map(|entry| entry.host.clone())
            .collect();

        Ok(Self {
            partitioner,
            entries,
            hosts,
        })
    }
}
