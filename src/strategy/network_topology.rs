use super::replica_map::{ReplicaMap, TokenReplicas};
use crate::cluster::host::HostRef;
use crate::ring::TokenRing;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::IpAddr;

/// Per-datacenter placement state while walking the ring for one token.
#[derive(Default)]
struct DatacenterPlacement<'a> {
    placed: usize,
    racks_used: HashSet<&'a str>,
    deferred: Vec<&'a HostRef>,
}

/// Rack-aware placement per datacenter.
///
/// While a datacenter still has racks without a replica, hosts from racks that
/// already hold one are deferred. Deferred hosts fill the remaining quota once
/// every rack is used, or when the ring is exhausted.
pub(super) fn network_topology_replica_map(
    ring: &TokenRing,
    datacenter_factors: &BTreeMap<String, usize>,
) -> ReplicaMap {
    let mut racks_per_datacenter: HashMap<&str, HashSet<&str>> = HashMap::new();
    for host in ring.hosts() {
        racks_per_datacenter
            .entry(host.datacenter())
            .or_default()
            .insert(host.rack());
    }

    let mut entries: Vec<TokenReplicas> = Vec::with_capacity(ring.len());
    for (start, entry) in ring.entries().iter().enumerate() {
        if entries.last().is_some_and(|last| last.token == entry.token) {
            continue;
        }

        let mut placements: BTreeMap<&str, DatacenterPlacement<'_>> = datacenter_factors
            .iter()
            .filter(|(_, factor)| **factor > 0)
            .map(|(dc, _)| (dc.as_str(), DatacenterPlacement::default()))
            .collect();
        let mut replicas: Vec<HostRef> = Vec::new();
        let mut chosen: HashSet<IpAddr> = HashSet::new();

        for walked in ring.walk_from(start) {
            if all_satisfied(&placements, datacenter_factors) {
                break;
            }

            let host = &walked.host;
            let dc = host.datacenter();
            let factor = datacenter_factors.get(dc).copied().unwrap_or(0);
            let Some(placement) = placements.get_mut(dc) else {
                continue;
            };
            if placement.placed >= factor || chosen.contains(&host.connect_address) {
                continue;
            }

            let rack_count = racks_per_datacenter.get(dc).map_or(0, HashSet::len);
            if placement.racks_used.len() < rack_count && placement.racks_used.contains(host.rack())
            {
                if !placement
                    .deferred
                    .iter()
                    .any(|deferred| deferred.connect_address == host.connect_address)
                {
                    placement.deferred.push(host);
                }
                continue;
            }

            chosen.insert(host.connect_address);
            replicas.push(host.clone());
            placement.placed += 1;
            placement.racks_used.insert(host.rack());

            if placement.racks_used.len() == rack_count {
                drain_deferred(placement, factor, &mut replicas, &mut chosen);
            }
        }

        for (dc, placement) in placements.iter_mut() {
            let factor = datacenter_factors.get(*dc).copied().unwrap_or(0);
            drain_deferred(placement, factor, &mut replicas, &mut chosen);
        }

        entries.push(TokenReplicas {
            token: entry.token.clone(),
            replicas,
        });
    }

    ReplicaMap::from_sorted(entries)
}

fn all_satisfied(
    placements: &BTreeMap<&str, DatacenterPlacement<'_>>,
    datacenter_factors: &BTreeMap<String, usize>,
) -> bool {
    placements.iter().all(|(dc, placement)| {
        placement.placed >= datacenter_factors.get(*dc).copied().unwrap_or(0)
    })
}

fn drain_deferred(
    placement: &mut DatacenterPlacement<'_>,
    factor: usize,
    replicas: &mut Vec<HostRef>,
    chosen: &mut HashSet<IpAddr>,
) {
    let mut idx = 0;
    while placement.placed < factor && idx < placement.deferred.len() {
        let host = placement.deferred[idx];
        idx += 1;
        if chosen.insert(host.connect_address) {
            replicas.push(host.clone());
            placement.placed += 1;
        }
    }
    placement.deferred.drain(..idx);
}
