use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use cqlroute::{ClusterMetadata, HostRef, TopologyConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "topology-tool")]
#[command(about = "Inspect token rings and replica placement for a cluster layout")]
struct Cli {
    /// Topology config (JSON) describing hosts, partitioner and keyspaces
    #[arg(long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every (token, host) entry of the ring
    Ring,
    /// List the configured keyspaces and whether each has replicas
    Keyspaces,
    /// Print the replica map of a keyspace
    Replicas {
        #[arg(long)]
        keyspace: String,
    },
    /// Print the token and replicas of a partition key
    Route {
        #[arg(long)]
        keyspace: String,
        #[arg(long)]
        key: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TopologyConfig::from_json_file(&cli.config)
        .with_context(|| format!("Failed to load config '{}'", cli.config.display()))?;
    let (manager, resolver) = config
        .into_manager()
        .context("Failed to build cluster metadata")?;
    let meta = manager
        .metadata()
        .ok_or_else(|| anyhow!("No cluster metadata was published; the config lists no hosts"))?;

    match cli.command {
        Command::Ring => print_ring(&meta),
        Command::Keyspaces => {
            let names = resolver.keyspace_names().context("Failed to list keyspaces")?;
            print_keyspaces(&meta, &names);
            Ok(())
        }
        Command::Replicas { keyspace } => print_replicas(&meta, &keyspace),
        Command::Route { keyspace, key } => print_route(&meta, &keyspace, &key),
    }
}

fn print_ring(meta: &Arc<ClusterMetadata>) -> Result<()> {
    let ring = meta
        .token_ring()
        .ok_or_else(|| anyhow!("Token ring unavailable; check partitioner and host tokens"))?;
    println!("partitioner: {}", ring.partitioner());
    for (token, host) in ring.iter() {
        println!("{:>24}  {}  {}/{}", token, host, host.datacenter(), host.rack());
    }
    Ok(())
}

fn print_keyspaces(meta: &Arc<ClusterMetadata>, names: &[String]) {
    for name in names {
        let status = match meta.replica_map(name) {
            Some(map) => format!("{} ranges", map.len()),
            None => "no replicas".to_string(),
        };
        println!("{:<24}  {}", name, status);
    }
}

fn print_replicas(meta: &Arc<ClusterMetadata>, keyspace: &str) -> Result<()> {
    let map = meta
        .replica_map(keyspace)
        .ok_or_else(|| anyhow!("No replica information for keyspace '{}'", keyspace))?;
    for entry in map.iter() {
        println!("{:>24}  {}", entry.token, format_hosts(&entry.replicas));
    }
    Ok(())
}

fn print_route(meta: &Arc<ClusterMetadata>, keyspace: &str, key: &str) -> Result<()> {
    let ring = meta
        .token_ring()
        .ok_or_else(|| anyhow!("Token ring unavailable; check partitioner and host tokens"))?;
    let token = ring
        .partitioner()
        .hash(key.as_bytes())
        .context("Failed to hash partition key")?;
    let replicas = meta
        .replicas_for_token(keyspace, &token)
        .ok_or_else(|| anyhow!("No replica information for keyspace '{}'", keyspace))?;
    println!("token: {} ({})", token, token.kind());
    println!("owner: {}", ring.owner_of(&token));
    println!("replicas: {}", format_hosts(replicas));
    Ok(())
}

fn format_hosts(hosts: &[HostRef]) -> String {
    hosts
        .iter()
        .map(|host| host.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
