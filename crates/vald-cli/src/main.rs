use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::sync::Notify;

use vald_api::Client;
use vald_api::payload::v1::{Empty, flush, insert, object, remove, search};
use vald_api::stream::StreamPayload;
use vald_core::distance::DistanceType;
use vald_core::{EngineConfig, ValdEngine};
use vald_grpc::ValdGrpcServer;

#[derive(Parser)]
#[command(name = "vald", about = "Vald-compatible vector search agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the gRPC API from an in-memory engine
    Serve(ServeArgs),
    /// Insert a vector
    Insert {
        #[command(flatten)]
        conn: Connection,
        /// Object ID (a UUIDv7 is generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Comma-separated vector values
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        vector: Vec<f32>,
    },
    /// Search for the nearest neighbors of a vector
    Search {
        #[command(flatten)]
        conn: Connection,
        /// Number of results
        #[arg(long, default_value = "10")]
        num: u32,
        /// Comma-separated vector values
        #[arg(value_delimiter = ',', allow_negative_numbers = true)]
        vector: Vec<f32>,
    },
    /// Fetch a stored vector
    Get {
        #[command(flatten)]
        conn: Connection,
        id: String,
    },
    /// Remove a stored vector
    Remove {
        #[command(flatten)]
        conn: Connection,
        id: String,
    },
    /// Show index counts
    Count {
        #[command(flatten)]
        conn: Connection,
    },
    /// Stream every stored vector
    List {
        #[command(flatten)]
        conn: Connection,
    },
    /// Remove every stored vector
    Flush {
        #[command(flatten)]
        conn: Connection,
    },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8081", env = "VALD_ADDR")]
    addr: SocketAddr,

    /// Vector dimension
    #[arg(long, default_value = "128", env = "VALD_DIMENSION")]
    dimension: usize,

    /// Distance function (l1, l2, cosine, innerproduct)
    #[arg(long, default_value = "l2", env = "VALD_DISTANCE")]
    distance: DistanceType,

    /// Agent name reported in every location
    #[arg(long, default_value = "vald-agent-0", env = "VALD_AGENT_NAME")]
    agent_name: String,

    /// Comma-separated agent IPs reported in every location
    #[arg(long, default_value = "127.0.0.1", env = "VALD_AGENT_IPS", value_delimiter = ',')]
    agent_ips: Vec<String>,

    /// Snapshot file loaded at startup and written on shutdown
    #[arg(long, env = "VALD_SNAPSHOT")]
    snapshot: Option<PathBuf>,
}

#[derive(clap::Args)]
struct Connection {
    /// Agent endpoint
    #[arg(long, default_value = "http://127.0.0.1:8081", env = "VALD_ENDPOINT")]
    endpoint: String,
}

impl Connection {
    async fn connect(&self) -> Result<Client, tonic::transport::Error> {
        Client::connect(self.endpoint.clone()).await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("vald=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve(args) => serve(args).await,
        Command::Insert { conn, id, vector } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
            let location = conn
                .connect()
                .await?
                .insert()
                .insert(insert::Request {
                    vector: Some(object::Vector {
                        id,
                        vector,
                        ..Default::default()
                    }),
                    config: None,
                })
                .await?
                .into_inner();
            print_json(&location_json(&location))
        }
        Command::Search { conn, num, vector } => {
            let response = conn
                .connect()
                .await?
                .search()
                .search(search::Request {
                    vector,
                    config: Some(search::Config {
                        num,
                        ..Default::default()
                    }),
                })
                .await?
                .into_inner();
            let results: Vec<_> = response
                .results
                .iter()
                .map(|d| json!({ "id": d.id, "distance": d.distance }))
                .collect();
            print_json(&json!({ "request_id": response.request_id, "results": results }))
        }
        Command::Get { conn, id } => {
            let vector = conn
                .connect()
                .await?
                .object()
                .get_object(object::VectorRequest {
                    id: Some(object::Id { id }),
                    filters: None,
                })
                .await?
                .into_inner();
            print_json(&vector_json(&vector))
        }
        Command::Remove { conn, id } => {
            let location = conn
                .connect()
                .await?
                .remove()
                .remove(remove::Request {
                    id: Some(object::Id { id }),
                    config: None,
                })
                .await?
                .into_inner();
            print_json(&location_json(&location))
        }
        Command::Count { conn } => {
            let count = conn.connect().await?.index().index_info(Empty {}).await?.into_inner();
            print_json(&json!({
                "stored": count.stored,
                "uncommitted": count.uncommitted,
                "indexing": count.indexing,
                "saving": count.saving,
            }))
        }
        Command::List { conn } => {
            let mut stream = conn
                .connect()
                .await?
                .object()
                .stream_list_object(object::list::Request {})
                .await?
                .into_inner();
            while let Some(message) = stream.message().await? {
                match message.into_result() {
                    Ok(vector) => println!("{}", vector_json(&vector)),
                    Err(status) => tracing::warn!("list entry failed: {status}"),
                }
            }
            Ok(())
        }
        Command::Flush { conn } => {
            let count = conn
                .connect()
                .await?
                .flush()
                .flush(flush::Request {})
                .await?
                .into_inner();
            print_json(&json!({ "stored": count.stored }))
        }
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig {
        dimension: args.dimension,
        distance: args.distance,
        agent_name: args.agent_name,
        agent_ips: args.agent_ips,
    };
    tracing::info!(
        "Engine: dimension {}, distance {}, agent {}",
        config.dimension,
        config.distance,
        config.agent_name
    );
    let engine = Arc::new(ValdEngine::in_memory(config));

    if let Some(ref path) = args.snapshot
        && path.exists()
    {
        let loaded = engine.load_snapshot(path).await?;
        tracing::info!("Loaded snapshot {:?} ({loaded} vectors)", path);
    }

    // Signal handler for graceful shutdown (Ctrl+C)
    let shutdown_notify = Arc::new(Notify::new());
    let signal_shutdown = shutdown_notify.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            return;
        }
        tracing::info!("Received shutdown signal");
        signal_shutdown.notify_one();
    });

    let mut builder = tonic::transport::Server::builder().trace_fn(|req| {
        let path = req.uri().path();
        match vald_api::rpc::lookup(path) {
            Some(m) => tracing::info_span!(
                "rpc",
                service = %m.service_name(),
                method = m.method,
                mode = %m.mode
            ),
            None => tracing::info_span!("rpc", path = %path),
        }
    });
    let server = ValdGrpcServer::new(engine.clone());
    let router = vald_api::server::register_with_filter(&mut builder, server.clone());
    let router = vald_api::server::register_with_metadata(router, server);

    tracing::info!("Starting Vald gRPC server on {}", args.addr);
    let shutdown = shutdown_notify.clone();
    router
        .serve_with_shutdown(args.addr, async move { shutdown.notified().await })
        .await?;

    if let Some(ref path) = args.snapshot {
        tracing::info!("Shutdown initiated, saving snapshot...");
        match engine.save_snapshot(path).await {
            Ok(saved) => tracing::info!("Saved snapshot {:?} ({saved} vectors)", path),
            Err(e) => tracing::error!("Failed to save snapshot: {e}"),
        }
    }

    Ok(())
}

fn location_json(location: &object::Location) -> serde_json::Value {
    json!({ "name": location.name, "uuid": location.uuid, "ips": location.ips })
}

fn vector_json(vector: &object::Vector) -> serde_json::Value {
    json!({ "id": vector.id, "vector": vector.vector, "timestamp": vector.timestamp })
}

fn print_json(value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
