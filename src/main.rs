use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use isoserve::config::{Config, Overrides, DEFAULT_CONFIG_PATH};
use isoserve::server::create_listener;
use isoserve::state::AppState;
use isoserve::{handler, logger};

/// Static file server with cross-origin isolation headers
#[derive(Parser, Debug)]
#[command(name = "isoserve", version, about)]
struct Cli {
    /// Port to listen on [default: 8080]
    #[arg(long)]
    port: Option<u16>,

    /// Directory to serve [default: .]
    #[arg(long)]
    dir: Option<String>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    host: Option<String>,

    /// Config file path, without extension
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        root: cli.dir,
    };
    let cfg = Config::load_from(&cli.config, &overrides)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // A port held by another process fails here and exits with the bind error
    let listener = create_listener(addr)?;

    let state = Arc::new(AppState::new(cfg));
    logger::log_server_start(&state.root, &addr, &state.config);

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Serve one connection on a spawned task.
///
/// HTTP/1.1 with keep-alive; no read or write timeouts are configured, so
/// connections rely on OS socket defaults.
fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
