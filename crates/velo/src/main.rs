mod cli;
mod server;

use std::sync::Arc;

use clap::Parser;
use eyre::{eyre, WrapErr};

use velo_core::chain::ChainSpec;
use velo_core::rpc::EthRpc;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    // Generate a random API token for this server session.
    let api_token = {
        use rand::Rng;
        let bytes: [u8; 16] = rand::thread_rng().r#gen();
        hex_encode(bytes)
    };

    let mut chain = ChainSpec::passet_hub();
    chain.rpc_url = args.rpc_url.clone();
    if let Some(chain_id) = args.chain_id {
        chain.chain_id = chain_id;
    }

    // Connect to the RPC endpoint and verify the network identity before
    // starting the server.
    let rpc: Arc<dyn EthRpc> = Arc::new(velo_core::rpc::HttpRpcClient::new(
        &args.rpc_url,
        args.requests_per_second,
    )?);

    let reported_chain_id = rpc.chain_id().await.map_err(|err| {
        let message = format_rpc_connect_error(&args.rpc_url, &err.to_string());
        eyre!(message).wrap_err("while attempting to connect to the RPC endpoint")
    })?;

    if reported_chain_id != chain.chain_id {
        return Err(eyre!(
            "endpoint reports chain id {reported_chain_id}, expected {} for {}; \
             pass --chain-id if this is intentional",
            chain.chain_id,
            chain.name
        ));
    }

    tracing::info!(
        chain = %chain.name,
        chain_id = reported_chain_id,
        contract = %args.contract,
        "connected to RPC endpoint"
    );

    check_wallet_available(rpc.as_ref()).await;

    let state = server::AppState {
        rpc,
        chain,
        contract: args.contract,
        api_token: api_token.clone(),
    };

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let origin = format!("http://{}:{}", args.bind, args.port);
    let router = server::build_router(state, &origin);

    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0 — it is accessible from the network");
    }

    println!();
    println!("  Velo is running:");
    println!("    URL:       http://{bind_addr}?token={api_token}");
    println!();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .await
        .context("run HTTP server")?;

    Ok(())
}

/// Tiny hex-encoding helper to avoid adding a `hex` crate dependency.
fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

/// Best-effort check that the endpoint exposes an unlocked wallet account.
/// Lookups work without one, so a missing wallet is a warning, not an error.
async fn check_wallet_available(rpc: &dyn EthRpc) {
    match rpc.accounts().await {
        Ok(accounts) => match accounts.first() {
            Some(first) => {
                tracing::info!(
                    account = %first,
                    count = accounts.len(),
                    "wallet account available for registrations"
                );
            }
            None => {
                tracing::warn!(
                    "no unlocked wallet account on the RPC endpoint — lookups will work, \
                     but registrations will fail until a wallet is connected"
                );
            }
        },
        Err(e) => {
            // Some hosted endpoints disable eth_accounts entirely.
            tracing::warn!(error = %e, "wallet probe failed; registrations may not work");
        }
    }
}

fn format_rpc_connect_error(rpc_url: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("could not connect to RPC endpoint `{rpc_url}`"),
        format!("RPC error: {source_error}"),
    ];

    if source_error.contains("Could not resolve host") || source_error.contains("dns error") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("tls")
        || source_error.contains("certificate")
        || source_error.contains("SSL")
    {
        lines.push(
            "hint: TLS handshake failed; verify certificate trust and that the endpoint uses HTTPS"
                .into(),
        );
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push("hint: authentication failed; verify any token embedded in the URL".into());
    } else if source_error.contains("404") {
        lines.push("hint: endpoint path is invalid; verify the full RPC URL".into());
    } else if source_error.contains("error sending request for url") {
        lines.push(
            "hint: request could not be sent; verify URL format, network access, and endpoint reachability"
                .into(),
        );
    }

    lines.join("\n")
}
