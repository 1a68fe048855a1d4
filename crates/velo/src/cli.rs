use alloy::primitives::Address;
use clap::Parser;

/// Velo — bicycle registry dApp server with embedded web UI.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Ethereum-compatible JSON-RPC URL. Registrations additionally require
    /// the endpoint to expose an unlocked wallet account.
    #[arg(
        long,
        default_value = "https://testnet-passet-hub-eth-rpc.polkadot.io",
        env = "VELO_RPC_URL"
    )]
    pub rpc_url: String,

    /// Address of the deployed bike registry contract.
    #[arg(long, env = "VELO_CONTRACT")]
    pub contract: Address,

    /// Expected chain id; startup fails if the endpoint reports a different
    /// network. Defaults to Paseo PassetHub.
    #[arg(long, env = "VELO_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "3090")]
    pub port: u16,

    /// Rate limit for outbound RPC requests, in requests per second.
    /// Recommended against shared public endpoints.
    #[arg(long)]
    pub requests_per_second: Option<u32>,
}
