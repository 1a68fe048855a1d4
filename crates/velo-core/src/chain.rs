//! Static network identity records.
//!
//! A [`ChainSpec`] describes everything the client and UI need to know about
//! the target network: chain id, display name, native currency, default RPC
//! endpoint, and block explorer. Presets mirror the networks the registry
//! contract is deployed on.

use alloy::primitives::B256;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChainSpec {
    pub chain_id: u64,
    pub name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    /// Endpoint URL the client talks to. Never serialized: hosted RPC URLs
    /// commonly embed provider credentials in the path.
    #[serde(skip_serializing)]
    pub rpc_url: String,
    pub explorer_url: Option<String>,
    pub testnet: bool,
}

impl ChainSpec {
    /// The Paseo PassetHub testnet (Polkadot smart-contract testnet with an
    /// Ethereum-compatible RPC frontend).
    pub fn passet_hub() -> Self {
        Self {
            chain_id: 420_420_422,
            name: "Paseo PassetHub".to_owned(),
            currency_symbol: "PAS".to_owned(),
            currency_decimals: 18,
            rpc_url: "https://testnet-passet-hub-eth-rpc.polkadot.io".to_owned(),
            explorer_url: Some(
                "https://blockscout-passet-hub.parity-testnet.parity.io".to_owned(),
            ),
            testnet: true,
        }
    }

    /// Block explorer link for a transaction, if an explorer is configured.
    pub fn tx_url(&self, tx_hash: &B256) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{}/tx/{tx_hash}", base.trim_end_matches('/')))
    }
}
