//! Registry operations: register a bike, look one up, list registrations.
//!
//! These are thin request/response sequences over [`EthRpc`] — consensus,
//! transaction validity, and state storage all live on the chain. No retries,
//! batching, or ordering guarantees beyond what the underlying call provides.

use alloy::primitives::{Address, B256};
use tracing::{debug, info};

use crate::abi;
use crate::error::CoreError;
use crate::rpc::types::{CallRequest, LogFilter};
use crate::rpc::EthRpc;
use crate::types::{BikeRecord, RegistrationEvent};

/// Register `serial`/`brand` under `owner` on the contract.
///
/// Inputs are trimmed, and empty fields are rejected before any network
/// traffic. The write is simulated with `eth_call` first so a doomed
/// transaction (for instance a duplicate serial) reverts during simulation
/// instead of burning gas, then submitted via the endpoint's wallet.
pub async fn register_bike(
    rpc: &dyn EthRpc,
    contract: Address,
    owner: Address,
    serial: &str,
    brand: &str,
) -> Result<B256, CoreError> {
    let serial = non_empty(serial, "serial")?;
    let brand = non_empty(brand, "brand")?;

    let request = CallRequest::write(owner, contract, abi::register_call_data(serial, brand));

    rpc.call(&request).await?;
    let tx_hash = rpc.send_transaction(&request).await?;

    info!(%tx_hash, serial, brand, %owner, "registration submitted");
    Ok(tx_hash)
}

/// Fetch the ownership record for `serial`.
///
/// The contract reverts with "Bike not registered" for unknown serials; that
/// revert is normalized to [`CoreError::NotRegistered`] so callers can treat
/// it as a not-found condition rather than a failure.
pub async fn lookup_bike(
    rpc: &dyn EthRpc,
    contract: Address,
    serial: &str,
) -> Result<BikeRecord, CoreError> {
    let serial = non_empty(serial, "serial")?;

    let request = CallRequest::read(contract, abi::owner_query_call_data(serial));
    let reply = rpc
        .call(&request)
        .await
        .map_err(|err| normalize_lookup_error(serial, err))?;

    abi::decode_owner_reply(&reply)
}

/// Fetch decoded `BikeRegistered` events, optionally filtered by the indexed
/// owner address. Logs that fail to decode are skipped, not fatal — foreign
/// contracts can emit colliding topics.
pub async fn registration_history(
    rpc: &dyn EthRpc,
    contract: Address,
    owner: Option<Address>,
) -> Result<Vec<RegistrationEvent>, CoreError> {
    let filter = LogFilter::all_history(
        contract,
        vec![Some(abi::registration_topic()), owner.map(abi::owner_topic)],
    );
    let logs = rpc.get_logs(&filter).await?;

    let mut events = Vec::with_capacity(logs.len());
    for log in &logs {
        match abi::decode_registration_event(log) {
            Ok(event) => events.push(event),
            Err(err) => {
                debug!(tx_hash = ?log.transaction_hash, error = %err, "skipping undecodable log");
            }
        }
    }
    Ok(events)
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Map a "not registered" revert to the typed not-found error; everything
/// else (other reverts, transport failures) passes through untouched.
fn normalize_lookup_error(serial: &str, err: CoreError) -> CoreError {
    match err {
        CoreError::Reverted(reason) if reason.to_ascii_lowercase().contains("not registered") => {
            CoreError::NotRegistered(serial.to_owned())
        }
        other => other,
    }
}
