pub mod abi;
pub mod chain;
pub mod error;
pub mod registry;
pub mod rpc;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use chain::ChainSpec;
pub use error::CoreError;
pub use types::{BikeRecord, RegistrationEvent};
