//! Blob encoding of the finance state.
//!
//! The blob is the JSON form of `FinanceState`. Amounts are written as
//! decimal strings, dates as ISO-8601, so a decode of an encode yields an
//! equal state.

use barrkeh_core::{FinanceState, STATE_VERSION};

use crate::error::{StoreError, StoreResult};

/// Encodes a state into its blob.
pub fn encode(state: &FinanceState) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(state)?)
}

/// Decodes a blob, rejecting layouts newer than this build understands and
/// content that breaks a bookkeeping invariant.
pub fn decode(bytes: &[u8]) -> StoreResult<FinanceState> {
    let state: FinanceState = serde_json::from_slice(bytes)?;
    if state.version > STATE_VERSION {
        return Err(StoreError::Serialization(format!(
            "blob version {} is newer than supported version {STATE_VERSION}",
            state.version
        )));
    }
    state
        .validate()
        .map_err(|err| StoreError::Serialization(format!("blob rejected: {err}")))?;
    Ok(state)
}
