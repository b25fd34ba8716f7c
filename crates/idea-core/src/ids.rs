//! ID prefix constants and generation.
//!
//! IDs are `{prefix}-{16 hex chars}`, e.g. `"idea-3f9a0c12b4d5e6f7"`. The random
//! part comes from the OS RNG so both backends can mint IDs client-side.

use crate::errors::CoreError;

/// Prefix for idea IDs.
pub const PREFIX_IDEA: &str = "idea";

/// Number of random bytes in an ID (rendered as twice as many hex chars).
const ID_RANDOM_BYTES: usize = 8;

/// Generate a prefixed random ID.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; ID_RANDOM_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("failed to generate id: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}
