//! OAuth `state` tokens
//!
//! A server-generated token is stored in the authentication session before
//! redirecting to the provider and compared on callback; a mismatch is a
//! hard failure.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

use quizhub_core::DomainError;

/// Generate a fresh random state token (URL-safe base64, 32 random bytes).
#[must_use]
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compare the stored state with the callback value.
///
/// # Errors
/// `StateMismatch` when the values differ or either is empty.
pub fn validate_state(expected: &str, received: &str) -> Result<(), DomainError> {
    if expected.is_empty() || received.is_empty() || expected != received {
        return Err(DomainError::StateMismatch);
    }
    Ok(())
}
