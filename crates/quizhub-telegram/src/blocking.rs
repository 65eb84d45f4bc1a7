//! Blocking adapter
//!
//! Synchronous call sites (operator scripts, admin-site hooks) drive the
//! async gateway through this single boundary instead of spinning up
//! ad-hoc event loops per call.

use std::future::Future;
use std::io;

use tokio::runtime::Builder;

/// Run a gateway future to completion on a dedicated current-thread
/// runtime.
///
/// # Errors
/// Fails only when the runtime itself cannot be built.
///
/// # Panics
/// Must not be called from within an async context.
pub fn run_blocking<F>(fut: F) -> io::Result<F::Output>
where
    F: Future,
{
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(fut))
}
