//! Run-to-completion adapter behind the synchronous façades.
//!
//! Every blocking call gets its own current-thread runtime, which is dropped
//! as soon as the call settles. No scheduler is shared between concurrent
//! blocking callers.

use std::future::Future;
use std::panic;
use std::thread;

use tokio::runtime::{Builder, Handle};

use crate::error::ApiError;

/// Drives `future` to completion on a fresh single-threaded runtime.
///
/// A thread that has entered a tokio runtime cannot start a second one, so
/// in that case the future is moved to a scoped helper thread and the caller
/// waits for it there.
pub fn run_to_completion<F, T>(future: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>> + Send,
    T: Send,
{
    if Handle::try_current().is_err() {
        return block_on_fresh_runtime(future);
    }

    thread::scope(|scope| {
        scope
            .spawn(|| block_on_fresh_runtime(future))
            .join()
            .unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}

fn block_on_fresh_runtime<F, T>(future: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ApiError::Runtime)?;
    runtime.block_on(future)
}
