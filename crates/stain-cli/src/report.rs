//! User-facing hints for errors that reach the top of a command.

use stain_core::SessionError;
use stain_persistence::PersistenceError;

/// Friendly messages and suggestions carried by the error chain.
///
/// The first session or history error found in the chain supplies them;
/// other errors yield nothing.
pub fn error_hints(error: &anyhow::Error) -> Vec<String> {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<SessionError>() {
            return vec![err.user_message()];
        }
        if let Some(err) = cause.downcast_ref::<PersistenceError>() {
            return std::iter::once(err.user_message())
                .chain(err.suggestion())
                .collect();
        }
    }
    Vec::new()
}
