#![allow(missing_docs)]

use anyhow::{Context, anyhow};
use stain_cli::report::error_hints;
use stain_core::{EstimateError, SessionError};
use stain_persistence::PersistenceError;

#[test]
fn test_session_error_gives_user_message() {
    let result: Result<(), SessionError> =
        Err(SessionError::Estimate(EstimateError::InsufficientSamples));
    let error = result.context("Estimation failed").unwrap_err();

    assert_eq!(
        error_hints(&error),
        vec!["Choose at least one sample point.".to_string()]
    );
}

#[test]
fn test_history_error_gives_message_and_suggestion() {
    let result: Result<(), PersistenceError> = Err(PersistenceError::NoDataDir);
    let error = result.context("Failed to save history").unwrap_err();

    let hints = error_hints(&error);
    assert_eq!(hints.len(), 2);
    assert_eq!(hints[0], PersistenceError::NoDataDir.user_message());
    assert!(hints[1].contains("--history-file"));
}

#[test]
fn test_history_error_without_suggestion() {
    let error = anyhow::Error::new(PersistenceError::Interrupted {
        reason: "task cancelled".to_string(),
    });

    assert_eq!(
        error_hints(&error),
        vec!["The history operation was interrupted.".to_string()]
    );
}

#[test]
fn test_other_errors_give_no_hints() {
    let error = anyhow!("Empty sweep range");
    assert!(error_hints(&error).is_empty());
}
