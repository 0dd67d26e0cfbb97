//! Contains the definition of [`Abort`].

/// A compilation stage met input it can't make sense of and stopped working on
/// the current program.
///
/// Whoever returns [`Abort`] must already have reported a diagnostic through
/// the stage's handler explaining why; the value itself carries nothing. The
/// driver reacts by skipping the remaining stages of that program and moving
/// on to the next one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    thiserror::Error,
)]
#[error("the program could not be compiled past this stage")]
pub struct Abort;
