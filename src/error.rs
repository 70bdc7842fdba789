//! Build-time failures for the MPH engine.
//!
//! Duplicate keys and an unconverged FKS bucket search must be reported,
//! never silently papered over. Since each key set's MPH is built lazily on
//! first use rather than up front, `try_build` surfaces them as an ordinary
//! `Result`. The convenience path used by `key_set!`/`dispatch_factory!`
//! (`Mph::build`) panics instead, since there is no caller in that path able
//! to do anything with an `Err` other than abort program start.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MphError {
    #[error("key set is empty")]
    EmptyKeySet,
    #[error("duplicate key detected while building the key set")]
    DuplicateKey,
    #[error("FKS bucket {bucket} did not converge on a collision-free multiplier within {attempts} attempts")]
    BucketSearchExhausted { bucket: usize, attempts: u32 },
}
