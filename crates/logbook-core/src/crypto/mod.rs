//! Passphrase policy.
//!
//! The encryption itself lives in [`crate::storage::encryption`]; this
//! module only decides what counts as an acceptable new passphrase.

pub mod passphrase;

pub use passphrase::{validate_passphrase, weakness, Weakness};
