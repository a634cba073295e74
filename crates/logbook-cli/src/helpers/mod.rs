//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Passphrase prompting and entry text acquisition (`input`)
//! - Launching the configured editor (`editor`)
//! - Date parsing for filter flags (`parsing`)

mod editor;
mod input;
mod parsing;

// Re-export public API
pub use editor::ExternalEditor;
pub use input::{
    confirm, env_passphrase, prompt_new_passphrase, prompt_passphrase,
    read_entry_text,
};
pub use parsing::parse_date;
