//! Encrypting and decrypting a whole journal.
//!
//! Both directions work on the full journal, never on a filtered view.
//! An in-place transition also records the new state in the config.

use std::io::IsTerminal;

use logbook_core::transition::{transition, TransitionReport};
use logbook_core::{AgeCodec, PlainCodec, Target};

use crate::app::{open_journal, AppContext};
use crate::config::write_config;
use crate::helpers::{confirm, env_passphrase, prompt_new_passphrase};
use crate::security::Keychain;

pub fn handle_encrypt(ctx: &mut AppContext, target: &Target) -> anyhow::Result<()> {
    let journal = open_journal(&ctx.settings)?;
    let passphrase = prompt_new_passphrase()?;

    let report = transition(
        &journal,
        Box::new(AgeCodec::new(passphrase.as_str())),
        target.path(),
    )?;
    eprintln!("{}", report.message());

    if report.in_place {
        record_encrypt_flag(ctx, &report)?;
        offer_keychain(&ctx.settings.name, &passphrase)?;
    }
    Ok(())
}

pub fn handle_decrypt(ctx: &mut AppContext, target: &Target) -> anyhow::Result<()> {
    let journal = open_journal(&ctx.settings)?;

    let report = transition(&journal, Box::new(PlainCodec), target.path())?;
    eprintln!("{}", report.message());

    if report.in_place {
        record_encrypt_flag(ctx, &report)?;
        if let Err(err) = Keychain::for_journal(&ctx.settings.name).clear() {
            tracing::debug!(error = %err, "could not clear keychain entry");
        }
    }
    Ok(())
}

fn record_encrypt_flag(ctx: &mut AppContext, report: &TransitionReport) -> anyhow::Result<()> {
    let name = ctx.settings.name.clone();
    ctx.config.set_journal_encrypt(&name, report.encrypted)?;
    write_config(&ctx.config_path, &ctx.config)?;
    ctx.settings.encrypt = report.encrypted;
    Ok(())
}

fn offer_keychain(journal: &str, passphrase: &str) -> anyhow::Result<()> {
    // Passphrases supplied through the environment stay there
    if env_passphrase().is_some() || !std::io::stdin().is_terminal() {
        return Ok(());
    }
    if confirm("Store the passphrase in your keychain?", true)? {
        match Keychain::for_journal(journal).store(passphrase) {
            Ok(()) => eprintln!("[Passphrase stored in keychain]"),
            Err(err) => eprintln!("Warning: {}", err),
        }
    }
    Ok(())
}
