//! OS keychain access for journal passphrases.
//!
//! One entry per journal: service `logbook`, account = journal name.

use zeroize::Zeroizing;

use crate::constants::KEYCHAIN_SERVICE;

/// Keychain slot holding one journal's passphrase.
pub struct Keychain<'a> {
    journal: &'a str,
}

impl<'a> Keychain<'a> {
    pub fn for_journal(journal: &'a str) -> Self {
        Self { journal }
    }

    /// The stored passphrase, or `None` when nothing is stored.
    pub fn load(&self) -> anyhow::Result<Option<Zeroizing<String>>> {
        match self.entry()?.get_password() {
            Ok(value) => Ok(Some(Zeroizing::new(value))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(self.failed("read", err)),
        }
    }

    pub fn store(&self, passphrase: &str) -> anyhow::Result<()> {
        self.entry()?
            .set_password(passphrase)
            .map_err(|err| self.failed("write", err))
    }

    /// Remove the stored passphrase; a missing entry is not an error.
    pub fn clear(&self) -> anyhow::Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(self.failed("delete", err)),
        }
    }

    fn entry(&self) -> anyhow::Result<keyring::Entry> {
        keyring::Entry::new(KEYCHAIN_SERVICE, self.journal)
            .map_err(|err| self.failed("lookup", err))
    }

    fn failed(&self, action: &str, err: keyring::Error) -> anyhow::Error {
        anyhow::anyhow!(
            "Keychain {} failed for journal '{}': {}",
            action,
            self.journal,
            err
        )
    }
}
