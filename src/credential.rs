use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
    /// No credential has been stored yet.
    Unconfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reset {
    Changed,
    Denied,
    Unconfigured,
    TooShort,
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.path.exists()
    }

    /// Store `raw` as the new credential. Returns `None` without touching the
    /// file when the password is too short.
    pub fn set_up(&self, raw: &str) -> Result<Option<String>> {
        if !long_enough(raw) {
            return Ok(None);
        }
        let hashed = hash_password(raw);
        self.write(&hashed)?;
        log::info!("credential stored at {}", self.path.display());
        Ok(Some(hashed))
    }

    pub fn verify(&self, raw: &str) -> Result<Access> {
        let Some(saved) = self.read()? else {
            log::warn!("verification attempted with no credential configured");
            return Ok(Access::Unconfigured);
        };
        let access = if hash_password(raw) == saved {
            Access::Granted
        } else {
            Access::Denied
        };
        log::info!("password verification: {access:?}");
        Ok(access)
    }

    pub fn reset(&self, old: &str, new: &str) -> Result<Reset> {
        match self.verify(old)? {
            Access::Granted => {}
            Access::Denied => return Ok(Reset::Denied),
            Access::Unconfigured => return Ok(Reset::Unconfigured),
        }
        if !long_enough(new) {
            return Ok(Reset::TooShort);
        }
        self.write(&hash_password(new))?;
        log::info!("credential reset");
        Ok(Reset::Changed)
    }

    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw.trim().to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read credential at {}", self.path.display())),
        }
    }

    fn write(&self, hashed: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create credential directory {}", parent.display())
            })?;
        }
        fs::write(&self.path, hashed)
            .with_context(|| format!("failed to write credential at {}", self.path.display()))
    }
}

pub fn long_enough(raw: &str) -> bool {
    raw.chars().count() >= MIN_PASSWORD_LEN
}

pub fn hash_password(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(&dir.path().join("password.txt"))
    }

    #[test]
    fn hash_password_is_hex_sha256() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verify_after_set_up_grants_only_the_same_password() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let stored = store.set_up("hunter22").expect("set up").expect("long enough");

        assert_eq!(stored, hash_password("hunter22"));
        assert_eq!(store.verify("hunter22").expect("verify"), Access::Granted);
        assert_eq!(store.verify("hunter2").expect("verify"), Access::Denied);
        assert_eq!(store.verify("HUNTER22").expect("verify"), Access::Denied);
        assert_eq!(store.verify("").expect("verify"), Access::Denied);
    }

    #[test]
    fn set_up_rejects_short_passwords_without_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        assert_eq!(store.set_up("12345").expect("set up"), None);
        assert!(!store.is_configured());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(long_enough("ääääää"));
        assert!(!long_enough("äääää"));
    }

    #[test]
    fn set_up_replaces_previous_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set_up("first-secret").expect("set up");
        store.set_up("second-secret").expect("set up");

        assert_eq!(store.verify("first-secret").expect("verify"), Access::Denied);
        assert_eq!(store.verify("second-secret").expect("verify"), Access::Granted);
    }

    #[test]
    fn verify_without_credential_is_unconfigured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        assert!(!store.is_configured());
        assert_eq!(store.verify("whatever").expect("verify"), Access::Unconfigured);
    }

    #[test]
    fn verify_tolerates_trailing_newline_in_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("password.txt");
        fs::write(&path, format!("{}\n", hash_password("letmein"))).expect("write");

        let store = CredentialStore::new(&path);
        assert_eq!(store.verify("letmein").expect("verify"), Access::Granted);
    }

    #[test]
    fn stored_file_holds_only_the_digest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set_up("plaintext-secret").expect("set up");

        let raw = fs::read_to_string(dir.path().join("password.txt")).expect("read");
        assert_eq!(raw, hash_password("plaintext-secret"));
        assert!(!raw.contains("plaintext-secret"));
    }

    #[test]
    fn reset_with_wrong_old_password_keeps_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set_up("original").expect("set up");

        assert_eq!(
            store.reset("not-the-original", "replacement").expect("reset"),
            Reset::Denied
        );
        assert_eq!(store.verify("original").expect("verify"), Access::Granted);
        assert_eq!(store.verify("replacement").expect("verify"), Access::Denied);
    }

    #[test]
    fn reset_rejects_short_new_password() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set_up("original").expect("set up");

        assert_eq!(store.reset("original", "tiny").expect("reset"), Reset::TooShort);
        assert_eq!(store.verify("original").expect("verify"), Access::Granted);
    }

    #[test]
    fn reset_replaces_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set_up("original").expect("set up");

        assert_eq!(store.reset("original", "replacement").expect("reset"), Reset::Changed);
        assert_eq!(store.verify("original").expect("verify"), Access::Denied);
        assert_eq!(store.verify("replacement").expect("verify"), Access::Granted);
    }

    #[test]
    fn reset_without_credential_is_unconfigured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        assert_eq!(
            store.reset("anything", "replacement").expect("reset"),
            Reset::Unconfigured
        );
        assert!(!store.is_configured());
    }
}
