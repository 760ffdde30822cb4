use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// File the directory is persisted to, in the working directory. Read once
/// at startup, rewritten wholesale after every change.
pub const STORAGE_FILE: &str = "anesthesia_board_phones.json";

/// Name → phone mapping for the notify action. The only durable entity on
/// the board: everything else resets with the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneDirectory {
    entries: BTreeMap<String, String>,
}

impl PhoneDirectory {
    /// Built-in starter entries used when no stored directory exists.
    pub fn seed() -> Self {
        let entries = [
            ("Dr. Smith", "+15551234567"),
            ("Dr. Jones", "+15559876543"),
            ("Jane Doe", "+15553456789"),
        ]
        .into_iter()
        .map(|(name, phone)| (name.to_string(), phone.to_string()))
        .collect();
        Self { entries }
    }

    /// Loads the directory from `path`, falling back to the seed set when
    /// the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(directory) => directory,
                Err(err) => {
                    warn!("stored phone directory is unreadable, reseeding: {err}");
                    Self::seed()
                }
            },
            Err(_) => Self::seed(),
        }
    }

    /// Writes the whole directory to `path`. Callers treat failure as
    /// non-fatal: the in-memory directory stays authoritative either way.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Imports pasted `Name, Phone` lines. Each non-blank line is split on
    /// commas when it contains one, else on colons; lines with fewer than
    /// two fields, or an empty name or phone, are silently skipped. The
    /// phone is the remaining fields joined back together without the
    /// separator, so stray commas inside a number drop out. Existing names
    /// are overwritten. Returns the count imported; zero means the import
    /// failed as a whole.
    pub fn bulk_import(&mut self, raw: &str) -> usize {
        let mut imported = 0;
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((name, phone)) = split_entry(line) {
                self.entries.insert(name, phone);
                imported += 1;
            }
        }
        imported
    }

    /// Phone on file for a name, if any.
    pub fn phone(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, phone)| (name.as_str(), phone.as_str()))
    }
}

fn split_entry(line: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = if line.contains(',') {
        line.split(',').collect()
    } else {
        line.split(':').collect()
    };
    if parts.len() < 2 {
        return None;
    }
    let name = parts[0].trim();
    let phone = parts[1..].concat().trim().to_string();
    if name.is_empty() || phone.is_empty() {
        return None;
    }
    Some((name.to_string(), phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_parses_comma_separated_lines() {
        let mut directory = PhoneDirectory::default();
        let count = directory.bulk_import("Dr. Smith, 555-1111");
        assert_eq!(count, 1);
        assert_eq!(directory.phone("Dr. Smith"), Some("555-1111"));
    }

    #[test]
    fn import_falls_back_to_colon_separator() {
        let mut directory = PhoneDirectory::default();
        let count = directory.bulk_import("Jane Doe: 555-2222");
        assert_eq!(count, 1);
        assert_eq!(directory.phone("Jane Doe"), Some("555-2222"));
    }

    #[test]
    fn unparseable_lines_are_skipped_without_counting() {
        let mut directory = PhoneDirectory::default();
        let count = directory.bulk_import("no separator here\nDr. Smith, 555-1111\n\n,\n");
        assert_eq!(count, 1);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn extra_commas_fold_into_the_phone() {
        let mut directory = PhoneDirectory::default();
        directory.bulk_import("Dr. Smith, 555,1111");
        assert_eq!(directory.phone("Dr. Smith"), Some("5551111"));
    }

    #[test]
    fn reimport_overwrites_existing_numbers() {
        let mut directory = PhoneDirectory::default();
        directory.bulk_import("Dr. Smith, 555-1111");
        directory.bulk_import("Dr. Smith, 555-9999");
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.phone("Dr. Smith"), Some("555-9999"));
    }

    #[test]
    fn load_seeds_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let directory = PhoneDirectory::load(&dir.path().join("absent.json"));
        assert_eq!(directory, PhoneDirectory::seed());
        assert_eq!(directory.phone("Dr. Smith"), Some("+15551234567"));
    }

    #[test]
    fn load_seeds_when_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(PhoneDirectory::load(&path), PhoneDirectory::seed());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let mut directory = PhoneDirectory::default();
        assert!(directory.is_empty());
        directory.bulk_import("Dr. Smith, 555-1111\nJane Doe: 555-2222");
        directory.save(&path).unwrap();

        assert_eq!(PhoneDirectory::load(&path), directory);
    }
}
