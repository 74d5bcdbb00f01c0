//! # Roster
//!
//! Offline upkeep of the record files, for when the server is not the right tool.
//!
//! ## Accounts
//! - The server only lets an admin create accounts, so the very first admin is created here
//! - Same checks as the panel: non-empty fields, role `admin` or `user`, unique username
//!
//! ## Bulk import
//! - Text file, one CPF per line, any punctuation
//! - Each line goes through the same registration as the panel, attributed to `--by`
//! - Duplicates and malformed lines are reported, never fatal
//!
//! ## Notes
//! - Writes straight to the files. Avoid running an import against a directory the
//!   server is writing to at the same moment.
use std::{fs, path::Path};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

pub mod utils;

use registry::{RegistryError, Store, User, register_participant, register_user};
use utils::parse_entries;

#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
    /// (line number, raw text)
    pub invalid: Vec<(usize, String)>,
}

pub fn add_user(store: &Store, username: &str, password: &str, role: &str) -> Result<User> {
    let user = register_user(store, username, password, role)
        .with_context(|| format!("Could not create account {username:?}"))?;

    println!("Created {} account {}", user.role, user.username);

    Ok(user)
}

pub fn import_file(store: &Store, path: &Path, staff: &str) -> Result<ImportSummary> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;

    let entries = parse_entries(&contents);
    println!("Loaded Entries: {}", entries.len());
    println!("Existing Participants: {}\n", store.participants().len());

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let summary = import_entries(store, &entries, staff, &pb)?;
    pb.finish_with_message("Done");

    println!("\nAdded: {}", summary.added);
    println!("Already Authorized: {}", summary.duplicates);
    println!("Invalid: {}", summary.invalid.len());
    for (line, text) in &summary.invalid {
        println!("  line {line}: {text:?}");
    }

    Ok(summary)
}

pub fn import_entries(
    store: &Store,
    entries: &[(usize, &str)],
    staff: &str,
    pb: &ProgressBar,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for &(line, text) in entries {
        pb.set_message(format!("line {line}"));

        match register_participant(store, text, staff) {
            Ok(_) => summary.added += 1,
            Err(RegistryError::DuplicateParticipant) => summary.duplicates += 1,
            Err(RegistryError::InvalidIdentifier) => summary.invalid.push((line, text.to_string())),
            Err(e) => return Err(e.into()),
        }

        pb.inc(1);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use registry::Role;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_import_counts() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path());
        register_participant(&store, "12345678909", "ana").unwrap();

        let entries = vec![
            (1, "123.456.789-09"),
            (2, "111.222.333-44"),
            (3, "1234"),
            (4, "11122233344"),
        ];
        let summary = import_entries(&store, &entries, "roster", &ProgressBar::hidden()).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                added: 1,
                duplicates: 2,
                invalid: vec![(3, "1234".to_string())],
            }
        );
        assert_eq!(store.participants().len(), 2);
        assert_eq!(store.participants()[1].registered_by, "roster");
    }

    #[test]
    fn test_import_file() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("data"));
        let list = dir.path().join("cpfs.txt");
        fs::write(&list, "# batch\n123.456.789-09\n\n111.222.333-44\n").unwrap();

        let summary = import_file(&store, &list, "ana").unwrap();

        assert_eq!(summary.added, 2);
        assert!(summary.invalid.is_empty());
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path());

        assert!(import_file(&store, &dir.path().join("missing.txt"), "ana").is_err());
    }

    #[test]
    fn test_add_user() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path());

        let user = add_user(&store, "admin", "secret", "admin").unwrap();
        assert_eq!(user.role, Role::Admin);

        assert!(add_user(&store, "admin", "other", "user").is_err());
        assert_eq!(store.users().len(), 1);
    }
}
