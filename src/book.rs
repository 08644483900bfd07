//! Contact book - ordered collection of contacts persisted as a JSON array

use crate::config::Config;
use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::validate::{validate_email, validate_name, validate_phone, ValidationError};
use std::fs;
use std::io::Write;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// What happened when the backing file was read
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No file yet; the book starts empty
    Missing,
    /// File parsed; holds the number of contacts read
    Loaded(usize),
    /// File exists but could not be parsed; the book was reset to empty
    Corrupt(String),
}

/// Replacement values for an edit. `None` or an empty string keeps the field.
#[derive(Debug, Clone, Default)]
pub struct ContactEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Result of applying a [`ContactEdit`]
#[derive(Debug, Clone, PartialEq)]
pub struct EditReport {
    pub contact: Contact,
    /// Fields that were supplied but failed validation and were left as-is
    pub rejected: Vec<ValidationError>,
}

pub struct ContactBook {
    path: PathBuf,
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.contacts_file.clone(),
            contacts: Vec::new(),
        }
    }

    /// Create a book and load it from the configured file
    pub fn open(config: &Config) -> Result<(Self, LoadOutcome)> {
        let mut book = Self::new(config);
        let outcome = book.load()?;
        Ok((book, outcome))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load contacts from disk.
    ///
    /// Unparseable content (bad JSON, a record missing a key) resets the book
    /// to empty and is reported through [`LoadOutcome::Corrupt`]; the file is
    /// left untouched until the next save. Field values are not re-validated.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        if !self.path.exists() {
            self.contacts = Vec::new();
            debug!(path = %self.path.display(), "no contact file, starting empty");
            return Ok(LoadOutcome::Missing);
        }

        // Bytes, not a String: bad encoding is corrupt content, not an IO failure
        let content = fs::read(&self.path)?;
        match serde_json::from_slice::<Vec<Contact>>(&content) {
            Ok(contacts) => {
                self.contacts = contacts;
                let count = self.contacts.len();
                info!(count, path = %self.path.display(), "loaded contacts");
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                self.contacts = Vec::new();
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "contact file unreadable, starting empty"
                );
                Ok(LoadOutcome::Corrupt(e.to_string()))
            }
        }
    }

    /// Save the whole book to disk atomically
    pub fn save(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // Write to temp file in same directory (for atomic rename)
        let mut temp = NamedTempFile::new_in(parent)?;

        let json = serde_json::to_string_pretty(&self.contacts)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        debug!(count = self.contacts.len(), path = %self.path.display(), "saved contacts");
        Ok(())
    }

    /// Whether a contact with this name exists (case-insensitive)
    pub fn find_name(&self, name: &str) -> bool {
        self.contacts.iter().any(|c| c.name_matches(name))
    }

    /// Append a contact after validating every field.
    ///
    /// An existing case-insensitive name match is an error unless `overwrite`
    /// is set, in which case every matching record is removed first. Returns
    /// the number of records replaced. The in-memory change stands even when
    /// the save fails.
    pub fn add(&mut self, contact: Contact, overwrite: bool) -> Result<usize> {
        validate_name(&contact.name)?;
        validate_phone(&contact.phone)?;
        validate_email(&contact.email)?;

        let before = self.contacts.len();
        if self.find_name(&contact.name) {
            if !overwrite {
                return Err(Error::DuplicateName(contact.name));
            }
            self.contacts.retain(|c| !c.name_matches(&contact.name));
        }
        let replaced = before - self.contacts.len();

        info!(name = %contact.name, replaced, "adding contact");
        self.contacts.push(contact);
        self.save()?;
        Ok(replaced)
    }

    /// Contacts whose name contains `term`, case-insensitively, in book order.
    /// An empty term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&Contact> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Apply an edit to the contact at 1-based `index`.
    ///
    /// Name is taken as-is when non-empty, with no duplicate check. Phone and
    /// email must validate, otherwise they are kept and listed in
    /// [`EditReport::rejected`].
    pub fn edit(&mut self, index: usize, edit: ContactEdit) -> Result<EditReport> {
        let pos = self.position(index)?;
        let mut rejected = Vec::new();
        let contact = &mut self.contacts[pos];

        if let Some(name) = non_empty(edit.name.as_deref()) {
            contact.name = name.to_string();
        }

        if let Some(phone) = non_empty(edit.phone.as_deref()) {
            match validate_phone(phone) {
                Ok(phone) => contact.phone = phone.to_string(),
                Err(e) => rejected.push(e),
            }
        }

        if let Some(email) = non_empty(edit.email.as_deref()) {
            match validate_email(email) {
                Ok(email) => contact.email = email.to_string(),
                Err(e) => rejected.push(e),
            }
        }

        let contact = contact.clone();
        info!(index, name = %contact.name, rejected = rejected.len(), "edited contact");
        self.save()?;
        Ok(EditReport { contact, rejected })
    }

    /// Remove the contact at 1-based `index`
    pub fn delete(&mut self, index: usize) -> Result<Contact> {
        let pos = self.position(index)?;
        let removed = self.contacts.remove(pos);
        info!(index, name = %removed.name, "deleted contact");
        self.save()?;
        Ok(removed)
    }

    /// Contact at 1-based `index`
    pub fn get(&self, index: usize) -> Option<&Contact> {
        index.checked_sub(1).and_then(|pos| self.contacts.get(pos))
    }

    /// `(1-based index, contact)` pairs in book order
    pub fn listing(&self) -> impl Iterator<Item = (usize, &Contact)> {
        self.contacts.iter().enumerate().map(|(i, c)| (i + 1, c))
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.contacts.len() {
            return Err(Error::InvalidSelection {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.contacts.len(),
            });
        }
        Ok(index - 1)
    }
}

/// Parse a 1-based selection typed by the user.
///
/// Anything integer-shaped is a number, so negative and oversized values are
/// out of range rather than [`Error::NotANumber`].
pub fn parse_selection(input: &str, len: usize) -> Result<usize> {
    let input = input.trim();
    let index = match input.parse::<i64>() {
        Ok(index) => index,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return Err(Error::NotANumber(input.to_string())),
        },
    };
    match usize::try_from(index) {
        Ok(selected) if (1..=len).contains(&selected) => Ok(selected),
        _ => Err(Error::InvalidSelection { index, len }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
