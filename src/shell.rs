//! Interactive menu shell
//!
//! A thin prompt layer over [`ContactBook`]. Input and output are generic so a
//! whole session can be scripted in tests.

use crate::book::{parse_selection, ContactBook, ContactEdit, LoadOutcome};
use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::validate::{validate_email, validate_name, validate_phone, ValidationError};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, warn};

const RULE_WIDTH: usize = 50;
const ENTRY_SEPARATOR_WIDTH: usize = 40;

/// Top-level menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Search,
    Edit,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::View),
            "3" => Some(Self::Search),
            "4" => Some(Self::Edit),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Tell the user how the backing file was loaded
    pub fn report_load(&mut self, path: &Path, outcome: &LoadOutcome) -> Result<()> {
        match outcome {
            LoadOutcome::Missing => writeln!(
                self.output,
                "No existing contact file found. Starting with empty contact list."
            )?,
            LoadOutcome::Loaded(count) => {
                writeln!(self.output, "Loaded {} contacts from {}", count, path.display())?
            }
            LoadOutcome::Corrupt(reason) => {
                writeln!(self.output, "Error loading contacts: {}", reason)?
            }
        }
        Ok(())
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self, book: &mut ContactBook) -> Result<()> {
        loop {
            self.print_menu()?;

            let line = match self.prompt("Enter your choice (1-6): ") {
                Ok(line) => line,
                Err(Error::InputClosed) => {
                    writeln!(self.output, "\n\nProgram interrupted. Goodbye!")?;
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "reading menu choice failed");
                    writeln!(self.output, "An error occurred: {}", e)?;
                    continue;
                }
            };

            let result = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "\nThank you for using Contact Manager!")?;
                    return Ok(());
                }
                Some(choice) => self.dispatch(choice, book),
                None => {
                    writeln!(self.output, "Invalid choice. Please enter 1-6.")?;
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(Error::InputClosed) => {
                    writeln!(self.output, "\n\nProgram interrupted. Goodbye!")?;
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "menu action failed");
                    writeln!(self.output, "An error occurred: {}", e)?;
                }
            }
        }
    }

    /// Run a single menu action
    pub fn dispatch(&mut self, choice: MenuChoice, book: &mut ContactBook) -> Result<()> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::Add => self.add_contact(book),
            MenuChoice::View => self.view_contacts(book),
            MenuChoice::Search => self.search_contacts(book).map(|_| ()),
            MenuChoice::Edit => self.edit_contact(book),
            MenuChoice::Delete => self.delete_contact(book),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "           CONTACT MANAGER")?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "1. Add Contact")?;
        writeln!(self.output, "2. View All Contacts")?;
        writeln!(self.output, "3. Search Contacts")?;
        writeln!(self.output, "4. Edit Contact")?;
        writeln!(self.output, "5. Delete Contact")?;
        writeln!(self.output, "6. Exit")?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }

    pub fn add_contact(&mut self, book: &mut ContactBook) -> Result<()> {
        writeln!(self.output, "\n--- Add New Contact ---")?;

        let (name, overwrite) = loop {
            let raw = self.prompt("Enter name: ")?;
            let name = match validate_name(&raw) {
                Ok(name) => name.to_string(),
                Err(e) => {
                    writeln!(self.output, "{}. Please try again.", e)?;
                    continue;
                }
            };
            if !book.find_name(&name) {
                break (name, false);
            }
            let answer =
                self.prompt(&format!("Contact '{}' already exists. Overwrite? (y/n): ", name))?;
            if is_yes(&answer) {
                break (name, true);
            }
        };

        let phone = self.prompt_until("Enter phone number: ", validate_phone)?;
        let email = self.prompt_until("Enter email address: ", validate_email)?;

        let saved = match book.add(Contact::new(&name, &phone, &email), overwrite) {
            Ok(_) => Ok(()),
            Err(e) if is_save_error(&e) => Err(e),
            Err(e) => return Err(e),
        };
        writeln!(self.output, "\nContact '{}' added successfully!", name)?;
        self.report_save(book.path(), saved)
    }

    pub fn view_contacts(&mut self, book: &ContactBook) -> Result<()> {
        if book.is_empty() {
            writeln!(self.output, "\nNo contacts found.")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- Contact List ({} contacts) ---", book.len())?;
        for (index, contact) in book.listing() {
            writeln!(self.output, "\n{}. {}", index, contact)?;
            writeln!(self.output, "{}", "-".repeat(ENTRY_SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    /// Prompt for a search term and print the matches. Returns the match count.
    pub fn search_contacts(&mut self, book: &ContactBook) -> Result<usize> {
        if book.is_empty() {
            writeln!(self.output, "\nNo contacts to search.")?;
            return Ok(0);
        }

        let term = self.prompt("Enter name to search: ")?;
        if term.is_empty() {
            return Ok(0);
        }
        self.show_matches(book, &term)
    }

    /// Print the contacts matching `term`
    pub fn show_matches(&mut self, book: &ContactBook, term: &str) -> Result<usize> {
        let matches = book.search(term);
        if matches.is_empty() {
            writeln!(self.output, "No contacts found matching your search.")?;
            return Ok(0);
        }

        writeln!(self.output, "\n--- Search Results ({} found) ---", matches.len())?;
        for (i, contact) in matches.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, contact)?;
            writeln!(self.output, "{}", "-".repeat(ENTRY_SEPARATOR_WIDTH))?;
        }
        Ok(matches.len())
    }

    pub fn edit_contact(&mut self, book: &mut ContactBook) -> Result<()> {
        if book.is_empty() {
            writeln!(self.output, "\nNo contacts to edit.")?;
            return Ok(());
        }

        self.view_contacts(book)?;
        let Some(index) = self.select(book, "edit")? else {
            return Ok(());
        };
        let Some(current) = book.get(index).cloned() else {
            return Ok(());
        };

        writeln!(self.output, "\nEditing contact: {}", current.name)?;
        writeln!(self.output, "\nPress Enter to keep current value:")?;

        let name = self.prompt(&format!("Name ({}): ", current.name))?;
        let phone = self.prompt_optional(
            &format!("Phone ({}): ", current.phone),
            validate_phone,
            "Invalid phone number. Keeping original.",
        )?;
        let email = self.prompt_optional(
            &format!("Email ({}): ", current.email),
            validate_email,
            "Invalid email format. Keeping original.",
        )?;

        let edit = ContactEdit {
            name: Some(name),
            phone,
            email,
        };
        let saved = match book.edit(index, edit) {
            Ok(_) => Ok(()),
            Err(e) if is_save_error(&e) => Err(e),
            Err(e) => return Err(e),
        };
        writeln!(self.output, "Contact updated successfully!")?;
        self.report_save(book.path(), saved)
    }

    pub fn delete_contact(&mut self, book: &mut ContactBook) -> Result<()> {
        if book.is_empty() {
            writeln!(self.output, "\nNo contacts to delete.")?;
            return Ok(());
        }

        self.view_contacts(book)?;
        let Some(index) = self.select(book, "delete")? else {
            return Ok(());
        };
        let Some(name) = book.get(index).map(|c| c.name.clone()) else {
            return Ok(());
        };

        let answer = self.prompt(&format!(
            "Are you sure you want to delete '{}'? (y/n): ",
            name
        ))?;
        if !is_yes(&answer) {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(());
        }

        let saved = match book.delete(index) {
            Ok(_) => Ok(()),
            Err(e) if is_save_error(&e) => Err(e),
            Err(e) => return Err(e),
        };
        writeln!(self.output, "Contact '{}' deleted successfully!", name)?;
        self.report_save(book.path(), saved)
    }

    /// Ask for a 1-based contact number. Bad input is reported and yields `None`.
    fn select(&mut self, book: &ContactBook, action: &str) -> Result<Option<usize>> {
        let line = self.prompt(&format!(
            "\nEnter contact number to {} (1-{}): ",
            action,
            book.len()
        ))?;
        match parse_selection(&line, book.len()) {
            Ok(index) => Ok(Some(index)),
            Err(Error::NotANumber(_)) => {
                writeln!(self.output, "Please enter a valid number.")?;
                Ok(None)
            }
            Err(Error::InvalidSelection { .. }) => {
                writeln!(self.output, "Invalid contact number.")?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn report_save(&mut self, path: &Path, saved: Result<()>) -> Result<()> {
        match saved {
            Ok(()) => writeln!(self.output, "Contacts saved to {}", path.display())?,
            Err(e) => {
                warn!(error = %e, "save failed");
                writeln!(self.output, "Error saving contacts: {}", e)?
            }
        }
        Ok(())
    }

    /// Read one trimmed line. End of input is [`Error::InputClosed`].
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Re-prompt until `validate` accepts the input
    fn prompt_until<F>(&mut self, label: &str, validate: F) -> Result<String>
    where
        F: Fn(&str) -> std::result::Result<&str, ValidationError>,
    {
        loop {
            let line = self.prompt(label)?;
            match validate(&line) {
                Ok(value) => return Ok(value.to_string()),
                Err(e) => writeln!(self.output, "{}. Please try again.", e)?,
            }
        }
    }

    /// Prompt once; empty keeps the current value, invalid input prints `notice`
    /// and also keeps it.
    fn prompt_optional<F>(
        &mut self,
        label: &str,
        validate: F,
        notice: &str,
    ) -> Result<Option<String>>
    where
        F: Fn(&str) -> std::result::Result<&str, ValidationError>,
    {
        let line = self.prompt(label)?;
        if line.is_empty() {
            return Ok(None);
        }
        match validate(&line) {
            Ok(value) => Ok(Some(value.to_string())),
            Err(_) => {
                writeln!(self.output, "{}", notice)?;
                Ok(None)
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

fn is_save_error(e: &Error) -> bool {
    matches!(e, Error::Io(_) | Error::Json(_))
}
