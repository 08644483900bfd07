//! Contact Book CLI
//!
//! Runs the interactive menu by default; subcommands cover one-shot use.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use contact_book::book::{ContactBook, LoadOutcome};
use contact_book::config::Config;
use contact_book::contact::Contact;
use contact_book::shell::Shell;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Contact Book - manage contacts stored in a JSON file
#[derive(Parser)]
#[command(name = "contact-book")]
#[command(about = "Create, list, search, edit and delete contacts")]
struct Cli {
    /// Backing JSON file (default: $CONTACT_BOOK_FILE or ./contacts.json)
    #[arg(short = 'f', long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// List all contacts
    List,

    /// Search contacts by name
    Search {
        /// Case-insensitive substring of the name
        term: String,
    },

    /// Add a contact
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        /// Replace existing contacts with the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// Delete a contact by its list number
    Delete {
        /// 1-based contact number, as shown by `list`
        index: usize,

        /// Confirm the deletion
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match cli.file {
        Some(path) => Config::with_file(path)?,
        None => Config::from_env()?,
    };

    let (mut book, outcome) = ContactBook::open(&config)
        .with_context(|| format!("opening {}", config.contacts_file.display()))?;
    info!(path = %book.path().display(), ?outcome, "contact book opened");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => cmd_shell(&mut book, &outcome),
        Commands::List => cmd_list(&book, &outcome),
        Commands::Search { term } => cmd_search(&book, &outcome, &term),
        Commands::Add {
            name,
            phone,
            email,
            overwrite,
        } => cmd_add(&mut book, &name, &phone, &email, overwrite),
        Commands::Delete { index, yes } => cmd_delete(&mut book, index, yes),
    }
}

fn cmd_shell(book: &mut ContactBook, outcome: &LoadOutcome) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout());
    shell.report_load(book.path(), outcome)?;
    shell.run(book)?;
    Ok(())
}

fn cmd_list(book: &ContactBook, outcome: &LoadOutcome) -> anyhow::Result<()> {
    warn_if_corrupt(outcome);
    let mut shell = Shell::new(io::empty(), io::stdout());
    shell.view_contacts(book)?;
    Ok(())
}

fn cmd_search(book: &ContactBook, outcome: &LoadOutcome, term: &str) -> anyhow::Result<()> {
    warn_if_corrupt(outcome);
    if term.trim().is_empty() {
        return Ok(());
    }
    let mut shell = Shell::new(io::empty(), io::stdout());
    shell.show_matches(book, term)?;
    Ok(())
}

fn cmd_add(
    book: &mut ContactBook,
    name: &str,
    phone: &str,
    email: &str,
    overwrite: bool,
) -> anyhow::Result<()> {
    let contact = Contact::new(name, phone, email);
    let replaced = book.add(contact, overwrite)?;

    let mut out = io::stdout();
    if replaced > 0 {
        writeln!(out, "Replaced {} existing contact(s) named '{}'", replaced, name.trim())?;
    }
    writeln!(out, "Contact '{}' added successfully!", name.trim())?;
    Ok(())
}

fn cmd_delete(book: &mut ContactBook, index: usize, yes: bool) -> anyhow::Result<()> {
    let Some(contact) = book.get(index) else {
        bail!(contact_book::Error::InvalidSelection {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: book.len()
        });
    };
    if !yes {
        bail!("refusing to delete '{}' without --yes", contact.name);
    }

    let removed = book.delete(index)?;
    writeln!(io::stdout(), "Contact '{}' deleted successfully!", removed.name)?;
    Ok(())
}

fn warn_if_corrupt(outcome: &LoadOutcome) {
    if let LoadOutcome::Corrupt(reason) = outcome {
        warn!(%reason, "contact file could not be parsed");
        eprintln!("Error loading contacts: {}", reason);
    }
}
