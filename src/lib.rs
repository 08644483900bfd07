//! Contact Book - local JSON-backed contact manager
//!
//! Contacts live in an ordered list that is rewritten to a JSON file after
//! every change. The interactive menu in [`shell`] drives a [`book::ContactBook`].

pub mod book;
pub mod config;
pub mod contact;
pub mod error;
pub mod shell;
pub mod validate;

pub use error::{Error, Result};
