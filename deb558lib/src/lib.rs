//! deb558lib — decoder for Banco do Brasil DEB558 current-account statement
//! extracts (CNAB-style fixed-width files, 200 characters per record).
//!
//! ```no_run
//! use deb558lib::model::Record;
//!
//! let records = deb558lib::read_file("extrato.ret")?;
//! for record in &records {
//!     if let Record::JournalEntry(entry) = record {
//!         println!("{:?} {}", entry.data_lancamento, entry.valor_lancamento);
//!     }
//! }
//! # Ok::<(), deb558lib::error::Deb558Error>(())
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod model;

pub use config::ParserConfig;
pub use decoder::Parser;
pub use error::{Deb558Error, Result};
pub use model::Record;

use std::path::Path;

/// Reads and decodes an extract file with the default layout.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    Parser::default().parse_file(path)
}

/// Decodes extract text with the default layout.
pub fn parse(source: &str) -> Result<Vec<Record>> {
    Parser::default().parse(source)
}
