//! Layout constants of the DEB558 extract and the parser configuration built on them.

use crate::{
    error::{Deb558Error, Result},
    layout::{self, Shape},
};

/// Width of every record, trailing sequence number included.
pub const BLOCK_SIZE: usize = 200;

/// Offset of the record kind discriminant.
pub const RECORD_ID_POSITION: usize = 0;
/// Offset of the detail sub-type discriminant.
pub const RECORD_TYPE_POSITION: usize = 41;

pub const HEADER_RECORD_ID: char = '0';
pub const DETAIL_RECORD_ID: char = '1';
pub const TRAILER_RECORD_ID: char = '9';

pub const PREVIOUS_BALANCE_RECORD_TYPE: char = '0';
pub const JOURNAL_ENTRY_RECORD_TYPE: char = '1';
pub const CURRENT_BALANCE_RECORD_TYPE: char = '2';

/// How input bytes become characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputEncoding {
    /// UTF-8 when the whole input is valid UTF-8, Latin-1 otherwise. A
    /// Latin-1 extract whose byte pairs happen to form valid UTF-8
    /// (`0xC3 0xA9`) is misread as UTF-8 and its offsets shift.
    #[default]
    Detect,
    /// One byte per character, always.
    Latin1,
}

/// Parser settings. `Default` reproduces the bank layout; every value can be
/// overridden to test the decoder against a different geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub block_size: usize,
    pub record_id_position: usize,
    pub record_type_position: usize,
    pub header_record_id: char,
    pub detail_record_id: char,
    pub trailer_record_id: char,
    pub previous_balance_record_type: char,
    pub journal_entry_record_type: char,
    pub current_balance_record_type: char,
    /// Reject non-numeric integer fields instead of reading them as zero.
    pub strict_integers: bool,
    pub encoding: InputEncoding,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            record_id_position: RECORD_ID_POSITION,
            record_type_position: RECORD_TYPE_POSITION,
            header_record_id: HEADER_RECORD_ID,
            detail_record_id: DETAIL_RECORD_ID,
            trailer_record_id: TRAILER_RECORD_ID,
            previous_balance_record_type: PREVIOUS_BALANCE_RECORD_TYPE,
            journal_entry_record_type: JOURNAL_ENTRY_RECORD_TYPE,
            current_balance_record_type: CURRENT_BALANCE_RECORD_TYPE,
            strict_integers: false,
            encoding: InputEncoding::Detect,
        }
    }
}

impl ParserConfig {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_strict_integers(mut self, strict: bool) -> Self {
        self.strict_integers = strict;
        self
    }

    pub fn with_encoding(mut self, encoding: InputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_record_ids(mut self, header: char, detail: char, trailer: char) -> Self {
        self.header_record_id = header;
        self.detail_record_id = detail;
        self.trailer_record_id = trailer;
        self
    }

    pub fn with_detail_types(mut self, previous: char, journal: char, current: char) -> Self {
        self.previous_balance_record_type = previous;
        self.journal_entry_record_type = journal;
        self.current_balance_record_type = current;
        self
    }

    /// Checks that both discriminants and every catalog field fit in a block
    /// and that discriminant values are distinct at each level.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Deb558Error::InvalidConfig("block size must be positive".into()));
        }
        for (name, pos) in [
            ("record id position", self.record_id_position),
            ("record type position", self.record_type_position),
        ] {
            if pos >= self.block_size {
                return Err(Deb558Error::InvalidConfig(format!(
                    "{name} {pos} is outside a {}-character block",
                    self.block_size
                )));
            }
        }

        let kinds = [self.header_record_id, self.detail_record_id, self.trailer_record_id];
        let types = [
            self.previous_balance_record_type,
            self.journal_entry_record_type,
            self.current_balance_record_type,
        ];
        if has_duplicates(&kinds) {
            return Err(Deb558Error::InvalidConfig(format!("record ids are not distinct: {kinds:?}")));
        }
        if has_duplicates(&types) {
            return Err(Deb558Error::InvalidConfig(format!("detail types are not distinct: {types:?}")));
        }

        for shape in Shape::ALL {
            if let Some(field) = layout::fields(shape).iter().find(|f| f.end >= self.block_size) {
                return Err(Deb558Error::InvalidConfig(format!(
                    "{shape} field {} ends at {} beyond a {}-character block",
                    field.name, field.end, self.block_size
                )));
            }
        }
        Ok(())
    }
}

fn has_duplicates(values: &[char; 3]) -> bool {
    values[0] == values[1] || values[0] == values[2] || values[1] == values[2]
}
