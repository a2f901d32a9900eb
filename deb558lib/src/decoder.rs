//! Block decoder: normalize → segment → classify → decode.
//!
//! Every step works on characters, not bytes. Line breaks are dropped in
//! memory; the source file is never rewritten.

use crate::{
    config::{InputEncoding, ParserConfig},
    error::{Deb558Error, Result},
    layout::{self, FieldKind, FieldSpec, Layout, Shape},
    model::{Fields, Record, Value},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::{fs, io::Read, path::Path};
use tracing::{debug, info, trace, warn};

/// One fixed-width record of the input.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub index: usize,
    chars: &'a [char],
}

impl<'a> Block<'a> {
    pub fn new(index: usize, chars: &'a [char]) -> Self {
        Self { index, chars }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn at(&self, pos: usize) -> Result<char> {
        self.chars.get(pos).copied().ok_or_else(|| {
            Deb558Error::InvalidConfig(format!("position {pos} is outside a {}-character block", self.len()))
        })
    }

    /// Characters `start..=end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.chars
            .get(start..=end)
            .map(|s| s.iter().collect())
            .ok_or_else(|| {
                Deb558Error::InvalidConfig(format!(
                    "range {start}..={end} is outside a {}-character block",
                    self.len()
                ))
            })
    }
}

/// Decodes DEB558 extracts with a fixed configuration. Holds no state
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let path = path.as_ref();
        info!("reading extract {}", path.display());
        self.parse_bytes(fs::read(path)?)
    }

    pub fn read<R: Read>(&self, mut r: R) -> Result<Vec<Record>> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        self.parse_bytes(buf)
    }

    pub fn parse_bytes(&self, bytes: Vec<u8>) -> Result<Vec<Record>> {
        self.parse(&decode_text(bytes, self.config.encoding))
    }

    /// Decodes every block of `source`, all or nothing.
    pub fn parse(&self, source: &str) -> Result<Vec<Record>> {
        let chars = normalize(source);
        let blocks = segment(&chars, self.config.block_size)?;
        debug!(
            characters = chars.len(),
            blocks = blocks.len(),
            "segmented extract"
        );
        blocks.iter().map(|block| self.decode_block(block)).collect()
    }

    pub fn decode_block(&self, block: &Block<'_>) -> Result<Record> {
        let shape = classify(block, &self.config)?;
        trace!(block = block.index, %shape, "classified");
        let fields = decode_fields(block, layout::fields(shape), self.config.strict_integers)?;
        Record::from_fields(shape, &fields)
    }
}

/// Bytes to text, see [`InputEncoding`] for the detection limits.
pub fn decode_text(bytes: Vec<u8>, encoding: InputEncoding) -> String {
    if encoding == InputEncoding::Latin1 {
        return latin1(bytes);
    }
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!("input is not valid UTF-8, decoding as Latin-1");
            latin1(e.into_bytes())
        }
    }
}

fn latin1(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

/// Drops every `\r` and `\n`.
pub fn normalize(source: &str) -> Vec<char> {
    source.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

pub fn segment(chars: &[char], block_size: usize) -> Result<Vec<Block<'_>>> {
    if block_size == 0 || chars.len() % block_size != 0 {
        return Err(Deb558Error::MalformedInput {
            block: chars.len().checked_div(block_size).unwrap_or(0),
            length: chars.len(),
            block_size,
        });
    }
    Ok(chars
        .chunks_exact(block_size)
        .enumerate()
        .map(|(index, chunk)| Block::new(index, chunk))
        .collect())
}

/// Picks the record shape from the kind discriminant and, for detail
/// blocks, the sub-type discriminant. Decodes nothing else.
pub fn classify(block: &Block<'_>, cfg: &ParserConfig) -> Result<Shape> {
    let kind = block.at(cfg.record_id_position)?;
    if kind == cfg.header_record_id {
        return Ok(Shape::Header);
    }
    if kind == cfg.trailer_record_id {
        return Ok(Shape::Trailer);
    }
    if kind != cfg.detail_record_id {
        return Err(Deb558Error::UnknownRecordKind {
            block: block.index,
            found: kind,
        });
    }

    let detail = block.at(cfg.record_type_position)?;
    if detail == cfg.previous_balance_record_type {
        Ok(Shape::PreviousBalance)
    } else if detail == cfg.journal_entry_record_type {
        Ok(Shape::JournalEntry)
    } else if detail == cfg.current_balance_record_type {
        Ok(Shape::CurrentBalance)
    } else {
        Err(Deb558Error::UnknownDetailType {
            block: block.index,
            found: detail,
        })
    }
}

pub fn decode_fields(block: &Block<'_>, layout: Layout, strict_integers: bool) -> Result<Fields> {
    let mut fields = Fields::with_capacity(layout.len());
    for spec in layout.iter() {
        let raw = block.slice(spec.start, spec.end)?;
        let value = convert(spec, raw, block.index, strict_integers)?;
        fields.push(spec.name, value);
    }
    Ok(fields)
}

fn convert(spec: &FieldSpec, raw: String, block: usize, strict: bool) -> Result<Value> {
    Ok(match spec.kind {
        FieldKind::Integer if strict => match raw.trim().parse::<i64>() {
            Ok(v) => Value::Integer(v),
            Err(_) => {
                return Err(Deb558Error::InvalidInteger {
                    block,
                    field: spec.name,
                    value: raw,
                })
            }
        },
        FieldKind::Integer => Value::Integer(parse_integer(&raw)),
        FieldKind::Raw => Value::Text(raw),
        FieldKind::Trimmed => Value::Text(raw.trim().to_string()),
        FieldKind::ZeroStripped => Value::Text(strip_left_zeros(&raw).to_string()),
        FieldKind::Money => Value::Amount(parse_money(&raw)),
        FieldKind::Units => Value::Amount(parse_units(&raw)),
        FieldKind::Date => {
            let date = parse_date(&raw);
            if date.is_none() {
                trace!(block, field = spec.name, raw = %raw, "no valid date");
            }
            Value::Date(date)
        }
    })
}

/// Leading integer of `s` after optional whitespace and sign; zero when
/// there are no digits.
pub fn parse_integer(s: &str) -> i64 {
    leading_integer(s)
        .and_then(|n| i64::try_from(n).ok())
        .unwrap_or(0)
}

/// Zero-padded cents to a two-place amount. Never fails.
pub fn parse_money(s: &str) -> Decimal {
    let cents = leading_integer(strip_left_zeros(s)).unwrap_or(0);
    Decimal::try_from_i128_with_scale(cents, 2).unwrap_or(Decimal::ZERO)
}

pub fn parse_units(s: &str) -> Decimal {
    let units = leading_integer(s).unwrap_or(0);
    Decimal::try_from_i128_with_scale(units, 0).unwrap_or(Decimal::ZERO)
}

/// `DDMMYYYY`; `None` for anything that is not a real calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d%m%Y").ok()
}

pub fn strip_left_zeros(s: &str) -> &str {
    s.trim_start_matches('0')
}

fn leading_integer(s: &str) -> Option<i128> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n: i128 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_cents() {
        assert_eq!(parse_money("000000000001050"), Decimal::new(1050, 2));
        assert_eq!(parse_money("000000000001050").to_string(), "10.50");
        assert_eq!(parse_money("00000000000000000"), Decimal::ZERO);
        assert_eq!(parse_money("                 "), Decimal::ZERO);
        assert_eq!(parse_money("000000000000000007"), Decimal::new(7, 2));
    }

    #[test]
    fn units_keep_whole_values() {
        assert_eq!(parse_units("000150000"), Decimal::new(150000, 0));
        assert_eq!(parse_units("         "), Decimal::ZERO);
    }

    #[test]
    fn integers_are_permissive() {
        assert_eq!(parse_integer("000123"), 123);
        assert_eq!(parse_integer("   "), 0);
        assert_eq!(parse_integer("12AB"), 12);
        assert_eq!(parse_integer("AB12"), 0);
        assert_eq!(parse_integer(" 42"), 42);
        assert_eq!(parse_integer(""), 0);
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("25122023"), NaiveDate::from_ymd_opt(2023, 12, 25));
        assert_eq!(parse_date("00000000"), None);
        assert_eq!(parse_date("99999999"), None);
        assert_eq!(parse_date("31022024"), None);
        assert_eq!(parse_date("        "), None);
        assert_eq!(parse_date("2512202"), None);
    }

    #[test]
    fn zero_stripping_only_touches_the_left() {
        assert_eq!(strip_left_zeros("00001234500"), "1234500");
        assert_eq!(strip_left_zeros("0000"), "");
    }

    #[test]
    fn normalize_drops_line_breaks_only() {
        let chars = normalize("ab\r\ncd\ne f\r");
        assert_eq!(chars.iter().collect::<String>(), "abcde f");
    }

    #[test]
    fn segment_rejects_partial_blocks() {
        let chars: Vec<char> = "abcdefg".chars().collect();
        assert_eq!(segment(&chars, 7).unwrap().len(), 1);
        assert!(matches!(
            segment(&chars, 3),
            Err(Deb558Error::MalformedInput {
                block: 2,
                length: 7,
                block_size: 3
            })
        ));
    }

    #[test]
    fn latin1_fallback() {
        let text = decode_text(vec![b'S', 0xC3, b'O'], InputEncoding::Detect);
        assert_eq!(text, "S\u{c3}O");
        assert_eq!(decode_text("SÃO".as_bytes().to_vec(), InputEncoding::Detect), "SÃO");
    }

    #[test]
    fn forced_latin1_keeps_byte_pairs_apart() {
        let bytes = vec![b'J', b'O', 0xC3, 0xA9];
        assert_eq!(decode_text(bytes.clone(), InputEncoding::Detect), "JO\u{e9}");
        assert_eq!(decode_text(bytes, InputEncoding::Latin1), "JO\u{c3}\u{a9}");
    }

    #[test]
    fn strict_integers_reject_blanks() {
        let spec = FieldSpec {
            name: "numero_lote",
            start: 0,
            end: 4,
            kind: FieldKind::Integer,
        };
        let err = convert(&spec, "     ".into(), 3, true).unwrap_err();
        assert!(matches!(err, Deb558Error::InvalidInteger { block: 3, field: "numero_lote", .. }));
        assert_eq!(convert(&spec, "00012".into(), 3, true).unwrap(), Value::Integer(12));
        assert_eq!(convert(&spec, "     ".into(), 3, false).unwrap(), Value::Integer(0));
    }
}
