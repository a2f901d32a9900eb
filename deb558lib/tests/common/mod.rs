//! Fixture blocks laid out field by field.

#![allow(dead_code)]

use deb558lib::config::BLOCK_SIZE;

pub struct BlockBuilder {
    chars: Vec<char>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            chars: vec![' '; BLOCK_SIZE],
        }
    }

    /// Writes `text` starting at zero-based offset `start`.
    pub fn put(mut self, start: usize, text: &str) -> Self {
        for (i, c) in text.chars().enumerate() {
            assert!(start + i < BLOCK_SIZE, "{text:?} at {start} overflows the block");
            self.chars[start + i] = c;
        }
        self
    }

    pub fn sequence(self, number: &str) -> Self {
        self.put(189, "01").put(191, "001").put(194, number)
    }

    pub fn build(self) -> String {
        self.chars.into_iter().collect()
    }
}

pub fn header_block() -> String {
    BlockBuilder::new()
        .put(0, "0")
        .put(9, "05")
        .put(11, "EXTRATO CONTA C")
        .put(37, "000123456")
        .put(76, "001")
        .put(79, "BANCO DO BRASIL")
        .put(100, "01600")
        .put(105, "BPI")
        .put(109, "12345678000190")
        .put(181, "25122023")
        .sequence("000001")
        .build()
}

fn account(detail_type: &str) -> BlockBuilder {
    BlockBuilder::new()
        .put(0, "1")
        .put(1, "02")
        .put(3, "12345678000190")
        .put(17, "1234")
        .put(29, "00000123456")
        .put(40, "X")
        .put(41, detail_type)
}

pub fn previous_balance_block() -> String {
    account("0")
        .put(42, "00000000000000000")
        .put(59, "000123456")
        .put(68, "001")
        .put(86, "000000000000123456")
        .put(104, "C")
        .put(105, "00000000000000000")
        .put(122, "00000000000000500")
        .put(139, "00000000000000000")
        .put(156, "00000000000000000")
        .put(181, "01122023")
        .sequence("000002")
        .build()
}

pub fn journal_entry_block() -> String {
    account("1")
        .put(42, "105")
        .put(45, "0470")
        .put(49, "  PAGAMENTO  DE BOLETO")
        .put(74, "123456")
        .put(86, "000000000000001050")
        .put(110, "00042")
        .put(115, "1234")
        .put(119, "001")
        .put(122, "S")
        .put(128, "0000007")
        .put(135, "000000000987654")
        .put(173, "24122023")
        .put(181, "25122023")
        .sequence("000003")
        .build()
}

pub fn current_balance_block() -> String {
    account("2")
        .put(42, "00000000000010000")
        .put(59, "00000000000000250")
        .put(86, "000000000000234567")
        .put(104, "C")
        .put(105, "F")
        .put(106, "00000000000000000")
        .put(123, "000000000000150")
        .put(138, "000000000000010")
        .put(153, "000500000")
        .put(162, "00000000000000000")
        .put(181, "00000000")
        .sequence("000004")
        .build()
}

pub fn trailer_block() -> String {
    trailer_block_with("000005")
}

pub fn trailer_block_with(sequence: &str) -> String {
    BlockBuilder::new()
        .put(0, "9")
        .put(1, "00001")
        .put(6, "000004")
        .put(12, "0000000000010050")
        .put(28, "0000000000250000")
        .sequence(sequence)
        .build()
}

/// Header, the three detail kinds and trailer, one per line.
pub fn full_extract() -> String {
    [
        header_block(),
        previous_balance_block(),
        journal_entry_block(),
        current_balance_block(),
        trailer_block(),
    ]
    .join("\r\n")
}
