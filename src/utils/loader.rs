// File: loader.rs
// Created: 2024-11-18 11:02:37
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

// Opening of flat text tables. All evaluation inputs are line-oriented
// TSV files which may be gzip-compressed.

use std::fs::File;
use std::io::{BufRead, BufReader};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

/// Error for malformed flat-table input. Fatal to the enclosing load;
/// no partially filled table is ever returned.
#[derive(Debug, Error)]
pub enum TableFormatError {
    #[error("line {line}: expected {expected} tab-separated fields: {content}")]
    FieldCount {
        line: usize,
        expected: &'static str,
        content: String,
    },
    #[error("line {line}: unknown namespace '{value}': {content}")]
    UnknownValue {
        line: usize,
        value: String,
        content: String,
    },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Opens a text file for buffered line reading.
/// Files ending in `.gz` are decompressed on the fly.
pub fn open_text_file(path: &str) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
