// File: ancestors.rs
// Created: 2024-11-19 09:18:02
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Per-term ancestor closure loaded from a flat file.
//!
//! File format, one term per line, no header:
//! `TERM<TAB>ANC1,ANC2,...,ANCn` or just `TERM` for a root without ancestors.

use std::io::BufRead;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::utils::loader::{open_text_file, TableFormatError};

/// Recoverable lookup miss. Callers convert this into obsolete-term
/// bookkeeping; it never aborts an evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("term {0} not found in ancestor table")]
pub struct TermNotFound(pub String);

/// Read-only term -> ancestor-set table. Built once at load time.
#[derive(Debug, Default)]
pub struct AncestorMap {
    ancestors: FxHashMap<String, FxHashSet<String>>,
}

impl AncestorMap {
    pub fn from_file(path: &str) -> Result<Self, TableFormatError> {
        let reader = open_text_file(path)?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TableFormatError> {
        let mut ancestors: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.len() {
                1 => {
                    ancestors.insert(fields[0].to_string(), FxHashSet::default());
                }
                2 => {
                    let term_ancestors = fields[1]
                        .split(',')
                        .filter(|anc| !anc.is_empty())
                        .map(|anc| anc.to_string())
                        .collect();
                    ancestors.insert(fields[0].to_string(), term_ancestors);
                }
                _ => {
                    return Err(TableFormatError::FieldCount {
                        line: index + 1,
                        expected: "1 or 2",
                        content: line.to_string(),
                    });
                }
            }
        }
        Ok(AncestorMap { ancestors })
    }

    /// Ancestor set of a term. Absence is the "obsolete term" condition and
    /// must be handled at the call site.
    pub fn ancestors_of(&self, term: &str) -> Result<&FxHashSet<String>, TermNotFound> {
        self.ancestors
            .get(term)
            .ok_or_else(|| TermNotFound(term.to_string()))
    }

    pub fn contains(&self, term: &str) -> bool {
        self.ancestors.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }
}
