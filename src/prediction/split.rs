// File: split.rs
// Created: 2024-11-22 10:12:58
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Splits one parsed submission into per-namespace submission files.
//!
//! Each output keeps the AUTHOR/MODEL/KEYWORDS framing of the input and is
//! terminated with END, so split files are themselves valid submissions.

use std::fs::File;
use std::io::{BufWriter, Write};

use thiserror::Error;

use crate::ontology::namespace::{Namespace, NamespaceMap};
use crate::prediction::parser::PredictionSet;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("term {0} not found in any ontology namespace")]
    UnknownNamespace(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Output paths of a split, one per namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub bpo: String,
    pub mfo: String,
    pub cco: String,
}

impl SplitPaths {
    pub fn with_prefix(prefix: &str) -> Self {
        SplitPaths {
            bpo: format!("{}_BPO.txt", prefix),
            mfo: format!("{}_MFO.txt", prefix),
            cco: format!("{}_CCO.txt", prefix),
        }
    }

    pub fn get(&self, namespace: Namespace) -> &str {
        match namespace {
            Namespace::BPO => &self.bpo,
            Namespace::MFO => &self.mfo,
            Namespace::CCO => &self.cco,
        }
    }
}

/// Writes `<prefix>_BPO.txt`, `<prefix>_MFO.txt` and `<prefix>_CCO.txt`.
/// All three files are created even if a namespace receives no predictions.
pub fn split_by_namespace(
    predictions: &PredictionSet,
    namespaces: &NamespaceMap,
    out_prefix: &str,
) -> Result<SplitPaths, SplitError> {
    let paths = SplitPaths::with_prefix(out_prefix);
    let mut writers = [
        BufWriter::new(File::create(&paths.bpo)?),
        BufWriter::new(File::create(&paths.mfo)?),
        BufWriter::new(File::create(&paths.cco)?),
    ];

    for writer in writers.iter_mut() {
        write_metadata(writer, predictions)?;
    }
    for protein in &predictions.proteins {
        if let Some(records) = predictions.records_of(protein) {
            for record in records {
                let namespace = namespaces
                    .namespace_of(&record.term)
                    .ok_or_else(|| SplitError::UnknownNamespace(record.term.clone()))?;
                let writer = match namespace {
                    Namespace::BPO => &mut writers[0],
                    Namespace::MFO => &mut writers[1],
                    Namespace::CCO => &mut writers[2],
                };
                writeln!(writer, "{}\t{}\t{:.2}", protein, record.term, record.confidence)?;
            }
        }
    }
    for writer in writers.iter_mut() {
        writeln!(writer, "END")?;
        writer.flush()?;
    }
    Ok(paths)
}

fn write_metadata<W: Write>(writer: &mut W, predictions: &PredictionSet) -> std::io::Result<()> {
    if let Some(author) = &predictions.author {
        writeln!(writer, "AUTHOR\t{}", author)?;
    }
    if let Some(model) = predictions.model {
        writeln!(writer, "MODEL\t{}", model)?;
    }
    if !predictions.keywords.is_empty() {
        let mut keywords: Vec<&str> = predictions.keywords.iter().map(|k| k.as_str()).collect();
        keywords.sort_unstable();
        writeln!(writer, "KEYWORDS\t{}", keywords.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::parser::GoPredParser;
    use crate::test::toy_namespace_map;

    #[test]
    fn test_split_files_reparse() {
        let parser = GoPredParser::new();
        let set = parser.parse_file("data/toy/submission_mixed.txt").unwrap();
        let namespaces = toy_namespace_map();
        let out_prefix = "data/toy/split_test";
        let paths = split_by_namespace(&set, &namespaces, out_prefix).unwrap();

        for namespace in Namespace::ALL {
            let reparsed = parser.parse_file(paths.get(namespace)).unwrap();
            assert_eq!(reparsed.author, set.author);
            assert_eq!(reparsed.model, set.model);
            assert_eq!(reparsed.keywords, set.keywords);
        }
        let bpo = parser.parse_file(&paths.bpo).unwrap();
        assert_eq!(bpo.num_predictions(), 2);
        let mfo = parser.parse_file(&paths.mfo).unwrap();
        assert_eq!(mfo.num_predictions(), 1);
        let cco = parser.parse_file(&paths.cco).unwrap();
        assert_eq!(cco.num_predictions(), 1);
    }

    #[test]
    fn test_unknown_term_fails() {
        let parser = GoPredParser::new();
        let submission = "\
AUTHOR GOTeam
MODEL 1
T100900000001 GO:7777777 0.90
END
";
        let set = parser.parse(submission.as_bytes()).unwrap();
        let namespaces = toy_namespace_map();
        let result = split_by_namespace(&set, &namespaces, "data/toy/split_unknown");
        assert!(matches!(result, Err(SplitError::UnknownNamespace(term)) if term == "GO:7777777"));
    }
}
