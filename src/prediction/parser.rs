// File: parser.rs
// Created: 2024-11-21 17:02:13
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Validating state machine over a CAFA submission stream.
//!
//! Records are validated one by one and any failure aborts the whole parse
//! with the offending line. At end of stream the sequence of first-entered
//! record kinds must match one of the accepted section templates.

use std::io::BufRead;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::prediction::record::{FieldPatterns, RecordKind, LEGAL_KEYWORDS, LEGAL_TEMPLATES};
use crate::utils::loader::open_text_file;

pub const MAX_MODELS: usize = 3;
pub const MAX_ACCURACY_PER_MODEL: usize = 3;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("AUTHOR: {reason} in record: {line}")]
    AuthorField { reason: &'static str, line: String },
    #[error("MODEL: {reason} in record: {line}")]
    ModelField { reason: &'static str, line: String },
    #[error("KEYWORDS: illegal keyword '{keyword}' in record: {line}")]
    IllegalKeyword { keyword: String, line: String },
    #[error("ACCURACY: {reason} in record: {line}")]
    AccuracyField { reason: &'static str, line: String },
    #[error("GO prediction: {reason} in record: {line}")]
    GoPredictionField { reason: &'static str, line: String },
    #[error("END: {reason} in record: {line}")]
    EndField { reason: &'static str, line: String },
    #[error("too many MODEL records, only up to 3 allowed")]
    TooManyModels,
    #[error("ACCURACY: too many ACCURACY records, only up to 3 per model allowed")]
    TooManyAccuracy,
    #[error(
        "submission does not follow the record grammar, observed sections {observed:?}; \
         accepted order is AUTHOR, MODEL, KEYWORDS (optional), ACCURACY (optional), predictions, END"
    )]
    Malformed { observed: Vec<RecordKind> },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// One predicted (term, confidence) pair for a protein.
#[derive(Clone, Debug, PartialEq)]
pub struct TermConfidence {
    pub term: String,
    pub confidence: f64,
}

/// A fully validated submission. Frozen once returned by the parser.
#[derive(Debug, Default)]
pub struct PredictionSet {
    pub author: Option<String>,
    pub model: Option<u8>,
    pub keywords: FxHashSet<String>,
    /// Proteins in submission order; keys of `data`.
    pub proteins: Vec<String>,
    pub data: FxHashMap<String, Vec<TermConfidence>>,
}

impl PredictionSet {
    pub fn num_proteins(&self) -> usize {
        self.proteins.len()
    }

    pub fn num_predictions(&self) -> usize {
        self.data.values().map(|records| records.len()).sum()
    }

    pub fn records_of(&self, protein: &str) -> Option<&[TermConfidence]> {
        self.data.get(protein).map(|records| records.as_slice())
    }
}

pub struct GoPredParser {
    patterns: FieldPatterns,
}

impl GoPredParser {
    pub fn new() -> Self {
        GoPredParser { patterns: FieldPatterns::new() }
    }

    pub fn parse_file(&self, path: &str) -> Result<PredictionSet, SubmissionError> {
        let reader = open_text_file(path)?;
        self.parse(reader)
    }

    pub fn parse<R: BufRead>(&self, reader: R) -> Result<PredictionSet, SubmissionError> {
        let mut set = PredictionSet::default();
        let mut visited: Vec<RecordKind> = Vec::new();
        let mut n_models = 0usize;
        let mut n_accuracy = 0usize;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            let kind = RecordKind::classify(line);
            if !visited.contains(&kind) {
                visited.push(kind);
            }
            match kind {
                RecordKind::Author => self.check_author(line, &mut set)?,
                RecordKind::Model => {
                    n_models += 1;
                    n_accuracy = 0;
                    if n_models > MAX_MODELS {
                        return Err(SubmissionError::TooManyModels);
                    }
                    self.check_model(line, &mut set)?;
                }
                RecordKind::Keywords => self.check_keywords(line, &mut set)?,
                RecordKind::Accuracy => {
                    n_accuracy += 1;
                    if n_accuracy > MAX_ACCURACY_PER_MODEL {
                        return Err(SubmissionError::TooManyAccuracy);
                    }
                    self.check_accuracy(line)?;
                }
                RecordKind::GoPrediction => self.check_go_prediction(line, &mut set)?,
                RecordKind::End => self.check_end(line)?,
            }
        }

        if !LEGAL_TEMPLATES.iter().any(|template| visited.as_slice() == *template) {
            return Err(SubmissionError::Malformed { observed: visited });
        }
        Ok(set)
    }

    fn check_author(&self, line: &str, set: &mut PredictionSet) -> Result<(), SubmissionError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(SubmissionError::AuthorField {
                reason: "invalid number of fields, should be 2",
                line: line.to_string(),
            });
        }
        set.author = Some(fields[1].to_string());
        Ok(())
    }

    fn check_model(&self, line: &str, set: &mut PredictionSet) -> Result<(), SubmissionError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(SubmissionError::ModelField {
                reason: "invalid number of fields, should be 2",
                line: line.to_string(),
            });
        }
        if fields[1].len() != 1 || !fields[1].chars().all(|c| c.is_ascii_digit()) {
            return Err(SubmissionError::ModelField {
                reason: "second field should be a single digit",
                line: line.to_string(),
            });
        }
        set.model = fields[1].parse::<u8>().ok();
        Ok(())
    }

    fn check_keywords(&self, line: &str, set: &mut PredictionSet) -> Result<(), SubmissionError> {
        let rest = line.trim_start_matches("KEYWORDS");
        for keyword in rest.split(',') {
            let mut keyword = keyword.trim().to_lowercase();
            if keyword.ends_with('.') {
                keyword.pop();
            }
            if keyword.is_empty() || !LEGAL_KEYWORDS.contains(&keyword.as_str()) {
                return Err(SubmissionError::IllegalKeyword {
                    keyword,
                    line: line.to_string(),
                });
            }
            set.keywords.insert(keyword);
        }
        Ok(())
    }

    fn check_accuracy(&self, line: &str) -> Result<(), SubmissionError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(SubmissionError::AccuracyField {
                reason: "invalid number of fields, should be 4",
                line: line.to_string(),
            });
        }
        if fields[1].len() != 1 || !fields[1].chars().all(|c| c.is_ascii_digit()) {
            return Err(SubmissionError::AccuracyField {
                reason: "second field should be a single digit",
                line: line.to_string(),
            });
        }
        if !self.patterns.pr.is_match(fields[2]) {
            return Err(SubmissionError::AccuracyField {
                reason: "error in PR field",
                line: line.to_string(),
            });
        }
        if !self.patterns.rc.is_match(fields[3]) {
            return Err(SubmissionError::AccuracyField {
                reason: "error in RC field",
                line: line.to_string(),
            });
        }
        Ok(())
    }

    fn check_go_prediction(&self, line: &str, set: &mut PredictionSet) -> Result<(), SubmissionError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(SubmissionError::GoPredictionField {
                reason: "invalid number of fields, should be 3",
                line: line.to_string(),
            });
        }
        if !self.patterns.target.is_match(fields[0]) {
            return Err(SubmissionError::GoPredictionField {
                reason: "error in first (target ID) field",
                line: line.to_string(),
            });
        }
        if !self.patterns.term.is_match(fields[1]) {
            return Err(SubmissionError::GoPredictionField {
                reason: "error in second (GO/HP ID) field",
                line: line.to_string(),
            });
        }
        if !self.patterns.confidence.is_match(fields[2]) {
            return Err(SubmissionError::GoPredictionField {
                reason: "error in third (confidence) field",
                line: line.to_string(),
            });
        }
        let confidence: f64 = fields[2].parse().map_err(|_| {
            SubmissionError::GoPredictionField {
                reason: "error in third (confidence) field",
                line: line.to_string(),
            }
        })?;
        if confidence > 1.0 {
            return Err(SubmissionError::GoPredictionField {
                reason: "confidence cannot be greater than 1.0",
                line: line.to_string(),
            });
        }
        if !set.data.contains_key(fields[0]) {
            set.proteins.push(fields[0].to_string());
        }
        set.data
            .entry(fields[0].to_string())
            .or_default()
            .push(TermConfidence { term: fields[1].to_string(), confidence });
        Ok(())
    }

    fn check_end(&self, line: &str) -> Result<(), SubmissionError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 1 {
            return Err(SubmissionError::EndField {
                reason: "record should include the word END only",
                line: line.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GoPredParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SUBMISSION: &str = "\
AUTHOR GOTeam
MODEL 1
KEYWORDS sequence alignment, machine learning.
ACCURACY 1 PR=0.80; RC=0.65
T100900000001 GO:0044237 0.90
T100900000001 GO:0008150 0.50
T100900000002 GO:0008610 0.72
END
";

    #[test]
    fn test_parse_valid_submission() {
        let parser = GoPredParser::new();
        let set = parser.parse(VALID_SUBMISSION.as_bytes()).unwrap();
        assert_eq!(set.author.as_deref(), Some("GOTeam"));
        assert_eq!(set.model, Some(1));
        assert_eq!(set.keywords.len(), 2);
        assert!(set.keywords.contains("machine learning"));
        assert_eq!(set.num_proteins(), 2);
        assert_eq!(set.num_predictions(), 3);
        assert_eq!(set.proteins, vec!["T100900000001", "T100900000002"]);
        let records = set.records_of("T100900000001").unwrap();
        assert_eq!(records[0].term, "GO:0044237");
        assert_eq!(records[0].confidence, 0.90);
    }

    #[test]
    fn test_parse_without_optional_sections() {
        let parser = GoPredParser::new();
        let no_accuracy = "\
AUTHOR GOTeam
MODEL 1
KEYWORDS phylogeny
T100900000001 GO:0044237 0.90
END
";
        assert!(parser.parse(no_accuracy.as_bytes()).is_ok());
        let no_keywords = "\
AUTHOR GOTeam
MODEL 1
T100900000001 GO:0044237 0.90
END
";
        assert!(parser.parse(no_keywords.as_bytes()).is_ok());
    }

    #[test]
    fn test_missing_end_is_malformed() {
        let parser = GoPredParser::new();
        let truncated = "\
AUTHOR GOTeam
MODEL 1
T100900000001 GO:0044237 0.90
";
        match parser.parse(truncated.as_bytes()) {
            Err(SubmissionError::Malformed { observed }) => {
                assert_eq!(
                    observed,
                    vec![RecordKind::Author, RecordKind::Model, RecordKind::GoPrediction]
                );
            }
            other => panic!("expected Malformed, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_author_does_not_reappend() {
        let parser = GoPredParser::new();
        let duplicated = "\
AUTHOR GOTeam
MODEL 1
AUTHOR GOTeam
T100900000001 GO:0044237 0.90
END
";
        // the visited sequence stays [author, model, go_prediction, end]
        // but a second AUTHOR after MODEL breaks none of the templates
        match parser.parse(duplicated.as_bytes()) {
            Ok(set) => assert_eq!(set.author.as_deref(), Some("GOTeam")),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_too_many_models() {
        let parser = GoPredParser::new();
        let four_models = "\
AUTHOR GOTeam
MODEL 1
MODEL 2
MODEL 3
MODEL 4
T100900000001 GO:0044237 0.90
END
";
        assert!(matches!(
            parser.parse(four_models.as_bytes()),
            Err(SubmissionError::TooManyModels)
        ));
    }

    #[test]
    fn test_accuracy_cap_resets_per_model() {
        let parser = GoPredParser::new();
        let two_blocks = "\
AUTHOR GOTeam
MODEL 1
KEYWORDS phylogeny
ACCURACY 1 PR=0.80; RC=0.65
ACCURACY 1 PR=0.70; RC=0.55
ACCURACY 1 PR=0.60; RC=0.45
MODEL 2
ACCURACY 2 PR=0.80; RC=0.65
ACCURACY 2 PR=0.70; RC=0.55
T100900000001 GO:0044237 0.90
END
";
        assert!(parser.parse(two_blocks.as_bytes()).is_ok());
        let four_in_one = "\
AUTHOR GOTeam
MODEL 1
KEYWORDS phylogeny
ACCURACY 1 PR=0.80; RC=0.65
ACCURACY 1 PR=0.70; RC=0.55
ACCURACY 1 PR=0.60; RC=0.45
ACCURACY 1 PR=0.50; RC=0.35
T100900000001 GO:0044237 0.90
END
";
        assert!(matches!(
            parser.parse(four_in_one.as_bytes()),
            Err(SubmissionError::TooManyAccuracy)
        ));
    }

    #[test]
    fn test_illegal_keyword() {
        let parser = GoPredParser::new();
        let bad = "\
AUTHOR GOTeam
MODEL 1
KEYWORDS crystal gazing
T100900000001 GO:0044237 0.90
END
";
        match parser.parse(bad.as_bytes()) {
            Err(SubmissionError::IllegalKeyword { keyword, .. }) => {
                assert_eq!(keyword, "crystal gazing");
            }
            other => panic!("expected IllegalKeyword, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bad_prediction_fields() {
        let parser = GoPredParser::new();
        for bad_line in [
            "X100900000001 GO:0044237 0.90", // bad target
            "T100900000001 GO:GO:0044237 0.90", // bad term
            "T100900000001 GO:0044237 0.9", // one decimal place
            "T100900000001 GO:0044237", // missing confidence
        ] {
            let submission = format!("AUTHOR GOTeam\nMODEL 1\n{}\nEND\n", bad_line);
            assert!(
                matches!(
                    parser.parse(submission.as_bytes()),
                    Err(SubmissionError::GoPredictionField { .. })
                ),
                "line should be rejected: {}",
                bad_line
            );
        }
    }

    #[test]
    fn test_author_field_count() {
        let parser = GoPredParser::new();
        let bad = "AUTHOR The GO Team\nMODEL 1\nT100900000001 GO:0044237 0.90\nEND\n";
        assert!(matches!(
            parser.parse(bad.as_bytes()),
            Err(SubmissionError::AuthorField { .. })
        ));
    }

    #[test]
    fn test_model_field_digit() {
        let parser = GoPredParser::new();
        let bad = "AUTHOR GOTeam\nMODEL 12\nT100900000001 GO:0044237 0.90\nEND\n";
        assert!(matches!(
            parser.parse(bad.as_bytes()),
            Err(SubmissionError::ModelField { .. })
        ));
    }

    #[test]
    fn test_parse_toy_file() {
        let parser = GoPredParser::new();
        let set = parser.parse_file("data/toy/submission.txt").unwrap();
        assert_eq!(set.author.as_deref(), Some("GOTeam"));
        assert_eq!(set.num_proteins(), 3);
        assert_eq!(set.num_predictions(), 5);
    }
}
