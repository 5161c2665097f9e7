// File: record.rs
// Created: 2024-11-21 16:33:40
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Record classification and field patterns of the CAFA submission format.

use regex::Regex;

/// Controlled vocabulary for KEYWORDS records. Matching is done after
/// lower-casing and stripping a single trailing period.
pub const LEGAL_KEYWORDS: [&str; 30] = [
    "sequence alignment",
    "sequence-profile alignment",
    "profile-profile alignment",
    "phylogeny",
    "sequence properties",
    "physicochemical properties",
    "predicted properties",
    "protein interactions",
    "gene expression",
    "mass spectrometry",
    "genetic interactions",
    "protein structure",
    "literature",
    "genomic context",
    "synteny",
    "structure alignment",
    "comparative model",
    "predicted protein structure",
    "de novo prediction",
    "machine learning",
    "genome environment",
    "operon",
    "ortholog",
    "paralog",
    "homolog",
    "hidden markov model",
    "clinical data",
    "genetic data",
    "natural language processing",
    "other functional information",
];

/// The record types of a submission stream, classified by leading token.
/// A line starting with anything else is a prediction record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Author,
    Model,
    Keywords,
    Accuracy,
    GoPrediction,
    End,
}

impl RecordKind {
    pub fn classify(line: &str) -> Self {
        match line.split_whitespace().next() {
            Some("AUTHOR") => RecordKind::Author,
            Some("MODEL") => RecordKind::Model,
            Some("KEYWORDS") => RecordKind::Keywords,
            Some("ACCURACY") => RecordKind::Accuracy,
            Some("END") => RecordKind::End,
            _ => RecordKind::GoPrediction,
        }
    }
}

/// The three accepted section orders. KEYWORDS and ACCURACY are optional,
/// but ACCURACY never appears without KEYWORDS.
pub const LEGAL_TEMPLATES: [&[RecordKind]; 3] = [
    &[
        RecordKind::Author,
        RecordKind::Model,
        RecordKind::Keywords,
        RecordKind::Accuracy,
        RecordKind::GoPrediction,
        RecordKind::End,
    ],
    &[
        RecordKind::Author,
        RecordKind::Model,
        RecordKind::Keywords,
        RecordKind::GoPrediction,
        RecordKind::End,
    ],
    &[
        RecordKind::Author,
        RecordKind::Model,
        RecordKind::GoPrediction,
        RecordKind::End,
    ],
];

/// Compiled field patterns, built once per parser.
pub struct FieldPatterns {
    pub target: Regex,
    pub term: Regex,
    pub confidence: Regex,
    pub pr: Regex,
    pub rc: Regex,
}

impl FieldPatterns {
    pub fn new() -> Self {
        FieldPatterns {
            target: Regex::new(r"^(T|EFI)[0-9]{5,20}$").unwrap(),
            term: Regex::new(r"^(GO|HP):[0-9]{5,7}$").unwrap(),
            confidence: Regex::new(r"^[01]\.[0-9][0-9]$").unwrap(),
            pr: Regex::new(r"^PR=[01]\.[0-9][0-9];$").unwrap(),
            rc: Regex::new(r"^RC=[01]\.[0-9][0-9]$").unwrap(),
        }
    }
}

impl Default for FieldPatterns {
    fn default() -> Self {
        Self::new()
    }
}
