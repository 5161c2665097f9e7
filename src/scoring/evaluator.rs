// File: evaluator.rs
// Created: 2024-11-20 15:21:09
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Precision/recall engine over a propagated prediction set.
//!
//! Construction propagates every predicted term's confidence to its
//! ancestors with a merge-by-maximum rule and classifies each propagated
//! (protein, term) pair as true or false positive. Obsolete terms are
//! collected on the side and excluded from scoring. All query operations
//! are read-only afterwards.

use std::io::Write;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ontology::ancestors::AncestorMap;
use crate::ontology::namespace::is_root_term;
use crate::prediction::parser::PredictionSet;
use crate::scoring::benchmark::PropagatedBenchmark;

/// Confidence and truth flag of one propagated term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TermScore {
    pub confidence: f64,
    pub is_true: bool,
}

/// Propagated terms of one protein, in propagation order.
#[derive(Debug, Default)]
pub struct PropagatedTerms {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, TermScore)>,
}

impl PropagatedTerms {
    fn new() -> Self {
        PropagatedTerms::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn get(&self, term: &str) -> Option<&TermScore> {
        self.index.get(term).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermScore)> {
        self.entries.iter().map(|(term, score)| (term.as_str(), score))
    }

    fn insert(&mut self, term: &str, score: TermScore) {
        self.index.insert(term.to_string(), self.entries.len());
        self.entries.push((term.to_string(), score));
    }

    fn get_mut(&mut self, term: &str) -> Option<&mut TermScore> {
        let index = *self.index.get(term)?;
        Some(&mut self.entries[index].1)
    }
}

/// Per-protein propagation state. A protein outside the benchmark is kept
/// as an explicit variant, not an empty map, and contributes to neither
/// precision nor recall.
#[derive(Debug)]
pub enum ProteinPrediction {
    NotInBenchmark,
    Propagated(PropagatedTerms),
}

/// Per-protein precision/recall at one threshold. Precision is undefined
/// when no term reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermPrecisionRecall {
    pub precision: Option<f64>,
    pub recall: f64,
}

/// Averaged precision/recall at one threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionRecall {
    pub precision: f64,
    pub recall: f64,
    /// Number of proteins with at least one term at or above the threshold.
    pub num_above_threshold: usize,
}

/// Diagnostic counters of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationCounts {
    pub benchmark_proteins: usize,
    pub predicted_proteins: usize,
    pub predicted_in_benchmark: usize,
    pub above_threshold: usize,
}

pub struct Evaluator<'a> {
    benchmark: &'a PropagatedBenchmark<'a>,
    /// Predicted proteins in submission order.
    proteins: Vec<String>,
    predicted: FxHashMap<String, ProteinPrediction>,
    obsolete: FxHashSet<String>,
    countb: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(benchmark: &'a PropagatedBenchmark<'a>, predictions: &PredictionSet) -> Self {
        let ancestors = benchmark.ancestors();
        let mut predicted: FxHashMap<String, ProteinPrediction> = FxHashMap::default();
        let mut obsolete: FxHashSet<String> = FxHashSet::default();
        let mut countb = 0usize;

        for protein in &predictions.proteins {
            let records = match predictions.records_of(protein) {
                Some(records) => records,
                None => continue,
            };
            let true_terms = match benchmark.true_terms_of(protein) {
                Some(terms) if !terms.is_empty() => terms,
                _ => {
                    predicted.insert(protein.clone(), ProteinPrediction::NotInBenchmark);
                    continue;
                }
            };
            countb += 1;
            let mut terms = PropagatedTerms::new();
            for record in records {
                let term_ancestors = match ancestors.ancestors_of(&record.term) {
                    Ok(term_ancestors) => term_ancestors,
                    Err(_) => {
                        obsolete.insert(record.term.clone());
                        continue;
                    }
                };
                // a non-root term without ancestors is an outdated accession
                if term_ancestors.is_empty() && !is_root_term(&record.term) {
                    obsolete.insert(record.term.clone());
                    continue;
                }
                if terms.contains(&record.term) {
                    update_confidence(&mut terms, ancestors, &record.term, record.confidence);
                } else {
                    terms.insert(
                        &record.term,
                        TermScore {
                            confidence: record.confidence,
                            is_true: true_terms.contains(&record.term),
                        },
                    );
                    for ancestor in term_ancestors {
                        if terms.contains(ancestor) {
                            update_confidence(&mut terms, ancestors, ancestor, record.confidence);
                        } else {
                            terms.insert(
                                ancestor,
                                TermScore {
                                    confidence: record.confidence,
                                    is_true: true_terms.contains(ancestor),
                                },
                            );
                        }
                    }
                }
            }
            predicted.insert(protein.clone(), ProteinPrediction::Propagated(terms));
        }

        Evaluator {
            benchmark,
            proteins: predictions.proteins.clone(),
            predicted,
            obsolete,
            countb,
        }
    }

    pub fn prediction_of(&self, protein: &str) -> Option<&ProteinPrediction> {
        self.predicted.get(protein)
    }

    /// Terms skipped during propagation because the ancestor table does not
    /// know them. Diagnostic only.
    pub fn obsolete_terms(&self) -> &FxHashSet<String> {
        &self.obsolete
    }

    /// Number of predicted proteins that are benchmark proteins.
    pub fn benchmark_protein_hits(&self) -> usize {
        self.countb
    }

    /// Fraction of benchmark proteins with at least one prediction.
    pub fn coverage(&self) -> f64 {
        let total = self.benchmark.protein_count();
        if total > 0 {
            self.countb as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Precision and recall of one protein at one threshold; a term counts
    /// when its confidence is at or above the threshold. Returns None for
    /// proteins outside the benchmark.
    pub fn term_precision_recall(
        &self,
        protein: &str,
        threshold: f64,
    ) -> Option<TermPrecisionRecall> {
        match self.predicted.get(protein)? {
            ProteinPrediction::NotInBenchmark => None,
            ProteinPrediction::Propagated(terms) => {
                let mut count = 0usize;
                let mut true_pos = 0usize;
                for (_, score) in terms.iter() {
                    if score.confidence >= threshold {
                        count += 1;
                        if score.is_true {
                            true_pos += 1;
                        }
                    }
                }
                let precision = if count > 0 {
                    Some(true_pos as f64 / count as f64)
                } else {
                    None
                };
                let true_count = self
                    .benchmark
                    .true_terms_of(protein)
                    .map_or(0, |terms| terms.len());
                let recall = if true_count > 0 {
                    true_pos as f64 / true_count as f64
                } else {
                    0.0
                };
                Some(TermPrecisionRecall { precision, recall })
            }
        }
    }

    /// Averaged precision/recall over the whole prediction set. Precision is
    /// averaged over proteins whose precision is defined at this threshold;
    /// recall is averaged over all predicted benchmark proteins.
    pub fn precision_recall(&self, threshold: f64) -> PrecisionRecall {
        let mut precision_sum = 0.0;
        let mut recall_sum = 0.0;
        let mut counta = 0usize;
        for protein in &self.proteins {
            if let Some(pr) = self.term_precision_recall(protein, threshold) {
                if let Some(precision) = pr.precision {
                    precision_sum += precision;
                    counta += 1;
                }
                recall_sum += pr.recall;
            }
        }
        let precision = if counta > 0 { precision_sum / counta as f64 } else { 0.0 };
        let recall = if self.countb > 0 { recall_sum / self.countb as f64 } else { 0.0 };
        PrecisionRecall { precision, recall, num_above_threshold: counta }
    }

    pub fn counts(&self, threshold: f64) -> EvaluationCounts {
        EvaluationCounts {
            benchmark_proteins: self.benchmark.protein_count(),
            predicted_proteins: self.proteins.len(),
            predicted_in_benchmark: self.countb,
            above_threshold: self.precision_recall(threshold).num_above_threshold,
        }
    }

    /// Dumps `PROTEIN_INDEX<TAB>CONFIDENCE<TAB>IS_TRUE_POSITIVE` per
    /// propagated term, proteins in submission order, terms in propagation
    /// order.
    pub fn write_confidence<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (protein_index, protein) in self.proteins.iter().enumerate() {
            if let Some(ProteinPrediction::Propagated(terms)) = self.predicted.get(protein) {
                for (_, score) in terms.iter() {
                    writeln!(
                        writer,
                        "{}\t{:.2}\t{}",
                        protein_index, score.confidence, score.is_true
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Merge-by-maximum. Raising a term's confidence also raises every already
/// recorded entry of that term's ancestor closure, without re-cascading
/// from the raised ancestors.
fn update_confidence(
    terms: &mut PropagatedTerms,
    ancestors: &AncestorMap,
    term: &str,
    confidence: f64,
) {
    let raised = match terms.get_mut(term) {
        Some(score) if confidence > score.confidence => {
            score.confidence = confidence;
            true
        }
        _ => false,
    };
    if !raised {
        return;
    }
    if let Ok(term_ancestors) = ancestors.ancestors_of(term) {
        for ancestor in term_ancestors {
            if let Some(score) = terms.get_mut(ancestor) {
                if confidence > score.confidence {
                    score.confidence = confidence;
                }
            }
        }
    }
}
