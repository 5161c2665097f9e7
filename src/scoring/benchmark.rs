// File: benchmark.rs
// Created: 2024-11-20 14:09:53
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Curated true annotations and their propagation over the ontology.
//!
//! `Benchmark` holds the leaf-level annotations as read from file.
//! `propagate` consumes it and returns a `PropagatedBenchmark`, the only type
//! that exposes the full true-term closure, so scoring against an
//! unpropagated benchmark does not compile.

use std::io::BufRead;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ontology::ancestors::AncestorMap;
use crate::utils::loader::{open_text_file, TableFormatError};
use crate::utils::log::{print_log_msg, WARN};

/// Leaf-level protein -> true-term associations.
/// File format, one annotation per line, no header: `PROTEIN<TAB>TERM`.
pub struct Benchmark<'a> {
    ancestors: &'a AncestorMap,
    true_base_terms: FxHashMap<String, FxHashSet<String>>,
}

impl<'a> Benchmark<'a> {
    pub fn from_file(ancestors: &'a AncestorMap, path: &str) -> Result<Self, TableFormatError> {
        let reader = open_text_file(path)?;
        Self::from_reader(ancestors, reader)
    }

    pub fn from_reader<R: BufRead>(
        ancestors: &'a AncestorMap,
        reader: R,
    ) -> Result<Self, TableFormatError> {
        let mut true_base_terms: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 2 {
                return Err(TableFormatError::FieldCount {
                    line: index + 1,
                    expected: "2",
                    content: line.to_string(),
                });
            }
            true_base_terms
                .entry(fields[0].to_string())
                .or_default()
                .insert(fields[1].to_string());
        }
        Ok(Benchmark { ancestors, true_base_terms })
    }

    /// Extends every protein's annotation set with the ancestors of each base
    /// term. A base term missing from the ancestor table is kept as is and
    /// reported; it contributes no ancestors.
    pub fn propagate(self) -> PropagatedBenchmark<'a> {
        let mut true_terms: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        let mut missing_terms: FxHashSet<String> = FxHashSet::default();
        for (protein, base_terms) in &self.true_base_terms {
            let propagated = true_terms.entry(protein.clone()).or_default();
            for term in base_terms {
                propagated.insert(term.clone());
                match self.ancestors.ancestors_of(term) {
                    Ok(term_ancestors) => {
                        for ancestor in term_ancestors {
                            propagated.insert(ancestor.clone());
                        }
                    }
                    Err(_) => {
                        print_log_msg(WARN, &format!("{} not found in ancestor table", term));
                        missing_terms.insert(term.clone());
                    }
                }
            }
        }
        PropagatedBenchmark {
            ancestors: self.ancestors,
            true_base_terms: self.true_base_terms,
            true_terms,
            missing_terms,
        }
    }

    pub fn base_terms_of(&self, protein: &str) -> Option<&FxHashSet<String>> {
        self.true_base_terms.get(protein)
    }

    pub fn protein_count(&self) -> usize {
        self.true_base_terms.len()
    }
}

/// Benchmark with the true-term closure computed. Read-only.
pub struct PropagatedBenchmark<'a> {
    ancestors: &'a AncestorMap,
    true_base_terms: FxHashMap<String, FxHashSet<String>>,
    true_terms: FxHashMap<String, FxHashSet<String>>,
    missing_terms: FxHashSet<String>,
}

impl<'a> PropagatedBenchmark<'a> {
    pub fn ancestors(&self) -> &AncestorMap {
        self.ancestors
    }

    pub fn true_terms_of(&self, protein: &str) -> Option<&FxHashSet<String>> {
        self.true_terms.get(protein)
    }

    pub fn base_terms_of(&self, protein: &str) -> Option<&FxHashSet<String>> {
        self.true_base_terms.get(protein)
    }

    pub fn is_benchmark_protein(&self, protein: &str) -> bool {
        self.true_terms
            .get(protein)
            .map_or(false, |terms| !terms.is_empty())
    }

    pub fn protein_count(&self) -> usize {
        self.true_terms.len()
    }

    /// Base terms that had no entry in the ancestor table.
    pub fn missing_terms(&self) -> &FxHashSet<String> {
        &self.missing_terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::toy_ancestor_map;

    const TOY_BENCHMARK: &str = "\
T100900000001\tGO:0044237
T100900000001\tGO:0044249
T100900000002\tGO:0008610
";

    #[test]
    fn test_propagation_superset() {
        let ancestors = toy_ancestor_map();
        let bench = Benchmark::from_reader(&ancestors, TOY_BENCHMARK.as_bytes()).unwrap();
        let bench = bench.propagate();
        for protein in ["T100900000001", "T100900000002"] {
            let base = bench.base_terms_of(protein).unwrap();
            let full = bench.true_terms_of(protein).unwrap();
            assert!(full.is_superset(base));
            // every propagated extra is an ancestor of some base term
            for term in full.difference(base) {
                let reached = base.iter().any(|b| {
                    ancestors
                        .ancestors_of(b)
                        .map_or(false, |anc| anc.contains(term))
                });
                assert!(reached, "{} not reachable from base terms", term);
            }
        }
    }

    #[test]
    fn test_propagated_closure_content() {
        let ancestors = toy_ancestor_map();
        let bench = Benchmark::from_reader(&ancestors, TOY_BENCHMARK.as_bytes()).unwrap();
        let bench = bench.propagate();
        let terms = bench.true_terms_of("T100900000001").unwrap();
        // GO:0044237 -> {GO:0008152, GO:0008150}, GO:0044249 -> {GO:0009058, GO:0008150}
        assert_eq!(terms.len(), 5);
        assert!(terms.contains("GO:0008150"));
        assert!(terms.contains("GO:0009058"));
        assert!(bench.is_benchmark_protein("T100900000001"));
        assert!(!bench.is_benchmark_protein("T100900000009"));
    }

    #[test]
    fn test_missing_base_term_is_kept() {
        let ancestors = toy_ancestor_map();
        let table = "T100900000003\tGO:7777777\n";
        let bench = Benchmark::from_reader(&ancestors, table.as_bytes()).unwrap();
        let bench = bench.propagate();
        let terms = bench.true_terms_of("T100900000003").unwrap();
        assert_eq!(terms.len(), 1);
        assert!(terms.contains("GO:7777777"));
        assert!(bench.missing_terms().contains("GO:7777777"));
    }

    #[test]
    fn test_malformed_benchmark_line() {
        let ancestors = toy_ancestor_map();
        let table = "T100900000001 GO:0044237\n";
        assert!(Benchmark::from_reader(&ancestors, table.as_bytes()).is_err());
    }
}
