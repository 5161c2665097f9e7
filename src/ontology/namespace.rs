// File: namespace.rs
// Created: 2024-11-19 09:44:26
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

use std::fmt;
use std::io::BufRead;

use rustc_hash::FxHashMap;

use crate::utils::loader::{open_text_file, TableFormatError};

/// Root accessions of the three GO namespaces. A predicted term with an
/// empty ancestor set that is not one of these is treated as obsolete.
pub const ONTOLOGY_ROOTS: [&str; 3] = ["GO:0008150", "GO:0003674", "GO:0005575"];

pub fn is_root_term(term: &str) -> bool {
    ONTOLOGY_ROOTS.contains(&term)
}

/// The three Gene Ontology namespaces an evaluation is run against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    BPO,
    MFO,
    CCO,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::BPO, Namespace::MFO, Namespace::CCO];

    pub fn get_with_str(namespace: &str) -> Option<Self> {
        match namespace {
            "BPO" | "bpo" | "biological_process" => Some(Namespace::BPO),
            "MFO" | "mfo" | "molecular_function" => Some(Namespace::MFO),
            "CCO" | "cco" | "cellular_component" => Some(Namespace::CCO),
            _ => None,
        }
    }

    pub fn root_term(&self) -> &'static str {
        match self {
            Namespace::BPO => "GO:0008150",
            Namespace::MFO => "GO:0003674",
            Namespace::CCO => "GO:0005575",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Namespace::BPO => "biological_process",
            Namespace::MFO => "molecular_function",
            Namespace::CCO => "cellular_component",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Namespace::BPO => "BPO",
            Namespace::MFO => "MFO",
            Namespace::CCO => "CCO",
        };
        write!(f, "{}", name)
    }
}

/// Term -> namespace assignment loaded from a flat file.
/// File format, one term per line, no header: `TERM<TAB>NAMESPACE`.
#[derive(Debug, Default)]
pub struct NamespaceMap {
    map: FxHashMap<String, Namespace>,
}

impl NamespaceMap {
    pub fn from_file(path: &str) -> Result<Self, TableFormatError> {
        let reader = open_text_file(path)?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TableFormatError> {
        let mut map = FxHashMap::default();
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
            let namespace = Namespace::get_with_str(fields[1]).ok_or_else(|| {
                TableFormatError::UnknownValue {
                    line: index + 1,
                    value: fields[1].to_string(),
                    content: line.to_string(),
                }
            })?;
            map.insert(fields[0].to_string(), namespace);
        }
        Ok(NamespaceMap { map })
    }

    pub fn namespace_of(&self, term: &str) -> Option<Namespace> {
        self.map.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_from_str() {
        assert_eq!(Namespace::get_with_str("BPO"), Some(Namespace::BPO));
        assert_eq!(Namespace::get_with_str("mfo"), Some(Namespace::MFO));
        assert_eq!(Namespace::get_with_str("cellular_component"), Some(Namespace::CCO));
        assert_eq!(Namespace::get_with_str("HPO"), None);
    }

    #[test]
    fn test_roots_match_namespaces() {
        for namespace in Namespace::ALL {
            assert!(is_root_term(namespace.root_term()));
        }
        assert!(!is_root_term("GO:0008152"));
    }

    #[test]
    fn test_load_namespace_map() {
        let table = "GO:0008150\tBPO\nGO:0003674\tMFO\nGO:0005737\tcellular_component\n";
        let map = NamespaceMap::from_reader(table.as_bytes()).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.namespace_of("GO:0005737"), Some(Namespace::CCO));
        assert_eq!(map.namespace_of("GO:0000001"), None);
    }

    #[test]
    fn test_unknown_namespace_aborts_load() {
        let table = "GO:0008150\tXXX\n";
        let err = NamespaceMap::from_reader(table.as_bytes()).unwrap_err();
        match err {
            TableFormatError::UnknownValue { value, .. } => assert_eq!(value, "XXX"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
