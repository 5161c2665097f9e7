//! # About project
//!
//! Precrec assesses protein function predictions: it parses CAFA-style
//! submission files, propagates predicted confidences over the Gene Ontology
//! ancestor closure, and scores them against a curated benchmark with
//! precision/recall curves and Fmax per namespace.

pub mod cli;
pub mod ontology;
pub mod prediction;
pub mod scoring;
pub mod utils;

pub mod prelude {
    pub use crate::measure_time;
    pub use crate::ontology::ancestors::{AncestorMap, TermNotFound};
    pub use crate::ontology::namespace::{
        is_root_term, Namespace, NamespaceMap, ONTOLOGY_ROOTS,
    };
    pub use crate::prediction::parser::{
        GoPredParser, PredictionSet, SubmissionError, TermConfidence,
    };
    pub use crate::prediction::record::{RecordKind, LEGAL_KEYWORDS};
    pub use crate::prediction::split::{split_by_namespace, SplitError, SplitPaths};
    pub use crate::scoring::benchmark::{Benchmark, PropagatedBenchmark};
    pub use crate::scoring::curve::{default_threshold_grid, f_measure, FmaxResult};
    pub use crate::scoring::evaluator::{
        EvaluationCounts, Evaluator, PrecisionRecall, ProteinPrediction, TermPrecisionRecall,
        TermScore,
    };
    pub use crate::utils::loader::{open_text_file, TableFormatError};
    pub use crate::utils::log::{log_msg, print_log_msg, DONE, FAIL, INFO, WARN};
}
