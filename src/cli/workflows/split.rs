// File: split.rs
// Created: 2024-11-25 15:11:49
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Workflow for splitting a submission into per-namespace files.

use crate::cli::*;
use crate::prelude::*;

pub const HELP_SPLIT: &str = "\
usage: precrec split -p <SUBMISSION> -m <NAMESPACE_MAP> -o <OUT_PREFIX>

input/output:
 -p, --prediction <PATH>     Submission file to split (CAFA format, .gz supported)
 -m, --namespace-map <PATH>  Term to namespace table (TERM<TAB>NAMESPACE)
 -o, --output <PREFIX>       Prefix of the output files;
                             writes <PREFIX>_BPO.txt, <PREFIX>_MFO.txt, <PREFIX>_CCO.txt

general options:
 -v, --verbose               Print verbose messages
 -h, --help                  Print this help menu
";

pub fn split(env: AppArgs) {
    match env {
        AppArgs::Split {
            prediction,
            namespace_map,
            output_prefix,
            verbose,
            help,
        } => {
            if help {
                eprintln!("{}", HELP_SPLIT);
                std::process::exit(0);
            }
            if prediction.is_none() || namespace_map.is_none() || output_prefix.is_none() {
                print_log_msg(FAIL, "Prediction, namespace map, and output prefix must be provided");
                eprintln!("{}", HELP_SPLIT);
                std::process::exit(1);
            }
            let prediction_path = prediction.unwrap();
            let namespace_map_path = namespace_map.unwrap();
            let output_prefix = output_prefix.unwrap();

            let namespaces = NamespaceMap::from_file(&namespace_map_path).unwrap_or_else(|e| {
                print_log_msg(FAIL, &format!("Failed to load namespace map: {}", e));
                std::process::exit(1);
            });
            let parser = GoPredParser::new();
            let predictions = parser.parse_file(&prediction_path).unwrap_or_else(|e| {
                print_log_msg(FAIL, &format!("Rejected submission: {}", e));
                std::process::exit(1);
            });
            if verbose {
                print_log_msg(INFO, &format!(
                    "Splitting {} predictions over {} proteins",
                    predictions.num_predictions(), predictions.num_proteins()
                ));
            }
            let paths = split_by_namespace(&predictions, &namespaces, &output_prefix)
                .unwrap_or_else(|e| {
                    print_log_msg(FAIL, &format!("Split failed: {}", e));
                    std::process::exit(1);
                });
            if verbose {
                for namespace in Namespace::ALL {
                    print_log_msg(INFO, &format!("{}: {}", namespace, paths.get(namespace)));
                }
            }
            print_log_msg(DONE, "Split finished");
        }
        _ => {
            eprintln!("Invalid subcommand");
            std::process::exit(1);
        }
    }
}
