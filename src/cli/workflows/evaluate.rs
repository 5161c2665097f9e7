// File: evaluate.rs
// Created: 2024-11-25 14:02:17
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved
// Description
// This file contains the workflow for evaluating a prediction file.
// Evaluation needs an ancestor table, a benchmark file and a submission.

use std::fs::File;
use std::io::BufWriter;

use peak_alloc::PeakAlloc;

use crate::cli::config::{read_eval_config_from_file, EvalConfig};
use crate::cli::*;
use crate::prelude::*;

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

pub const HELP_EVALUATE: &str = "\
usage: precrec evaluate -p <SUBMISSION> -a <ANCESTORS> -b <BENCHMARK> [OPTIONS]

input/output:
 -p, --prediction <PATH>     Submission file to evaluate (CAFA format, .gz supported)
 -a, --ancestors <PATH>      Ancestor table of the evaluated namespace
 -b, --benchmark <PATH>      Benchmark file with true annotations
 -n, --namespace <NS>        Ontology namespace of the inputs (BPO, MFO, CCO) [BPO]
 -c, --config <PATH>         TOML config with paths and threshold grid.
                             Explicit options override config values
 --curve <PATH>              Write the precision/recall curve as TSV
 --dump-confidence <PATH>    Write propagated confidences per (protein, term)

general options:
 -f, --format <FORMAT>       Output format of the report (default, tsv) [default]
 -t, --threads <INT>         Number of threads for the threshold sweep [1]
 -v, --verbose               Print verbose messages
 -h, --help                  Print this help menu

examples:
# Evaluate a submission against the BPO benchmark
precrec evaluate -p M1HS.117.txt -a ancestors_bpo.tsv -b leafonly_BPO.txt -n BPO

# Machine readable one-line report
precrec evaluate -p M1HS.117.txt -a ancestors_bpo.tsv -b leafonly_BPO.txt -f tsv
";

pub fn evaluate(env: AppArgs) {
    match env {
        AppArgs::Evaluate {
            prediction,
            ancestors,
            benchmark,
            namespace,
            config,
            curve,
            dump_confidence,
            format,
            threads,
            verbose,
            help,
        } => {
            if help {
                eprintln!("{}", HELP_EVALUATE);
                std::process::exit(0);
            }
            let config = config.map(|path| read_eval_config_from_file(&path));
            let ancestor_path = ancestors
                .or_else(|| config.as_ref().map(|c| c.ancestor_path.clone()))
                .unwrap_or_default();
            let benchmark_path = benchmark
                .or_else(|| config.as_ref().map(|c| c.benchmark_path.clone()))
                .unwrap_or_default();
            if prediction.is_none() || ancestor_path.is_empty() || benchmark_path.is_empty() {
                print_log_msg(FAIL, "Prediction, ancestor, and benchmark files must be provided");
                eprintln!("{}", HELP_EVALUATE);
                std::process::exit(1);
            }
            let prediction_path = prediction.unwrap();
            let namespace = Namespace::get_with_str(&namespace).unwrap_or_else(|| {
                print_log_msg(FAIL, "Namespace must be one of BPO, MFO, CCO");
                std::process::exit(1);
            });
            if threads > 1 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .unwrap_or_else(|_| {
                        print_log_msg(WARN, "Rayon thread pool already initialized");
                    });
            }

            if verbose {
                print_log_msg(INFO, &format!(
                    "Evaluating {} against {} ({})",
                    prediction_path, benchmark_path, namespace
                ));
            }
            let ancestor_map = measure_time!(AncestorMap::from_file(&ancestor_path))
                .unwrap_or_else(|e| {
                    print_log_msg(FAIL, &format!("Failed to load ancestor table: {}", e));
                    std::process::exit(1);
                });
            if verbose {
                print_log_msg(INFO, &format!("Ancestor table with {} terms", ancestor_map.len()));
            }
            let bench = Benchmark::from_file(&ancestor_map, &benchmark_path)
                .unwrap_or_else(|e| {
                    print_log_msg(FAIL, &format!("Failed to load benchmark: {}", e));
                    std::process::exit(1);
                });
            let bench = measure_time!(bench.propagate());

            let parser = GoPredParser::new();
            let predictions = parser.parse_file(&prediction_path).unwrap_or_else(|e| {
                print_log_msg(FAIL, &format!("Rejected submission: {}", e));
                std::process::exit(1);
            });
            if verbose {
                print_log_msg(INFO, &format!(
                    "Submission by {} (model {}): {} proteins, {} predictions",
                    predictions.author.as_deref().unwrap_or("unknown"),
                    predictions.model.map_or("?".to_string(), |m| m.to_string()),
                    predictions.num_proteins(),
                    predictions.num_predictions(),
                ));
            }

            let evaluator = measure_time!(Evaluator::new(&bench, &predictions));
            for term in evaluator.obsolete_terms() {
                print_log_msg(WARN, &format!("Obsolete term excluded from scoring: {}", term));
            }
            let grid = config.as_ref().map_or_else(default_threshold_grid, EvalConfig::threshold_grid);
            let result = measure_time!(evaluator.fmax(&grid));
            if verbose {
                let counts = evaluator.counts(result.threshold);
                print_log_msg(INFO, &format!(
                    "{} benchmark proteins, {} predicted, {} predicted in benchmark, {} above threshold {:.2}",
                    counts.benchmark_proteins, counts.predicted_proteins,
                    counts.predicted_in_benchmark, counts.above_threshold, result.threshold,
                ));
            }

            match format.as_str() {
                "tsv" => {
                    // prediction, benchmark, namespace, fmax, threshold, coverage
                    println!(
                        "{}\t{}\t{}\t{:.4}\t{:.2}\t{:.4}",
                        prediction_path, benchmark_path, namespace,
                        result.fmax, result.threshold, result.coverage,
                    );
                }
                "default" => {
                    println!("Prediction: {}", prediction_path);
                    println!("Benchmark: {}", benchmark_path);
                    println!("Ontology: {}", namespace);
                    println!("Fmax: {:.4}", result.fmax);
                    println!("Threshold at Fmax: {:.2}", result.threshold);
                    println!("Coverage: {:.4}", result.coverage);
                }
                _ => {
                    print_log_msg(FAIL, "Invalid format");
                    std::process::exit(1);
                }
            }

            if let Some(curve_path) = curve {
                let mut writer = BufWriter::new(File::create(&curve_path).expect(
                    &log_msg(FAIL, &format!("Unable to create curve file: {}", curve_path))
                ));
                result.write_curve(&mut writer).expect(
                    &log_msg(FAIL, "Unable to write the curve file")
                );
                if verbose { print_log_msg(INFO, &format!("Curve written to {}", curve_path)); }
            }
            if let Some(dump_path) = dump_confidence {
                let mut writer = BufWriter::new(File::create(&dump_path).expect(
                    &log_msg(FAIL, &format!("Unable to create confidence file: {}", dump_path))
                ));
                evaluator.write_confidence(&mut writer).expect(
                    &log_msg(FAIL, "Unable to write the confidence file")
                );
                if verbose { print_log_msg(INFO, &format!("Confidences written to {}", dump_path)); }
            }
            if verbose {
                print_log_msg(INFO, &format!(
                    "Peak memory usage: {:.2}MB", PEAK_ALLOC.peak_usage_as_mb()
                ));
            }
            print_log_msg(DONE, "Evaluation finished");
        }
        _ => {
            eprintln!("Invalid subcommand");
            std::process::exit(1);
        }
    }
}
