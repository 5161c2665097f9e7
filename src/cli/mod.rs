//! Command line interface for precrec

// File: mod.rs
// Created: 2024-11-25 13:20:41
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

// Arguments of CLI app are defined here

pub mod config;
pub mod workflows;

pub enum AppArgs {
    Global {
        help: bool,
    },
    Evaluate {
        prediction: Option<String>,
        ancestors: Option<String>,
        benchmark: Option<String>,
        namespace: String,
        config: Option<String>,
        curve: Option<String>,
        dump_confidence: Option<String>,
        format: String,
        threads: usize,
        verbose: bool,
        help: bool,
    },
    Split {
        prediction: Option<String>,
        namespace_map: Option<String>,
        output_prefix: Option<String>,
        verbose: bool,
        help: bool,
    },
}
