// File: curve.rs
// Created: 2024-11-20 17:48:36
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

//! Threshold sweep over an evaluator, producing the precision/recall curve
//! and Fmax. Thresholds are independent of each other, so the sweep runs on
//! the rayon pool.

use std::io::Write;

use rayon::prelude::*;

use crate::scoring::evaluator::Evaluator;

/// Default threshold grid, 0.01 to 0.99 in steps of 0.01.
pub fn default_threshold_grid() -> Vec<f64> {
    (1..100).map(|i| i as f64 * 0.01).collect()
}

/// Harmonic mean of precision and recall; 0 when both are 0.
pub fn f_measure(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Result of a full threshold sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct FmaxResult {
    pub thresholds: Vec<f64>,
    pub precisions: Vec<f64>,
    pub recalls: Vec<f64>,
    pub fmax: f64,
    /// Threshold at which fmax was reached.
    pub threshold: f64,
    /// Fraction of benchmark proteins with at least one prediction.
    pub coverage: f64,
}

impl FmaxResult {
    /// Writes the curve as `THRESHOLD<TAB>PRECISION<TAB>RECALL` lines.
    pub fn write_curve<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for i in 0..self.thresholds.len() {
            writeln!(
                writer,
                "{:.2}\t{:.4}\t{:.4}",
                self.thresholds[i], self.precisions[i], self.recalls[i]
            )?;
        }
        Ok(())
    }
}

impl<'a> Evaluator<'a> {
    /// Sweeps the given thresholds and tracks the maximum F-measure.
    pub fn fmax(&self, thresholds: &[f64]) -> FmaxResult {
        let points: Vec<(f64, f64)> = thresholds
            .par_iter()
            .map(|&threshold| {
                let pr = self.precision_recall(threshold);
                (pr.precision, pr.recall)
            })
            .collect();

        let mut fmax = 0.0;
        let mut threshold_at_fmax = thresholds.first().copied().unwrap_or(0.0);
        for (i, &(precision, recall)) in points.iter().enumerate() {
            let f = f_measure(precision, recall);
            if f > fmax {
                fmax = f;
                threshold_at_fmax = thresholds[i];
            }
        }
        FmaxResult {
            thresholds: thresholds.to_vec(),
            precisions: points.iter().map(|&(p, _)| p).collect(),
            recalls: points.iter().map(|&(_, r)| r).collect(),
            fmax,
            threshold: threshold_at_fmax,
            coverage: self.coverage(),
        }
    }

    pub fn fmax_default(&self) -> FmaxResult {
        self.fmax(&default_threshold_grid())
    }
}
