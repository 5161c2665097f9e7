// File: macros.rs
// Created: 2024-11-18 10:40:05
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

/// Evaluates an expression and logs its wall time with an INFO prefix.
/// Returns the value of the expression.
#[macro_export]
macro_rules! measure_time {
    ($e:expr) => {{
        let start = std::time::Instant::now();
        let result = $e;
        let elapsed = start.elapsed();
        $crate::utils::log::print_log_msg(
            $crate::utils::log::INFO,
            &format!("{} took {:.3}s", stringify!($e), elapsed.as_secs_f64()),
        );
        result
    }};
}
