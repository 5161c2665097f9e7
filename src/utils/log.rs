// File: log.rs
// Created: 2024-11-18 10:22:41
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2024 Hyunbin Kim, All rights reserved

// Colored string for log
pub const INFO: &str = "\x1b[1;32m[INFO]\x1b[0m";
pub const FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m";
pub const WARN: &str = "\x1b[1;33m[WARN]\x1b[0m";
pub const DONE: &str = "\x1b[1;34m[DONE]\x1b[0m";

pub fn log_msg(prefix: &str, msg: &str) -> String { format!("{} {}", prefix, msg) }
pub fn print_log_msg(prefix: &str, msg: &str) { eprintln!("{}", log_msg(prefix, msg)); }

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_colored_log() {
        let msg = "benchmark loaded";
        assert_eq!(log_msg(INFO, msg), "\x1b[1;32m[INFO]\x1b[0m benchmark loaded");
        assert_eq!(log_msg(FAIL, msg), "\x1b[1;31m[FAIL]\x1b[0m benchmark loaded");
        assert_eq!(log_msg(WARN, msg), "\x1b[1;33m[WARN]\x1b[0m benchmark loaded");
        assert_eq!(log_msg(DONE, msg), "\x1b[1;34m[DONE]\x1b[0m benchmark loaded");
        print_log_msg(INFO, msg);
    }
}
