/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

/// Grey out empty values (unset times, zero durations).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "0分" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Check marker for the inclusion flag.
pub fn colorize_included(included: bool) -> String {
    if included {
        format!("{GREEN}✔{RESET}")
    } else {
        format!("{GREY}-{RESET}")
    }
}
