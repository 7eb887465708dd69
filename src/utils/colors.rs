/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// In-gym rows print green, closed rows print without emphasis,
/// auto-closed rows grey.
pub fn color_for_status(open: bool, auto_closed: bool) -> &'static str {
    if open {
        GREEN
    } else if auto_closed {
        GREY
    } else {
        RESET
    }
}
