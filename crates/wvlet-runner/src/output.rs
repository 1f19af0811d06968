//! Post-processing of compiler standard output.
//!
//! The wvlet executable prints a one-line banner before the compiled query.
//! Nothing in its interface guarantees this; the binding assumes it and drops
//! exactly [`BANNER_LINES`] line from successful output.

/// Number of leading stdout lines the compiler emits before its result.
pub const BANNER_LINES: usize = 1;

/// Removes the banner line from captured compiler output.
///
/// A single trailing newline terminates the last line rather than starting an
/// empty one, so it does not survive into the result. Output with no line
/// break at all is only a banner and yields an empty string.
///
/// # Example
///
/// ```
/// use wvlet_runner::strip_banner;
///
/// assert_eq!(strip_banner("wvlet 0.1\nselect *\nfrom t\n"), "select *\nfrom t");
/// assert_eq!(strip_banner("wvlet 0.1"), "");
/// ```
#[must_use]
pub fn strip_banner(stdout: &str) -> String {
    let body = stdout.strip_suffix('\n').unwrap_or(stdout);
    body.splitn(BANNER_LINES + 1, '\n')
        .nth(BANNER_LINES)
        .map_or_else(String::new, str::to_owned)
}
