//! Splitting text into lines that keep their terminators.
//!
//! Terminators are preserved verbatim and take part in equality, so a file
//! using CRLF endings never compares equal to the same text with LF endings.

/// One physical line, including its terminator if it had one.
pub type Line = String;

/// Split `text` after every `\n`.
///
/// A final line without a terminator is kept as-is. Empty input yields no
/// lines at all.
///
/// ```
/// use trimerge_diff::split_lines;
///
/// assert_eq!(split_lines("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<Line> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Concatenate lines back into a single string.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.as_ref().len()).sum());
    for line in lines {
        out.push_str(line.as_ref());
    }
    out
}
