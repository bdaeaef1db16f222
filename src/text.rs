//! Command-line tokenizer for the operator console.
//!
//! Console commands have at most three parts: a verb, one argument, and a
//! free-form tail (`"p roll 1.5"`, `"mot 0 0.3"`, `"arm"`). The tokenizer
//! borrows from the input line and never allocates.

/// Split a console line into `(verb, argument, tail)`.
///
/// The line is trimmed first. The verb and argument are separated by one
/// or more spaces; the tail is everything after the single space that ends
/// the argument, verbatim. Missing parts come back as `""`.
pub fn split_command(line: &str) -> (&str, &str, &str) {
    let line = line.trim();
    let (verb, rest) = next_token(line);
    let (arg, tail) = next_token(rest);
    (verb, arg, tail)
}

fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start_matches(' ');
    match s.find(' ') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    }
}
