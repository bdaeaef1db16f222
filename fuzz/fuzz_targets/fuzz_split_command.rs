//! Fuzz target: `split_command`
//!
//! Arbitrary UTF-8 console lines must never panic (no slicing inside a
//! multi-byte character) and every returned part must borrow from the
//! input.
//!
//! cargo fuzz run fuzz_split_command

#![no_main]

use flightcore::text::split_command;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|line: &str| {
    let (verb, arg, tail) = split_command(line);
    assert!(!verb.contains(' '));
    assert!(!arg.contains(' '));
    assert!(verb.len() + arg.len() + tail.len() <= line.len());
    for part in [verb, arg, tail] {
        assert!(part.is_empty() || line.contains(part));
    }
});
