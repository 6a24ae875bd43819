use std::io::{self, Read, Write};

use distinct_core::{MembershipStrategy, is_unique_by_strategy, normalize_stream_text};

/// Reads the whole stream and checks its characters, minus one trailing line
/// terminator.
pub fn check_stream<R: Read>(mut reader: R, strategy: MembershipStrategy) -> io::Result<bool> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    Ok(is_unique_by_strategy(
        strategy,
        normalize_stream_text(&raw).chars(),
    ))
}

pub fn write_verdict(out: &mut dyn Write, unique: bool) -> io::Result<()> {
    writeln!(out, "{unique}")
}

#[cfg(test)]
mod tests {
    use super::{check_stream, write_verdict};
    use distinct_core::MembershipStrategy;

    #[test]
    fn stream_verdicts() {
        let cases = [
            ("you shall not pass\n", false),
            ("you can\n", true),
            ("you can", true),
            ("", true),
            ("\n", true),
            ("ab\n\n", true),
            ("a\n\n\n", false),
        ];
        for (input, expected) in cases {
            let actual = check_stream(input.as_bytes(), MembershipStrategy::Hash)
                .expect("in-memory read");
            assert_eq!(actual, expected, "input {input:?}");
        }
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes: &[u8] = &[0xff, 0xfe];
        assert!(check_stream(bytes, MembershipStrategy::Linear).is_err());
    }

    #[test]
    fn verdict_is_a_single_bare_line() {
        let mut out = Vec::new();
        write_verdict(&mut out, false).expect("write");
        assert_eq!(out, b"false\n");
    }
}
