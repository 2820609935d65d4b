use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use std::borrow::Cow;

/// Decode an uploaded file to text.
///
/// A byte-order mark decides the encoding when present. Otherwise the bytes
/// are read as UTF-8, and only when most non-ASCII characters fail to decode
/// are they re-read as Windows-1251, the encoding of RP5 "ANSI" exports. A
/// few stray bytes in a UTF-8 file become U+FFFD and the rest is kept.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static Encoding) {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return (text, encoding);
    }

    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors || !mostly_undecodable(&text) {
        return (text, UTF_8);
    }

    let (text, _had_errors) = WINDOWS_1251.decode_without_bom_handling(bytes);
    (text, WINDOWS_1251)
}

// Single-byte Cyrillic read as UTF-8 yields a replacement for nearly every
// non-ASCII byte.
fn mostly_undecodable(text: &str) -> bool {
    let (replaced, non_ascii) = text
        .chars()
        .filter(|c| !c.is_ascii())
        .fold((0usize, 0usize), |(replaced, total), c| {
            (replaced + usize::from(c == char::REPLACEMENT_CHARACTER), total + 1)
        });
    replaced * 2 > non_ascii
}

/// Index of the first line containing both markers (case-sensitive).
///
/// Callers pass only the prefix they want searched. When no line matches the
/// first line is assumed to be the header.
pub fn locate_header<S: AsRef<str>>(
    lines: &[S],
    direction_marker: &str,
    speed_marker: &str,
) -> usize {
    lines
        .iter()
        .map(|line| line.as_ref())
        .position(|line| line.contains(direction_marker) && line.contains(speed_marker))
        .unwrap_or(0)
}

/// `,` only when the header has commas and no semicolons; `;` otherwise.
pub fn detect_delimiter(header_line: &str) -> char {
    if header_line.contains(',') && !header_line.contains(';') {
        ','
    } else {
        ';'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_header_after_comments() {
        let lines = [
            "# Метеостанция Калининград (аэропорт)",
            "# Все данные приведены в местном времени",
            "\"Местное время\";\"T\";\"DD\";\"Ff\";\"N\"",
            "\"01.06.2024 00:00\";\"12.0\";\"С\";\"3\";\"\"",
        ];
        assert_eq!(locate_header(&lines, "DD", "Ff"), 2);
    }

    #[test]
    fn test_locate_header_is_case_sensitive() {
        let lines = ["dd;ff", "date;DD;Ff"];
        assert_eq!(locate_header(&lines, "DD", "Ff"), 1);
    }

    #[test]
    fn test_locate_header_defaults_to_first_line() {
        let lines = ["Направление;Скорость", "С;5"];
        assert_eq!(locate_header(&lines, "DD", "Ff"), 0);

        let empty: [&str; 0] = [];
        assert_eq!(locate_header(&empty, "DD", "Ff"), 0);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("DD,Ff,T"), ',');
        assert_eq!(detect_delimiter("DD;Ff;T"), ';');
        assert_eq!(detect_delimiter("\"Ветер, дующий\";DD;Ff"), ';');
        assert_eq!(detect_delimiter("DD Ff"), ';');
    }

    #[test]
    fn test_decode_utf8_and_bom() {
        let (text, encoding) = decode_text("DD;Ff\nС;5".as_bytes());
        assert_eq!(text, "DD;Ff\nС;5");
        assert_eq!(encoding, UTF_8);

        let mut with_bom = vec![0xEF, 0xBB, 0xBF];
        with_bom.extend_from_slice("DD;Ff".as_bytes());
        let (text, encoding) = decode_text(&with_bom);
        assert_eq!(text, "DD;Ff");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_decode_utf8_with_stray_byte() {
        let mut bytes = "# Москва ".as_bytes().to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice("\nDD;Ff\nС;5\nЮВ;3,2\nСЗ;4\n".as_bytes());

        let (text, encoding) = decode_text(&bytes);
        assert_eq!(encoding, UTF_8);
        assert_eq!(text, "# Москва \u{FFFD}\nDD;Ff\nС;5\nЮВ;3,2\nСЗ;4\n");
    }

    #[test]
    fn test_decode_windows_1251() {
        let (bytes, _, _) = WINDOWS_1251.encode("DD;Ff\nЮВ;3,2");
        let (text, encoding) = decode_text(&bytes);
        assert_eq!(text, "DD;Ff\nЮВ;3,2");
        assert_eq!(encoding, WINDOWS_1251);
    }
}
