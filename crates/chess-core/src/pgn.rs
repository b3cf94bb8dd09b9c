//! PGN display helpers: regex-based, no move legality checks.

use std::sync::LazyLock;

use regex::Regex;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).expect("valid header regex"));
static BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket regex"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("valid comment regex"));
static VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid variation regex"));
static SAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O")
        .expect("valid SAN regex")
});

/// All `[Key "Value"]` tag pairs in order of appearance.
pub fn headers(pgn: &str) -> Vec<(String, String)> {
    HEADER_RE
        .captures_iter(pgn)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
        .collect()
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
pub fn extract_moves(pgn: &str) -> Vec<String> {
    let no_headers = BRACKET_RE.replace_all(pgn, "");
    let no_comments = COMMENT_RE.replace_all(&no_headers, "");
    let no_variations = VARIATION_RE.replace_all(&no_comments, "");

    SAN_RE
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract a string value from a PGN header (e.g. ECO, Termination).
pub fn extract_header(pgn: &str, header_name: &str) -> Option<String> {
    headers(pgn)
        .into_iter()
        .find(|(key, _)| key == header_name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Number the moves for display: `1. e4 e5 2. Nf3 Nc6`.
pub fn format_movetext(moves: &[String]) -> String {
    moves
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[Event "Live Chess"]
[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[WhiteElo "1500"]
[BlackElo "1600"]
[ECO "C44"]

1. e4 {[%clk 0:09:58.1]} 1... e5 2. Nf3 (2. Bc4 Nf6) 2... Nc6 3. O-O-O?? 1-0"#;

    #[test]
    fn test_extract_moves_skips_comments_and_variations() {
        let moves = extract_moves(SAMPLE);
        assert_eq!(moves, vec!["e4", "e5", "Nf3", "Nc6", "O-O-O"]);
    }

    #[test]
    fn test_headers_in_order() {
        let tags = headers(SAMPLE);
        assert_eq!(tags[0], ("Event".to_string(), "Live Chess".to_string()));
        assert_eq!(tags.len(), 7);
    }

    #[test]
    fn test_extract_header() {
        assert_eq!(extract_header(SAMPLE, "ECO").as_deref(), Some("C44"));
        assert_eq!(extract_header(SAMPLE, "WhiteElo").as_deref(), Some("1500"));
        assert_eq!(extract_header(SAMPLE, "Missing"), None);
        assert_eq!(extract_header("[Site \"\"]", "Site"), None);
    }

    #[test]
    fn test_format_movetext() {
        let moves: Vec<String> = ["e4", "e5", "Nf3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(format_movetext(&moves), "1. e4 e5 2. Nf3");
        assert_eq!(format_movetext(&[]), "");
    }
}
