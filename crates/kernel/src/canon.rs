//! Text canonicalization.
//!
//! Folds typographic variants down to ASCII, lowercases, collapses
//! whitespace and removes blank and `//` comment lines. The result is the
//! only form the parser ever sees.

/// Single-character substitutions applied before lowercasing.
const SUBSTITUTIONS: &[(char, char)] = &[
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{2014}', '-'),
    ('\u{2013}', '-'),
    ('\u{00A0}', ' '),
    ('\t', ' '),
    ('\r', ' '),
    ('\u{000C}', ' '),
];

pub const COMMENT_PREFIX: &str = "//";

fn substitute(ch: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == ch)
        .map_or(ch, |(_, to)| *to)
}

/// Canonicalize raw source text. Never fails.
pub fn canonicalize(source: &str) -> String {
    let folded: String = source
        .chars()
        .map(substitute)
        .flat_map(char::to_lowercase)
        .collect();

    folded
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_typographic_quotes_and_dashes() {
        assert_eq!(canonicalize("\u{201C}A\u{201D} \u{2014} \u{2018}b\u{2019}"), "\"a\" - 'b'");
    }

    #[test]
    fn drops_comments_and_blank_lines() {
        let source = "  // header\n\n Psi  ::\tF3^3 \r\n// trailing\n";
        assert_eq!(canonicalize(source), "psi :: f3^3");
    }

    #[test]
    fn indented_comment_is_still_dropped() {
        assert_eq!(canonicalize("   // note\ngrad"), "grad");
    }
}
