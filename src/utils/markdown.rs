// src/utils/markdown.rs

//! Repair passes for converted Markdown.
//!
//! HTML to Markdown conversion leaves two kinds of artifacts on the provider's
//! pages: literal asterisks that downstream renderers read as emphasis, and
//! bold text split into one `**...**` span per styled run.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Two or more adjacent bold spans, each optionally followed by one space.
static BOLD_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\*\*(?:\\\*|[^*])+\*\* ?){2,}").expect("valid regex"));

/// One bold span within a group, capturing its text and trailing space.
/// Span text may contain escaped stars but no bare ones.
static BOLD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*((?:\\\*|[^*])+)\*\*( ?)").expect("valid regex"));

/// Apply both passes in order: star escaping, then bold merging.
pub fn repair(markdown: &str) -> String {
    merge_bold(&escape_stars(markdown))
}

/// Escape every lone `*` to `\*`.
///
/// A star is lone when it has a neighbour on both sides and neither neighbour
/// is a `*`. Stars already preceded by a backslash are left alone, and so are
/// list bullets: a star opening its line (after indentation) followed by a
/// space.
pub fn escape_stars(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut line_head = true;

    for (i, &c) in chars.iter().enumerate() {
        if c == '*' && i > 0 && i + 1 < chars.len() {
            let prev = chars[i - 1];
            let next = chars[i + 1];
            let bullet = line_head && next == ' ';
            if prev != '*' && next != '*' && prev != '\\' && !bullet {
                out.push('\\');
            }
        }
        out.push(c);
        line_head = c == '\n' || (line_head && (c == ' ' || c == '\t'));
    }
    out
}

/// Collapse runs of adjacent bold spans into a single span.
///
/// `**foo** **bar**` becomes `**foobar**`. A space after the last span of a
/// run is kept so the following word stays separated.
pub fn merge_bold(text: &str) -> String {
    BOLD_GROUP
        .replace_all(text, |group: &Captures| {
            let mut inner = String::new();
            let mut trailing = "";
            for run in BOLD_RUN.captures_iter(&group[0]) {
                inner.push_str(&run[1]);
                trailing = run.get(2).map_or("", |m| m.as_str());
            }
            format!("**{inner}**{trailing}")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_lone_star() {
        assert_eq!(escape_stars("a * b"), r"a \* b");
        assert_eq!(escape_stars("5*3"), r"5\*3");
    }

    #[test]
    fn test_escape_leaves_bold_alone() {
        assert_eq!(escape_stars("**bold**"), "**bold**");
        assert_eq!(escape_stars("say **this** now"), "say **this** now");
    }

    #[test]
    fn test_escape_edges_and_existing_escapes() {
        assert_eq!(escape_stars("*start"), "*start");
        assert_eq!(escape_stars("end*"), "end*");
        assert_eq!(escape_stars(r"a \* b"), r"a \* b");
        assert_eq!(escape_stars("a*b*c"), r"a\*b\*c");
    }

    #[test]
    fn test_escape_keeps_list_bullets() {
        assert_eq!(escape_stars("* 一\n* 二"), "* 一\n* 二");
        assert_eq!(escape_stars("intro\n  * nested"), "intro\n  * nested");
        assert_eq!(escape_stars("intro\n*x"), "intro\n\\*x");
        assert_eq!(escape_stars("a * b\n* c"), "a \\* b\n* c");
    }

    #[test]
    fn test_escape_multibyte_neighbours() {
        assert_eq!(escape_stars("奖励*2"), r"奖励\*2");
    }

    #[test]
    fn test_merge_adjacent_runs() {
        assert_eq!(merge_bold("**foo** **bar**"), "**foobar**");
        assert_eq!(merge_bold("**a****b****c**"), "**abc**");
    }

    #[test]
    fn test_merge_keeps_single_span_and_surroundings() {
        assert_eq!(merge_bold("**only**"), "**only**");
        assert_eq!(merge_bold("x **a** **b** y"), "x **ab** y");
        assert_eq!(merge_bold("**a** plain **b**"), "**a** plain **b**");
    }

    #[test]
    fn test_merge_multiple_groups() {
        assert_eq!(
            merge_bold("**a** **b** mid **c****d**"),
            "**ab** mid **cd**"
        );
    }

    #[test]
    fn test_repair_order() {
        assert_eq!(repair("**活动** **奖励** x * y"), r"**活动奖励** x \* y");
        assert_eq!(repair("**a*b** **c**"), r"**a\*bc**");
    }
}
