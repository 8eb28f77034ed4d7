//! Derive a short recipe title from generated recipe text.
//!
//! The text is scanned by an ordered list of rules; the first rule that yields
//! a candidate wins, and the candidate is then cleaned up and length-limited.
//! Output is a best-effort label used to seed a video search, not an identifier.

use log::debug;

/// Emitted when no rule finds a usable candidate
pub const FALLBACK_TITLE: &str = "Delicious Recipe";

/// Maximum length, in characters, of an extracted title
pub const MAX_TITLE_CHARS: usize = 70;

/// Lines at or above this length are never treated as emoji titles
const MAX_EMOJI_LINE_CHARS: usize = 100;

/// Exclusive bounds on the trimmed length of a plain-line candidate
const SHORT_LINE_MIN_CHARS: usize = 10;
const SHORT_LINE_MAX_CHARS: usize = 80;

/// Truncation only backs off to a word boundary past this position
const MIN_WORD_BOUNDARY: usize = 30;

/// Chatty openers that are never titles (lowercase, matched as prefixes)
const INTRO_PREFIXES: &[&str] = &[
    "hello",
    "hi ",
    "hi!",
    "hi,",
    "hey ",
    "hey!",
    "hey,",
    "sure!",
    "sure,",
    "sure.",
    "sure thing",
    "certainly",
    "absolutely",
    "of course",
    "okay",
    "ok,",
    "great!",
    "great,",
    "great choice",
    "great question",
    "here's",
    "here is",
    "welcome",
    "what a",
    "i'd be happy",
    "i would be happy",
    "let's",
];

/// Label prefixes stripped from a candidate (lowercase)
const LABEL_PREFIXES: &[&str] = &["recipe title:", "recipe name:", "recipe:", "title:", "name:"];

const MARKDOWN_MARKERS: &[char] = &['#', '*', '_', '-', '>', '`', '~'];

/// Title extraction rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    /// A short line decorated with pictographic symbols
    EmojiLine,
    /// A markdown header line
    MarkdownHeader,
    /// The first plain line of plausible title length
    ShortLine,
    /// Nothing matched
    Fallback,
}

impl TitleRule {
    /// All rules in priority order. `Fallback` is last and always matches.
    pub const ORDERED: [TitleRule; 4] = [
        TitleRule::EmojiLine,
        TitleRule::MarkdownHeader,
        TitleRule::ShortLine,
        TitleRule::Fallback,
    ];

    /// Find this rule's raw candidate among the non-empty, trimmed lines.
    pub fn candidate(&self, lines: &[&str]) -> Option<String> {
        match self {
            TitleRule::EmojiLine => lines
                .iter()
                .filter(|line| line.chars().count() < MAX_EMOJI_LINE_CHARS)
                .filter(|line| line.chars().any(is_pictographic))
                .map(|line| strip_markers(&strip_pictographs(line)).to_string())
                .find(|candidate| !candidate.is_empty()),
            TitleRule::MarkdownHeader => lines
                .iter()
                .filter(|line| line.starts_with('#'))
                .map(|line| line.trim_start_matches('#').trim().to_string())
                .find(|candidate| !candidate.is_empty()),
            TitleRule::ShortLine => lines
                .iter()
                .find(|line| {
                    let len = line.chars().count();
                    len > SHORT_LINE_MIN_CHARS && len < SHORT_LINE_MAX_CHARS && !is_intro(line)
                })
                .map(|line| line.to_string()),
            TitleRule::Fallback => Some(FALLBACK_TITLE.to_string()),
        }
    }
}

/// Extract a short title from free-form recipe text.
///
/// Deterministic: the same text always yields the same title.
pub fn extract_title(text: &str) -> String {
    extract_title_with_rule(text).1
}

/// Like [`extract_title`], also reporting which rule produced the title.
pub fn extract_title_with_rule(text: &str) -> (TitleRule, String) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    TitleRule::ORDERED
        .into_iter()
        .find_map(|rule| {
            let title = clean_candidate(&rule.candidate(&lines)?);
            if title.is_empty() {
                return None;
            }
            debug!("Title rule {:?} matched: {}", rule, title);
            Some((rule, title))
        })
        .unwrap_or_else(|| (TitleRule::Fallback, FALLBACK_TITLE.to_string()))
}

/// Post-process a raw candidate: drop label prefixes, keep the text after the
/// last colon, strip trailing punctuation and limit the length.
pub fn clean_candidate(candidate: &str) -> String {
    let mut title = strip_markers(candidate).to_string();

    let label = LABEL_PREFIXES.iter().find(|prefix| {
        title
            .get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
    });
    if let Some(prefix) = label {
        title = title[prefix.len()..].to_string();
    }

    if let Some(pos) = title.rfind(':') {
        let after = title[pos + 1..].trim();
        if !after.is_empty() {
            title = after.to_string();
        }
    }

    let title = title
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != ')')
        .trim_matches(MARKDOWN_MARKERS)
        .trim();

    truncate_title(title)
}

/// Limit a title to [`MAX_TITLE_CHARS`], backing off to the last word boundary
/// when one exists past [`MIN_WORD_BOUNDARY`].
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }

    let hard: String = title.chars().take(MAX_TITLE_CHARS).collect();
    match hard.rfind(' ') {
        Some(pos) if hard[..pos].chars().count() > MIN_WORD_BOUNDARY => hard[..pos].trim_end().to_string(),
        _ => hard.trim_end().to_string(),
    }
}

fn is_intro(line: &str) -> bool {
    let lower = line.to_lowercase();
    INTRO_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

fn strip_markers(text: &str) -> &str {
    text.trim_start_matches(|c: char| MARKDOWN_MARKERS.contains(&c) || c.is_whitespace())
        .trim_end()
}

fn strip_pictographs(line: &str) -> String {
    line.chars()
        .filter(|c| !is_pictographic(*c) && !is_emoji_joiner(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Codepoints in the emoji and pictograph blocks
pub fn is_pictographic(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F5FF   // misc symbols and pictographs
            | 0x1F600..=0x1F64F // emoticons
            | 0x1F680..=0x1F6FF // transport and map
            | 0x1F900..=0x1F9FF // supplemental symbols and pictographs
            | 0x1FA70..=0x1FAFF // symbols and pictographs extended-a
            | 0x2600..=0x26FF   // misc symbols
            | 0x2700..=0x27BF // dingbats
    )
}

fn is_emoji_joiner(c: char) -> bool {
    matches!(c, '\u{200D}' | '\u{FE0F}' | '\u{FE0E}')
}
