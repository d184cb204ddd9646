//! Ambient acronym detection and the two ways of presenting what was found.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Short words that look like acronyms in shouty text but almost never are.
pub const DEFAULT_STOP_WORDS: &[&str] = &["AND", "THE", "IT", "AS", "AN"];

/// Characters removed before tokenizing.
const STRIPPED: &[char] = &['\'', '"', ',', '.', ';', ':', '?', '(', ')'];

/// How detected acronyms are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmbientPolicy {
    /// Reply with a new message listing every match.
    #[default]
    Announce,
    /// Edit the original message in place when the sender's credential is known; otherwise announce.
    Annotate,
}

impl FromStr for AmbientPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "announce" => Ok(AmbientPolicy::Announce),
            "annotate" => Ok(AmbientPolicy::Annotate),
            other => Err(format!(
                "unknown ambient policy '{}' (expected 'announce' or 'annotate')",
                other
            )),
        }
    }
}

impl fmt::Display for AmbientPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbientPolicy::Announce => f.write_str("announce"),
            AmbientPolicy::Annotate => f.write_str("annotate"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub policy: AmbientPolicy,
    pub stop_words: HashSet<String>,
}

impl ScannerConfig {
    pub fn with_policy(policy: AmbientPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            policy: AmbientPolicy::default(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Two or more ASCII capitals and nothing else.
fn is_candidate(token: &str) -> bool {
    token.len() >= 2 && token.chars().all(|c| c.is_ascii_uppercase())
}

/// Known acronyms in `text`, in order of first appearance, each at most once.
pub fn scan(
    text: &str,
    acronyms: &BTreeMap<String, String>,
    stop_words: &HashSet<String>,
) -> Vec<String> {
    let cleaned: String = text.chars().filter(|c| !STRIPPED.contains(c)).collect();
    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|token| is_candidate(token))
        .filter(|token| !stop_words.contains(*token))
        .filter(|token| acronyms.contains_key(*token))
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}

/// `Acronym(s) detected!` followed by one `'KEY' means 'EXPANSION'.` line per match.
pub fn announce_text(matches: &[String], acronyms: &BTreeMap<String, String>) -> String {
    let plural = if matches.len() > 1 { "s" } else { "" };
    let mut text = format!("Acronym{} detected!", plural);
    for key in matches {
        let expansion = acronyms.get(key).map(String::as_str).unwrap_or_default();
        text.push_str(&format!("\n'{}' means '{}'.", key, expansion));
    }
    text
}

/// Byte spans of the whitespace-separated tokens of `text`.
fn token_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// Offset inside `token` where an annotation goes: after the acronym, before trailing punctuation.
/// A dotted acronym (`E.T.A.`) keeps its final dot.
fn annotation_point(token: &str) -> usize {
    let core = token.trim_end_matches(|c: char| STRIPPED.contains(&c));
    let end = core.len();
    if core.contains('.') && token[end..].starts_with('.') {
        end + 1
    } else {
        end
    }
}

/// The original text with ` (EXPANSION)` after the first token that `scan` read as each match.
/// Positions come from the original text, so an expansion is never itself annotated.
///
/// Returns `None` when a match has no token to attach to, so the caller can announce instead.
pub fn annotate_text(
    text: &str,
    matches: &[String],
    acronyms: &BTreeMap<String, String>,
) -> Option<String> {
    let mut pending: Vec<&String> = matches.iter().collect();
    let mut inserts: Vec<(usize, String)> = Vec::new();
    for (start, end) in token_spans(text) {
        let token = &text[start..end];
        let cleaned: String = token.chars().filter(|c| !STRIPPED.contains(c)).collect();
        if let Some(pos) = pending.iter().position(|key| **key == cleaned) {
            let key = pending.remove(pos);
            let expansion = acronyms.get(key)?;
            inserts.push((start + annotation_point(token), format!(" ({})", expansion)));
        }
    }
    if !pending.is_empty() || inserts.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len() + inserts.iter().map(|(_, s)| s.len()).sum::<usize>());
    let mut cursor = 0;
    for (at, suffix) in inserts {
        out.push_str(&text[cursor..at]);
        out.push_str(&suffix);
        cursor = at;
    }
    out.push_str(&text[cursor..]);
    Some(out)
}
