//! Command intents as data: an ordered list of (intent, matchers, allowed kinds).
//!
//! Bindings are evaluated in priority order and, within a binding, matchers in list order; the first
//! match wins. Matching is pure, so the table can be tested without a bot or a registry.

use acrobot_core::InteractionKind;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Ping,
    Define,
    Delete,
    Update,
    Query,
    Listen,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Ping => "ping",
            Intent::Define => "define",
            Intent::Delete => "delete",
            Intent::Update => "update",
            Intent::Query => "query",
            Intent::Listen => "listen",
        }
    }
}

/// A matched intent with its capture groups (group 1 onwards; unmatched optional groups are empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    pub intent: Intent,
    pub captures: Vec<String>,
}

impl IntentMatch {
    /// First capture: the raw acronym (or the listen token).
    pub fn acronym(&self) -> &str {
        self.captures.first().map(String::as_str).unwrap_or("")
    }

    /// Second capture: the raw expansion.
    pub fn expansion(&self) -> &str {
        self.captures.get(1).map(String::as_str).unwrap_or("")
    }
}

/// What a listen-control command asks for, parsed from its case-folded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenRequest {
    Start,
    Stop,
    AreYou,
    Unknown(String),
}

impl ListenRequest {
    pub fn parse(token: &str) -> Self {
        let token = token
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        match token.as_str() {
            "start" => ListenRequest::Start,
            "stop" => ListenRequest::Stop,
            "are you" => ListenRequest::AreYou,
            _ => ListenRequest::Unknown(token),
        }
    }
}

const DIRECT: &[InteractionKind] = &[
    InteractionKind::DirectMessage,
    InteractionKind::Mention,
    InteractionKind::DirectMention,
];

/// Listen-control only makes sense inside a channel, so private messages are excluded.
const MENTIONED: &[InteractionKind] = &[InteractionKind::Mention, InteractionKind::DirectMention];

const BINDINGS: &[(Intent, &[&str], &[InteractionKind])] = &[
    (Intent::Ping, &[r"(?i)^\W*ping\W*$"], DIRECT),
    (
        Intent::Define,
        &[r"(?:\W)?([A-Za-z0-9\.]+)(?:\W)? (?:means|stands for) (?:\W)?(.+?)(?:\W)?$"],
        DIRECT,
    ),
    (
        Intent::Delete,
        &[r"(?:remove|delete) (?:\W)?(.+?)(?:\W)?$"],
        DIRECT,
    ),
    (
        Intent::Update,
        &[
            r"update (?:\W)?([A-Za-z0-9\.]+)(?:\W)? (?:to|with) (?:\W)?(.+?)(?:\W)?$",
            r"replace (?:\W)?([A-Za-z0-9\.]+)(?:\W)? with (?:\W)?(.+?)(?:\W)?$",
        ],
        DIRECT,
    ),
    (
        Intent::Query,
        &[
            r"what(?:[^\w]|\si)s the meaning of ([\w\.]+)\b",
            r"what(?:[^\w]|\si)s ([\w\.]+)\b",
            r"what does (.+) (?:mean|stand for)\b",
        ],
        DIRECT,
    ),
    (
        Intent::Listen,
        &[r"(?i)\b(are\s+you|\w+)\s+listening\b"],
        MENTIONED,
    ),
];

struct Binding {
    intent: Intent,
    matchers: Vec<Regex>,
    kinds: &'static [InteractionKind],
}

/// The compiled, ordered command table.
pub struct CommandPatterns {
    bindings: Vec<Binding>,
}

impl CommandPatterns {
    /// Compiles the built-in bindings in priority order: ping > define > delete > update > query > listen.
    pub fn new() -> Result<Self, regex::Error> {
        let bindings = BINDINGS
            .iter()
            .map(|(intent, patterns, kinds)| {
                let matchers = patterns
                    .iter()
                    .map(|p| Regex::new(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Binding {
                    intent: *intent,
                    matchers,
                    kinds,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { bindings })
    }

    /// First binding (in priority order) that accepts `kind` and matches `text`.
    pub fn match_text(&self, kind: InteractionKind, text: &str) -> Option<IntentMatch> {
        self.bindings
            .iter()
            .filter(|b| b.kinds.contains(&kind))
            .find_map(|b| {
                b.matchers.iter().find_map(|re| {
                    re.captures(text).map(|caps| IntentMatch {
                        intent: b.intent,
                        captures: caps
                            .iter()
                            .skip(1)
                            .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                            .collect(),
                    })
                })
            })
    }
}
