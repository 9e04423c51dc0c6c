//! Translation key extraction.
//!
//! Scans source text one logical line at a time for string literals passed to
//! the marker function, e.g. `_i("Save changes")`.
//!
//! This is a lexical scan, not a parser. It does not understand nested or
//! escaped quotes inside a literal, and only the first literal of each logical
//! line is captured.

use std::collections::BTreeSet;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;


/// Trailing character that joins a physical line with the next one.
pub const CONTINUATION_MARKER: char = '\\';

/// How literals are recognized on a logical line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// Only literals that are the direct argument of the marker function.
    #[default]
    Strict,
    /// Legacy fallback: the first double-quoted literal on the line, whether or
    /// not the marker function is called. Unrelated string literals in code
    /// become keys too.
    Loose,
}

impl ExtractMode {
    fn pattern(self, marker: &str) -> String {
        match self {
            ExtractMode::Strict => {
                format!(r#"{}\((?:"([^"]+)"|'([^']+)')"#, regex::escape(marker))
            }
            ExtractMode::Loose => r#""([^"]+)""#.to_string(),
        }
    }
}

impl std::fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractMode::Strict => write!(f, "strict"),
            ExtractMode::Loose => write!(f, "loose"),
        }
    }
}

/// Keys found in the scanned source, all mapped to the same placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    keys: BTreeSet<String>,
    placeholder: String,
}

impl ExtractionResult {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            keys: BTreeSet::new(),
            placeholder: placeholder.into(),
        }
    }

    /// Records a key. Returns false if it was already present.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Every key mapped to the placeholder.
    pub fn to_catalog(&self) -> Catalog {
        self.keys
            .iter()
            .map(|key| (key.clone(), self.placeholder.clone()))
            .collect()
    }
}

/// Line scanner for marker-function literals.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
    placeholder: String,
}

impl Extractor {
    pub fn new(
        marker: &str,
        mode: ExtractMode,
        placeholder: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&mode.pattern(marker))?,
            placeholder: placeholder.into(),
        })
    }

    /// Returns the first literal captured on a logical line.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.pattern.captures(line)?;
        caps.iter().skip(1).flatten().next().map(|m| m.as_str())
    }

    /// Scans complete physical lines, joining continuations before matching.
    ///
    /// Each item is a whole line; a trailing `\` on any item continues it onto
    /// the next one. A fragment still pending when the input ends is dropped.
    pub fn extract<I, S>(&self, lines: I) -> ExtractionResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = LineScan::new(self);
        for line in lines {
            scan.push(line.as_ref(), true);
        }
        scan.finish()
    }

    /// Scans raw text, keeping track of line terminators.
    ///
    /// Only a backslash directly before a line break is a continuation, so a
    /// last line without a newline is matched as is, even if it ends in `\`.
    pub fn extract_str(&self, text: &str) -> ExtractionResult {
        let mut scan = LineScan::new(self);
        for segment in text.split_inclusive('\n') {
            scan.push(segment, segment.ends_with('\n'));
        }
        scan.finish()
    }
}

/// Carry-over state of one extraction pass.
struct LineScan<'e> {
    extractor: &'e Extractor,
    result: ExtractionResult,
    carry_over: String,
}

impl<'e> LineScan<'e> {
    fn new(extractor: &'e Extractor) -> Self {
        Self {
            extractor,
            result: ExtractionResult::new(extractor.placeholder.clone()),
            carry_over: String::new(),
        }
    }

    fn push(&mut self, line: &str, terminated: bool) {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if terminated && let Some(fragment) = line.strip_suffix(CONTINUATION_MARKER) {
            self.carry_over.push_str(fragment);
            return;
        }

        self.carry_over.push_str(line);
        if let Some(key) = self.extractor.capture(&self.carry_over) {
            self.result.insert(key);
        }
        self.carry_over.clear();
    }

    fn finish(self) -> ExtractionResult {
        self.result
    }
}
