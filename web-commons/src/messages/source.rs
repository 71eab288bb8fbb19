use super::{Locale, MessageSource};
use crate::config::Settings;
use std::collections::HashMap;

/// In-memory message catalog, one table of `code -> pattern` per locale tag.
#[derive(Debug, Clone, Default)]
pub struct StaticMessageSource {
    catalogs: HashMap<String, HashMap<String, String>>,
    default_locale: Locale,
}

impl StaticMessageSource {
    /// Creates an empty catalog. Lookups that miss the requested locale fall
    /// back to `default_locale`.
    pub fn new(default_locale: Locale) -> Self {
        Self {
            catalogs: HashMap::new(),
            default_locale,
        }
    }

    /// Creates an empty catalog falling back to the configured default locale
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Locale::new(settings.default_locale.as_str()))
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Adds a single message
    pub fn with_message(
        mut self,
        locale: impl Into<Locale>,
        code: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        self.add_message(locale, code, pattern);
        self
    }

    /// Adds every message of a properties document
    pub fn with_properties(mut self, locale: impl Into<Locale>, properties: &str) -> Self {
        self.load_properties(locale, properties);
        self
    }

    pub fn add_message(
        &mut self,
        locale: impl Into<Locale>,
        code: impl Into<String>,
        pattern: impl Into<String>,
    ) {
        let locale = locale.into();
        self.catalogs
            .entry(locale.tag().to_string())
            .or_default()
            .insert(code.into(), pattern.into());
    }

    /// Reads a properties document: `code=pattern` lines (`:` is accepted as
    /// separator too), blank lines and `#` / `!` comments skipped. A trailing
    /// backslash continues the entry on the next line, and `\uXXXX`, `\t`,
    /// `\n`, `\r`, `\f` escapes are decoded. Returns the number of messages
    /// added.
    pub fn load_properties(&mut self, locale: impl Into<Locale>, properties: &str) -> usize {
        let locale = locale.into();
        let mut added = 0;
        for line in logical_lines(properties) {
            let Some(idx) = separator_index(&line) else {
                continue;
            };
            let code = unescape(line[..idx].trim());
            if code.is_empty() {
                continue;
            }
            self.add_message(locale.clone(), code, unescape(line[idx + 1..].trim()));
            added += 1;
        }
        added
    }

    fn lookup(&self, code: &str, locale: &Locale) -> Option<&str> {
        locale
            .fallback_chain()
            .into_iter()
            .find_map(|tag| self.catalogs.get(tag)?.get(code))
            .map(String::as_str)
    }
}

/// Joins continued lines and drops blanks and comments
fn logical_lines(properties: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;
    for raw in properties.lines() {
        let line = raw.trim_start();
        let mut logical = match pending.take() {
            Some(logical) => logical,
            None if line.is_empty() || line.starts_with('#') || line.starts_with('!') => continue,
            None => String::new(),
        };
        match line.strip_suffix('\\') {
            Some(head) if is_continued(line) => {
                logical.push_str(head);
                pending = Some(logical);
            }
            _ => {
                logical.push_str(line);
                lines.push(logical);
            }
        }
    }
    lines.extend(pending);
    lines
}

/// An odd number of trailing backslashes escapes the line break
fn is_continued(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Position of the first unescaped `=` or `:`
fn separator_index(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '=' | ':' => return Some(idx),
            _ => {}
        }
    }
    None
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

impl MessageSource for StaticMessageSource {
    fn message(&self, code: &str, locale: &Locale) -> Option<&str> {
        self.lookup(code, locale)
            .or_else(|| self.lookup(code, &self.default_locale))
    }
}
