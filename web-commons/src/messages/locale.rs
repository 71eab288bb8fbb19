use crate::config::Settings;
use http::header::ACCEPT_LANGUAGE;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A language tag such as `en` or `pt-BR`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    /// Creates a locale, accepting both `pt-BR` and `pt_BR` spellings.
    ///
    /// Tags compare case-insensitively, so the subtags are brought into their
    /// canonical case: `PT-br` becomes `pt-BR` and `zh-hant-tw` becomes
    /// `zh-Hant-TW`.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let subtags: Vec<String> = tag
            .trim()
            .split(['-', '_'])
            .enumerate()
            .map(|(position, subtag)| canonical_subtag(position, subtag))
            .collect();
        Self(subtags.join("-"))
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`pt` for `pt-BR`)
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Tags to try, most specific first: `zh-Hant-TW`, `zh-Hant`, `zh`
    pub fn fallback_chain(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut tag = self.0.as_str();
        while !tag.is_empty() {
            chain.push(tag);
            tag = match tag.rfind('-') {
                Some(idx) => &tag[..idx],
                None => "",
            };
        }
        chain
    }
}

fn canonical_subtag(position: usize, subtag: &str) -> String {
    let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
    match subtag.len() {
        // region
        2 if position > 0 && alphabetic => subtag.to_ascii_uppercase(),
        // script
        4 if position > 0 && alphabetic => {
            let (first, rest) = subtag.split_at(1);
            first.to_ascii_uppercase() + &rest.to_ascii_lowercase()
        }
        _ => subtag.to_ascii_lowercase(),
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Determines the locale of the request being served
pub trait LocaleResolver: Send + Sync {
    fn resolve_locale(&self, headers: &HeaderMap) -> Locale;
}

/// Always answers with the same locale
#[derive(Debug, Clone, Default)]
pub struct FixedLocaleResolver {
    locale: Locale,
}

impl FixedLocaleResolver {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl LocaleResolver for FixedLocaleResolver {
    fn resolve_locale(&self, _headers: &HeaderMap) -> Locale {
        self.locale.clone()
    }
}

/// Picks the preferred language of the `Accept-Language` header
#[derive(Debug, Clone, Default)]
pub struct AcceptLanguageResolver {
    default: Locale,
}

impl AcceptLanguageResolver {
    pub fn new(default: Locale) -> Self {
        Self { default }
    }

    /// Falls back to the configured default locale
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Locale::new(settings.default_locale.as_str()))
    }
}

impl LocaleResolver for AcceptLanguageResolver {
    fn resolve_locale(&self, headers: &HeaderMap) -> Locale {
        headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(preferred_language)
            .map(Locale::new)
            .unwrap_or_else(|| self.default.clone())
    }
}

/// Highest-weighted tag of an `Accept-Language` value; ties keep header order.
fn preferred_language(value: &str) -> Option<&str> {
    let mut best: Option<(&str, f32)> = None;
    for entry in value.split(',') {
        let mut parts = entry.split(';').map(str::trim);
        let tag = parts.next().unwrap_or_default();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let weight = parts
            .find_map(|p| p.strip_prefix("q="))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);
        if weight <= 0.0 {
            continue;
        }
        match best {
            Some((_, w)) if weight <= w => {}
            _ => best = Some((tag, weight)),
        }
    }
    best.map(|(tag, _)| tag)
}
