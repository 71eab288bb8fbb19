use crate::request::RequestContext;
use log::warn;
use std::fmt::Display;
use std::sync::Arc;

pub mod locale;
pub mod source;

pub use locale::{AcceptLanguageResolver, FixedLocaleResolver, Locale, LocaleResolver};
pub use source::StaticMessageSource;

/// Source of message patterns.
///
/// A pattern may contain positional placeholders (`{0}`, `{1}`, ...) which
/// [`Globalization`] fills in. Implementations only have to find the pattern
/// for a code in the given locale, applying whatever fallback they support.
pub trait MessageSource: Send + Sync {
    fn message(&self, code: &str, locale: &Locale) -> Option<&str>;
}

impl<S: MessageSource + ?Sized> MessageSource for Arc<S> {
    fn message(&self, code: &str, locale: &Locale) -> Option<&str> {
        (**self).message(code, locale)
    }
}

impl<S: MessageSource + ?Sized> MessageSource for Box<S> {
    fn message(&self, code: &str, locale: &Locale) -> Option<&str> {
        (**self).message(code, locale)
    }
}

/// Resolves localized messages for the current request
#[derive(Debug, Clone)]
pub struct Globalization<S> {
    source: S,
}

impl<S: MessageSource> Globalization<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Renders the message `code` for `locale`.
    ///
    /// When no pattern exists the code itself is rendered, so a missing
    /// translation shows up on the page instead of failing the request.
    pub fn get_message(&self, locale: &Locale, code: &str, args: &[&dyn Display]) -> String {
        match self.source.message(code, locale) {
            Some(pattern) => format_message(pattern, args),
            None => {
                warn!("no message found under code '{code}' for locale '{locale}'");
                format_message(code, args)
            }
        }
    }

    /// Renders the message `code` in the locale of the request
    pub fn message_for(&self, ctx: &RequestContext, code: &str, args: &[&dyn Display]) -> String {
        self.get_message(ctx.locale(), code, args)
    }
}

/// Replaces `{n}` placeholders with the n-th argument.
/// Placeholders without a matching argument are kept verbatim.
///
/// With arguments, single quotes follow message format rules: `''` renders a
/// single quote and text between quotes is literal (`'{0}'` is not replaced).
/// Without arguments the pattern is returned as it is.
pub fn format_message(pattern: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return pattern.to_string();
    }
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.char_indices().peekable();
    let mut quoted = false;
    while let Some((pos, c)) = chars.next() {
        match c {
            '\'' => {
                if chars.next_if(|&(_, next)| next == '\'').is_some() {
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let after = &pattern[pos + 1..];
                let Some(close) = after.find('}') else {
                    out.push_str(&pattern[pos..]);
                    return out;
                };
                match after[..close].trim().parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => out.push_str(&pattern[pos..pos + close + 2]),
                }
                let closing = pos + close + 1;
                while chars.next_if(|&(idx, _)| idx <= closing).is_some() {}
            }
            _ => out.push(c),
        }
    }
    out
}
