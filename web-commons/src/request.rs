use crate::error::CommonsError;
use crate::messages::{Locale, LocaleResolver};
use http::request::Parts;
use http::Uri;
use url::Url;

pub const PARAM_SORT: &str = "sort";
pub const PARAM_FILTER: &str = "filter";

/// Everything the helpers need to know about the request being rendered.
///
/// A context is built once per request and handed to each operation that
/// builds links or resolves messages. It is never stored on a shared helper.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    url: Url,
    sort: Option<String>,
    filter: Option<String>,
    locale: Locale,
}

impl RequestContext {
    /// Creates a context for the given request URL, using the default locale
    pub fn new(url: Url) -> Self {
        let sort = first_param(&url, PARAM_SORT);
        let filter = first_param(&url, PARAM_FILTER);
        Self {
            url,
            sort,
            filter,
            locale: Locale::default(),
        }
    }

    /// Parses an absolute request URL
    pub fn parse(url: &str) -> Result<Self, CommonsError> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Resolves a request target (as received by the server) against the
    /// public base URL of the application.
    pub fn from_uri(base: &Url, uri: &Uri) -> Result<Self, CommonsError> {
        let target = uri.path_and_query().map_or("/", |pq| pq.as_str());
        Ok(Self::new(base.join(target)?))
    }

    /// Builds the context from the request head, resolving the locale from
    /// its headers.
    pub fn from_request(
        base: &Url,
        parts: &Parts,
        locale_resolver: &dyn LocaleResolver,
    ) -> Result<Self, CommonsError> {
        let locale = locale_resolver.resolve_locale(&parts.headers);
        Ok(Self::from_uri(base, &parts.uri)?.with_locale(locale))
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The raw `sort` query parameter, e.g. `name,asc`
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// The raw `filter` query parameter
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// First decoded value of a query parameter
    pub fn param(&self, name: &str) -> Option<String> {
        first_param(&self.url, name)
    }
}

fn first_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
