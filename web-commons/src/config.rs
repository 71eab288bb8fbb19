use crate::error::CommonsError;
use confique::Config;
use std::path::Path;

/// Settings shared by the pagination and localization helpers
#[derive(Debug, Config, Clone, PartialEq)]
pub struct Settings {
    /// Number of numbered page links shown around the current page (default: 5)
    #[config(env = "WEB_COMMONS_PAGE_WINDOW", default = 5)]
    pub page_window: usize,

    /// Label of the step pointing to the previous page (default: Previous)
    #[config(env = "WEB_COMMONS_LABEL_PREVIOUS", default = "Previous")]
    pub label_previous: String,

    /// Label of the step pointing to the next page (default: Next)
    #[config(env = "WEB_COMMONS_LABEL_NEXT", default = "Next")]
    pub label_next: String,

    /// Locale used when a message is missing for the requested one (default: en)
    #[config(env = "WEB_COMMONS_DEFAULT_LOCALE", default = "en")]
    pub default_locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_window: 5,
            label_previous: "Previous".to_string(),
            label_next: "Next".to_string(),
            default_locale: "en".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `WEB_COMMONS_*` environment variables
    pub fn load() -> Result<Self, CommonsError> {
        Ok(Self::builder().env().load()?)
    }

    /// Loads settings from the environment, falling back to a TOML file.
    /// Environment variables take precedence over the file.
    pub fn load_with_file(path: impl AsRef<Path>) -> Result<Self, CommonsError> {
        Ok(Self::builder().env().file(path.as_ref()).load()?)
    }
}
