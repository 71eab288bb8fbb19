//! # web-commons
//!
//! Server-side helpers that turn already fetched data into view models for
//! HTML pages.
//!
//! ## Components
//!
//! - **Pagination:** Previous/numbered/Next steps and an element range summary
//!   for a [`PageDescriptor`].
//! - **Sorting:** Parsing of `property,direction` parameters, direction toggling
//!   and sortable column links.
//! - **Messages:** Localized message lookup with locale fallback.
//! - **Collectors:** An insertion-ordered map that rejects repeated keys.
//!
//! Request-dependent operations take a [`RequestContext`] built for the request
//! being served; none of the helpers keep per-request state.

pub mod collectors;
pub mod config;
pub mod error;
pub mod messages;
pub mod model;
pub mod page;
pub mod pagination;
pub mod request;
pub mod sort;

pub use crate::collectors::{to_ordered_map, CollectOrdered, OrderedMap};
pub use crate::config::Settings;
pub use crate::error::CommonsError;
pub use crate::messages::{
    AcceptLanguageResolver, FixedLocaleResolver, Globalization, Locale, LocaleResolver,
    MessageSource, StaticMessageSource,
};
pub use crate::model::ModelAttributes;
pub use crate::page::PageDescriptor;
pub use crate::pagination::{step_url, PaginationBuilder, PaginationModel, PaginationStep};
pub use crate::request::RequestContext;
pub use crate::sort::{
    add_sort_attributes_to_model, build_sort_link, next_direction, parse_sort, sort_direction,
    SortDirection, SortSpec,
};
