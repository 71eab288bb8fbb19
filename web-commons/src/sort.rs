use crate::model::ModelAttributes;
use crate::request::{RequestContext, PARAM_SORT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::Url;

pub const PARAM_PAGE: &str = "page";
const DIR_ASC: &str = "asc";
const DIR_DESC: &str = "desc";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => DIR_ASC,
            SortDirection::Desc => DIR_DESC,
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permissive: `asc` in any case is ascending, every other token is descending.
impl FromStr for SortDirection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(DIR_ASC) {
            Ok(SortDirection::Asc)
        } else {
            Ok(SortDirection::Desc)
        }
    }
}

/// Ordering requested by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SortSpec {
    #[default]
    Unsorted,
    Sorted {
        property: String,
        direction: SortDirection,
    },
}

impl SortSpec {
    pub fn by(property: impl Into<String>, direction: SortDirection) -> Self {
        SortSpec::Sorted {
            property: property.into(),
            direction,
        }
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self, SortSpec::Sorted { .. })
    }

    pub fn property(&self) -> Option<&str> {
        match self {
            SortSpec::Sorted { property, .. } => Some(property),
            SortSpec::Unsorted => None,
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortSpec::Sorted { direction, .. } => Some(*direction),
            SortSpec::Unsorted => None,
        }
    }
}

/// `property,direction`; unsorted renders as an empty string
impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortSpec::Sorted {
                property,
                direction,
            } => write!(f, "{property},{direction}"),
            SortSpec::Unsorted => Ok(()),
        }
    }
}

/// Parses a raw `property[,direction]` sort parameter.
///
/// Never fails: a missing or blank property yields [`SortSpec::Unsorted`],
/// a missing direction means ascending and any token other than `asc`
/// means descending.
pub fn parse_sort(raw: Option<&str>) -> SortSpec {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return SortSpec::Unsorted;
    };
    let (property, token) = match raw.split_once(',') {
        Some((property, token)) => (property.trim(), Some(token)),
        None => (raw.trim(), None),
    };
    if property.is_empty() {
        return SortSpec::Unsorted;
    }
    let direction = token
        .map(|t| t.parse::<SortDirection>().unwrap_or_default())
        .unwrap_or_default();
    SortSpec::by(property, direction)
}

/// Direction a click on the `property` column should request next.
/// The active column toggles; any other column starts ascending.
pub fn next_direction(property: &str, current_sort: Option<&str>) -> SortDirection {
    match current_sort {
        Some(current) if is_sorted_by(property, current) => {
            if current.ends_with(&format!(",{DIR_ASC}")) {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            }
        }
        _ => SortDirection::Asc,
    }
}

/// Direction exposed to templates for the `property` column
pub fn sort_direction(property: &str, current_sort: Option<&str>) -> SortDirection {
    next_direction(property, current_sort)
}

fn is_sorted_by(property: &str, current_sort: &str) -> bool {
    current_sort
        .strip_prefix(property)
        .is_some_and(|rest| rest.starts_with(','))
}

/// Link to the current request re-sorted by `property`.
///
/// The `sort` and `page` parameters are replaced (and moved to the end of the
/// query, in that order); every other parameter is kept as received.
pub fn build_sort_link(
    property: &str,
    current_sort: Option<&str>,
    page_number: u64,
    ctx: &RequestContext,
) -> String {
    let direction = next_direction(property, current_sort);
    let url = replace_query_params(
        ctx.url(),
        &[
            (PARAM_SORT, format!("{property},{direction}")),
            (PARAM_PAGE, page_number.to_string()),
        ],
    );
    debug!("sort link for '{property}': {url}");
    url.to_string()
}

/// Writes `{attribute}Link` and `{attribute}Direction` for every
/// `(property, attribute)` pair, in iteration order, and returns the parsed
/// current sort.
pub fn add_sort_attributes_to_model<I, P, A>(
    model: &mut ModelAttributes,
    current_sort: Option<&str>,
    page_number: u64,
    sort_attributes: I,
    ctx: &RequestContext,
) -> SortSpec
where
    I: IntoIterator<Item = (P, A)>,
    P: AsRef<str>,
    A: AsRef<str>,
{
    let sort = parse_sort(current_sort);
    for (property, attribute) in sort_attributes {
        let (property, attribute) = (property.as_ref(), attribute.as_ref());
        let link = build_sort_link(property, current_sort, page_number, ctx);
        let direction = sort_direction(property, current_sort);
        model.add_attribute(format!("{attribute}Link"), link);
        model.add_attribute(format!("{attribute}Direction"), direction.as_str());
    }
    sort
}

fn replace_query_params(url: &Url, replacements: &[(&str, String)]) -> Url {
    let mut segments: Vec<String> = url
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| {
            let key = segment.split_once('=').map_or(*segment, |(key, _)| key);
            !replacements.iter().any(|(name, _)| *name == key)
        })
        .map(str::to_string)
        .collect();
    segments.extend(
        replacements
            .iter()
            .map(|(name, value)| format!("{name}={value}")),
    );

    let mut url = url.clone();
    url.set_query(Some(&segments.join("&")));
    url
}
