//! Pagination controls for a page of already fetched results.
//!
//! [`PaginationBuilder::build_model`] turns a [`PageDescriptor`] into the
//! ordered list of steps a template renders: a *Previous* link, a window of
//! numbered page links around the current page and a *Next* link, together
//! with a summary of the visible element range.

use crate::config::Settings;
use crate::page::PageDescriptor;
use crate::request::{RequestContext, PARAM_FILTER, PARAM_SORT};
use log::debug;
use serde::{Deserialize, Serialize};

/// One navigation control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationStep {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub disabled: bool,
}

/// Everything needed to render the pagination controls of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationModel {
    pub steps: Vec<PaginationStep>,
    /// Human readable range summary, e.g. `Item 1 - 10 of 25`
    pub elements: String,
}

/// Builds [`PaginationModel`]s; cheap to share between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBuilder {
    window: u64,
    label_previous: String,
    label_next: String,
}

impl Default for PaginationBuilder {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl PaginationBuilder {
    pub fn new(settings: &Settings) -> Self {
        Self {
            window: settings.page_window.max(1) as u64,
            label_previous: settings.label_previous.clone(),
            label_next: settings.label_next.clone(),
        }
    }

    /// Number of numbered links shown at most
    pub fn window(&self) -> u64 {
        self.window
    }

    /// Builds the controls for `page`, or `None` when there is nothing to
    /// paginate (no page, or a page without elements).
    pub fn build_model(
        &self,
        page: Option<&PageDescriptor>,
        ctx: &RequestContext,
    ) -> Option<PaginationModel> {
        let page = match page {
            Some(page) if !page.is_empty() => page,
            _ => {
                debug!("skipping pagination model: no elements to paginate");
                return None;
            }
        };

        let (previous_target, next_target) = if page.unpaged {
            (0, 0)
        } else {
            (
                page.page_index.saturating_sub(1),
                page.page_index
                    .saturating_add(1)
                    .min(page.total_pages.saturating_sub(1)),
            )
        };

        let (start, end) = self.window_bounds(page);
        let mut steps = Vec::with_capacity((end - start) as usize + 2);

        steps.push(PaginationStep {
            label: self.label_previous.clone(),
            url: self.step_url(page, ctx, previous_target),
            active: false,
            disabled: !page.has_previous,
        });

        for index in start..end {
            steps.push(PaginationStep {
                label: (index + 1).to_string(),
                url: self.step_url(page, ctx, index),
                active: index == page.page_index,
                disabled: false,
            });
        }

        steps.push(PaginationStep {
            label: self.label_next.clone(),
            url: self.step_url(page, ctx, next_target),
            active: false,
            disabled: !page.has_next,
        });

        Some(PaginationModel {
            steps,
            elements: elements_label(page),
        })
    }

    /// Navigation URL for `target_page`, keeping the page size and the
    /// request's sort and filter parameters.
    pub fn step_url(&self, page: &PageDescriptor, ctx: &RequestContext, target_page: u64) -> String {
        step_url(page.page_size, ctx.sort(), ctx.filter(), target_page)
    }

    /// Half-open range of page indices shown as numbered links. The window is
    /// centred on the current page and shifted to stay inside `[0, total_pages)`.
    pub fn window_bounds(&self, page: &PageDescriptor) -> (u64, u64) {
        let upper = page.total_pages.saturating_sub(self.window);
        let start = page.page_index.saturating_sub(self.window / 2).min(upper);
        let end = start.saturating_add(self.window).min(page.total_pages);
        (start, end)
    }
}

/// `?page={target}&size={size}` followed by `sort` and `filter` when they
/// carry a non-blank value. Values are emitted as given.
pub fn step_url(
    page_size: u64,
    sort: Option<&str>,
    filter: Option<&str>,
    target_page: u64,
) -> String {
    let mut url = format!("?page={target_page}&size={page_size}");
    append_param(&mut url, PARAM_SORT, sort);
    append_param(&mut url, PARAM_FILTER, filter);
    url
}

fn append_param(url: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        url.push('&');
        url.push_str(name);
        url.push('=');
        url.push_str(value);
    }
}

/// `Item {start} - {end} of {total}`, or `Item {start} of {total}` when the
/// page shows a single element. An index past the last page is labelled as
/// the last page.
pub fn elements_label(page: &PageDescriptor) -> String {
    let page_index = page.page_index.min(page.total_pages.saturating_sub(1));
    let range_start = page_index.saturating_mul(page.page_size).saturating_add(1);
    let range_end = range_start
        .saturating_add(page.page_size)
        .saturating_sub(1)
        .min(page.total_elements)
        .max(range_start);
    let range = if range_start == range_end {
        range_start.to_string()
    } else {
        format!("{range_start} - {range_end}")
    };
    format!("Item {range} of {}", page.total_elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(query: &str) -> RequestContext {
        RequestContext::parse(&format!("http://localhost/items{query}")).unwrap()
    }

    fn numbered(model: &PaginationModel) -> &[PaginationStep] {
        &model.steps[1..model.steps.len() - 1]
    }

    fn labels(steps: &[PaginationStep]) -> Vec<&str> {
        steps.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_no_model_without_page() {
        let builder = PaginationBuilder::default();
        assert_eq!(builder.build_model(None, &ctx("")), None);
    }

    #[test]
    fn test_no_model_for_empty_page() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(0, 10, 0);
        assert_eq!(builder.build_model(Some(&page), &ctx("")), None);
    }

    #[test]
    fn test_first_page() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(0, 10, 25);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(labels(&model.steps), vec!["Previous", "1", "2", "3", "Next"]);

        let previous = &model.steps[0];
        assert!(previous.disabled);
        assert_eq!(previous.url, "?page=0&size=10");

        let next = model.steps.last().unwrap();
        assert!(!next.disabled);
        assert_eq!(next.url, "?page=1&size=10");

        assert!(model.steps[1].active);
        assert!(!model.steps[2].active);
        assert_eq!(model.steps[3].url, "?page=2&size=10");
        assert_eq!(model.elements, "Item 1 - 10 of 25");
    }

    #[test]
    fn test_last_page() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(2, 10, 25);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        let previous = &model.steps[0];
        assert!(!previous.disabled);
        assert_eq!(previous.url, "?page=1&size=10");

        let next = model.steps.last().unwrap();
        assert!(next.disabled);
        assert_eq!(next.url, "?page=2&size=10");

        assert!(model.steps[3].active);
        assert_eq!(model.elements, "Item 21 - 25 of 25");
    }

    #[test]
    fn test_single_element_label() {
        let page = PageDescriptor::new(2, 10, 21);
        assert_eq!(elements_label(&page), "Item 21 of 21");
    }

    #[test]
    fn test_window_centred_on_current_page() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(6, 10, 200);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(labels(numbered(&model)), vec!["5", "6", "7", "8", "9"]);
        assert!(numbered(&model)[2].active);
    }

    #[test]
    fn test_window_shifts_at_the_end() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(19, 10, 200);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(labels(numbered(&model)), vec!["16", "17", "18", "19", "20"]);
        assert!(numbered(&model)[4].active);
    }

    #[test]
    fn test_zero_total_pages_has_only_navigation() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor {
            page_index: 0,
            page_size: 10,
            total_elements: 3,
            total_pages: 0,
            has_previous: false,
            has_next: false,
            unpaged: false,
        };
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(builder.window_bounds(&page), (0, 0));
        assert_eq!(labels(&model.steps), vec!["Previous", "Next"]);
        assert!(model.steps.iter().all(|s| s.disabled));
        assert_eq!(model.steps[1].url, "?page=0&size=10");
    }

    #[test]
    fn test_unpaged_targets_first_page() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::unpaged(4);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(labels(&model.steps), vec!["Previous", "1", "Next"]);
        assert_eq!(model.steps[0].url, "?page=0&size=4");
        assert_eq!(model.steps[2].url, "?page=0&size=4");
        assert_eq!(model.elements, "Item 1 - 4 of 4");
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(9, 10, 25);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(labels(numbered(&model)), vec!["1", "2", "3"]);
        assert!(numbered(&model).iter().all(|s| !s.active));
        assert_eq!(model.steps.last().unwrap().url, "?page=2&size=10");
        assert_eq!(model.elements, "Item 21 - 25 of 25");
    }

    #[test]
    fn test_elements_label_never_inverted() {
        assert_eq!(elements_label(&PageDescriptor::new(9, 10, 21)), "Item 21 of 21");
        assert_eq!(elements_label(&PageDescriptor::new(0, 0, 5)), "Item 1 of 5");
        for index in 2..6 {
            let page = PageDescriptor::new(index, 10, 25);
            assert_eq!(elements_label(&page), "Item 21 - 25 of 25");
        }
    }

    #[test]
    fn test_urls_keep_sort_and_filter() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(1, 20, 100);
        let model = builder
            .build_model(Some(&page), &ctx("?sort=name,asc&filter=red"))
            .unwrap();

        assert_eq!(model.steps[0].url, "?page=0&size=20&sort=name,asc&filter=red");
    }

    #[test]
    fn test_custom_settings() {
        let settings = Settings {
            page_window: 3,
            label_previous: "«".to_string(),
            label_next: "»".to_string(),
            ..Settings::default()
        };
        let builder = PaginationBuilder::new(&settings);
        let page = PageDescriptor::new(5, 10, 100);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();

        assert_eq!(labels(&model.steps), vec!["«", "5", "6", "7", "»"]);
    }

    #[test]
    fn test_zero_window_shows_current_page() {
        let settings = Settings {
            page_window: 0,
            ..Settings::default()
        };
        let builder = PaginationBuilder::new(&settings);
        assert_eq!(builder.window(), 1);

        let page = PageDescriptor::new(3, 10, 100);
        let model = builder.build_model(Some(&page), &ctx("")).unwrap();
        assert_eq!(labels(numbered(&model)), vec!["4"]);
    }

    #[test]
    fn test_step_url() {
        assert_eq!(step_url(20, Some("name,asc"), None, 3), "?page=3&size=20&sort=name,asc");
        assert_eq!(step_url(20, None, Some("x"), 0), "?page=0&size=20&filter=x");
        assert_eq!(step_url(5, Some("  "), Some(""), 1), "?page=1&size=5");
        assert_eq!(
            step_url(5, Some("age,desc"), Some("a b"), 1),
            "?page=1&size=5&sort=age,desc&filter=a b"
        );
    }

    #[test]
    fn test_window_invariants() {
        let builder = PaginationBuilder::default();
        let ctx = ctx("");
        for size in 1..=7u64 {
            for total in 1..=40u64 {
                let pages = total.div_ceil(size);
                for index in 0..pages + 2 {
                    let page = PageDescriptor::new(index, size, total);
                    let model = builder.build_model(Some(&page), &ctx).unwrap();
                    let steps = numbered(&model);
                    let (start, end) = builder.window_bounds(&page);

                    assert!(steps.len() <= 5);
                    assert_eq!(steps.len() as u64, end - start);
                    assert!(end <= pages);

                    for (offset, step) in steps.iter().enumerate() {
                        assert_eq!(step.label, (start + offset as u64 + 1).to_string());
                    }

                    let active = steps.iter().filter(|s| s.active).count();
                    let in_window = (start..end).contains(&index);
                    assert_eq!(active, usize::from(in_window));
                }
            }
        }
    }

    #[test]
    fn test_build_model_is_idempotent() {
        let builder = PaginationBuilder::default();
        let page = PageDescriptor::new(3, 10, 95);
        let ctx = ctx("?sort=age,desc");
        assert_eq!(
            builder.build_model(Some(&page), &ctx),
            builder.build_model(Some(&page), &ctx)
        );
    }
}
