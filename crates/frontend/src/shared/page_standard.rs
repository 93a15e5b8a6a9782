//! Page category constants.
//!
//! Every routed page declares:
//!   - HTML `id` in the format `{page}--{category}` (e.g. `"d101_leads--dashboard"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the page name searchable: copy the id from the
//! DOM inspector and search for the `dashboards/d101_leads/` directory.

/// Report overview with cards and charts.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Drill-down into one entity (a manager).
pub const PAGE_CAT_DETAIL: &str = "detail";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_DASHBOARD, PAGE_CAT_DETAIL];

/// Validate that a page id matches the `{page}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((page, category)) => !page.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("d100_home--dashboard"));
        assert!(is_valid_page_id("d103_manager_detail--detail"));
        assert!(!is_valid_page_id("d100_home"));
        assert!(!is_valid_page_id("--dashboard"));
        assert!(!is_valid_page_id("d100_home--list"));
    }
}
