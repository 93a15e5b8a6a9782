//! PageFrame: root wrapper of every routed page.
//!
//! Puts `id` and `data-page-category` on the root element, see
//! [`super::page_standard`].
//!
//! ```rust,ignore
//! view! {
//!     <PageFrame page_id="d102_sales--dashboard" category=PAGE_CAT_DASHBOARD>
//!         <PageHeader title="💰 Аналітика по продажам">...</PageHeader>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// BEM modifier by category:
/// - `dashboard` → `page page--dashboard`
/// - `detail`    → `page page--detail`
#[component]
pub fn PageFrame(
    /// `{page}--{category}`, e.g. `"d101_leads--dashboard"`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("page id `{}` does not follow `{{page}}--{{category}}`", page_id);
    }

    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
