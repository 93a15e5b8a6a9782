use crate::layout::app_context::AppContext;
use crate::routes::routes::AppRoutes;
use crate::shared::telegram;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Shared date/period/busy state for all pages.
    provide_context(AppContext::new());

    telegram::init();
    on_cleanup(telegram::hide_main_button);

    view! {
        <ConfigProvider>
            <AppRoutes />
        </ConfigProvider>
    }
}
