pub mod app_context;

use app_context::use_app_context;
use leptos::prelude::*;

/// Application shell of the mini-app.
///
/// ```text
/// +---------------------------+
/// | loading bar (while busy)  |
/// +---------------------------+
/// |          page             |
/// +---------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="app-layout">
            <div
                class="app-layout__progress"
                class:app-layout__progress--active=move || ctx.loading.get()
            ></div>
            <main class="app-layout__content">
                {children()}
            </main>
        </div>
    }
}
