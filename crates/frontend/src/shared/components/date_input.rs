use crate::shared::date_utils::{parse_iso_date, to_iso};
use chrono::NaiveDate;
use leptos::prelude::*;

/// DateInput component with native date picker
/// Telegram's webview shows the date in the user's locale; the value is always yyyy-mm-dd
#[component]
pub fn DateInput(
    #[prop(into)] value: Signal<NaiveDate>,
    /// Called with the picked date. Cleared or partial input is ignored
    on_change: Callback<NaiveDate>,
    /// Latest selectable date
    #[prop(optional, into)]
    max: MaybeProp<NaiveDate>,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let class = if class.is_empty() {
        "date-input".to_string()
    } else {
        format!("date-input {}", class)
    };

    view! {
        <input
            type="date"
            class=class
            prop:value=move || to_iso(value.get())
            max=move || max.get().map(to_iso)
            on:input=move |ev| {
                if let Some(date) = parse_iso_date(&event_target_value(&ev)) {
                    on_change.run(date);
                }
            }
        />
    }
}
