use crate::dashboards::view_model::{format_number, scale_to_max, SeriesPoint};
use leptos::prelude::*;

const ACTIVE_COLOR: &str = "#2196F3";

/// Horizontal bar chart in plain HTML.
///
/// Bars keep the order of `series`. With `on_bar_click` the bars become
/// clickable and the bar whose label equals `active_label` is highlighted.
#[component]
pub fn BarChart(
    #[prop(into)] series: Signal<Vec<SeriesPoint>>,
    #[prop(optional, into)] title: String,
    /// Bar colour
    #[prop(default = "#4A90E2")]
    color: &'static str,
    #[prop(optional, into)] active_label: MaybeProp<String>,
    #[prop(optional)] on_bar_click: Option<Callback<SeriesPoint>>,
) -> impl IntoView {
    let interactive = on_bar_click.is_some();

    let bars = move || {
        let points = series.get();
        let widths = scale_to_max(&points);
        let active = active_label.get();
        points
            .into_iter()
            .zip(widths)
            .map(|(point, width)| {
                let is_active = active.as_deref() == Some(point.label.as_str());
                let dimmed = active.is_some() && !is_active;
                let fill = if is_active { ACTIVE_COLOR } else { color };
                let bar_style = format!(
                    "width: {:.2}%; background: {}; opacity: {};",
                    width,
                    fill,
                    if dimmed { 0.6 } else { 1.0 }
                );
                let row_class = if interactive {
                    "bar-chart__row bar-chart__row--clickable"
                } else {
                    "bar-chart__row"
                };
                let value_text = format_number(point.value);
                let tooltip = format!("{}: {}", point.label, value_text);
                let label = point.label.clone();
                view! {
                    <div
                        class=row_class
                        title=tooltip
                        on:click=move |_| {
                            if let Some(handler) = on_bar_click {
                                handler.run(point.clone());
                            }
                        }
                    >
                        <div class="bar-chart__label">{label}</div>
                        <div class="bar-chart__track">
                            <div class="bar-chart__bar" style=bar_style></div>
                        </div>
                        <div class="bar-chart__value">{value_text}</div>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="bar-chart card">
            {(!title.is_empty()).then(|| view! { <h3 class="bar-chart__title">{title}</h3> })}
            <Show
                when=move || series.with(|s| !s.is_empty())
                fallback=|| view! { <div class="bar-chart__empty">"Немає даних"</div> }
            >
                <div class="bar-chart__bars">{bars}</div>
            </Show>
            {interactive.then(|| view! {
                <div class="bar-chart__hint">"Натисніть на стовпчик для деталізації"</div>
            })}
        </div>
    }
}
