use crate::dashboards::view_model::Trend;
use leptos::prelude::*;

/// KPI card: icon, title, big value, optional subtitle and trend line.
#[component]
pub fn MetricCard(
    /// Label displayed above the value
    #[prop(into)]
    title: String,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    /// Emoji shown on the left
    #[prop(optional)]
    icon: &'static str,
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    /// Trend arrow, shown together with `trend_value`
    #[prop(optional, into)]
    trend: MaybeProp<Trend>,
    #[prop(optional, into)]
    trend_value: MaybeProp<String>,
    #[prop(optional)]
    highlighted: bool,
    /// Makes the card clickable
    #[prop(optional)]
    on_click: Option<Callback<()>>,
) -> impl IntoView {
    let mut class = String::from("metric-card");
    if highlighted {
        class.push_str(" metric-card--highlighted");
    }
    if on_click.is_some() {
        class.push_str(" metric-card--clickable");
    }

    let trend_view = move || {
        let trend = trend.get()?;
        let text = trend_value.get()?;
        let cls = format!("metric-card__trend metric-card__trend--{}", trend.as_str());
        Some(view! {
            <div class=cls>
                <span class="metric-card__trend-icon">{trend.arrow()}</span>
                {text}
            </div>
        })
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="metric-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div
            class=class
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {(!icon.is_empty()).then(|| view! { <div class="metric-card__icon">{icon}</div> })}
            <div class="metric-card__content">
                <div class="metric-card__title">{title}</div>
                <div class="metric-card__value">{move || value.get()}</div>
                {subtitle_view}
                {trend_view}
            </div>
        </div>
    }
}
