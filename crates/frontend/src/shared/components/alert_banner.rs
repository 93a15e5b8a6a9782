use crate::dashboards::view_model::AlertView;
use leptos::prelude::*;

/// Список алертов отчёта. Пустой список ничего не рисует.
#[component]
pub fn AlertBanner(
    #[prop(into)] alerts: Signal<Vec<AlertView>>,
    #[prop(optional)] on_alert_click: Option<Callback<AlertView>>,
) -> impl IntoView {
    let indexed = move || alerts.get().into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <Show when=move || alerts.with(|a| !a.is_empty())>
            <div class="alert-banner">
                <div class="alert-banner__header">
                    <h3>"⚠️ Алерти"</h3>
                    <span class="alert-banner__count">{move || alerts.with(|a| a.len())}</span>
                </div>

                <div class="alert-banner__list">
                    <For
                        each=indexed
                        key=|(i, alert)| (*i, alert.title.clone())
                        children=move |(_, alert): (usize, AlertView)| {
                            let cls = format!("alert-banner__item alert-banner__item--{}", alert.modifier);
                            let clicked = alert.clone();
                            view! {
                                <div
                                    class=cls
                                    on:click=move |_| {
                                        if let Some(handler) = on_alert_click {
                                            handler.run(clicked.clone());
                                        }
                                    }
                                >
                                    <div class="alert-banner__item-icon">{alert.icon}</div>
                                    <div class="alert-banner__item-content">
                                        <div class="alert-banner__item-title">{alert.title}</div>
                                        <div class="alert-banner__item-description">{alert.description}</div>
                                        {alert.manager_name.map(|name| view! {
                                            <div class="alert-banner__item-manager">"👤 "{name}</div>
                                        })}
                                        {alert.time.map(|time| view! {
                                            <div class="alert-banner__item-time">{time}</div>
                                        })}
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </Show>
    }
}
