use crate::dashboards::view_model::{LeadsViewModel, SeriesPoint};
use crate::layout::app_context::use_app_context;
use crate::shared::components::{
    BarChart, CardAnimated, DateInput, ManagerList, PageHeader, QueryStatus,
};
use crate::shared::date_utils::today;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query::use_report;
use chrono::NaiveDate;
use contracts::dashboards::reports::ReportQuery;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

/// Лиды за день: источники, менеджеры (с drill-down), стадии.
///
/// Выбор менеджера меняет только производный срез, без нового запроса.
#[component]
pub fn LeadsDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = StoredValue::new_local(use_navigate());
    let open_manager = move |id: String| {
        let path = format!("/managers/{}", urlencoding::encode(&id));
        navigate.with_value(|nav| nav(&path, Default::default()));
    };

    let date = RwSignal::new(ctx.selected_date.get_untracked());
    let selected_manager = RwSignal::new(None::<String>);

    let report = use_report(Signal::derive(move || {
        Some(ReportQuery::Daily {
            date: Some(date.get()),
        })
    }));
    ctx.track(report);

    let vm = Memo::new(move |_| {
        report
            .state()
            .with(|s| LeadsViewModel::from_report(s.data()))
    });
    let drill_down = Memo::new(move |_| {
        let name = selected_manager.get()?;
        vm.with(|vm| vm.drill_down(&name))
    });

    let on_date = Callback::new(move |picked: NaiveDate| date.set(picked));
    let on_manager_bar =
        Callback::new(move |point: SeriesPoint| selected_manager.set(Some(point.label)));
    let on_retry = Callback::new(move |_| report.refetch());

    view! {
        <PageFrame page_id="d101_leads--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="🎯 Аналітика по лідам">
                <DateInput
                    value=date
                    on_change=on_date
                    max=Signal::derive(move || Some(today()))
                />
            </PageHeader>

            <QueryStatus
                loading=Signal::derive(move || report.is_loading())
                error=Signal::derive(move || report.error_message())
                on_retry=on_retry
            >
                <CardAnimated class="leads__summary">
                    <div class="leads__summary-item">
                        <span class="leads__summary-label">"Всього лідів:"</span>
                        <span class="leads__summary-value">{move || vm.get().total_leads}</span>
                    </div>
                    <div class="leads__summary-item">
                        <span class="leads__summary-label">"Продажі:"</span>
                        <span class="leads__summary-value">{move || vm.get().total_deals}</span>
                    </div>
                    <div class="leads__summary-item">
                        <span class="leads__summary-label">"Час реакції:"</span>
                        <span class="leads__summary-value">{move || vm.get().reaction_time}</span>
                    </div>
                </CardAnimated>

                <BarChart
                    title="📍 Розподіл по джерелах (UTM_SOURCE)"
                    series=Signal::derive(move || vm.get().sources)
                    color="#4A90E2"
                />

                <BarChart
                    title="👥 Ліди по менеджерам (клікніть для деталей)"
                    series=Signal::derive(move || vm.get().managers)
                    color="#2196F3"
                    active_label=selected_manager
                    on_bar_click=on_manager_bar
                />

                {move || drill_down.get().map(|m| {
                    let id = m.id.clone();
                    view! {
                        <div class="leads__manager-detail">
                            <div class="leads__manager-detail-header">
                                <h3>"👤 "{m.name}</h3>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    size=ButtonSize::Small
                                    on_click=move |_| selected_manager.set(None)
                                    attr:class="leads__close-btn"
                                >
                                    "✕"
                                </Button>
                            </div>
                            <div class="leads__manager-stats">
                                <div class="leads__manager-stat">
                                    <span class="leads__manager-stat-label">"Ліди:"</span>
                                    <span class="leads__manager-stat-value">{m.leads}</span>
                                </div>
                                <div class="leads__manager-stat">
                                    <span class="leads__manager-stat-label">"Продажі:"</span>
                                    <span class="leads__manager-stat-value">{m.deals}</span>
                                </div>
                                <div class="leads__manager-stat">
                                    <span class="leads__manager-stat-label">"CR%:"</span>
                                    <span class="leads__manager-stat-value">{m.cr}</span>
                                </div>
                                <div class="leads__manager-stat">
                                    <span class="leads__manager-stat-label">"Час реакції:"</span>
                                    <span class="leads__manager-stat-value">{m.reaction_time}</span>
                                </div>
                            </div>
                            <Button
                                appearance=ButtonAppearance::Transparent
                                size=ButtonSize::Small
                                on_click=move |_| open_manager(id.clone())
                            >
                                "Детальніше за тиждень →"
                            </Button>
                        </div>
                    }
                })}

                <BarChart
                    title="📋 Розподіл по стадіям"
                    series=Signal::derive(move || vm.get().statuses)
                    color="#4CAF50"
                />

                <CardAnimated title="👥 Менеджери" class="leads__managers">
                    <ManagerList
                        managers=Signal::derive(move || vm.get().manager_rows)
                        on_manager_click=Callback::new(open_manager)
                    />
                </CardAnimated>
            </QueryStatus>
        </PageFrame>
    }
}
