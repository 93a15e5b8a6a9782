use crate::dashboards::view_model::{
    amount_series, format_amount, format_percent, window_label, ManagerDetailViewModel,
    NOT_AVAILABLE,
};
use crate::layout::app_context::use_app_context;
use crate::shared::components::{BarChart, CardAnimated, MetricCard, PageHeader, QueryStatus};
use crate::shared::date_utils::{last_days, today, yesterday};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query::{
    use_conversion, use_leads_metrics, use_manager_detail, use_sales_metrics,
};
use contracts::dashboards::reports::ReportWindow;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

/// Days in the manager window, today included.
const WINDOW_DAYS: u32 = 8;

/// Карточка менеджера за последнюю неделю + его вчерашний срез.
#[component]
pub fn ManagerDetailDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = StoredValue::new_local(use_navigate());
    let params = use_params_map();

    let manager_id = Signal::derive(move || {
        params
            .with(|p| p.get("id"))
            .filter(|id| !id.trim().is_empty())
    });
    let window = last_days(today(), WINDOW_DAYS);
    let day = yesterday();

    let detail = use_manager_detail(manager_id, Signal::stored(window));
    let team = use_conversion(Signal::stored(Some(window)));
    let leads_slice = use_leads_metrics(Signal::stored(Some(day)), manager_id);
    let sales_slice = use_sales_metrics(Signal::stored(Some(day)), manager_id);
    ctx.track(detail);

    let vm = Memo::new(move |_| {
        detail
            .state()
            .with(|s| ManagerDetailViewModel::from_detail(s.data()))
    });
    let team_cr = Memo::new(move |_| {
        team.data()
            .map(|c| format_percent(c.total_cr))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    });
    let day_leads = Memo::new(move |_| leads_slice.data().map(|s| s.total_leads).unwrap_or(0));
    let day_sales = Memo::new(move |_| {
        sales_slice
            .data()
            .map(|s| (format_amount(s.total_amount), s.total_contracts))
    });
    let day_sources = Memo::new(move |_| {
        sales_slice
            .data()
            .map(|s| amount_series(&s.by_source))
            .unwrap_or_default()
    });

    let on_back = Callback::new(move |_| {
        let went_back = web_sys::window()
            .and_then(|w| w.history().ok())
            .filter(|h| h.length().unwrap_or(0) > 1)
            .map(|h| h.back().is_ok())
            .unwrap_or(false);
        if !went_back {
            navigate.with_value(|nav| nav("/", Default::default()));
        }
    });
    let on_retry = Callback::new(move |_| detail.refetch());

    let (start, end) = window;
    let window_caption = window_label(&ReportWindow::Range { start, end });

    view! {
        <PageFrame page_id="d103_manager_detail--detail" category=PAGE_CAT_DETAIL>
            <PageHeader
                title=Signal::derive(move || {
                    let name = vm.get().name;
                    if name.is_empty() { "👤 Менеджер".to_string() } else { format!("👤 {}", name) }
                })
                subtitle=window_caption
                on_back=on_back
            />

            <QueryStatus
                loading=Signal::derive(move || detail.is_loading())
                error=Signal::derive(move || detail.error_message())
                on_retry=on_retry
            >
                <div class="manager-detail__kpi-grid">
                    <MetricCard
                        title="Ліди"
                        icon="🎯"
                        value=Signal::derive(move || vm.get().total_leads.to_string())
                        subtitle=Signal::derive(move || Some(format!("Записів: {}", vm.get().lead_count)))
                    />
                    <MetricCard
                        title="Продажі"
                        icon="💰"
                        value=Signal::derive(move || vm.get().total_deals.to_string())
                    />
                    <MetricCard
                        title="CR%"
                        icon="📈"
                        value=Signal::derive(move || vm.get().cr)
                        trend=Signal::derive(move || Some(vm.get().trend))
                        trend_value=Signal::derive(move || Some(format!("Команда: {}", team_cr.get())))
                        highlighted=true
                    />
                    <MetricCard
                        title="Час реакції"
                        icon="⏱"
                        value=Signal::derive(move || vm.get().reaction_time)
                    />
                </div>

                <BarChart
                    title="📍 Ліди по джерелах"
                    series=Signal::derive(move || vm.get().sources)
                    color="#4A90E2"
                />
                <BarChart
                    title="📋 Ліди по стадіям"
                    series=Signal::derive(move || vm.get().statuses)
                    color="#4CAF50"
                />

                <CardAnimated title="📅 Вчора" delay_ms=120 class="manager-detail__yesterday">
                    <div class="manager-detail__yesterday-row">
                        <span>"Ліди:"</span>
                        <span>{move || day_leads.get()}</span>
                    </div>
                    {move || day_sales.get().map(|(amount, contracts)| view! {
                        <div class="manager-detail__yesterday-row">
                            <span>"Продажі:"</span>
                            <span>{amount}" ("{contracts}")"</span>
                        </div>
                    })}
                    <BarChart
                        title="Продажі по джерелам (сума)"
                        series=day_sources
                        color="#FF9800"
                    />
                </CardAnimated>
            </QueryStatus>
        </PageFrame>
    }
}
