use crate::dashboards::view_model::HomeViewModel;
use crate::layout::app_context::use_app_context;
use crate::shared::components::{
    AlertBanner, CardAnimated, MetricCard, PageHeader, PeriodSelector, QueryStatus,
};
use crate::shared::date_utils::today;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query::use_report;
use chrono::NaiveDate;
use contracts::dashboards::reports::PeriodKind;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

/// Главная: алерты, KPI, время реакции отдела, Finmap, быстрые переходы.
#[component]
pub fn HomeDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = StoredValue::new_local(use_navigate());
    let go = move |path: &'static str| {
        navigate.with_value(|nav| nav(path, Default::default()));
    };

    let report = use_report(Signal::derive(move || Some(ctx.report_query())));
    ctx.track(report);

    let vm = Memo::new(move |_| {
        report
            .state()
            .with(|s| HomeViewModel::from_report(s.data()))
    });

    let on_period = Callback::new(move |period: PeriodKind| ctx.set_selected_period(period));
    let on_date = Callback::new(move |date: NaiveDate| ctx.set_selected_date(date));
    let on_range =
        Callback::new(move |range: (NaiveDate, NaiveDate)| ctx.set_date_range(range));
    let on_retry = Callback::new(move |_| report.refetch());

    view! {
        <PageFrame page_id="d100_home--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Аналітика"
                subtitle=Signal::derive(move || vm.get().window)
            >
                <PeriodSelector
                    period=ctx.selected_period
                    on_period=on_period
                    date=ctx.selected_date
                    on_date=on_date
                    range=ctx.date_range
                    on_range=on_range
                    max=Signal::derive(move || Some(today()))
                />
            </PageHeader>

            <QueryStatus
                loading=Signal::derive(move || report.is_loading())
                error=Signal::derive(move || report.error_message())
                on_retry=on_retry
            >
                <AlertBanner alerts=Signal::derive(move || vm.get().alerts) />

                <div class="home__kpi-grid">
                    <MetricCard
                        title="Ліди"
                        icon="🎯"
                        value=Signal::derive(move || vm.get().total_leads.to_string())
                        subtitle=Signal::derive(move || Some(format!("Джерел: {}", vm.get().source_count)))
                        on_click=Callback::new(move |_| go("/leads"))
                    />
                    <MetricCard
                        title="Продажі"
                        icon="💰"
                        value=Signal::derive(move || vm.get().total_contracts.to_string())
                        subtitle=Signal::derive(move || Some(vm.get().sales_amount))
                        highlighted=true
                        on_click=Callback::new(move |_| go("/sales"))
                    />
                    <MetricCard
                        title="CR%"
                        icon="📈"
                        value=Signal::derive(move || format!("{}%", vm.get().conversion_rate))
                        trend=Signal::derive(move || Some(vm.get().trend))
                        trend_value=Signal::derive(move || Some(vm.get().trend_caption))
                    />
                </div>

                <CardAnimated title="Час реакції відділу" delay_ms=80 class="home__department">
                    <div class="home__department-time">{move || vm.get().reaction_time}</div>
                    <p class="home__department-subtitle">"Медіана по відділу"</p>
                </CardAnimated>

                {move || vm.get().finmap.map(|finmap| view! {
                    <CardAnimated title="💵 Фактичні надходження (Finmap)" delay_ms=160 class="home__finmap">
                        <div class="home__finmap-amount">{finmap.amount}</div>
                        <p class="home__finmap-count">"Операцій: "{finmap.count}</p>
                    </CardAnimated>
                })}

                <div class="home__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| go("/leads")
                    >
                        "📊 Детально по лідам"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| go("/sales")
                    >
                        "💼 Детально по продажам"
                    </Button>
                </div>
            </QueryStatus>
        </PageFrame>
    }
}
