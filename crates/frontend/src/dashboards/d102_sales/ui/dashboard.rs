use crate::dashboards::view_model::SalesViewModel;
use crate::layout::app_context::use_app_context;
use crate::shared::components::{BarChart, CardAnimated, DateInput, PageHeader, QueryStatus};
use crate::shared::date_utils::today;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query::use_report;
use chrono::NaiveDate;
use contracts::dashboards::reports::ReportQuery;
use leptos::prelude::*;

/// Продажи за день: сумма, Finmap, типы контрактов, менеджеры, источники.
#[component]
pub fn SalesDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let date = RwSignal::new(ctx.selected_date.get_untracked());

    let report = use_report(Signal::derive(move || {
        Some(ReportQuery::Daily {
            date: Some(date.get()),
        })
    }));
    ctx.track(report);

    let vm = Memo::new(move |_| {
        report
            .state()
            .with(|s| SalesViewModel::from_report(s.data()))
    });

    let on_date = Callback::new(move |picked: NaiveDate| date.set(picked));
    let on_retry = Callback::new(move |_| report.refetch());

    view! {
        <PageFrame page_id="d102_sales--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="💰 Аналітика по продажам">
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
                <CardAnimated class="sales__summary">
                    <div class="sales__summary-label">"Загальна сума"</div>
                    <div class="sales__summary-amount">{move || vm.get().total_amount}</div>
                    <div class="sales__summary-count">
                        "Контрактів: "{move || vm.get().total_contracts}
                    </div>
                </CardAnimated>

                {move || vm.get().finmap.map(|finmap| view! {
                    <CardAnimated title="💵 Фактичні надходження (Finmap)" delay_ms=80 class="sales__finmap">
                        <div class="sales__finmap-amount">{finmap.amount}</div>
                        <div class="sales__finmap-count">"Операцій: "{finmap.count}</div>
                    </CardAnimated>
                })}

                <CardAnimated title="📄 По типах контрактів" delay_ms=120 class="sales__types">
                    <div class="sales__types-grid">
                        <For
                            each=move || vm.get().types
                            key=|row| row.label.clone()
                            children=|row| view! {
                                <div class="sales__type-card">
                                    <div class="sales__type-name">{row.label}</div>
                                    <div class="sales__type-amount">{row.amount}</div>
                                    <div class="sales__type-count">{row.count}" шт."</div>
                                </div>
                            }
                        />
                    </div>
                </CardAnimated>

                <BarChart
                    title="👥 Продажі по менеджерам (сума)"
                    series=Signal::derive(move || vm.get().manager_amounts)
                    color="#4CAF50"
                />

                <BarChart
                    title="📍 Продажі по джерелам (сума)"
                    series=Signal::derive(move || vm.get().source_amounts)
                    color="#FF9800"
                />

                <CardAnimated title="📊 Детальна таблиця по менеджерам" delay_ms=160 class="sales__table-card">
                    <table class="sales__table">
                        <thead>
                            <tr>
                                <th>"Менеджер"</th>
                                <th class="sales__table-num">"Сума"</th>
                                <th class="sales__table-num">"Контракти"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || vm.get().manager_rows
                                key=|row| row.label.clone()
                                children=|row| view! {
                                    <tr>
                                        <td>{row.label}</td>
                                        <td class="sales__table-num">{row.amount}</td>
                                        <td class="sales__table-num">{row.count}</td>
                                    </tr>
                                }
                            />
                        </tbody>
                    </table>
                </CardAnimated>
            </QueryStatus>
        </PageFrame>
    }
}
