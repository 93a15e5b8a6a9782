use chrono::NaiveDate;
use contracts::dashboards::reports::PeriodKind;
use leptos::prelude::*;
use thaw::*;

use super::date_input::DateInput;

pub fn period_label(kind: PeriodKind) -> &'static str {
    match kind {
        PeriodKind::Daily => "День",
        PeriodKind::Weekly => "Тиждень",
        PeriodKind::Monthly => "Місяць",
        PeriodKind::Custom => "Період",
    }
}

/// Period tabs plus the date controls the selected period needs:
/// one anchor date for day/week/month, a from–to pair for a custom period.
#[component]
pub fn PeriodSelector(
    #[prop(into)] period: Signal<PeriodKind>,
    on_period: Callback<PeriodKind>,
    #[prop(into)] date: Signal<NaiveDate>,
    on_date: Callback<NaiveDate>,
    #[prop(into)] range: Signal<(NaiveDate, NaiveDate)>,
    on_range: Callback<(NaiveDate, NaiveDate)>,
    #[prop(optional, into)] max: MaybeProp<NaiveDate>,
) -> impl IntoView {
    let range_start = Signal::derive(move || range.get().0);
    let range_end = Signal::derive(move || range.get().1);

    let on_start = Callback::new(move |start: NaiveDate| {
        let (_, end) = range.get_untracked();
        on_range.run((start, end));
    });
    let on_end = Callback::new(move |end: NaiveDate| {
        let (start, _) = range.get_untracked();
        on_range.run((start, end));
    });

    view! {
        <div class="period-selector">
            <ButtonGroup>
                {PeriodKind::ALL
                    .iter()
                    .copied()
                    .map(|kind| {
                        let appearance = Signal::derive(move || {
                            if period.get() == kind {
                                ButtonAppearance::Primary
                            } else {
                                ButtonAppearance::Subtle
                            }
                        });
                        view! {
                            <Button
                                size=ButtonSize::Small
                                appearance=appearance
                                on_click=move |_| on_period.run(kind)
                            >
                                {period_label(kind)}
                            </Button>
                        }
                    })
                    .collect_view()}
            </ButtonGroup>

            <Show
                when=move || period.get() == PeriodKind::Custom
                fallback=move || view! { <DateInput value=date on_change=on_date max=max /> }
            >
                <div class="period-selector__range">
                    <DateInput value=range_start on_change=on_start max=max />
                    <span class="period-selector__dash">"—"</span>
                    <DateInput value=range_end on_change=on_end max=max />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_period_has_a_label() {
        let labels: Vec<_> = PeriodKind::ALL.iter().map(|k| period_label(*k)).collect();
        assert_eq!(labels, vec!["День", "Тиждень", "Місяць", "Період"]);
    }
}
