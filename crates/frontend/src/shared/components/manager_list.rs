use crate::dashboards::view_model::ManagerRow;
use leptos::prelude::*;

/// Менеджеры с CR, лидами, продажами и временем реакции.
/// Клик передаёт `ASSIGNED_BY_ID` менеджера.
#[component]
pub fn ManagerList(
    #[prop(into)] managers: Signal<Vec<ManagerRow>>,
    #[prop(optional)] on_manager_click: Option<Callback<String>>,
) -> impl IntoView {
    view! {
        <div class="manager-list">
            <For
                each=move || managers.get()
                key=|row| row.id.clone()
                children=move |row: ManagerRow| {
                    let cr_class = if row.cr_is_low {
                        "manager-list__cr manager-list__cr--low"
                    } else {
                        "manager-list__cr"
                    };
                    let id = row.id.clone();
                    view! {
                        <div
                            class="manager-list__item"
                            on:click=move |_| {
                                if let Some(handler) = on_manager_click {
                                    handler.run(id.clone());
                                }
                            }
                        >
                            <div class="manager-list__header">
                                <span class="manager-list__name">"👤 "{row.name}</span>
                                <span class=cr_class>"CR: "{row.cr}</span>
                            </div>
                            <div class="manager-list__stats">
                                <div class="manager-list__stat">
                                    <span class="manager-list__stat-label">"Ліди:"</span>
                                    <span class="manager-list__stat-value">{row.leads}</span>
                                </div>
                                <div class="manager-list__stat">
                                    <span class="manager-list__stat-label">"Продажі:"</span>
                                    <span class="manager-list__stat-value">{row.deals}</span>
                                </div>
                                <div class="manager-list__stat">
                                    <span class="manager-list__stat-label">"Час реакції:"</span>
                                    <span class="manager-list__stat-value">{row.reaction_time}</span>
                                </div>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
