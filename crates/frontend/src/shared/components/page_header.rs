use leptos::prelude::*;
use thaw::*;

/// Шапка страницы: заголовок, подзаголовок (период отчёта), действия справа.
#[component]
pub fn PageHeader(
    #[prop(into)] title: Signal<String>,

    #[prop(optional, into)] subtitle: MaybeProp<String>,

    /// Shows "← Назад" before the title
    #[prop(optional)]
    on_back: Option<Callback<()>>,

    /// Date picker, period selector etc.
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="page-header__content">
                {on_back.map(|handler| view! {
                    <Button
                        appearance=ButtonAppearance::Transparent
                        size=ButtonSize::Small
                        on_click=move |_| handler.run(())
                        attr:class="page-header__back"
                    >
                        "← Назад"
                    </Button>
                })}
                <div class="page-header__text">
                    <h1 class="page-header__title">{move || title.get()}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children.map(|children| children())}
            </div>
        </header>
    }
}
