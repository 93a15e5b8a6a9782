use leptos::prelude::*;
use thaw::*;

pub const LOAD_ERROR_TEXT: &str = "Помилка завантаження даних. Спробуйте пізніше.";

/// Спиннер пока грузится, сообщение при ошибке, иначе содержимое.
#[component]
pub fn QueryStatus(
    #[prop(into)] loading: Signal<bool>,
    /// Error detail, shown under the localized text
    #[prop(into)]
    error: Signal<Option<String>>,
    /// Shows the retry button
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    move || {
        if loading.get() {
            view! {
                <div class="loading">
                    <Spinner />
                </div>
            }
            .into_any()
        } else if let Some(detail) = error.get() {
            view! {
                <div class="error">
                    <MessageBar intent=MessageBarIntent::Error>
                        <div class="error__content">
                            <div class="error__text">{LOAD_ERROR_TEXT}</div>
                            <div class="error__detail">{detail}</div>
                        </div>
                    </MessageBar>
                    {on_retry.map(|handler| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            size=ButtonSize::Small
                            on_click=move |_| handler.run(())
                        >
                            "Спробувати ще раз"
                        </Button>
                    })}
                </div>
            }
            .into_any()
        } else {
            children().into_any()
        }
    }
}
