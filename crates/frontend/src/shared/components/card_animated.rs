//! CardAnimated — карточка Thaw с анимацией появления и заголовком.
//!
//! Анимация `card-appear` задаётся в `style.css`.
//!
//! # Пример
//! ```rust,ignore
//! <CardAnimated title="💵 Фактичні надходження (Finmap)" delay_ms=80>
//!     <div class="finmap__amount">{amount}</div>
//! </CardAnimated>
//! ```

use leptos::prelude::*;
use thaw::Card;

/// Обёртка над Thaw [`Card`].
///
/// - `delay_ms` — задержка анимации, для каскада карточек на странице.
/// - `title`    — заголовок `<h3>`, если не пустой.
/// - `class`    — CSS класс блока страницы (`sales__types` и т.п.).
#[component]
pub fn CardAnimated(
    #[prop(optional)] delay_ms: u32,
    #[prop(optional, into)] title: String,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let style = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);

    view! {
        <Card class=class.to_string() attr:style=style>
            {(!title.is_empty()).then(|| view! { <h3 class="card__title">{title}</h3> })}
            {children()}
        </Card>
    }
}
