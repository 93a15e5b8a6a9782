use crate::dashboards::{
    HomeDashboard, LeadsDashboard, ManagerDetailDashboard, SalesDashboard,
};
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

/// Маршруты мини-приложения. Неизвестный путь уводит на главную.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <Redirect path="/" /> }>
                    <Route path=path!("/") view=HomeDashboard />
                    <Route path=path!("/leads") view=LeadsDashboard />
                    <Route path=path!("/sales") view=SalesDashboard />
                    <Route path=path!("/managers/:id") view=ManagerDetailDashboard />
                </Routes>
            </Shell>
        </Router>
    }
}
