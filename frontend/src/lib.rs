//! Sweet Shop frontend.
//!
//! Context-driven architecture, loosely coupled:
//! - `web::route`: route definitions (domain model)
//! - `web::router`: routing service (engine)
//! - `session`: persisted session storage
//! - `auth`: authentication state management
//! - `api`: HTTP client
//! - `components`: UI layer

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod login;
    pub mod register;
    mod sweet_dialog;
}
mod config;
mod error;
mod session;

pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::session::SessionStore;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Maps the current route to its view.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session storage and authentication context.
    let store = SessionStore::browser();
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_context(store.clone());

    // 2. Read the persisted session and start the cross-tab listener.
    init_auth(&auth_ctx, &store);

    // 3. API client, wired to clear the session on 401/403.
    let api = ApiClient::new(config::API_BASE, store, auth_ctx.set_state);
    provide_context(api);

    // 4. Auth signal injected into the router for the guard.
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
