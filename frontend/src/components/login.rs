use leptos::prelude::*;
use leptos::task::spawn_local;
use sweetshop_shared::LoginRequest;
use sweetshop_shared::validate::validate_login;

use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new_local(use_api());
    let router = use_router();

    let (username_or_email, set_username_or_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let is_loading = move || auth.state.get().is_loading;

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let identity = username_or_email.get();
        let pass = password.get();
        if let Err(msg) = validate_login(&identity, &pass) {
            set_error_msg.set(Some(msg));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let req = LoginRequest {
                username_or_email: identity.trim().to_string(),
                password: pass,
            };
            // Success needs no navigation here; the router watches the
            // auth signal and moves us to the dashboard.
            if let Err(err) = login(&auth, &api.get_value(), &req).await {
                set_error_msg.set(Some(err.to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            <div class="hero min-h-screen bg-base-200">
                <div class="hero-content flex-col w-full max-w-md">
                    <div class="text-center mb-4">
                        <div class="flex flex-col items-center gap-2">
                            <div class="p-3 bg-primary/10 rounded-2xl text-4xl">"🍬"</div>
                            <h1 class="text-3xl font-bold">"Sweet Shop"</h1>
                            <p class="text-base-content/70">
                                "Sign in to manage your inventory"
                            </p>
                        </div>
                    </div>

                    <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                        <form class="card-body" on:submit=on_submit>
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label" for="identity">
                                    <span class="label-text">"Username or Email"</span>
                                </label>
                                <input
                                    id="identity"
                                    type="text"
                                    placeholder="alice or alice@example.com"
                                    on:input=move |ev| set_username_or_email.set(event_target_value(&ev))
                                    prop:value=username_or_email
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                    } else {
                                        "Sign In".into_any()
                                    }}
                                </button>
                            </div>
                            <div class="text-center text-sm mt-2">
                                "No account? "
                                <a
                                    class="link link-primary"
                                    href="/register"
                                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        router.navigate("/register");
                                    }
                                >
                                    "Register here"
                                </a>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </Show>
    }
}
