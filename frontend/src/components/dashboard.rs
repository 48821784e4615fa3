use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use sweetshop_shared::validate::parse_restock_qty;
use sweetshop_shared::{InventoryStats, LOW_STOCK_THRESHOLD, Sweet, SweetRequest, SweetSearchQuery};

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::sweet_dialog::{FormState, SweetDialog};
use crate::config::TOAST_SECS;
use crate::session::use_session_store;

/// Search filter fields, kept as raw strings until a search is submitted.
#[derive(Clone, Copy)]
struct SearchState {
    name: RwSignal<String>,
    category: RwSignal<String>,
    min_price: RwSignal<String>,
    max_price: RwSignal<String>,
}

impl SearchState {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            min_price: RwSignal::new(String::new()),
            max_price: RwSignal::new(String::new()),
        }
    }

    fn to_query(self) -> SweetSearchQuery {
        SweetSearchQuery {
            name: self.name.get_untracked().trim().to_string(),
            category: self.category.get_untracked().trim().to_string(),
            min_price: self.min_price.get_untracked().trim().to_string(),
            max_price: self.max_price.get_untracked().trim().to_string(),
        }
    }

    fn clear(self) {
        self.name.set(String::new());
        self.category.set(String::new());
        self.min_price.set(String::new());
        self.max_price.set(String::new());
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new_local(use_api());
    let store = StoredValue::new_local(use_session_store());

    let (sweets, set_sweets) = signal(Vec::<Sweet>::new());
    let (loading_sweets, set_loading_sweets) = signal(true);
    // Message text plus whether it is an error.
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);
    // Ids with a mutating request in flight. Checked synchronously before
    // spawning, so a double click cannot start two operations on one row.
    let (busy, set_busy) = signal(HashSet::<u64>::new());

    let search = SearchState::new();
    let form = FormState::new();
    let dialog_open = RwSignal::new(false);

    let is_admin = Memo::new(move |_| auth.role_signal().get().is_admin());
    let username = move || {
        auth.state
            .get()
            .session
            .map(|s| s.username)
            .unwrap_or_default()
    };

    let try_begin = move |id: u64| {
        if busy.get_untracked().contains(&id) {
            return false;
        }
        set_busy.update(|b| {
            b.insert(id);
        });
        true
    };
    let finish = move |id: u64| {
        set_busy.update(|b| {
            b.remove(&id);
        });
    };

    let load_sweets = move || {
        let query = search.to_query();
        set_loading_sweets.set(true);
        spawn_local(async move {
            match api.get_value().list_sweets(&query).await {
                Ok(data) => set_sweets.set(data),
                Err(e) => set_notification.set(Some((format!("Failed to load sweets: {e}"), true))),
            }
            set_loading_sweets.set(false);
        });
    };

    // Initial load, once the stored session has been read.
    Effect::new(move |_| {
        let state = auth.state.get();
        if !state.is_loading && state.session.is_some() {
            load_sweets();
        }
    });

    let handle_save = move |(editing, req): (Option<u64>, SweetRequest)| {
        spawn_local(async move {
            let result = match editing {
                Some(id) => api.get_value().update_sweet(id, &req).await,
                None => api.get_value().create_sweet(&req).await,
            };
            match result {
                Ok(_) => {
                    let verb = if editing.is_some() { "updated" } else { "added" };
                    set_notification.set(Some((format!("Sweet {verb} successfully"), false)));
                    load_sweets();
                }
                Err(e) => set_notification.set(Some((format!("Failed to save sweet: {e}"), true))),
            }
        });
    };

    let handle_purchase = move |id: u64| {
        if !try_begin(id) {
            return;
        }
        spawn_local(async move {
            match api.get_value().purchase_sweet(id).await {
                Ok(updated) => {
                    set_sweets.update(|list| {
                        if let Some(s) = list.iter_mut().find(|s| s.id == id) {
                            *s = updated;
                        }
                    });
                    set_notification.set(Some(("Purchase successful".to_string(), false)));
                }
                Err(e) => set_notification.set(Some((format!("Purchase failed: {e}"), true))),
            }
            finish(id);
        });
    };

    let handle_restock = move |id: u64, raw_qty: String| {
        let qty = match parse_restock_qty(&raw_qty) {
            Ok(qty) => qty,
            Err(msg) => {
                set_notification.set(Some((msg, true)));
                return;
            }
        };
        if !try_begin(id) {
            return;
        }
        spawn_local(async move {
            match api.get_value().restock_sweet(id, qty).await {
                Ok(updated) => {
                    set_sweets.update(|list| {
                        if let Some(s) = list.iter_mut().find(|s| s.id == id) {
                            *s = updated;
                        }
                    });
                    set_notification.set(Some((format!("Restocked {qty} units"), false)));
                }
                Err(e) => set_notification.set(Some((format!("Restock failed: {e}"), true))),
            }
            finish(id);
        });
    };

    let handle_delete = move |id: u64, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Are you sure you want to delete \"{name}\"?"))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed || !try_begin(id) {
            return;
        }
        spawn_local(async move {
            match api.get_value().delete_sweet(id).await {
                Ok(()) => {
                    set_sweets.update(|list| list.retain(|s| s.id != id));
                    set_notification.set(Some(("Sweet deleted".to_string(), false)));
                }
                Err(e) => set_notification.set(Some((format!("Failed to delete sweet: {e}"), true))),
            }
            finish(id);
        });
    };

    let on_logout = move |_| {
        // Navigation is handled by the router's auth watcher.
        logout(&auth, &store.get_value());
    };

    let open_add = move |_| {
        form.reset();
        dialog_open.set(true);
    };

    // Toasts clear themselves after a few seconds.
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(TOAST_SECS),
            );
        }
    });

    let stats = Memo::new(move |_| sweets.with(|s| InventoryStats::from_sweets(s)));
    let total_sweets = move || stats.get().total_sweets;

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let is_err = notification.get().map(|(_, e)| e).unwrap_or(false);
                            if is_err {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <span class="text-2xl">"🍬"</span>
                        <a class="btn btn-ghost text-xl">"Sweet Shop"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {username}
                            {move || if is_admin.get() { " (admin)" } else { "" }}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <Show when=move || is_admin.get()>
                            <button class="btn btn-primary gap-2" on:click=open_add>
                                "➕ Add Sweet"
                            </button>
                        </Show>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            "Logout"
                        </button>
                    </div>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary text-3xl">"🍭"</div>
                        <div class="stat-title">"Total Sweets"</div>
                        <div class="stat-value text-primary">{total_sweets}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-success text-3xl">"💰"</div>
                        <div class="stat-title">"Inventory Value"</div>
                        <div class="stat-value text-success">
                            {move || format!("${:.2}", stats.get().total_value)}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-warning text-3xl">"⚠️"</div>
                        <div class="stat-title">"Low Stock"</div>
                        <div class="stat-value text-warning">{move || stats.get().low_stock}</div>
                        <div class="stat-desc">{format!("{LOW_STOCK_THRESHOLD} units or fewer")}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Search"</h3>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <input
                                type="text"
                                placeholder="Name"
                                class="input input-bordered w-full"
                                on:input=move |ev| search.name.set(event_target_value(&ev))
                                prop:value=search.name
                            />
                            <input
                                type="text"
                                placeholder="Category"
                                class="input input-bordered w-full"
                                on:input=move |ev| search.category.set(event_target_value(&ev))
                                prop:value=search.category
                            />
                            <input
                                type="number"
                                step="0.01"
                                placeholder="Min price"
                                class="input input-bordered w-full"
                                on:input=move |ev| search.min_price.set(event_target_value(&ev))
                                prop:value=search.min_price
                            />
                            <input
                                type="number"
                                step="0.01"
                                placeholder="Max price"
                                class="input input-bordered w-full"
                                on:input=move |ev| search.max_price.set(event_target_value(&ev))
                                prop:value=search.max_price
                            />
                        </div>
                        <div class="card-actions justify-end mt-2">
                            <button
                                class="btn btn-ghost"
                                on:click=move |_| {
                                    search.clear();
                                    load_sweets();
                                }
                            >
                                "Clear"
                            </button>
                            <button
                                class="btn btn-primary"
                                disabled=move || loading_sweets.get()
                                on:click=move |_| load_sweets()
                            >
                                "🔍 Search"
                            </button>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"Inventory"</h3>
                                <p class="text-base-content/70 text-sm">"All sweets currently on record."</p>
                            </div>
                            <button
                                on:click=move |_| load_sweets()
                                disabled=move || loading_sweets.get()
                                class="btn btn-ghost btn-circle"
                            >
                                {move || if loading_sweets.get() {
                                    view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                                } else {
                                    "🔄".into_any()
                                }}
                            </button>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Category"</th>
                                        <th>"Price"</th>
                                        <th>"Stock"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || total_sweets() == 0 && !loading_sweets.get()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No sweets found."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading_sweets.get() && total_sweets() == 0>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || sweets.get()
                                        key=|s| s.id
                                        children=move |sweet| {
                                            let id = sweet.id;
                                            let name = sweet.name.clone();
                                            let delete_name = sweet.name.clone();
                                            let quantity = sweet.quantity;
                                            let restock_qty = RwSignal::new(String::new());
                                            let is_busy = move || busy.get().contains(&id);
                                            let edit_sweet = StoredValue::new(sweet.clone());
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{name}</td>
                                                    <td>
                                                        <div class="badge badge-outline">{sweet.category.clone()}</div>
                                                    </td>
                                                    <td class="font-mono">{format!("${:.2}", sweet.price)}</td>
                                                    <td>
                                                        {if quantity == 0 {
                                                            view! { <div class="badge badge-error">"Out of Stock"</div> }.into_any()
                                                        } else if quantity <= LOW_STOCK_THRESHOLD {
                                                            view! { <div class="badge badge-warning">{quantity} " (low)"</div> }.into_any()
                                                        } else {
                                                            view! { <span>{quantity}</span> }.into_any()
                                                        }}
                                                    </td>
                                                    <td>
                                                        <div class="flex items-center justify-end gap-2">
                                                            <button
                                                                class="btn btn-sm btn-primary"
                                                                disabled=move || quantity == 0 || is_busy()
                                                                on:click=move |_| handle_purchase(id)
                                                            >
                                                                {if quantity == 0 { "Out of Stock" } else { "🛒 Purchase" }}
                                                            </button>
                                                            <Show when=move || is_admin.get()>
                                                                <div class="join">
                                                                    <input
                                                                        type="number"
                                                                        min="1"
                                                                        placeholder="5"
                                                                        class="input input-bordered input-sm join-item w-16"
                                                                        on:input=move |ev| restock_qty.set(event_target_value(&ev))
                                                                        prop:value=restock_qty
                                                                    />
                                                                    <button
                                                                        class="btn btn-sm btn-secondary join-item"
                                                                        disabled=is_busy
                                                                        on:click=move |_| handle_restock(id, restock_qty.get_untracked())
                                                                    >
                                                                        "📦 Restock"
                                                                    </button>
                                                                </div>
                                                                <button
                                                                    class="btn btn-sm btn-ghost"
                                                                    on:click=move |_| {
                                                                        form.load(&edit_sweet.get_value());
                                                                        dialog_open.set(true);
                                                                    }
                                                                >
                                                                    "✏️"
                                                                </button>
                                                                <button
                                                                    class="btn btn-sm btn-ghost text-error"
                                                                    disabled=is_busy
                                                                    on:click={
                                                                        let delete_name = delete_name.clone();
                                                                        move |_| handle_delete(id, delete_name.clone())
                                                                    }
                                                                >
                                                                    "🗑️"
                                                                </button>
                                                            </Show>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>

        <SweetDialog open=dialog_open form=form on_save=handle_save />
    }
}
