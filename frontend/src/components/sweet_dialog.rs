mod form_state;

pub use form_state::FormState;

use leptos::prelude::*;
use sweetshop_shared::SweetRequest;

/// Modal dialog for adding or editing a sweet. The caller owns the open
/// flag and the form state so table rows can pre-fill it for edits; the
/// dialog only validates and hands the payload back.
#[component]
pub fn SweetDialog(
    open: RwSignal<bool>,
    form: FormState,
    #[prop(into)] on_save: Callback<(Option<u64>, SweetRequest)>,
) -> impl IntoView {
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // Stale validation messages must not survive a reopen.
    Effect::new(move |_| {
        if open.get() {
            set_error_msg.set(None);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.parse() {
            Ok(req) => {
                set_error_msg.set(None);
                on_save.run((form.editing.get_untracked(), req));
                open.set(false);
            }
            Err(msg) => set_error_msg.set(Some(msg)),
        }
    };

    let title = move || {
        if form.editing.get().is_some() {
            "Edit Sweet"
        } else {
            "Add New Sweet"
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4 text-base-content/70">"Fill in the sweet details below."</p>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="sweet-name" class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input id="sweet-name" required
                            type="text"
                            placeholder="Chocolate Fudge"
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            prop:value=form.name
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="sweet-category" class="label">
                            <span class="label-text">"Category"</span>
                        </label>
                        <input id="sweet-category" required
                            type="text"
                            placeholder="Chocolate"
                            on:input=move |ev| form.category.set(event_target_value(&ev))
                            prop:value=form.category
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="sweet-price" class="label">
                                <span class="label-text">"Price"</span>
                            </label>
                            <input id="sweet-price" required
                                type="number"
                                step="0.01"
                                min="0.01"
                                placeholder="2.50"
                                on:input=move |ev| form.price.set(event_target_value(&ev))
                                prop:value=form.price
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="sweet-quantity" class="label">
                                <span class="label-text">"Quantity"</span>
                            </label>
                            <input id="sweet-quantity" required
                                type="number"
                                min="0"
                                placeholder="10"
                                on:input=move |ev| form.quantity.set(event_target_value(&ev))
                                prop:value=form.quantity
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">
                            {move || if form.editing.get().is_some() { "Save Changes" } else { "Add Sweet" }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
