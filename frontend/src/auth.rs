//! Authentication state.
//!
//! Holds the in-memory session signal, decoupled from the routing layer.
//! The router checks an injected signal; this module owns the transitions
//! (login, registration, logout, cross-tab sync, forced expiry via the
//! API client).

use leptos::prelude::*;
use sweetshop_shared::Role;
use wasm_bindgen::prelude::*;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::session::{Session, SessionStore};
use sweetshop_shared::{AuthResponse, LoginRequest, RegisterRequest};

/// In-memory authentication state, mirroring the persisted session.
#[derive(Clone, Default)]
pub struct AuthState {
    /// The active session, or `None` when anonymous.
    pub session: Option<Session>,
    /// True until the stored session has been read on startup.
    pub is_loading: bool,
}

/// Read/write signals shared through Context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            session: None,
            is_loading: true,
        });
        Self { state, set_state }
    }

    /// Authentication check signal for injection into the router.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().session.is_some())
    }

    /// Role of the current user; anonymous readers see the default role.
    pub fn role_signal(&self) -> Signal<Role> {
        let state = self.state;
        Signal::derive(move || {
            state
                .get()
                .session
                .map(|s| s.role)
                .unwrap_or_default()
        })
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Reads the persisted session once on startup, then keeps the signal in
/// sync with other tabs through the window `storage` event. Another tab
/// logging out logs this one out too (and the router redirects); another
/// tab logging in is adopted on the spot.
pub fn init_auth(ctx: &AuthContext, store: &SessionStore) {
    let session = store.load();
    ctx.set_state.update(|state| {
        state.session = session;
        state.is_loading = false;
    });

    let set_state = ctx.set_state;
    let store = store.clone();
    let closure = Closure::<dyn Fn(web_sys::Event)>::new(move |_event| {
        let session = store.load();
        log::debug!(
            "storage changed in another tab; session present: {}",
            session.is_some()
        );
        set_state.update(|state| state.session = session);
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
    }

    // Leak the closure to keep the listener alive.
    closure.forget();
}

/// Persists a freshly issued session and flips the in-memory state. The
/// router's auth watcher handles navigation.
fn adopt_session(ctx: &AuthContext, store: &SessionStore, response: AuthResponse) {
    let session = Session {
        token: response.token,
        username: response.username,
        role: response.role,
    };
    store.set(&session);
    ctx.set_state.update(|state| state.session = Some(session));
}

pub async fn login(
    ctx: &AuthContext,
    api: &ApiClient,
    req: &LoginRequest,
) -> ApiResult<()> {
    let response = api.login(req).await?;
    log::info!("logged in as {}", response.username);
    adopt_session(ctx, api.store(), response);
    Ok(())
}

/// Registration issues a session directly, so a successful registration
/// logs the user in without a second round trip.
pub async fn register(
    ctx: &AuthContext,
    api: &ApiClient,
    req: &RegisterRequest,
) -> ApiResult<()> {
    let response = api.register(req).await?;
    log::info!("registered and logged in as {}", response.username);
    adopt_session(ctx, api.store(), response);
    Ok(())
}

/// Clears both the persisted and in-memory session. No manual navigation
/// here; the router watches the auth signal and redirects.
pub fn logout(ctx: &AuthContext, store: &SessionStore) {
    store.clear();
    ctx.set_state.update(|state| state.session = None);
}
