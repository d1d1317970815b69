//! Global authentication context and provider

use super::error_messages::user_message;
use dashboard_http::{ApiClient, ClientError, TokenPair};
use std::rc::Rc;
use yew::prelude::*;

/// Session state mirrored from the token store
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthContextData {
    pub tokens: TokenPair,
}

/// Authentication context actions
pub enum AuthAction {
    /// The token store changed
    Sync(TokenPair),
}

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Sync(tokens) if tokens == self.tokens => self,
            AuthAction::Sync(tokens) => Rc::new(Self { tokens }),
        }
    }
}

/// Shared API client plus the reactive session state
#[derive(Clone)]
pub struct AuthContext {
    client: Rc<ApiClient>,
    state: UseReducerHandle<AuthContextData>,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && *self.state == *other.state
    }
}

impl AuthContext {
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.tokens.is_authenticated()
    }

    /// Re-read the token store into the context
    pub fn sync(&self) {
        self.state.dispatch(AuthAction::Sync(self.client.tokens().tokens()));
    }

    /// End the session; the route guard takes the operator to the login view
    pub fn logout(&self) {
        if let Err(e) = self.client.logout() {
            warn!("Failed to clear stored tokens: {e}");
        }
        self.sync();
    }

    /// Message for a failed request. A torn-down session is synced so the
    /// guard redirects to the login view.
    pub fn report(&self, action: &str, error: &ClientError) -> String {
        if error.is_unauthenticated() {
            self.sync();
        }
        user_message(action, error)
    }
}

/// Auth provider props
#[derive(Properties)]
pub struct AuthProviderProps {
    pub client: Rc<ApiClient>,
    pub children: Children,
}

impl PartialEq for AuthProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && self.children == other.children
    }
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let client = props.client.clone();
    let state = {
        let client = client.clone();
        use_reducer(move || AuthContextData {
            tokens: client.tokens().tokens(),
        })
    };

    // Follow token store changes made by the gateway (refresh, forced logout)
    {
        let state = state.clone();
        let client = client.clone();
        use_effect_with((), move |_| {
            let mut changes = client.tokens().subscribe();
            wasm_bindgen_futures::spawn_local(async move {
                while changes.changed().await.is_ok() {
                    let tokens = changes.borrow_and_update().clone();
                    state.dispatch(AuthAction::Sync(tokens));
                }
            });
        });
    }

    let context = AuthContext { client, state };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.is_authenticated()
}
