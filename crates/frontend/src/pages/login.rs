//! Sign-in form

use crate::app::AppRoute;
use crate::auth::error_messages::login_message;
use crate::auth::use_auth;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let auth = auth.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);
            error.set(None);

            let auth = auth.clone();
            let navigator = navigator.clone();
            let username = (*username).clone();
            let password = (*password).clone();
            let error = error.clone();
            let submitting = submitting.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match auth.client().login(&username, &password).await {
                    Ok(tokens) => {
                        info!("Signed in as {}", tokens.username.as_deref().unwrap_or(&username));
                        auth.sync();
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::Dashboard);
                        }
                    }
                    Err(e) => {
                        warn!("Sign-in failed: {e}");
                        error.set(Some(login_message(&e)));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen bg-gradient-to-br from-gray-50 to-gray-100 flex items-center justify-center px-4">
            <div class="max-w-md w-full">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-bold text-blue-600">{"Product Dashboard"}</h1>
                    <p class="mt-2 text-gray-600">{"Sign in to continue"}</p>
                </div>
                <form class="bg-white rounded-lg shadow-lg p-8 flex flex-col gap-4" onsubmit={on_submit}>
                    if let Some(message) = &*error {
                        <div class="p-3 rounded bg-red-50 border border-red-200 text-sm text-red-700">
                            {message}
                        </div>
                    }
                    <label class="flex flex-col gap-1 text-sm text-gray-700">
                        {"Username"}
                        <input
                            type="text"
                            class="border rounded px-3 py-2"
                            autocomplete="username"
                            value={(*username).clone()}
                            oninput={on_username}
                        />
                    </label>
                    <label class="flex flex-col gap-1 text-sm text-gray-700">
                        {"Password"}
                        <input
                            type="password"
                            class="border rounded px-3 py-2"
                            autocomplete="current-password"
                            value={(*password).clone()}
                            oninput={on_password}
                        />
                    </label>
                    <button
                        type="submit"
                        class="mt-2 px-4 py-2 rounded bg-blue-600 text-white font-medium disabled:opacity-50"
                        disabled={*submitting}
                    >
                        { if *submitting { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
