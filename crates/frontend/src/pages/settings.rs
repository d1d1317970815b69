//! Session details and sign-out

use crate::auth::use_auth;
use crate::config::FrontendConfig;
use yew::prelude::*;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let auth = use_auth();
    let status = use_state(|| None::<String>);
    let refreshing = use_state(|| false);

    let on_refresh = {
        let auth = auth.clone();
        let status = status.clone();
        let refreshing = refreshing.clone();
        Callback::from(move |_: MouseEvent| {
            if *refreshing {
                return;
            }
            refreshing.set(true);
            let auth = auth.clone();
            let status = status.clone();
            let refreshing = refreshing.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match auth.client().refresh().await {
                    Ok(_) => status.set(Some("Session renewed.".to_string())),
                    Err(e) => status.set(Some(auth.report("renew the session", &e))),
                }
                refreshing.set(false);
            });
        })
    };

    let on_clear_cache = {
        let auth = auth.clone();
        let status = status.clone();
        Callback::from(move |_: MouseEvent| {
            auth.client().invalidate_stats();
            auth.client().invalidate_listings();
            status.set(Some("Cached data will be reloaded.".to_string()));
        })
    };

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| auth.logout())
    };

    let lifetime = format!("{} minutes", FrontendConfig::TOKEN_EXPIRES_IN_MINS);
    let session = if auth.is_authenticated() { "Signed in" } else { "Signed out" };

    html! {
        <div class="max-w-2xl">
            <h1 class="text-2xl font-semibold text-gray-900 mb-6">{"Settings"}</h1>
            <div class="bg-white rounded-lg border border-gray-200 p-5">
                <dl class="grid grid-cols-3 gap-y-3 text-sm">
                    <dt class="text-gray-500">{"Session"}</dt>
                    <dd class="col-span-2 text-gray-900">{session}</dd>
                    <dt class="text-gray-500">{"API"}</dt>
                    <dd class="col-span-2 text-gray-900 break-all">{auth.client().base_url()}</dd>
                    <dt class="text-gray-500">{"Token lifetime"}</dt>
                    <dd class="col-span-2 text-gray-900">{lifetime}</dd>
                </dl>
                if let Some(message) = &*status {
                    <p class="mt-4 text-sm text-gray-600">{message}</p>
                }
                <div class="mt-6 flex gap-3">
                    <button
                        onclick={on_refresh}
                        disabled={*refreshing}
                        class="px-4 py-2 rounded border border-gray-300 text-sm disabled:opacity-50"
                    >
                        {"Renew session"}
                    </button>
                    <button onclick={on_clear_cache} class="px-4 py-2 rounded border border-gray-300 text-sm">
                        {"Reload data"}
                    </button>
                    <button onclick={on_logout} class="px-4 py-2 rounded bg-red-600 text-white text-sm">
                        {"Sign out"}
                    </button>
                </div>
            </div>
        </div>
    }
}
