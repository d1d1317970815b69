//! Shell around the protected views: navigation sidebar and header

use crate::app::AppRoute;
use crate::auth::use_auth;
use dashboard_http::Route;
use yew::prelude::*;
use yew_router::prelude::*;

const fn nav_label(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "Dashboard",
        Route::Products => "Products",
        Route::Users => "Users",
        Route::Settings => "Settings",
        Route::Root | Route::Login | Route::NotFound => "",
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let auth = use_auth();
    let current = use_route::<AppRoute>();
    let operator = use_state(|| None::<String>);

    {
        let auth = auth.clone();
        let operator = operator.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match auth.client().current_user().await {
                    Ok(user) => operator.set(Some(user.display_name())),
                    Err(e) => {
                        warn!("Failed to load operator profile: {e}");
                        auth.report("load your profile", &e);
                    }
                }
            });
        });
    }

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| auth.logout())
    };

    html! {
        <div class="min-h-screen flex bg-gray-50">
            <aside class="w-56 bg-white border-r border-gray-200">
                <div class="h-16 flex items-center px-6 text-xl font-bold text-blue-600">
                    {"Dashboard"}
                </div>
                <nav class="flex flex-col gap-1 px-3">
                    { for Route::ALL.into_iter().filter(|r| r.requires_auth()).map(|route| {
                        let target = AppRoute::from(route);
                        let active = current == Some(target);
                        let classes = if active {
                            "px-3 py-2 rounded bg-blue-50 text-blue-700 font-medium"
                        } else {
                            "px-3 py-2 rounded text-gray-600 hover:bg-gray-100"
                        };
                        html! {
                            <Link<AppRoute> to={target} classes={classes!(classes)}>{nav_label(route)}</Link<AppRoute>>
                        }
                    }) }
                </nav>
            </aside>
            <div class="flex-1 flex flex-col">
                <header class="h-16 flex items-center justify-end gap-4 px-6 bg-white border-b border-gray-200">
                    if let Some(name) = &*operator {
                        <span class="text-sm text-gray-700">{name}</span>
                    }
                    <button
                        onclick={on_logout}
                        class="px-3 py-1.5 text-sm rounded bg-gray-100 hover:bg-gray-200 text-gray-700"
                    >
                        {"Sign out"}
                    </button>
                </header>
                <main class="flex-1 p-6">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}
