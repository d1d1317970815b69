use crate::auth::AuthProvider;
use crate::auth_guard::RequireAuth;
use crate::components::Layout;
use crate::config::FrontendConfig;
use crate::pages::{DashboardPage, LoginPage, NotFoundPage, ProductsPage, SettingsPage, UsersPage};
use crate::storage::BrowserStorage;
use dashboard_http::{ApiClient, ApiClientBuilder, Route};
use std::rc::Rc;
use std::sync::Arc;
use yew::prelude::*;
use yew_router::prelude::*;

/// Browser routes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Routable)]
pub enum AppRoute {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/products")]
    Products,
    #[at("/users")]
    Users,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Root => Self::Root,
            AppRoute::Login => Self::Login,
            AppRoute::Dashboard => Self::Dashboard,
            AppRoute::Products => Self::Products,
            AppRoute::Users => Self::Users,
            AppRoute::Settings => Self::Settings,
            AppRoute::NotFound => Self::NotFound,
        }
    }
}

impl From<Route> for AppRoute {
    fn from(route: Route) -> Self {
        match route {
            Route::Root => Self::Root,
            Route::Login => Self::Login,
            Route::Dashboard => Self::Dashboard,
            Route::Products => Self::Products,
            Route::Users => Self::Users,
            Route::Settings => Self::Settings,
            Route::NotFound => Self::NotFound,
        }
    }
}

fn build_client() -> Result<Rc<ApiClient>, String> {
    let config = FrontendConfig::client_config();
    info!("Using API at {}", config.base_url);
    ApiClientBuilder::from_config(&config)
        .storage(Arc::new(BrowserStorage))
        .build()
        .map(Rc::new)
        .map_err(|e| e.to_string())
}

#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |_| build_client());

    match &*client {
        Ok(client) => html! {
            <AuthProvider client={client.clone()}>
                <BrowserRouter>
                    <Switch<AppRoute> render={switch} />
                </BrowserRouter>
            </AuthProvider>
        },
        Err(message) => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-50">
                <div class="p-6 rounded-lg bg-red-50 border border-red-200 text-red-700">
                    <h1 class="font-semibold mb-2">{"Dashboard failed to start"}</h1>
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        },
    }
}

fn switch(route: AppRoute) -> Html {
    let page = match route {
        AppRoute::Root => html! {},
        AppRoute::Login => html! { <LoginPage /> },
        AppRoute::Dashboard => html! { <Layout><DashboardPage /></Layout> },
        AppRoute::Products => html! { <Layout><ProductsPage /></Layout> },
        AppRoute::Users => html! { <Layout><UsersPage /></Layout> },
        AppRoute::Settings => html! { <Layout><SettingsPage /></Layout> },
        AppRoute::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <RequireAuth route={route}>
            {page}
        </RequireAuth>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_match_guard_paths() {
        for route in Route::ALL {
            let app_route = AppRoute::from(route);
            assert_eq!(app_route.to_path(), route.path());
            assert_eq!(Route::from(app_route), route);
        }
        assert_eq!(AppRoute::not_found_route(), Some(AppRoute::NotFound));
    }
}
