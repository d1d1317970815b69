use crate::app::AppRoute;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center gap-4 bg-gray-50">
            <h1 class="text-2xl font-semibold text-gray-800">{"Page not found"}</h1>
            <Link<AppRoute> to={AppRoute::Dashboard} classes={classes!("text-blue-600", "hover:underline")}>
                {"Back to the dashboard"}
            </Link<AppRoute>>
        </div>
    }
}
