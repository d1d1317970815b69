//! Authentication guard component for protected routes

use crate::app::AppRoute;
use crate::auth::use_is_authenticated;
use dashboard_http::{Access, guard};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub route: AppRoute,
    pub children: Children,
}

/// Renders the children when the session allows `route`, otherwise
/// redirects
#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let is_authenticated = use_is_authenticated();

    match guard::decide(props.route.into(), is_authenticated) {
        Access::Allow => html! { <>{ props.children.clone() }</> },
        Access::Redirect(target) => {
            debug!("Redirecting {:?} to {:?}", props.route, target);
            html! { <Redirect<AppRoute> to={AppRoute::from(target)} /> }
        }
    }
}
