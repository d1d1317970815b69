//! User directory with search, paging and a detail panel

use crate::auth::use_auth;
use crate::components::{LoadingSpinner, Pager};
use crate::hooks::use_debounced;
use dashboard_http::PageQuery;
use dashboard_http::pagination::SEARCH_DEBOUNCE_MS;
use dashboard_http::types::{User, UserPage};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(UserPage),
    Failed(String),
}

#[derive(Properties, PartialEq)]
struct UserDetailProps {
    user: User,
    on_close: Callback<()>,
}

#[function_component(UserDetail)]
fn user_detail(props: &UserDetailProps) -> Html {
    let user = &props.user;
    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let field = |label: &'static str, value: Option<String>| {
        html! {
            <div class="py-2 border-b border-gray-100">
                <dt class="text-xs text-gray-500">{label}</dt>
                <dd class="text-sm text-gray-900">{value.unwrap_or_else(|| "-".to_string())}</dd>
            </div>
        }
    };

    html! {
        <aside class="w-80 bg-white rounded-lg border border-gray-200 p-5 self-start">
            <div class="flex items-start justify-between mb-4">
                <div class="flex items-center gap-3">
                    if let Some(image) = &user.image {
                        <img src={image.clone()} alt="" class="w-12 h-12 rounded-full" />
                    }
                    <div>
                        <p class="font-medium text-gray-900">{user.display_name()}</p>
                        <p class="text-sm text-gray-500">{format!("@{}", user.username)}</p>
                    </div>
                </div>
                <button onclick={on_close} class="text-gray-400 hover:text-gray-600">{"Close"}</button>
            </div>
            <dl>
                { field("Email", Some(user.email.clone()).filter(|e| !e.is_empty())) }
                { field("Phone", user.phone.clone()) }
                { field("Age", user.age.map(|age| age.to_string())) }
                { field("Gender", user.gender.clone()) }
                { field("Role", user.role.clone()) }
            </dl>
        </aside>
    }
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let auth = use_auth();
    let search = use_state(String::new);
    let debounced = use_debounced((*search).clone(), SEARCH_DEBOUNCE_MS);
    let query = use_state(PageQuery::default);
    let load = use_state(|| Load::Loading);
    let selected = use_state(|| None::<User>);
    let generation = use_mut_ref(|| 0_u64);

    {
        let query = query.clone();
        use_effect_with(debounced, move |term| {
            if query.q != *term {
                query.set((*query).clone().with_search(term.clone()));
            }
        });
    }

    {
        let auth = auth.clone();
        let load = load.clone();
        let generation = generation.clone();
        use_effect_with((*query).clone(), move |query| {
            let query = query.clone();
            let current = {
                let mut generation = generation.borrow_mut();
                *generation += 1;
                *generation
            };
            load.set(Load::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                let result = auth.client().search_users(&query).await;
                if *generation.borrow() != current {
                    return;
                }
                match result {
                    Ok(page) => load.set(Load::Ready(page)),
                    Err(e) => load.set(Load::Failed(auth.report("load users", &e))),
                }
            });
        });
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_page = {
        let query = query.clone();
        Callback::from(move |next: PageQuery| query.set(next))
    };

    let on_close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let body = match &*load {
        Load::Loading => html! { <LoadingSpinner text={"Loading users..."} /> },
        Load::Failed(message) => html! {
            <div class="p-4 rounded bg-red-50 border border-red-200 text-red-700">{message}</div>
        },
        Load::Ready(page) if page.users.is_empty() => html! {
            <p class="p-6 text-center text-gray-500">{"No users match your search."}</p>
        },
        Load::Ready(page) => html! {
            <div class="flex-1">
                <table class="w-full text-sm bg-white rounded-lg border border-gray-200">
                    <thead class="text-left text-gray-500">
                        <tr>
                            <th class="px-4 py-2">{"Name"}</th>
                            <th class="px-4 py-2">{"Username"}</th>
                            <th class="px-4 py-2">{"Email"}</th>
                            <th class="px-4 py-2">{"Role"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.users.iter().map(|user| {
                            let on_select = {
                                let selected = selected.clone();
                                let user = user.clone();
                                Callback::from(move |_: MouseEvent| selected.set(Some(user.clone())))
                            };
                            let active = (*selected).as_ref().is_some_and(|s| s.id == user.id);
                            let row_class = if active {
                                "border-t border-gray-100 bg-blue-50 cursor-pointer"
                            } else {
                                "border-t border-gray-100 hover:bg-gray-50 cursor-pointer"
                            };
                            html! {
                                <tr key={user.id} class={row_class} onclick={on_select}>
                                    <td class="px-4 py-2 font-medium text-gray-900">{user.display_name()}</td>
                                    <td class="px-4 py-2">{&user.username}</td>
                                    <td class="px-4 py-2">{&user.email}</td>
                                    <td class="px-4 py-2 capitalize">{user.role.clone().unwrap_or_default()}</td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                <Pager query={(*query).clone()} total={page.total} on_change={on_page} />
            </div>
        },
    };

    html! {
        <div>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-semibold text-gray-900">{"Users"}</h1>
                <input
                    type="search"
                    class="border rounded px-3 py-2 w-72"
                    placeholder="Search users"
                    value={(*search).clone()}
                    oninput={on_search}
                />
            </div>
            <div class="flex gap-6">
                {body}
                if let Some(user) = &*selected {
                    <UserDetail user={user.clone()} on_close={on_close} />
                }
            </div>
        </div>
    }
}
