//! Product catalogue with search and paging

use crate::auth::use_auth;
use crate::components::{LoadingSpinner, Pager};
use crate::hooks::use_debounced;
use dashboard_http::PageQuery;
use dashboard_http::pagination::SEARCH_DEBOUNCE_MS;
use dashboard_http::stats::LOW_STOCK_THRESHOLD;
use dashboard_http::types::ProductPage;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(ProductPage),
    Failed(String),
}

#[function_component(ProductsPage)]
pub fn products_page() -> Html {
    let auth = use_auth();
    let search = use_state(String::new);
    let debounced = use_debounced((*search).clone(), SEARCH_DEBOUNCE_MS);
    let query = use_state(PageQuery::default);
    let load = use_state(|| Load::Loading);
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
                let result = auth.client().search_products(&query).await;
                if *generation.borrow() != current {
                    return;
                }
                match result {
                    Ok(page) => load.set(Load::Ready(page)),
                    Err(e) => load.set(Load::Failed(auth.report("load products", &e))),
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

    let body = match &*load {
        Load::Loading => html! { <LoadingSpinner text={"Loading products..."} /> },
        Load::Failed(message) => html! {
            <div class="p-4 rounded bg-red-50 border border-red-200 text-red-700">{message}</div>
        },
        Load::Ready(page) if page.products.is_empty() => html! {
            <p class="p-6 text-center text-gray-500">{"No products match your search."}</p>
        },
        Load::Ready(page) => html! {
            <>
                <table class="w-full text-sm bg-white rounded-lg border border-gray-200">
                    <thead class="text-left text-gray-500">
                        <tr>
                            <th class="px-4 py-2">{"Product"}</th>
                            <th class="px-4 py-2">{"Category"}</th>
                            <th class="px-4 py-2">{"Brand"}</th>
                            <th class="px-4 py-2 text-right">{"Price"}</th>
                            <th class="px-4 py-2 text-right">{"Stock"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.products.iter().map(|product| {
                            let stock_class = if product.stock < LOW_STOCK_THRESHOLD {
                                "px-4 py-2 text-right text-red-600 font-medium"
                            } else {
                                "px-4 py-2 text-right"
                            };
                            html! {
                                <tr key={product.id} class="border-t border-gray-100">
                                    <td class="px-4 py-2">
                                        <div class="flex items-center gap-3">
                                            if !product.thumbnail.is_empty() {
                                                <img src={product.thumbnail.clone()} alt="" class="w-10 h-10 rounded object-cover" />
                                            }
                                            <span class="font-medium text-gray-900">{&product.title}</span>
                                        </div>
                                    </td>
                                    <td class="px-4 py-2 capitalize">{&product.category}</td>
                                    <td class="px-4 py-2">{product.brand.clone().unwrap_or_default()}</td>
                                    <td class="px-4 py-2 text-right">{format!("${:.2}", product.price)}</td>
                                    <td class={stock_class}>{product.stock}</td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                <Pager query={(*query).clone()} total={page.total} on_change={on_page} />
            </>
        },
    };

    html! {
        <div>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-semibold text-gray-900">{"Products"}</h1>
                <input
                    type="search"
                    class="border rounded px-3 py-2 w-72"
                    placeholder="Search products"
                    value={(*search).clone()}
                    oninput={on_search}
                />
            </div>
            {body}
        </div>
    }
}
