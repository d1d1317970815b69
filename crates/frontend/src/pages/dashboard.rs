//! Overview: totals and the category breakdown

use crate::auth::use_auth;
use crate::components::LoadingSpinner;
use dashboard_http::DashboardStats;
use dashboard_http::stats::{LOW_STOCK_THRESHOLD, OVERVIEW_SAMPLE_SIZE};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(DashboardStats),
    Failed(String),
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    label: AttrValue,
    value: u64,
    #[prop_or_default]
    hint: Option<AttrValue>,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-white rounded-lg border border-gray-200 p-5">
            <p class="text-sm text-gray-500">{&props.label}</p>
            <p class="mt-1 text-3xl font-semibold text-gray-900">{props.value}</p>
            if let Some(hint) = &props.hint {
                <p class="mt-1 text-xs text-gray-400">{hint}</p>
            }
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let auth = use_auth();
    let load = use_state(|| Load::Loading);

    {
        let auth = auth.clone();
        let load = load.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match auth.client().dashboard_stats().await {
                    Ok(stats) => load.set(Load::Ready(stats)),
                    Err(e) => load.set(Load::Failed(auth.report("load dashboard statistics", &e))),
                }
            });
        });
    }

    let body = match &*load {
        Load::Loading => html! { <LoadingSpinner text={"Loading statistics..."} /> },
        Load::Failed(message) => html! {
            <div class="p-4 rounded bg-red-50 border border-red-200 text-red-700">{message}</div>
        },
        Load::Ready(stats) => html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <StatCard label="Products" value={stats.total_products} />
                    <StatCard label="Users" value={stats.total_users} />
                    <StatCard
                        label="Low stock"
                        value={stats.low_stock}
                        hint={format!(
                            "Fewer than {LOW_STOCK_THRESHOLD} units, among the first {OVERVIEW_SAMPLE_SIZE} products"
                        )}
                    />
                </div>
                <div class="mt-6 bg-white rounded-lg border border-gray-200">
                    <h2 class="px-5 py-3 border-b border-gray-200 font-medium text-gray-800">
                        {"Products by category"}
                    </h2>
                    if stats.categories.is_empty() {
                        <p class="px-5 py-4 text-sm text-gray-500">{"No products yet."}</p>
                    } else {
                        <table class="w-full text-sm">
                            <thead class="text-left text-gray-500">
                                <tr>
                                    <th class="px-5 py-2">{"Category"}</th>
                                    <th class="px-5 py-2 text-right">{"Products"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for stats.categories.iter().map(|category| html! {
                                    <tr class="border-t border-gray-100">
                                        <td class="px-5 py-2 capitalize">{&category.name}</td>
                                        <td class="px-5 py-2 text-right">{category.count}</td>
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                    }
                </div>
            </>
        },
    };

    html! {
        <div>
            <h1 class="text-2xl font-semibold text-gray-900 mb-6">{"Dashboard"}</h1>
            {body}
        </div>
    }
}
