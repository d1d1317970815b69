//! Page navigation and page size selection for the listings

use dashboard_http::PageQuery;
use dashboard_http::pagination::{PAGE_SIZES, total_pages};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PagerProps {
    pub query: PageQuery,
    /// Server-reported number of matching records
    pub total: u64,
    pub on_change: Callback<PageQuery>,
}

#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
    let query = &props.query;
    let total = props.total;
    let pages = total_pages(total, query.limit).max(1);

    let on_prev = {
        let query = query.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(query.clone().prev()))
    };

    let on_next = {
        let query = query.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(query.clone().next(total)))
    };

    let on_size = {
        let query = query.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(limit) = select.value().parse::<u32>() {
                on_change.emit(query.clone().with_limit(limit));
            }
        })
    };

    html! {
        <div class="flex items-center justify-between mt-4 text-sm text-gray-600">
            <div class="flex items-center gap-2">
                <label for="page-size">{"Rows per page"}</label>
                <select id="page-size" class="border rounded px-2 py-1" onchange={on_size}>
                    { for PAGE_SIZES.iter().map(|size| html! {
                        <option value={size.to_string()} selected={*size == query.limit}>
                            {size}
                        </option>
                    }) }
                </select>
            </div>
            <div class="flex items-center gap-3">
                <span>{format!("Page {} of {pages} ({total} total)", query.page)}</span>
                <button
                    class="px-3 py-1 border rounded disabled:opacity-50"
                    disabled={!query.has_prev()}
                    onclick={on_prev}
                >
                    {"Previous"}
                </button>
                <button
                    class="px-3 py-1 border rounded disabled:opacity-50"
                    disabled={!query.has_next(total)}
                    onclick={on_next}
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
