//! Product catalogue client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::pagination::PageQuery;
use crate::types::ProductPage;

const SEARCH_PATH: &str = "/products/search";

impl ApiClient {
    /// First `limit` products
    pub async fn list_products(&self, limit: u32) -> Result<ProductPage, ClientError> {
        let request = ApiRequest::get("/products").query("limit", limit.to_string());
        self.execute(request).await
    }

    /// One page of products matching `query.q`; an empty term matches everything
    ///
    /// Pages are cached for the configured TTL.
    pub async fn search_products(&self, query: &PageQuery) -> Result<ProductPage, ClientError> {
        let key = query.cache_key(SEARCH_PATH);
        if let Some(page) = self.product_pages.get(&key) {
            debug!(%key, "Serving products from cache");
            return Ok(page);
        }

        let request = ApiRequest::get(SEARCH_PATH).query_pairs(query.to_query());
        let page: ProductPage = self.execute(request).await?;
        self.product_pages.insert(key, page.clone());
        Ok(page)
    }
}
