//! User directory client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::pagination::PageQuery;
use crate::types::UserPage;

const SEARCH_PATH: &str = "/users/search";

impl ApiClient {
    /// First `limit` users
    pub async fn list_users(&self, limit: u32) -> Result<UserPage, ClientError> {
        let request = ApiRequest::get("/users").query("limit", limit.to_string());
        self.execute(request).await
    }

    /// One page of users matching `query.q`, cached for the configured TTL
    pub async fn search_users(&self, query: &PageQuery) -> Result<UserPage, ClientError> {
        let key = query.cache_key(SEARCH_PATH);
        if let Some(page) = self.user_pages.get(&key) {
            debug!(%key, "Serving users from cache");
            return Ok(page);
        }

        let request = ApiRequest::get(SEARCH_PATH).query_pairs(query.to_query());
        let page: UserPage = self.execute(request).await?;
        self.user_pages.insert(key, page.clone());
        Ok(page)
    }

    /// Force the listing views to refetch
    pub fn invalidate_listings(&self) {
        self.product_pages.clear();
        self.user_pages.clear();
    }
}
