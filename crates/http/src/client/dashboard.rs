//! Overview statistics

use super::{ApiClient, ClientError};
use crate::stats::{DashboardStats, OVERVIEW_SAMPLE_SIZE};

const STATS_KEY: &str = "dashboard-stats";

impl ApiClient {
    /// Totals and category breakdown for the overview, cached for the
    /// configured TTL
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        if let Some(stats) = self.stats_cache.get(STATS_KEY) {
            debug!("Serving dashboard stats from cache");
            return Ok(stats);
        }

        let (products, users) = futures::try_join!(
            self.list_products(OVERVIEW_SAMPLE_SIZE),
            self.list_users(OVERVIEW_SAMPLE_SIZE)
        )?;

        let stats = DashboardStats::from_pages(&products, &users);
        self.stats_cache.insert(STATS_KEY, stats.clone());
        Ok(stats)
    }

    /// Force the next [`dashboard_stats`](Self::dashboard_stats) call to refetch
    pub fn invalidate_stats(&self) {
        self.stats_cache.invalidate(STATS_KEY);
    }
}
