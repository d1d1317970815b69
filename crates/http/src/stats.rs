//! Aggregates shown on the dashboard overview

use crate::types::{ProductPage, UserPage};
use serde::{Deserialize, Serialize};

/// Products with fewer units than this count as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many records the overview fetches from each collection
pub const OVERVIEW_SAMPLE_SIZE: u32 = 100;

/// Number of sampled products in one category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

/// Overview statistics
///
/// Totals come from the server; low stock and the category breakdown are
/// computed over the sampled page only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_users: u64,
    pub low_stock: u64,
    /// Categories in the order they first appear in the sample
    pub categories: Vec<CategoryCount>,
}

impl DashboardStats {
    pub fn from_pages(products: &ProductPage, users: &UserPage) -> Self {
        let mut categories: Vec<CategoryCount> = Vec::new();
        for product in &products.products {
            match categories.iter_mut().find(|c| c.name == product.category) {
                Some(entry) => entry.count += 1,
                None => categories.push(CategoryCount {
                    name: product.category.clone(),
                    count: 1,
                }),
            }
        }

        let low_stock = products
            .products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .count() as u64;

        Self {
            total_products: products.total,
            total_users: users.total,
            low_stock,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(id: u64, category: &str, stock: i64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: String::new(),
            category: category.to_string(),
            price: 9.99,
            stock,
            rating: None,
            brand: None,
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_from_pages() {
        let products = ProductPage {
            products: vec![
                product(1, "beauty", 5),
                product(2, "groceries", 50),
                product(3, "beauty", 9),
                product(4, "furniture", 10),
            ],
            total: 194,
            skip: 0,
            limit: 4,
        };
        let users = UserPage {
            users: vec![],
            total: 208,
            skip: 0,
            limit: 0,
        };

        let stats = DashboardStats::from_pages(&products, &users);

        assert_eq!(stats.total_products, 194);
        assert_eq!(stats.total_users, 208);
        assert_eq!(stats.low_stock, 2);
        assert_eq!(
            stats.categories,
            vec![
                CategoryCount { name: "beauty".into(), count: 2 },
                CategoryCount { name: "groceries".into(), count: 1 },
                CategoryCount { name: "furniture".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_pages() {
        let products = ProductPage {
            products: vec![],
            total: 0,
            skip: 0,
            limit: 0,
        };
        let users = UserPage {
            users: vec![],
            total: 0,
            skip: 0,
            limit: 0,
        };

        let stats = DashboardStats::from_pages(&products, &users);
        assert_eq!(stats, DashboardStats::default());
    }
}
