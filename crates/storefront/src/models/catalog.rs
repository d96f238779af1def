//! Store and product catalog.
//!
//! The catalog is loaded once (from JSON or the built-in sample) and is
//! read-only afterwards. Everything downstream borrows from it.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use lastbite_core::{ProductId, StoreId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Catalog loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("duplicate store id: {0}")]
    DuplicateStore(StoreId),
    #[error("duplicate product id {product} in store {store}")]
    DuplicateProduct { store: StoreId, product: ProductId },
    #[error("product {product} in store {store} has a negative price")]
    NegativePrice { store: StoreId, product: ProductId },
}

/// A discounted product close to its expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the owning store only.
    pub id: ProductId,
    pub name: String,
    /// Current (discounted) price.
    pub price: Decimal,
    /// Price before the discount. Expected to be `>= price` but not enforced.
    pub original_price: Decimal,
    pub expiry_date: DateTime<Utc>,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Discount off the original price as a whole percentage.
    ///
    /// Rounds half up, so 33.5% shows as 34%. Returns `None` when the
    /// original price is zero. A product priced above its original price
    /// yields a negative percentage.
    #[must_use]
    pub fn discount_percent(&self) -> Option<i64> {
        if self.original_price.is_zero() {
            return None;
        }
        let ratio = self.price.checked_div(self.original_price)?;
        let percent = (Decimal::ONE - ratio) * Decimal::ONE_HUNDRED;
        (percent + Decimal::new(5, 1)).floor().to_i64()
    }

    /// Amount saved on a single unit.
    #[must_use]
    pub fn unit_savings(&self) -> Decimal {
        self.original_price - self.price
    }
}

/// A store and the products it currently offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Image URL.
    pub image: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Store {
    /// Find a product by ID.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products whose name contains `query`, case-insensitively.
    ///
    /// An empty or all-whitespace query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Product> + 'a {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(move |p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
    }
}

/// The full, validated list of stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    stores: Vec<Store>,
}

impl Catalog {
    /// Build a catalog, checking ID uniqueness and price sign.
    ///
    /// # Errors
    ///
    /// Returns an error if two stores share an ID, two products in one
    /// store share an ID, or a product has a negative price.
    pub fn new(stores: Vec<Store>) -> Result<Self, CatalogError> {
        let mut store_ids = HashSet::new();
        for store in &stores {
            if !store_ids.insert(&store.id) {
                return Err(CatalogError::DuplicateStore(store.id.clone()));
            }

            let mut product_ids = HashSet::new();
            for product in &store.products {
                if !product_ids.insert(&product.id) {
                    return Err(CatalogError::DuplicateProduct {
                        store: store.id.clone(),
                        product: product.id.clone(),
                    });
                }
                if product.price < Decimal::ZERO {
                    return Err(CatalogError::NegativePrice {
                        store: store.id.clone(),
                        product: product.id.clone(),
                    });
                }
                if product.original_price < product.price {
                    tracing::warn!(
                        store_id = %store.id,
                        product_id = %product.id,
                        price = %product.price,
                        original_price = %product.original_price,
                        "Product priced above its original price"
                    );
                }
            }
        }

        Ok(Self { stores })
    }

    /// Parse a catalog from a JSON array of stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let stores: Vec<Store> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(stores)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            stores = catalog.stores.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The built-in demo catalog, with expiry dates relative to `now`.
    #[must_use]
    pub fn sample(now: DateTime<Utc>) -> Self {
        let product = |id: &str, name: &str, price: i64, original: i64, hours: i64, image: &str| {
            Product {
                id: ProductId::new(id),
                name: name.to_string(),
                price: Decimal::from(price),
                original_price: Decimal::from(original),
                expiry_date: now + Duration::hours(hours),
                image: image.to_string(),
            }
        };

        Self {
            stores: vec![
                Store {
                    id: StoreId::new("1"),
                    name: "甜點天堂".to_string(),
                    image: "https://kafkalin.com/wp-content/uploads/20200113084200_55.jpg"
                        .to_string(),
                    products: vec![
                        product(
                            "1",
                            "蘋果派",
                            60,
                            90,
                            24,
                            "https://yukigo.tw/wp-content/uploads/pixnet/1634655719-3413557853-g.jpg",
                        ),
                        product(
                            "2",
                            "藍莓慕斯",
                            80,
                            120,
                            12,
                            "https://i.ytimg.com/vi/sa-upIs_JOg/maxresdefault.jpg",
                        ),
                        product(
                            "3",
                            "巧克力蛋糕",
                            70,
                            100,
                            18,
                            "https://i0.wp.com/aumabakery.com/wp-content/uploads/2023/02/醇黑生巧克力6吋2-scaled-e1690463062652.jpg?fit=1350%2C1350&ssl=1",
                        ),
                    ],
                },
                Store {
                    id: StoreId::new("2"),
                    name: "春水堂".to_string(),
                    image: "https://image-cdn.learnin.tw/bnextmedia/image/album/2016-12/img-1481267885-28163.jpg"
                        .to_string(),
                    products: vec![
                        product(
                            "1",
                            "高麗菜(原材料)",
                            60,
                            90,
                            24,
                            "https://doqvf81n9htmm.cloudfront.net/data/crop_article/89687/cabbage.jpg_1140x855.jpg",
                        ),
                        product(
                            "2",
                            "蘿蔔糕",
                            80,
                            120,
                            12,
                            "https://www.chunshuitang.com.tw/upload/cuisine_list_pic/twL_cuisine_24D01_Rau6TgPXIU.webp",
                        ),
                    ],
                },
            ],
        }
    }

    /// All stores, in catalog order.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Find a store by ID.
    #[must_use]
    pub fn store(&self, id: &StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| &s.id == id)
    }

    /// Whether the catalog has no stores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn product(id: &str, price: Decimal, original_price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            original_price,
            expiry_date: DateTime::<Utc>::UNIX_EPOCH,
            image: String::new(),
        }
    }

    fn store(id: &str, products: Vec<Product>) -> Store {
        Store {
            id: StoreId::new(id),
            name: format!("Store {id}"),
            image: String::new(),
            products,
        }
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        let sample = Catalog::sample(Utc::now());
        let rebuilt = Catalog::new(sample.stores().to_vec()).unwrap();
        assert_eq!(rebuilt.stores().len(), 2);
        assert_eq!(rebuilt.stores()[0].name, "甜點天堂");
        assert_eq!(rebuilt.stores()[1].products.len(), 2);
    }

    #[test]
    fn test_sample_images_are_remote_urls() {
        let sample = Catalog::sample(Utc::now());
        let cake = sample
            .store(&StoreId::new("1"))
            .and_then(|s| s.product(&ProductId::new("3")))
            .unwrap();
        assert_eq!(cake.name, "巧克力蛋糕");
        assert!(cake.image.starts_with("https://i0.wp.com/aumabakery.com/"));
        assert!(cake.image.contains("e1690463062652"));
        for store in sample.stores() {
            assert!(store.image.starts_with("https://"));
            assert!(store.products.iter().all(|p| p.image.starts_with("https://")));
        }
    }

    #[test]
    fn test_product_ids_may_repeat_across_stores() {
        let catalog = Catalog::new(vec![
            store("1", vec![product("1", dec!(10), dec!(20))]),
            store("2", vec![product("1", dec!(10), dec!(20))]),
        ]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_duplicate_product_in_store_rejected() {
        let err = Catalog::new(vec![store(
            "1",
            vec![product("1", dec!(10), dec!(20)), product("1", dec!(5), dec!(8))],
        )])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct { .. }));
    }

    #[test]
    fn test_duplicate_store_rejected() {
        let err = Catalog::new(vec![store("1", vec![]), store("1", vec![])]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateStore(id) if id.as_str() == "1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Catalog::new(vec![store("1", vec![product("1", dec!(-1), dec!(20))])])
            .unwrap_err();
        assert!(matches!(err, CatalogError::NegativePrice { .. }));
    }

    #[test]
    fn test_price_above_original_is_accepted() {
        let catalog = Catalog::new(vec![store("1", vec![product("1", dec!(30), dec!(20))])]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_from_json_str_parses_camel_case_fields() {
        let json = r#"[
            {
                "id": "s1",
                "name": "Corner Bakery",
                "image": "https://example.com/s1.jpg",
                "products": [
                    {
                        "id": "p1",
                        "name": "Sourdough",
                        "price": 45,
                        "originalPrice": "90.50",
                        "expiryDate": "2026-10-20T08:00:00Z",
                        "image": "https://example.com/p1.jpg"
                    }
                ]
            }
        ]"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        let store = catalog.store(&StoreId::new("s1")).unwrap();
        let product = store.product(&ProductId::new("p1")).unwrap();
        assert_eq!(product.price, dec!(45));
        assert_eq!(product.original_price, dec!(90.50));
        assert_eq!(product.expiry_date.to_rfc3339(), "2026-10-20T08:00:00+00:00");
    }

    #[test]
    fn test_from_json_str_rejects_malformed_input() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Catalog::load(Path::new("/nonexistent/lastbite/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_store_lookup_misses_return_none() {
        let catalog = Catalog::sample(Utc::now());
        assert!(catalog.store(&StoreId::new("99")).is_none());
        let store = catalog.store(&StoreId::new("1")).unwrap();
        assert!(store.product(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut apple = product("1", dec!(60), dec!(90));
        apple.name = "Apple Pie".to_string();
        let mut mousse = product("2", dec!(80), dec!(120));
        mousse.name = "Blueberry Mousse".to_string();
        let store = store("1", vec![apple, mousse]);

        let hits: Vec<_> = store.search("apple").map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["1"]);
        assert_eq!(store.search("  ").count(), 2);
        assert_eq!(store.search("tart").count(), 0);
    }

    #[test]
    fn test_discount_percent_rounds_half_up() {
        // 1 - 60/90 = 33.33..%
        assert_eq!(product("1", dec!(60), dec!(90)).discount_percent(), Some(33));
        // 1 - 70/100 = 30%
        assert_eq!(product("1", dec!(70), dec!(100)).discount_percent(), Some(30));
        // 1 - 1/8 = 87.5% rounds up
        assert_eq!(product("1", dec!(1), dec!(8)).discount_percent(), Some(88));
        assert_eq!(product("1", dec!(50), dec!(50)).discount_percent(), Some(0));
    }

    #[test]
    fn test_discount_percent_edge_cases() {
        assert_eq!(product("1", dec!(0), dec!(0)).discount_percent(), None);
        assert_eq!(product("1", dec!(0), dec!(10)).discount_percent(), Some(100));
        assert_eq!(product("1", dec!(12), dec!(10)).discount_percent(), Some(-20));
    }
}
