//! # Catalog Projection
//!
//! Groups the fetched product list under the menu categories.
//!
//! Grouping is recomputed on every render and never stored. Matching is an
//! exact, case-sensitive comparison of `product.category` with
//! `category.name`; a product whose category matches nothing is not shown.
//!
//! ```text
//!  categories: [Burgers, Pizzas]
//!  products:   [X/Burgers/5€, Y/burgers/4€, Z/Pizzas/9€]
//!
//!  Burgers ── X - 5€
//!  Pizzas  ── Z - 9€
//!             (Y dropped: "burgers" != "Burgers")
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, Product};

/// One category heading and the products listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductGroup {
    pub category: Category,
    pub products: Vec<Product>,
}

impl ProductGroup {
    /// Rendered lines for this group, in catalog order.
    pub fn lines(&self, currency_symbol: &str) -> Vec<String> {
        self.products
            .iter()
            .map(|p| product_line(p, currency_symbol))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// The menu shown when nothing else is configured.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Burgers", Some("burger.jpg")),
        Category::new(2, "Pizzas", Some("pizza.jpg")),
    ]
}

/// Groups `products` under `categories`, keeping both orders.
pub fn group_by_category(categories: &[Category], products: &[Product]) -> Vec<ProductGroup> {
    categories
        .iter()
        .map(|category| ProductGroup {
            category: category.clone(),
            products: products
                .iter()
                .filter(|p| p.category == category.name)
                .cloned()
                .collect(),
        })
        .collect()
}

/// `"<name> - <price>"`, e.g. `"X - 5€"`.
pub fn product_line(product: &Product, currency_symbol: &str) -> String {
    format!("{} - {}", product.name, product.price.display_with(currency_symbol))
}

/// Looks a product up by the textual form of its id.
pub fn find_product<'a>(products: &'a [Product], id: &str) -> CoreResult<&'a Product> {
    products
        .iter()
        .find(|p| p.id.to_string() == id)
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::CURRENCY_SYMBOL;

    fn product(id: i64, name: &str, category: &str, euros: i64) -> Product {
        Product::new(id, name, category, Money::from_cents(euros * 100))
    }

    #[test]
    fn test_groups_exact_match() {
        let groups = group_by_category(&default_categories(), &[product(1, "X", "Burgers", 5)]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category.name, "Burgers");
        assert_eq!(groups[0].lines(CURRENCY_SYMBOL), vec!["X - 5€".to_string()]);
        assert_eq!(groups[1].category.name, "Pizzas");
        assert!(groups[1].is_empty());
    }

    #[test]
    fn test_unmatched_categories_are_dropped() {
        let products = vec![
            product(1, "X", "burgers", 5),
            product(2, "Y", "Burgers ", 5),
            product(3, "Z", "Salads", 7),
        ];
        let groups = group_by_category(&default_categories(), &products);
        assert!(groups.iter().all(ProductGroup::is_empty));
    }

    #[test]
    fn test_keeps_product_order() {
        let products = vec![
            product(1, "Double", "Burgers", 7),
            product(2, "Reine", "Pizzas", 9),
            product(3, "Simple", "Burgers", 4),
        ];
        let groups = group_by_category(&default_categories(), &products);
        assert_eq!(
            groups[0].lines("€"),
            vec!["Double - 7€".to_string(), "Simple - 4€".to_string()]
        );
        assert_eq!(groups[1].lines("€"), vec!["Reine - 9€".to_string()]);
    }

    #[test]
    fn test_empty_catalog_renders_empty_groups() {
        let groups = group_by_category(&default_categories(), &[]);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(ProductGroup::is_empty));
    }

    #[test]
    fn test_product_line_with_cents() {
        let p = Product::new(1, "Menu Maxi", "Burgers", Money::from_cents(890));
        assert_eq!(product_line(&p, "€"), "Menu Maxi - 8.90€");
    }

    #[test]
    fn test_find_product() {
        let products = vec![product(1, "X", "Burgers", 5), Product::new("b2", "Y", "Pizzas", Money::zero())];
        assert_eq!(find_product(&products, "1").unwrap().name, "X");
        assert_eq!(find_product(&products, "b2").unwrap().name, "Y");
        assert_eq!(
            find_product(&products, "9"),
            Err(CoreError::ProductNotFound("9".to_string()))
        );
    }
}
