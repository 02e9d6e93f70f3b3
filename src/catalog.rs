//! The fixed product catalog and its category filter.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

/// Reserved selector value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Tag(String),
}

impl CategoryFilter {
    /// `None`, blank and `all` all mean no filtering.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => CategoryFilter::All,
            Some(tag) => CategoryFilter::Tag(tag.to_string()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Tag(tag) => product.category.as_deref() == Some(tag.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    featured: Vec<i32>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>, featured: Vec<i32>) -> Self {
        Self {
            products,
            categories,
            featured,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: i32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Exact tag match, catalog order preserved.
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Landing-page picks, in curated order. Unknown ids are skipped.
    pub fn featured(&self) -> Vec<&Product> {
        self.featured.iter().filter_map(|id| self.find(*id)).collect()
    }

    /// The dairy line-up the shop sells.
    pub fn dairy() -> Self {
        let products = vec![
            product(1, "Fresh Whole Milk", "₹60/L", "whole-milk.jpg", "Pure, farm-fresh whole milk delivered daily", "milk"),
            product(2, "Toned Milk", "₹55/L", "whole-milk.jpg", "Low-fat milk for health-conscious families", "milk"),
            product(3, "Double Toned Milk", "₹50/L", "whole-milk.jpg", "Ultra-low fat milk with essential nutrients", "milk"),
            product(4, "Fresh Curd", "₹40/500g", "yogurt.jpg", "Thick, creamy curd made from fresh milk", "curd"),
            product(5, "Greek Yogurt", "₹80/400g", "yogurt.jpg", "Rich, protein-packed Greek-style yogurt", "curd"),
            product(6, "Flavored Yogurt", "₹60/200g", "yogurt.jpg", "Delicious fruit-flavored yogurt for kids", "curd"),
            product(7, "Fresh Butter", "₹80/100g", "butter.jpg", "Creamy butter made from pure cream", "butter"),
            product(8, "Salted Butter", "₹85/100g", "butter.jpg", "Premium salted butter for cooking", "butter"),
            product(9, "Garlic Butter", "₹120/100g", "butter.jpg", "Herb-infused garlic butter spread", "butter"),
            product(10, "Fresh Paneer", "₹150/250g", "paneer.jpg", "Soft, fresh paneer made daily", "paneer"),
            product(11, "Malai Paneer", "₹180/250g", "paneer.jpg", "Rich, creamy malai paneer for special dishes", "paneer"),
            product(12, "Low-Fat Paneer", "₹160/250g", "paneer.jpg", "Health-conscious low-fat paneer option", "paneer"),
        ];
        let categories = [
            (ALL_CATEGORIES, "All Products"),
            ("milk", "Milk"),
            ("curd", "Curd & Yogurt"),
            ("butter", "Butter"),
            ("paneer", "Paneer"),
        ]
        .into_iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        Self::new(products, categories, vec![1, 4, 5, 7, 10, 11])
    }
}

fn product(
    id: i32,
    name: &str,
    price: &str,
    image: &str,
    description: &str,
    category: &str,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: price.to_string(),
        image: format!("/assets/{image}"),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milk_filter_returns_three_of_twelve() {
        let catalog = Catalog::dairy();
        assert_eq!(catalog.products().len(), 12);
        let milk = catalog.filter(&CategoryFilter::parse(Some("milk")));
        assert_eq!(milk.len(), 3);
        assert!(milk.iter().all(|p| p.category.as_deref() == Some("milk")));
    }

    #[test]
    fn all_disables_filtering() {
        let catalog = Catalog::dairy();
        assert_eq!(catalog.filter(&CategoryFilter::parse(Some("all"))).len(), 12);
        assert_eq!(catalog.filter(&CategoryFilter::parse(None)).len(), 12);
    }

    #[test]
    fn unknown_category_is_empty_not_an_error() {
        let catalog = Catalog::dairy();
        assert!(catalog.filter(&CategoryFilter::parse(Some("cheese"))).is_empty());
    }

    #[test]
    fn tag_match_is_exact() {
        let catalog = Catalog::dairy();
        assert!(catalog.filter(&CategoryFilter::parse(Some("Milk"))).is_empty());
    }

    #[test]
    fn product_ids_are_unique() {
        let catalog = Catalog::dairy();
        let mut ids: Vec<i32> = catalog.products().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.products().len());
    }

    #[test]
    fn featured_products_come_from_the_catalog() {
        let catalog = Catalog::dairy();
        let featured = catalog.featured();
        assert_eq!(featured.len(), 6);
        assert_eq!(featured[0].name, "Fresh Whole Milk");
    }
}
