use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_catalog::{CategoryId, TagId};
use stockroom_core::{DomainError, DomainResult, Entity, Sku, ValueObject};

use crate::amount::line_amount;

/// Reason recorded for the price a product was created with.
pub const INITIAL_PRICE_REASON: &str = "Initial Price";

/// One entry of a product's price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub price: Decimal,
    pub reason: String,
}

impl ValueObject for PriceChange {}

/// Catalog item with price, stock, labels and price history.
///
/// Invariant: the last `price_history` entry always carries the current price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    sku: Sku,
    price: Decimal,
    current_stock: i64,
    categories: Vec<CategoryId>,
    tags: Vec<TagId>,
    price_history: Vec<PriceChange>,
}

impl Product {
    /// Create a fresh product. Initial stock must not be negative.
    pub fn new(
        name: impl Into<String>,
        sku: Sku,
        price: Decimal,
        current_stock: i64,
    ) -> DomainResult<Self> {
        if current_stock < 0 {
            return Err(DomainError::validation("initial stock cannot be negative"));
        }
        Self::restore(name, sku, price, current_stock)
    }

    /// Rebuild a product from recorded state.
    ///
    /// Unlike [`Product::new`] any stock level is accepted, since
    /// [`Product::update_stock`] can take stock below zero.
    pub fn restore(
        name: impl Into<String>,
        sku: Sku,
        price: Decimal,
        current_stock: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price.is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(Self {
            name,
            sku,
            price,
            current_stock,
            categories: Vec::new(),
            tags: Vec::new(),
            price_history: vec![PriceChange {
                price,
                reason: INITIAL_PRICE_REASON.to_string(),
            }],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn current_stock(&self) -> i64 {
        self.current_stock
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn price_history(&self) -> &[PriceChange] {
        &self.price_history
    }

    /// Attach a category. Returns `false` if it was already attached.
    pub fn add_category(&mut self, category: CategoryId) -> bool {
        if self.categories.contains(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// Detach a category. Returns `false` if it was not attached.
    pub fn remove_category(&mut self, category: &CategoryId) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c != category);
        self.categories.len() != before
    }

    /// Attach a tag. Returns `false` if it was already attached.
    pub fn add_tag(&mut self, tag: TagId) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Detach a tag. Returns `false` if it was not attached.
    pub fn remove_tag(&mut self, tag: &TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Add a signed delta to the stock.
    ///
    /// No floor is enforced here: selling rules live in the order layer. A
    /// delta that would overflow the stock counter is rejected and leaves the
    /// stock unchanged. Returns the new stock.
    pub fn update_stock(&mut self, delta: i64) -> DomainResult<i64> {
        self.current_stock = self
            .current_stock
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("stock overflow"))?;
        Ok(self.current_stock)
    }

    pub fn is_in_stock(&self) -> bool {
        self.current_stock > 0
    }

    /// Reduce the price by `percent` and record the change.
    ///
    /// `percent` must be within `0..=100`; zero still records a history entry.
    pub fn apply_discount(&mut self, percent: Decimal) -> DomainResult<Decimal> {
        if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(format!(
                "discount must be between 0 and 100 percent (got {percent})"
            )));
        }

        let new_price = self.price * (Decimal::ONE - percent / Decimal::ONE_HUNDRED);
        tracing::debug!(sku = %self.sku, old = %self.price, new = %new_price, "discount applied");

        self.price = new_price;
        self.price_history.push(PriceChange {
            price: new_price,
            reason: format!("Discount applied: {percent}%"),
        });
        Ok(new_price)
    }

    pub fn calculate_total_value_in_stock(&self) -> DomainResult<Decimal> {
        line_amount(self.price, self.current_stock)
    }

    /// One-line human readable summary.
    pub fn get_info(&self) -> String {
        format!(
            "Product: {} (SKU: {}) - Price: ${:.2}, Stock: {}, Categories: [{}], Tags: [{}]",
            self.name,
            self.sku,
            self.price,
            self.current_stock,
            join_or_none(self.categories.iter().map(CategoryId::as_str)),
            join_or_none(self.tags.iter().map(TagId::as_str)),
        )
    }
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

impl Entity for Product {
    type Id = Sku;

    fn id(&self) -> &Self::Id {
        &self.sku
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Product(name='{}', sku='{}', price={}, current_stock={})",
            self.name, self.sku, self.price, self.current_stock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockroom_catalog::{Category, Tag};

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    fn laptop() -> Product {
        Product::new("Laptop", sku("SKU123"), dec!(1200), 10).unwrap()
    }

    #[test]
    fn new_product_records_initial_price() {
        let product = laptop();
        assert_eq!(
            product.price_history(),
            &[PriceChange {
                price: dec!(1200),
                reason: "Initial Price".to_string(),
            }]
        );
        assert_eq!(product.id(), &sku("SKU123"));
    }

    #[test]
    fn new_product_rejects_invalid_input() {
        assert!(matches!(
            Product::new("  ", sku("SKU1"), dec!(1), 0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Product::new("Mouse", sku("SKU1"), dec!(-0.01), 0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Product::new("Mouse", sku("SKU1"), dec!(25), -1),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn labels_have_set_semantics() {
        let mut product = laptop();
        let electronics = Category::new("Electronics", "Devices and gadgets").unwrap().id();
        let office = Category::new("Office", "").unwrap().id();

        assert!(product.add_category(electronics.clone()));
        assert!(!product.add_category(electronics.clone()));
        assert!(product.add_category(office.clone()));
        assert_eq!(product.categories(), &[electronics.clone(), office.clone()]);

        assert!(product.remove_category(&electronics));
        assert!(!product.remove_category(&electronics));
        assert_eq!(product.categories(), &[office]);

        let on_sale = Tag::new("On Sale").unwrap().id();
        assert!(product.add_tag(on_sale.clone()));
        assert!(!product.add_tag(on_sale.clone()));
        assert!(product.remove_tag(&on_sale));
        assert!(!product.remove_tag(&on_sale));
        assert!(product.tags().is_empty());
    }

    #[test]
    fn update_stock_is_not_clamped() {
        let mut product = laptop();
        assert_eq!(product.update_stock(-15).unwrap(), -5);
        assert_eq!(product.current_stock(), -5);
        assert!(!product.is_in_stock());
        product.update_stock(6).unwrap();
        assert_eq!(product.current_stock(), 1);
        assert!(product.is_in_stock());
    }

    #[test]
    fn update_stock_rejects_overflow() {
        let mut product = laptop();
        assert_eq!(
            product.update_stock(i64::MAX).unwrap_err(),
            DomainError::validation("stock overflow")
        );
        assert_eq!(product.current_stock(), 10);

        product.update_stock(-20).unwrap();
        assert!(product.update_stock(i64::MIN).is_err());
        assert_eq!(product.current_stock(), -10);
    }

    #[test]
    fn restore_accepts_negative_stock() {
        let product = Product::restore("Laptop", sku("SKU123"), dec!(1080), -3).unwrap();
        assert_eq!(product.current_stock(), -3);
        assert_eq!(product.price_history().len(), 1);
        assert!(matches!(
            Product::restore("Laptop", sku("SKU123"), dec!(-1), 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn apply_discount_updates_price_and_history() {
        let mut product = laptop();
        let new_price = product.apply_discount(dec!(10)).unwrap();
        assert_eq!(new_price, dec!(1080));
        assert_eq!(product.price(), dec!(1080));

        let last = product.price_history().last().unwrap();
        assert_eq!(last.price, dec!(1080));
        assert_eq!(last.reason, "Discount applied: 10%");
    }

    #[test]
    fn zero_discount_still_records_history() {
        let mut product = laptop();
        product.apply_discount(dec!(0)).unwrap();
        assert_eq!(product.price(), dec!(1200));
        assert_eq!(product.price_history().len(), 2);
        assert_eq!(product.price_history()[1].reason, "Discount applied: 0%");
    }

    #[test]
    fn apply_discount_rejects_out_of_range_percent() {
        let mut product = laptop();
        assert!(matches!(
            product.apply_discount(dec!(100.5)),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            product.apply_discount(dec!(-1)),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(product.price(), dec!(1200));
        assert_eq!(product.price_history().len(), 1);
    }

    #[test]
    fn total_value_in_stock_multiplies_price_and_stock() {
        let product = Product::new("Mouse", sku("SKU456"), dec!(25.50), 4).unwrap();
        assert_eq!(product.calculate_total_value_in_stock().unwrap(), dec!(102.00));
    }

    #[test]
    fn total_value_in_stock_reports_overflow() {
        let gold = Product::new("Gold", sku("SKU999"), Decimal::MAX, 2).unwrap();
        assert_eq!(
            gold.calculate_total_value_in_stock().unwrap_err(),
            DomainError::validation("amount overflow")
        );
    }

    #[test]
    fn get_info_lists_labels_or_none() {
        let mut product = laptop();
        assert_eq!(
            product.get_info(),
            "Product: Laptop (SKU: SKU123) - Price: $1200.00, Stock: 10, Categories: [None], Tags: [None]"
        );

        product.add_category(Category::new("Electronics", "").unwrap().id());
        product.add_category(Category::new("Office", "").unwrap().id());
        product.add_tag(Tag::new("New Arrival").unwrap().id());
        assert_eq!(
            product.get_info(),
            "Product: Laptop (SKU: SKU123) - Price: $1200.00, Stock: 10, Categories: [Electronics, Office], Tags: [New Arrival]"
        );
    }

    #[test]
    fn get_info_rounds_price_to_two_decimals() {
        let mut product = Product::new("Cable", sku("SKU9"), dec!(9.99), 1).unwrap();
        product.apply_discount(dec!(15)).unwrap();
        assert_eq!(product.price(), dec!(8.4915));
        assert!(product.get_info().contains("Price: $8.49,"));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: update_stock adds the delta exactly, with no clamping.
            #[test]
            fn update_stock_adds_delta(
                initial in 0i64..10_000,
                deltas in proptest::collection::vec(-5_000i64..5_000, 0..20)
            ) {
                let mut product = Product::new("Widget", sku("SKU1"), dec!(1), initial).unwrap();
                let mut expected = initial;
                for delta in deltas {
                    product.update_stock(delta).unwrap();
                    expected += delta;
                    prop_assert_eq!(product.current_stock(), expected);
                }
            }

            /// Property: the last history entry always carries the current price.
            #[test]
            fn history_tracks_current_price(
                price_cents in 0i64..1_000_000,
                discounts in proptest::collection::vec(0u32..=100, 0..10)
            ) {
                let mut product =
                    Product::new("Widget", sku("SKU1"), Decimal::new(price_cents, 2), 1).unwrap();
                for percent in &discounts {
                    product.apply_discount(Decimal::from(*percent)).unwrap();
                    prop_assert!(!product.price().is_sign_negative());
                }
                prop_assert_eq!(product.price_history().len(), discounts.len() + 1);
                prop_assert_eq!(
                    product.price_history().last().map(|c| c.price),
                    Some(product.price())
                );
            }
        }
    }
}
