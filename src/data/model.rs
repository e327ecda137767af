use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// ProductRecord – one row of the listing CSV
// ---------------------------------------------------------------------------

/// A single product listing as scraped from one platform at one PIN code.
///
/// Text columns are kept verbatim (`discount_percent` and `rating` included,
/// since the source data mixes numbers with blanks and labels there).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub keyword: String,
    pub location: String,
    pub product_id: f64,
    pub product_name: String,
    pub brand: String,
    pub price: f64,
    pub mrp: f64,
    pub discount_percent: String,
    pub inventory: f64,
    pub quantity: f64,
    pub state: String,
    pub category: String,
    pub position: f64,
    pub rating: String,
    pub pin_code: String,
    pub date: String,
    pub time_of_day: String,
    pub source: String,
    pub locality: String,
    pub city: String,
}

/// Column names coerced to `f64` while parsing.
pub const NUMERIC_FIELDS: [&str; 6] = [
    "product_id",
    "price",
    "mrp",
    "inventory",
    "quantity",
    "position",
];

impl ProductRecord {
    /// Assign a text cell to the field named `column`.
    ///
    /// Returns `false` when `column` is not a known field.
    pub fn set_text(&mut self, column: &str, value: &str) -> bool {
        let slot = match column {
            "keyword" => &mut self.keyword,
            "location" => &mut self.location,
            "product_name" => &mut self.product_name,
            "brand" => &mut self.brand,
            "discount_percent" => &mut self.discount_percent,
            "state" => &mut self.state,
            "category" => &mut self.category,
            "rating" => &mut self.rating,
            "pin_code" => &mut self.pin_code,
            "date" => &mut self.date,
            "time_of_day" => &mut self.time_of_day,
            "source" => &mut self.source,
            "locality" => &mut self.locality,
            "city" => &mut self.city,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Assign a numeric cell to the field named `column`.
    ///
    /// Returns `false` when `column` is not one of [`NUMERIC_FIELDS`].
    pub fn set_number(&mut self, column: &str, value: f64) -> bool {
        let slot = match column {
            "product_id" => &mut self.product_id,
            "price" => &mut self.price,
            "mrp" => &mut self.mrp,
            "inventory" => &mut self.inventory,
            "quantity" => &mut self.quantity,
            "position" => &mut self.position,
            _ => return false,
        };
        *slot = value;
        true
    }
}

// ---------------------------------------------------------------------------
// ProductDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed selector values.
///
/// Immutable once built: filtering produces index views into `records`.
#[derive(Debug, Clone, Default)]
pub struct ProductDataset {
    /// All listings, in file order.
    pub records: Vec<ProductRecord>,
    /// Sorted, distinct, non-empty `brand` values.
    pub unique_brands: Vec<String>,
    /// Sorted, distinct, non-empty `source` values.
    pub unique_platforms: Vec<String>,
}

impl ProductDataset {
    /// Build the selector lists from the loaded records.
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let mut brands: BTreeSet<&str> = BTreeSet::new();
        let mut platforms: BTreeSet<&str> = BTreeSet::new();

        for rec in &records {
            if !rec.brand.is_empty() {
                brands.insert(&rec.brand);
            }
            if !rec.source.is_empty() {
                platforms.insert(&rec.source);
            }
        }

        let unique_brands = brands.into_iter().map(str::to_string).collect();
        let unique_platforms = platforms.into_iter().map(str::to_string).collect();

        ProductDataset {
            records,
            unique_brands,
            unique_platforms,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: &str, source: &str) -> ProductRecord {
        ProductRecord {
            brand: brand.to_string(),
            source: source.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn unique_lists_are_sorted_distinct_and_skip_blanks() {
        let ds = ProductDataset::from_records(vec![
            record("Tata", "zepto"),
            record("Amul", "blinkit"),
            record("", "zepto"),
            record("Amul", ""),
        ]);

        assert_eq!(ds.unique_brands, vec!["Amul", "Tata"]);
        assert_eq!(ds.unique_platforms, vec!["blinkit", "zepto"]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn setters_reject_unknown_columns() {
        let mut rec = ProductRecord::default();
        assert!(rec.set_text("brand", "Amul"));
        assert!(!rec.set_text("price", "10"));
        assert!(rec.set_number("price", 10.0));
        assert!(!rec.set_number("brand", 1.0));
        assert_eq!(rec.brand, "Amul");
        assert_eq!(rec.price, 10.0);
    }
}
