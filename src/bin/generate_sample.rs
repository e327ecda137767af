use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One synthetic listing, in the column order of the scraped dataset.
#[derive(Serialize)]
struct ListingRow<'a> {
    keyword: &'a str,
    location: &'a str,
    product_id: u64,
    product_name: String,
    brand: &'a str,
    price: f64,
    mrp: f64,
    discount_percent: String,
    inventory: u32,
    quantity: u32,
    state: &'a str,
    category: &'a str,
    position: u32,
    rating: String,
    pin_code: &'a str,
    date: String,
    time_of_day: &'a str,
    source: &'a str,
    locality: &'a str,
    city: &'a str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u32) -> u32 {
        (self.next_f64() * n as f64) as u32
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u32) as usize]
    }
}

// (keyword, category, [(brand, product, base mrp)])
const CATALOGUE: [(&str, &str, [(&str, &str, f64); 3]); 3] = [
    (
        "milk",
        "Dairy",
        [
            ("Amul", "Amul Taaza Toned Milk 500 ml", 28.0),
            ("Mother Dairy", "Mother Dairy Full Cream Milk 1 L", 68.0),
            ("Nandini", "Nandini Shubham Milk, 500 ml", 26.0),
        ],
    ),
    (
        "atta",
        "Staples",
        [
            ("Aashirvaad", "Aashirvaad Whole Wheat Atta 5 kg", 295.0),
            ("Pillsbury", "Pillsbury Chakki Fresh Atta 5 kg", 280.0),
            ("Fortune", "Fortune Chakki Fresh Atta 10 kg", 520.0),
        ],
    ),
    (
        "chips",
        "Snacks",
        [
            ("Lay's", "Lay's India's Magic Masala 52 g", 20.0),
            ("Bingo", "Bingo Mad Angles Achaari Masti 66 g", 20.0),
            ("Haldiram's", "Haldiram's Aloo Bhujia 200 g", 55.0),
        ],
    ),
];

// (pin_code, locality, city, state)
const LOCATIONS: [(&str, &str, &str, &str); 4] = [
    ("560001", "MG Road", "Bengaluru", "Karnataka"),
    ("560034", "Koramangala", "Bengaluru", "Karnataka"),
    ("400050", "Bandra West", "Mumbai", "Maharashtra"),
    ("110017", "Saket", "New Delhi", "Delhi"),
];

const PLATFORMS: [&str; 4] = ["blinkit", "zepto", "instamart", "bigbasket"];
const TIMES: [&str; 3] = ["morning", "afternoon", "evening"];
const DAYS: u32 = 5;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_listings.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut rows = 0u64;
    for day in 1..=DAYS {
        let date = format!("2024-06-{day:02}");
        for &(pin_code, locality, city, state) in &LOCATIONS {
            for &source in &PLATFORMS {
                let time_of_day = *rng.pick(&TIMES);
                for &(keyword, category, products) in &CATALOGUE {
                    for (rank, &(brand, name, mrp)) in products.iter().enumerate() {
                        let discount = rng.below(25);
                        let price = (mrp * (100 - discount) as f64 / 100.0).round();
                        let rating = 3.5 + rng.below(15) as f64 / 10.0;

                        writer
                            .serialize(ListingRow {
                                keyword,
                                location: city,
                                product_id: 1000 + rows,
                                product_name: name.to_string(),
                                brand,
                                price,
                                mrp,
                                discount_percent: discount.to_string(),
                                inventory: rng.below(200),
                                quantity: 1,
                                state,
                                category,
                                position: rank as u32 + 1 + rng.below(20),
                                rating: format!("{rating:.1}"),
                                pin_code,
                                date: date.clone(),
                                time_of_day,
                                source,
                                locality,
                                city,
                            })
                            .context("writing listing row")?;
                        rows += 1;
                    }
                }
            }
        }
    }

    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} listings to {}", output_path.display());
    Ok(())
}
