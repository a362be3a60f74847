use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const CUSTOMERS: usize = 3900;

const GENDERS: [&str; 2] = ["Male", "Female"];

/// (item, category)
const ITEMS: [(&str, &str); 25] = [
    ("Blouse", "Clothing"),
    ("Sweater", "Clothing"),
    ("Jeans", "Clothing"),
    ("Sandals", "Footwear"),
    ("Sneakers", "Footwear"),
    ("Shirt", "Clothing"),
    ("Shorts", "Clothing"),
    ("Coat", "Outerwear"),
    ("Handbag", "Accessories"),
    ("Shoes", "Footwear"),
    ("Dress", "Clothing"),
    ("Skirt", "Clothing"),
    ("Sunglasses", "Accessories"),
    ("Pants", "Clothing"),
    ("Jacket", "Outerwear"),
    ("Hoodie", "Clothing"),
    ("Jewelry", "Accessories"),
    ("T-shirt", "Clothing"),
    ("Scarf", "Accessories"),
    ("Hat", "Accessories"),
    ("Socks", "Clothing"),
    ("Backpack", "Accessories"),
    ("Belt", "Accessories"),
    ("Boots", "Footwear"),
    ("Gloves", "Accessories"),
];

const FREQUENCIES: [&str; 7] = [
    "Fortnightly",
    "Weekly",
    "Annually",
    "Quarterly",
    "Bi-Weekly",
    "Monthly",
    "Every 3 Months",
];

const SEASONS: [&str; 4] = ["Winter", "Spring", "Summer", "Fall"];

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut ids = Vec::with_capacity(CUSTOMERS);
    let mut ages = Vec::with_capacity(CUSTOMERS);
    let mut genders = Vec::with_capacity(CUSTOMERS);
    let mut items = Vec::with_capacity(CUSTOMERS);
    let mut categories = Vec::with_capacity(CUSTOMERS);
    let mut amounts = Vec::with_capacity(CUSTOMERS);
    let mut seasons = Vec::with_capacity(CUSTOMERS);
    let mut previous = Vec::with_capacity(CUSTOMERS);
    let mut frequencies = Vec::with_capacity(CUSTOMERS);

    for id in 1..=CUSTOMERS as i64 {
        let (item, category) = *rng.pick(&ITEMS);
        ids.push(id);
        ages.push(rng.range(18, 70));
        genders.push(*rng.pick(&GENDERS));
        items.push(item);
        categories.push(category);
        amounts.push(rng.range(20, 100));
        seasons.push(*rng.pick(&SEASONS));
        previous.push(rng.range(1, 50));
        frequencies.push(*rng.pick(&FREQUENCIES));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Customer ID", DataType::Int64, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Item Purchased", DataType::Utf8, false),
        Field::new("Category", DataType::Utf8, false),
        Field::new("Purchase Amount (USD)", DataType::Int64, false),
        Field::new("Season", DataType::Utf8, false),
        Field::new("Previous Purchases", DataType::Int64, false),
        Field::new("Frequency of Purchases", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(Int64Array::from(ages)),
            Arc::new(StringArray::from(genders)),
            Arc::new(StringArray::from(items)),
            Arc::new(StringArray::from(categories)),
            Arc::new(Int64Array::from(amounts)),
            Arc::new(StringArray::from(seasons)),
            Arc::new(Int64Array::from(previous)),
            Arc::new(StringArray::from(frequencies)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "shopping_trends.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let preview = pretty_format_batches(&[batch.slice(0, 5)]).expect("Failed to format preview");
    println!("{preview}");
    println!("Wrote {CUSTOMERS} customers to {output_path}");
    println!("Set \"dataset_path\": \"{output_path}\" in dashboard.json to use it.");
}
