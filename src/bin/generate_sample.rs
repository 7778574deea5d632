use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COUNTRIES: [&str; 10] = [
    "USA", "China", "India", "UK", "Germany", "France", "Japan", "South Korea", "Canada", "Australia",
];
const INDUSTRIES: [&str; 10] = [
    "Media", "Finance", "Healthcare", "Education", "Retail", "Manufacturing", "Legal", "Gaming",
    "Marketing", "Automotive",
];
const TOOLS: [&str; 7] = [
    "ChatGPT", "Claude", "Midjourney", "Stable Diffusion", "DALL-E", "Bard", "Synthesia",
];
const REGULATION: [&str; 3] = ["Strict", "Moderate", "Lenient"];

/// One generated record.
struct Record {
    country: &'static str,
    year: i64,
    industry: &'static str,
    adoption: f64,
    volume: f64,
    job_loss: f64,
    revenue: f64,
    collaboration: f64,
    tool: &'static str,
    regulation: &'static str,
    trust: f64,
    market_share: f64,
}

const HEADERS: [&str; 12] = [
    "Country",
    "Year",
    "Industry",
    "AI Adoption Rate (%)",
    "AI-Generated Content Volume (TBs per year)",
    "Job Loss Due to AI (%)",
    "Revenue Increase Due to AI (%)",
    "Human-AI Collaboration Rate (%)",
    "Top AI Tools Used",
    "Regulation Status",
    "Consumer Trust in AI (%)",
    "Market Share of AI Companies (%)",
];

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Record> {
    (0..n)
        .map(|_| {
            let adoption = rng.uniform(10.0, 99.0);
            let collaboration = rng.uniform(20.0, 90.0);
            // Job loss rises with adoption and falls with collaboration, plus noise.
            let job_loss = (5.0 + 0.3 * adoption - 0.15 * collaboration + rng.uniform(-8.0, 8.0)).clamp(0.0, 60.0);
            Record {
                country: rng.pick(&COUNTRIES),
                year: 2020 + (rng.next_u64() % 6) as i64,
                industry: rng.pick(&INDUSTRIES),
                adoption: round2(adoption),
                volume: round2(rng.uniform(1.0, 100.0)),
                job_loss: round2(job_loss),
                revenue: round2(rng.uniform(1.0, 80.0)),
                collaboration: round2(collaboration),
                tool: rng.pick(&TOOLS),
                regulation: rng.pick(&REGULATION),
                trust: round2(rng.uniform(30.0, 90.0)),
                market_share: round2(rng.uniform(5.0, 90.0)),
            }
        })
        .collect()
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(HEADERS)?;
    for r in records {
        writer.write_record([
            r.country.to_string(),
            r.year.to_string(),
            r.industry.to_string(),
            r.adoption.to_string(),
            r.volume.to_string(),
            r.job_loss.to_string(),
            r.revenue.to_string(),
            r.collaboration.to_string(),
            r.tool.to_string(),
            r.regulation.to_string(),
            r.trust.to_string(),
            r.market_share.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[Record]) -> Result<()> {
    let text = |f: fn(&Record) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let num = |f: fn(&Record) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        text(|r| r.country),
        Arc::new(Int64Array::from(records.iter().map(|r| r.year).collect::<Vec<_>>())),
        text(|r| r.industry),
        num(|r| r.adoption),
        num(|r| r.volume),
        num(|r| r.job_loss),
        num(|r| r.revenue),
        num(|r| r.collaboration),
        text(|r| r.tool),
        text(|r| r.regulation),
        num(|r| r.trust),
        num(|r| r.market_share),
    ];

    let fields: Vec<Field> = HEADERS
        .iter()
        .zip(&columns)
        .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/Global_AI_Content_Impact_Dataset.csv"));
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let records = generate(200, &mut rng);

    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&output_path, &records)?;
    } else {
        write_csv(&output_path, &records)?;
    }

    log::info!("Wrote {} records to {}", records.len(), output_path.display());
    println!("Wrote {} records to {}", records.len(), output_path.display());
    Ok(())
}
