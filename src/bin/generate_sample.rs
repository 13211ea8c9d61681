use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write a deterministic synthetic movie dataset as CSV and Parquet.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Number of movies to generate
    #[arg(long, default_value_t = 500)]
    rows: usize,

    /// Directory receiving sample_movies.csv and sample_movies.parquet
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

const GENRES: &[&str] = &[
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Drama", "Family", "Fantasy",
    "Horror", "Romance", "Science Fiction", "Thriller",
];
const COMPANIES: &[&str] = &[
    "Paramount", "Universal Pictures", "Warner Bros.", "Columbia Pictures", "Studio Ghibli",
    "Gaumont", "Legendary Pictures", "Working Title Films",
];
const COUNTRIES: &[&str] = &[
    "United States of America", "United Kingdom", "France", "Japan", "Germany", "India",
];
const LANGUAGES: &[&str] = &["en", "en", "en", "fr", "ja", "de", "hi", "es"];
const WORDS: &[&str] = &[
    "Night", "Return", "Shadow", "Last", "City", "Dream", "Storm", "Secret", "River", "Empire",
    "Silent", "Golden",
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Up to `max` distinct items, at least one.
    fn pick_many<'a>(&mut self, items: &[&'a str], max: usize) -> Vec<&'a str> {
        let n = 1 + self.below(max);
        let mut out: Vec<&str> = Vec::with_capacity(n);
        while out.len() < n.min(items.len()) {
            let item = self.pick(items);
            if !out.contains(&item) {
                out.push(item);
            }
        }
        out
    }
}

struct SampleMovie {
    title: String,
    year: i64,
    budget: f64,
    revenue: f64,
    vote_average: f64,
    vote_count: i64,
    popularity: f64,
    language: String,
    genres: Vec<String>,
    companies: Vec<String>,
    countries: Vec<String>,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<SampleMovie> {
    (0..rows)
        .map(|i| {
            let budget = (1.0 + rng.next_f64() * 199.0).round() * 1e6;
            // Some flops report no revenue at all.
            let revenue = if rng.next_f64() < 0.05 {
                0.0
            } else {
                (budget * (0.2 + rng.next_f64() * 4.0)).round()
            };
            SampleMovie {
                title: format!("{} {} {}", rng.pick(WORDS), rng.pick(WORDS), i + 1),
                year: 1980 + rng.below(41) as i64,
                budget,
                revenue,
                vote_average: (rng.next_f64() * 100.0).round() / 10.0,
                vote_count: rng.below(20_000) as i64,
                popularity: (rng.next_f64() * 1500.0).round() / 10.0,
                language: rng.pick(LANGUAGES).to_string(),
                genres: rng.pick_many(GENRES, 3).into_iter().map(str::to_string).collect(),
                companies: rng.pick_many(COMPANIES, 2).into_iter().map(str::to_string).collect(),
                countries: rng.pick_many(COUNTRIES, 3).into_iter().map(str::to_string).collect(),
            }
        })
        .collect()
}

fn profit_margin(m: &SampleMovie) -> String {
    if m.revenue > 0.0 {
        ((m.revenue - m.budget) / m.revenue).to_string()
    } else {
        String::new()
    }
}

/// CSV with the genre column alternating between both accepted encodings.
fn write_csv(movies: &[SampleMovie], path: &std::path::Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "title", "year", "budget", "revenue", "profit_margin", "vote_average", "vote_count",
        "popularity", "original_language", "genres_list", "production_companies",
        "production_countries",
    ])?;

    for (i, m) in movies.iter().enumerate() {
        let genres = if i % 2 == 0 {
            let quoted: Vec<String> = m.genres.iter().map(|g| format!("'{g}'")).collect();
            format!("[{}]", quoted.join(", "))
        } else {
            m.genres.join(", ")
        };
        writer.write_record([
            m.title.clone(),
            m.year.to_string(),
            m.budget.to_string(),
            m.revenue.to_string(),
            profit_margin(m),
            m.vote_average.to_string(),
            m.vote_count.to_string(),
            m.popularity.to_string(),
            m.language.clone(),
            genres,
            m.companies.join(", "),
            m.countries.join(", "),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Parquet with genres stored as a list column.
fn write_parquet(movies: &[SampleMovie], path: &std::path::Path) -> Result<()> {
    let mut genre_builder = ListBuilder::new(StringBuilder::new());
    for m in movies {
        for g in &m.genres {
            genre_builder.values().append_value(g);
        }
        genre_builder.append(true);
    }

    let text = |f: &dyn Fn(&SampleMovie) -> String| -> ArrayRef {
        Arc::new(StringArray::from(movies.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: &dyn Fn(&SampleMovie) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(movies.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: &dyn Fn(&SampleMovie) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(movies.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("year", DataType::Int64, false),
        Field::new("budget", DataType::Float64, false),
        Field::new("revenue", DataType::Float64, false),
        Field::new("vote_average", DataType::Float64, false),
        Field::new("vote_count", DataType::Int64, false),
        Field::new("popularity", DataType::Float64, false),
        Field::new("original_language", DataType::Utf8, false),
        Field::new(
            "genres",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
        Field::new("production_companies", DataType::Utf8, false),
        Field::new("production_countries", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(&|m: &SampleMovie| m.title.clone()),
            int(&|m: &SampleMovie| m.year),
            float(&|m: &SampleMovie| m.budget),
            float(&|m: &SampleMovie| m.revenue),
            float(&|m: &SampleMovie| m.vote_average),
            int(&|m: &SampleMovie| m.vote_count),
            float(&|m: &SampleMovie| m.popularity),
            text(&|m: &SampleMovie| m.language.clone()),
            Arc::new(genre_builder.finish()),
            text(&|m: &SampleMovie| m.companies.join(", ")),
            text(&|m: &SampleMovie| m.countries.join(", ")),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(42);
    let movies = generate(args.rows, &mut rng);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let csv_path = args.out_dir.join("sample_movies.csv");
    let parquet_path = args.out_dir.join("sample_movies.parquet");

    write_csv(&movies, &csv_path)?;
    write_parquet(&movies, &parquet_path)?;

    println!(
        "Wrote {} movies to {} and {}",
        movies.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
