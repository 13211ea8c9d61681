use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{columns, derive_profit_margin, MovieRecord, MovieTable};
use super::parse::{parse_genres, MultiValued};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Load results
// ---------------------------------------------------------------------------

/// A row that was dropped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    /// 1-based data row (header excluded).
    pub row: usize,
    pub reason: String,
}

/// Outcome of a load: the table plus every row that was skipped.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: MovieTable,
    pub skipped: Vec<RowIssue>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a movie dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one movie per line (recommended)
/// * `.json`    – `[{ "title": ..., "genres": [...] | "...", ... }, ...]`
/// * `.parquet` – flat columns; `genres` may be a string or a list column
///
/// Rows that fail numeric coercion are skipped and reported, never patched.
pub fn load_file(path: &Path) -> Result<LoadedDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw_rows = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    let loaded = normalize_rows(raw_rows);
    log::info!(
        "Loaded {} movies from {} ({} rows skipped, {} genres)",
        loaded.table.len(),
        path.display(),
        loaded.skipped.len(),
        loaded.table.genre_catalog().len()
    );
    Ok(loaded)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DatasetError::FileNotFound(path.to_path_buf()),
        _ => DatasetError::Io(e),
    })
}

// ---------------------------------------------------------------------------
// Raw rows (format independent)
// ---------------------------------------------------------------------------

/// A single cell as read from the source file, before coercion.
#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Null,
    Text(String),
    Number(f64),
    List(Vec<String>),
}

type RawRow = BTreeMap<String, RawCell>;

/// Per-row read result; `Err` carries the reason a row could not be read at all.
type RawRows = Vec<std::result::Result<RawRow, String>>;

fn check_required_columns<'a, I>(present: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: BTreeSet<&str> = present.into_iter().collect();
    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|col| {
            !present.contains(col)
                && !(*col == columns::GENRES && present.contains(columns::GENRES_ALIAS))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::DataFormat(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one movie per record.
/// A UTF-8 BOM in front of the header (as written by the exporter) is ignored.
fn read_csv(path: &Path) -> Result<RawRows> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    check_required_columns(headers.iter().map(String::as_str))?;

    let rows = reader
        .records()
        .map(|result| -> std::result::Result<RawRow, String> {
            let record = result.map_err(|e| format!("unreadable CSV record: {e}"))?;
            let row: RawRow = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let cell = match record.get(i) {
                        Some(v) if !v.trim().is_empty() => RawCell::Text(v.to_string()),
                        _ => RawCell::Null,
                    };
                    (name.clone(), cell)
                })
                .collect();
            Ok(row)
        })
        .collect();

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "title": "Heat",
///     "year": 1995,
///     "genres": ["Action", "Crime"],
///     "production_companies": "Regency Enterprises, Forward Pass",
///     ...
///   }
/// ]
/// ```
fn read_json(path: &Path) -> Result<RawRows> {
    let file = open(path)?;
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))?;

    let records = root
        .as_array()
        .ok_or_else(|| DatasetError::DataFormat("expected top-level JSON array".into()))?;

    // An empty array loads as an empty table, like a header-only CSV.
    if !records.is_empty() {
        let keys: BTreeSet<&str> = records
            .iter()
            .filter_map(JsonValue::as_object)
            .flat_map(|obj| obj.keys().map(String::as_str))
            .collect();
        check_required_columns(keys)?;
    }

    let rows = records
        .iter()
        .map(|rec| -> std::result::Result<RawRow, String> {
            let obj = rec
                .as_object()
                .ok_or_else(|| "record is not a JSON object".to_string())?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_cell(val)))
                .collect())
        })
        .collect();

    Ok(rows)
}

fn json_to_cell(val: &JsonValue) -> RawCell {
    match val {
        JsonValue::Null => RawCell::Null,
        JsonValue::String(s) if s.trim().is_empty() => RawCell::Null,
        JsonValue::String(s) => RawCell::Text(s.clone()),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => RawCell::Number(f),
            None => RawCell::Text(n.to_string()),
        },
        JsonValue::Bool(b) => RawCell::Text(b.to_string()),
        JsonValue::Array(items) => RawCell::List(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| match v {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        other => RawCell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one movie per row.
///
/// Numeric columns may be (U)Int32/(U)Int64/Float32/Float64; text columns Utf8
/// or LargeUtf8; multi-valued columns either text or List<Utf8>. Columns the
/// movie model does not use are never converted, whatever their type.
fn read_parquet(path: &Path) -> Result<RawRows> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    check_required_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let used: Vec<(&String, &ArrayRef)> = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, col)| (field.name(), col))
            .filter(|(name, _)| is_model_column(name))
            .collect();

        for row in 0..batch.num_rows() {
            let cells: std::result::Result<RawRow, String> = used
                .iter()
                .map(|(name, col)| arrow_cell(col, row).map(|c| ((*name).clone(), c)))
                .collect();
            rows.push(cells);
        }
    }

    Ok(rows)
}

fn is_model_column(name: &str) -> bool {
    columns::REQUIRED.contains(&name)
        || name == columns::PROFIT_MARGIN
        || name == columns::GENRES_ALIAS
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> std::result::Result<RawCell, String> {
    if col.is_null(row) {
        return Ok(RawCell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => RawCell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => RawCell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => RawCell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => RawCell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::UInt32 => RawCell::Number(col.as_primitive::<UInt32Type>().value(row) as f64),
        DataType::UInt64 => RawCell::Number(col.as_primitive::<UInt64Type>().value(row) as f64),
        DataType::Float32 => RawCell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => RawCell::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::List(_) => RawCell::List(string_items(&col.as_list::<i32>().value(row))?),
        DataType::LargeList(_) => RawCell::List(string_items(&col.as_list::<i64>().value(row))?),
        other => return Err(format!("unsupported column type {other:?}")),
    };
    Ok(cell)
}

fn string_items(values: &ArrayRef) -> std::result::Result<Vec<String>, String> {
    match values.data_type() {
        DataType::Utf8 => Ok(values
            .as_string::<i32>()
            .iter()
            .flatten()
            .map(str::to_string)
            .collect()),
        DataType::LargeUtf8 => Ok(values
            .as_string::<i64>()
            .iter()
            .flatten()
            .map(str::to_string)
            .collect()),
        other => Err(format!("list items are {other:?}, expected strings")),
    }
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

fn normalize_rows(raw_rows: RawRows) -> LoadedDataset {
    let mut movies = Vec::with_capacity(raw_rows.len());
    let mut skipped = Vec::new();

    for (i, raw) in raw_rows.into_iter().enumerate() {
        let row = i + 1;
        match raw.and_then(|cells| normalize_row(&cells)) {
            Ok(movie) => movies.push(movie),
            Err(reason) => {
                log::warn!("Skipping row {row}: {reason}");
                skipped.push(RowIssue { row, reason });
            }
        }
    }

    LoadedDataset {
        table: MovieTable::from_movies(movies),
        skipped,
    }
}

fn normalize_row(cells: &RawRow) -> std::result::Result<MovieRecord, String> {
    let year = coerce_year(cell(cells, columns::YEAR))?;
    let budget = require_amount(cells, columns::BUDGET)?;
    let revenue = require_amount(cells, columns::REVENUE)?;

    let profit_margin = if cells.contains_key(columns::PROFIT_MARGIN) {
        optional_number(cells, columns::PROFIT_MARGIN)?
    } else {
        derive_profit_margin(budget, revenue)
    };

    let vote_count = match optional_number(cells, columns::VOTE_COUNT)? {
        Some(v) if v >= 0.0 && v.fract() == 0.0 => Some(v as u64),
        Some(v) => {
            return Err(format!("{}: {v} is not a non-negative integer", columns::VOTE_COUNT))
        }
        None => None,
    };

    let genre_cell = match cell(cells, columns::GENRES) {
        RawCell::Null => cell(cells, columns::GENRES_ALIAS),
        other => other,
    };

    Ok(MovieRecord {
        title: optional_text(cells, columns::TITLE),
        year,
        budget,
        revenue,
        profit_margin,
        vote_average: optional_number(cells, columns::VOTE_AVERAGE)?,
        vote_count,
        popularity: optional_number(cells, columns::POPULARITY)?,
        original_language: optional_text(cells, columns::ORIGINAL_LANGUAGE),
        genres: parse_genres(&multi_values(genre_cell)),
        production_companies: multi_values(cell(cells, columns::PRODUCTION_COMPANIES)),
        production_countries: multi_values(cell(cells, columns::PRODUCTION_COUNTRIES)),
    })
}

static NULL_CELL: RawCell = RawCell::Null;

fn cell<'a>(cells: &'a RawRow, name: &str) -> &'a RawCell {
    cells.get(name).unwrap_or(&NULL_CELL)
}

fn number(cell: &RawCell, name: &str) -> std::result::Result<Option<f64>, String> {
    let value = match cell {
        RawCell::Null => return Ok(None),
        RawCell::Number(f) => *f,
        RawCell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{name}: '{s}' is not a number"))?,
        RawCell::List(_) => return Err(format!("{name}: expected a number, got a list")),
    };
    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(format!("{name}: {value} is not a finite number"))
    }
}

fn optional_number(cells: &RawRow, name: &str) -> std::result::Result<Option<f64>, String> {
    number(cell(cells, name), name)
}

fn require_amount(cells: &RawRow, name: &str) -> std::result::Result<f64, String> {
    match optional_number(cells, name)? {
        Some(v) if v >= 0.0 => Ok(v),
        Some(v) => Err(format!("{name}: {v} is negative")),
        None => Err(format!("{name}: missing value")),
    }
}

/// Accepts `2005` as well as the float form `2005.0` written by dataframe tools.
fn coerce_year(cell: &RawCell) -> std::result::Result<i32, String> {
    let value = number(cell, columns::YEAR)?
        .ok_or_else(|| format!("{}: missing value", columns::YEAR))?;
    if value.fract() != 0.0 || !(1.0..=9999.0).contains(&value) {
        return Err(format!("{}: {value} is not a calendar year", columns::YEAR));
    }
    Ok(value as i32)
}

fn optional_text(cells: &RawRow, name: &str) -> Option<String> {
    match cell(cells, name) {
        RawCell::Text(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        RawCell::Number(f) => Some(f.to_string()),
        RawCell::Null | RawCell::List(_) => None,
    }
}

fn multi_values(cell: &RawCell) -> Vec<String> {
    match cell {
        RawCell::Null => Vec::new(),
        RawCell::Text(s) => s.values(),
        RawCell::List(items) => items.values(),
        RawCell::Number(f) => vec![f.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "title,year,budget,revenue,profit_margin,vote_average,vote_count,popularity,original_language,genres_list,production_companies,production_countries";

    fn write_temp(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(ext)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_both_genre_encodings_from_csv() {
        let csv = format!(
            "{HEADER}\n\
             Heat,1995,60000000,187436818,0.68,7.7,3000,17.9,en,\"['Action', 'Crime']\",\"Regency Enterprises, Forward Pass\",United States of America\n\
             Amelie,2001.0,10000000,173921954,0.94,7.8,3403,12.1,fr,\"Comedy, Romance\",\" UGC , Tapioca Films\",\"France, Germany\"\n"
        );
        let file = write_temp(".csv", &csv);
        let loaded = load_file(file.path()).expect("load");

        assert!(loaded.skipped.is_empty());
        let movies = loaded.table.movies();
        assert_eq!(movies.len(), 2);
        assert!(movies[0].has_genre("Crime"));
        assert_eq!(movies[1].year, 2001);
        assert!(movies[1].has_genre("Romance"));
        assert_eq!(movies[1].production_companies, vec!["UGC", "Tapioca Films"]);
        assert_eq!(movies[1].production_countries, vec!["France", "Germany"]);
        assert_eq!(movies[1].vote_count, Some(3403));

        let catalog: Vec<&str> = loaded.table.genre_catalog().iter().map(String::as_str).collect();
        assert_eq!(catalog, vec!["Action", "Comedy", "Crime", "Romance"]);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = format!(
            "{HEADER}\n\
             Good,2000,1,2,,,,,en,Drama,,\n\
             BadYear,two thousand,1,2,,,,,en,Drama,,\n\
             NegativeBudget,2000,-5,2,,,,,en,Drama,,\n\
             NoRevenue,2000,1,,,,,,en,Drama,,\n\
             BadPopularity,2000,1,2,,,,lots,en,Drama,,\n"
        );
        let file = write_temp(".csv", &csv);
        let loaded = load_file(file.path()).expect("load");

        assert_eq!(loaded.table.len(), 1);
        assert_eq!(loaded.table.movies()[0].display_title(), "Good");
        let rows: Vec<usize> = loaded.skipped.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![2, 3, 4, 5]);
        assert!(loaded.skipped[0].reason.contains("year"));
    }

    #[test]
    fn empty_optional_cells_become_none() {
        let csv = format!("{HEADER}\n,2010,0,0,,,,,,,,\n");
        let file = write_temp(".csv", &csv);
        let loaded = load_file(file.path()).expect("load");

        let movie = &loaded.table.movies()[0];
        assert_eq!(movie.title, None);
        assert_eq!(movie.revenue, 0.0);
        assert_eq!(movie.popularity, None);
        assert!(movie.genres.is_empty());
        assert!(movie.production_countries.is_empty());
    }

    #[test]
    fn profit_margin_is_derived_when_column_absent() {
        let csv = "\u{feff}title,year,budget,revenue,vote_average,vote_count,popularity,original_language,genres,production_companies,production_countries\n\
                   X,2000,25,100,5,10,1.5,en,Drama,,\n";
        let file = write_temp(".csv", csv);
        let loaded = load_file(file.path()).expect("load");
        assert_eq!(loaded.table.movies()[0].profit_margin, Some(0.75));
    }

    #[test]
    fn missing_columns_are_a_format_error() {
        let file = write_temp(".csv", "title,year\nA,2000\n");
        match load_file(file.path()) {
            Err(DatasetError::DataFormat(msg)) => {
                assert!(msg.contains("budget"));
                assert!(msg.contains("genres"));
            }
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_file(Path::new("/nonexistent/dir/movies.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("movies.xlsx")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_accepts_structured_genres() {
        let json = r#"[
            {"title": "Heat", "year": 1995, "budget": 60000000, "revenue": 187436818,
             "vote_average": 7.7, "vote_count": 3000, "popularity": 17.9,
             "original_language": "en", "genres": ["Action", " Crime "],
             "production_companies": "Regency Enterprises", "production_countries": ["United States of America"]},
            {"title": "Broken", "year": null, "budget": 1, "revenue": 1,
             "vote_average": null, "vote_count": null, "popularity": null,
             "original_language": "en", "genres": "Drama",
             "production_companies": "", "production_countries": ""},
            42
        ]"#;
        let file = write_temp(".json", json);
        let loaded = load_file(file.path()).expect("load");

        assert_eq!(loaded.table.len(), 1);
        assert_eq!(loaded.skipped.len(), 2);
        let heat = &loaded.table.movies()[0];
        assert!(heat.has_genre("Crime"));
        assert_eq!(heat.production_countries, vec!["United States of America"]);
    }

    #[test]
    fn parquet_with_list_genres() {
        use std::sync::Arc;

        use arrow::array::{Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let mut genres = ListBuilder::new(StringBuilder::new());
        genres.values().append_value("Action");
        genres.values().append_value("Thriller");
        genres.append(true);
        genres.append(true);
        let genres = genres.finish();

        let text = |v: Vec<Option<&str>>| Arc::new(StringArray::from(v)) as ArrayRef;
        let float = |v: Vec<Option<f64>>| Arc::new(Float64Array::from(v)) as ArrayRef;

        let schema = Arc::new(Schema::new(vec![
            Field::new("title", DataType::Utf8, true),
            Field::new("year", DataType::Int64, true),
            Field::new("budget", DataType::Float64, true),
            Field::new("revenue", DataType::Float64, true),
            Field::new("vote_average", DataType::Float64, true),
            Field::new("vote_count", DataType::Int64, true),
            Field::new("popularity", DataType::Float64, true),
            Field::new("original_language", DataType::Utf8, true),
            Field::new(
                "genres",
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
                true,
            ),
            Field::new("production_companies", DataType::Utf8, true),
            Field::new("production_countries", DataType::Utf8, true),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                text(vec![Some("Speed"), None]),
                Arc::new(Int64Array::from(vec![Some(1994), Some(2003)])),
                float(vec![Some(30e6), Some(1e6)]),
                float(vec![Some(350e6), Some(0.0)]),
                float(vec![Some(6.9), None]),
                Arc::new(Int64Array::from(vec![Some(2500), None])),
                float(vec![Some(11.0), None]),
                text(vec![Some("en"), Some("ja")]),
                Arc::new(genres),
                text(vec![Some("20th Century Fox, Mark Gordon"), None]),
                text(vec![Some("United States of America"), Some("Japan")]),
            ],
        )
        .expect("record batch");

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().expect("temp file");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");

        let loaded = load_file(file.path()).expect("load");
        assert!(loaded.skipped.is_empty());
        let movies = loaded.table.movies();
        assert_eq!(movies.len(), 2);
        assert!(movies[0].has_genre("Thriller"));
        assert_eq!(movies[0].production_companies, vec!["20th Century Fox", "Mark Gordon"]);
        assert_eq!(movies[1].title, None);
        assert!(movies[1].genres.is_empty());
        assert_eq!(movies[1].profit_margin, None);
    }

    #[test]
    fn parquet_ignores_columns_outside_the_model() {
        use std::sync::Arc;

        use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray, UInt32Array};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let text = |v: &str| Arc::new(StringArray::from(vec![v])) as ArrayRef;
        let float = |v: f64| Arc::new(Float64Array::from(vec![v])) as ArrayRef;

        let schema = Arc::new(Schema::new(vec![
            Field::new("title", DataType::Utf8, true),
            Field::new("year", DataType::Int64, true),
            Field::new("budget", DataType::Float64, true),
            Field::new("revenue", DataType::Float64, true),
            Field::new("vote_average", DataType::Float64, true),
            Field::new("vote_count", DataType::UInt32, true),
            Field::new("popularity", DataType::Float64, true),
            Field::new("original_language", DataType::Utf8, true),
            Field::new("genres", DataType::Utf8, true),
            Field::new("production_companies", DataType::Utf8, true),
            Field::new("production_countries", DataType::Utf8, true),
            Field::new("adult", DataType::Boolean, true),
            Field::new("runtime", DataType::UInt32, true),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                text("Alien"),
                Arc::new(Int64Array::from(vec![1979])),
                float(11e6),
                float(104e6),
                float(8.1),
                Arc::new(UInt32Array::from(vec![4500])),
                float(23.4),
                text("en"),
                text("Horror, Science Fiction"),
                text("Brandywine Productions"),
                text("United Kingdom"),
                Arc::new(BooleanArray::from(vec![false])),
                Arc::new(UInt32Array::from(vec![117])),
            ],
        )
        .expect("record batch");

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().expect("temp file");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");

        let loaded = load_file(file.path()).expect("load");
        assert!(loaded.skipped.is_empty(), "skipped: {:?}", loaded.skipped);
        let movie = &loaded.table.movies()[0];
        assert_eq!(movie.display_title(), "Alien");
        assert_eq!(movie.vote_count, Some(4500));
        assert!(movie.has_genre("Science Fiction"));
    }

    #[test]
    fn empty_json_array_loads_as_empty_table() {
        let file = write_temp(".json", "[]");
        let loaded = load_file(file.path()).expect("load");
        assert!(loaded.table.is_empty());
        assert!(loaded.skipped.is_empty());

        let header_only = write_temp(".csv", &format!("{HEADER}\n"));
        assert!(load_file(header_only.path()).expect("load").table.is_empty());
    }
}
