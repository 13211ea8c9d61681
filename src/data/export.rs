use std::io::Write;

use super::filter::View;
use super::model::{columns, MovieRecord};
use super::parse::encode_multi_valued;
use crate::error::Result;

/// Byte-order mark written in front of exports so spreadsheet tools pick UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Default download name offered by the dashboard.
pub const EXPORT_FILE_NAME: &str = "Filtered_Movies.csv";

/// Write the view as CSV: BOM, header row, one line per movie, no index column.
pub fn write_csv<W: Write>(view: &View<'_>, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns::ALL)?;
    for movie in view.iter() {
        csv_writer.write_record(record_fields(movie))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Encode the view into an in-memory CSV document.
pub fn to_csv_bytes(view: &View<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(buf)
}

fn record_fields(movie: &MovieRecord) -> [String; 12] {
    fn opt<T: ToString>(v: &Option<T>) -> String {
        v.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    [
        opt(&movie.title),
        movie.year.to_string(),
        movie.budget.to_string(),
        movie.revenue.to_string(),
        opt(&movie.profit_margin),
        opt(&movie.vote_average),
        opt(&movie.vote_count),
        opt(&movie.popularity),
        opt(&movie.original_language),
        encode_multi_valued(movie.genres.iter().map(String::as_str)),
        encode_multi_valued(movie.production_companies.iter().map(String::as_str)),
        encode_multi_valued(movie.production_countries.iter().map(String::as_str)),
    ]
}
