//! Delimited export of search results.
//!
//! The persisted form mirrors the result set: one row per query point in
//! each of two parallel files, the first listing matched reference
//! indices and the second the matching distances, `,`-separated. Rows are
//! empty for queries with no matches.

use std::path::Path;

use distances::number::Float;

use crate::RangeSearchError;

/// Writes the neighbor-index and distance tables of a result set to two
/// parallel `,`-delimited files.
///
/// # Errors
///
/// * If either file cannot be created or written.
pub fn save_results<F: Float, P: AsRef<Path>>(
    results: &[Vec<(usize, F)>],
    neighbors_path: P,
    distances_path: P,
) -> Result<(), RangeSearchError> {
    write_delimited(neighbors_path, results, |&(i, _)| i.to_string())?;
    write_delimited(distances_path, results, |&(_, d)| d.to_string())
}

/// Writes one delimited row per query, projecting each pair through
/// `field`.
fn write_delimited<F: Float, P: AsRef<Path>, G: Fn(&(usize, F)) -> String>(
    path: P,
    results: &[Vec<(usize, F)>],
    field: G,
) -> Result<(), RangeSearchError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| RangeSearchError::Io(e.to_string()))?;

    for row in results {
        if row.is_empty() {
            writer.write_record([""])
        } else {
            writer.write_record(row.iter().map(&field))
        }
        .map_err(|e| RangeSearchError::Io(e.to_string()))?;
    }

    writer.flush().map_err(|e| RangeSearchError::Io(e.to_string()))
}
