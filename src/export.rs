use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parquet::basic::{Compression, LogicalType, Repetition, Type as PhysicalType};
use parquet::data_type::{ByteArray, ByteArrayType};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::types::{Type, TypePtr};
use rusqlite::Connection;
use tracing::info;

use crate::db;
use crate::extract::{catalog, AllocationKind};

/// Write the five result tables as Parquet snapshots under `out_dir`.
///
/// Returns the written paths. Tables are written whole, one row group each;
/// all columns are UTF-8 strings, matching the pass-through extraction
/// contract.
pub fn write_snapshots(conn: &Connection, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    written.push(write_single_values(conn, out_dir)?);
    for (kind, file_name, column) in [
        (AllocationKind::Asset, "asset_allocations.parquet", "asset_allocation"),
        (AllocationKind::Geo, "geo_allocations.parquet", "geo_allocation"),
        (AllocationKind::Sector, "sector_allocations.parquet", "sector_allocation"),
    ] {
        written.push(write_allocations(conn, out_dir, kind, file_name, column)?);
    }
    written.push(write_holdings(conn, out_dir)?);

    info!("Wrote {} snapshot files to {}", written.len(), out_dir.display());
    Ok(written)
}

/// One row per fund, one column per catalog field, pivoted from the
/// long-format store. Column order is href + catalog order.
fn write_single_values(conn: &Connection, out_dir: &Path) -> Result<PathBuf> {
    let mut columns: Vec<&str> = vec!["href"];
    columns.extend(catalog::SINGLE_VALUE_FIELDS.iter().map(|(name, _)| *name));

    let hrefs = db::fetch_fund_hrefs(conn)?;
    let mut rows = Vec::with_capacity(hrefs.len());
    for href in hrefs {
        let values = db::fetch_values(conn, &href)?;
        let mut row = Vec::with_capacity(columns.len());
        row.push(href.clone());
        for (name, _) in catalog::SINGLE_VALUE_FIELDS {
            let value = values
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default();
            row.push(value);
        }
        rows.push(row);
    }

    write_table(&out_dir.join("single_values.parquet"), &columns, &rows)
}

fn write_allocations(
    conn: &Connection,
    out_dir: &Path,
    kind: AllocationKind,
    file_name: &str,
    column: &str,
) -> Result<PathBuf> {
    let rows: Vec<Vec<String>> = db::fetch_allocations(conn, kind)?
        .into_iter()
        .map(|(href, label)| vec![href, label])
        .collect();
    write_table(&out_dir.join(file_name), &["href", column], &rows)
}

fn write_holdings(conn: &Connection, out_dir: &Path) -> Result<PathBuf> {
    let rows: Vec<Vec<String>> = db::fetch_holdings(conn)?
        .into_iter()
        .map(|(href, row_idx, cells)| vec![href, row_idx.to_string(), cells])
        .collect();
    write_table(
        &out_dir.join("top10_holdings.parquet"),
        &["href", "row", "cells"],
        &rows,
    )
}

fn string_schema(columns: &[&str]) -> Result<TypePtr> {
    let mut fields = Vec::with_capacity(columns.len());
    for name in columns {
        let field = Type::primitive_type_builder(name, PhysicalType::BYTE_ARRAY)
            .with_logical_type(Some(LogicalType::String))
            .with_repetition(Repetition::REQUIRED)
            .build()?;
        fields.push(Arc::new(field));
    }
    Ok(Arc::new(
        Type::group_type_builder("schema").with_fields(fields).build()?,
    ))
}

/// Serialize a table of string rows to one Parquet file.
fn write_table(path: &Path, columns: &[&str], rows: &[Vec<String>]) -> Result<PathBuf> {
    let schema = string_schema(columns)?;
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(Compression::ZSTD(Default::default()))
            .build(),
    );

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = SerializedFileWriter::new(file, schema, props)?;

    let mut row_group = writer.next_row_group()?;
    let mut col_idx = 0;
    while let Some(mut col_writer) = row_group.next_column()? {
        let values: Vec<ByteArray> = rows
            .iter()
            .map(|row| ByteArray::from(row[col_idx].as_str()))
            .collect();
        col_writer
            .typed::<ByteArrayType>()
            .write_batch(&values, None, None)?;
        col_writer.close()?;
        col_idx += 1;
    }
    row_group.close()?;
    writer.close()?;

    Ok(path.to_path_buf())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{ExtractedData, FundRecord};
    use parquet::file::reader::{FileReader, SerializedFileReader};
    use parquet::record::RowAccessor;

    fn populated_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        for href in ["/f/1", "/f/2"] {
            let fields = catalog::SINGLE_VALUE_FIELDS
                .iter()
                .map(|(name, _)| (*name, format!("{}:{}", href, name)))
                .collect();
            let data = ExtractedData {
                values: FundRecord { fields },
                asset_allocations: vec!["Equity 60%".to_string()],
                sector_allocations: vec!["Energy 100%".to_string()],
                geo_allocations: vec!["Canada 100%".to_string()],
                holdings: vec![
                    vec!["Security".to_string(), "%".to_string()],
                    vec!["RBC".to_string(), "6.2%".to_string()],
                ],
            };
            db::save_extracted(&conn, href, &data).unwrap();
        }
        conn
    }

    fn read_rows(path: &Path) -> usize {
        let file = File::open(path).unwrap();
        let reader = SerializedFileReader::new(file).unwrap();
        reader.metadata().file_metadata().num_rows() as usize
    }

    #[test]
    fn writes_all_five_snapshots() {
        let conn = populated_db();
        let dir = tempfile::tempdir().unwrap();
        let written = write_snapshots(&conn, dir.path()).unwrap();
        assert_eq!(written.len(), 5);
        for path in &written {
            assert!(path.exists(), "missing {}", path.display());
        }
    }

    #[test]
    fn single_values_has_one_row_per_fund() {
        let conn = populated_db();
        let dir = tempfile::tempdir().unwrap();
        write_snapshots(&conn, dir.path()).unwrap();

        let path = dir.path().join("single_values.parquet");
        assert_eq!(read_rows(&path), 2);

        let file = File::open(&path).unwrap();
        let reader = SerializedFileReader::new(file).unwrap();
        let schema = reader.metadata().file_metadata().schema();
        assert_eq!(
            schema.get_fields().len(),
            1 + catalog::SINGLE_VALUE_FIELDS.len()
        );
        assert_eq!(schema.get_fields()[0].name(), "href");
        assert_eq!(schema.get_fields()[1].name(), "inception_return");
    }

    #[test]
    fn allocation_and_holding_rows_carry_source_href() {
        let conn = populated_db();
        let dir = tempfile::tempdir().unwrap();
        write_snapshots(&conn, dir.path()).unwrap();

        assert_eq!(read_rows(&dir.path().join("asset_allocations.parquet")), 2);
        assert_eq!(read_rows(&dir.path().join("geo_allocations.parquet")), 2);
        assert_eq!(read_rows(&dir.path().join("sector_allocations.parquet")), 2);
        assert_eq!(read_rows(&dir.path().join("top10_holdings.parquet")), 4);

        let file = File::open(dir.path().join("top10_holdings.parquet")).unwrap();
        let reader = SerializedFileReader::new(file).unwrap();
        let row = reader.get_row_iter(None).unwrap().next().unwrap().unwrap();
        assert_eq!(row.get_string(0).unwrap(), "/f/1");
        assert_eq!(row.get_string(1).unwrap(), "0");
        assert_eq!(row.get_string(2).unwrap(), r#"["Security","%"]"#);
    }

    #[test]
    fn empty_store_writes_empty_tables() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let written = write_snapshots(&conn, dir.path()).unwrap();
        assert_eq!(written.len(), 5);
        for path in &written {
            assert_eq!(read_rows(path), 0);
        }
    }
}
