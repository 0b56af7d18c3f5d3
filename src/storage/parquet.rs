//! Parquet I/O for edge list persistence
//!
//! Based on `DuckDB` (Raasveldt et al., SIGMOD 2019) columnar storage patterns.
//!
//! # Format
//!
//! A COO edge list is stored as two Parquet files:
//! - `{path}_edges.parquet`: (row, column, value)
//! - `{path}_meta.parquet`: (`number_of_vertices`, directed)

use super::{Coo, VertexId};
use crate::graph::GraphProperties;
use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float32Array, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

impl Coo<f32> {
    /// Write edge list and graph metadata to Parquet files
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn write_parquet<P: AsRef<Path>>(
        &self,
        path: P,
        properties: GraphProperties,
    ) -> Result<()> {
        let base_path = path.as_ref();
        self.write_edges_parquet(base_path)?;
        self.write_meta_parquet(base_path, properties)?;
        Ok(())
    }

    /// Read edge list and graph metadata from Parquet files
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<(Self, GraphProperties)> {
        let base_path = path.as_ref();

        let (number_of_vertices, properties) = Self::read_meta_parquet(base_path)?;
        let edges = Self::read_edges_parquet(base_path)?;
        let coo = Self::from_edges(number_of_vertices, &edges)?;

        Ok((coo, properties))
    }

    fn write_edges_parquet(&self, base_path: &Path) -> Result<()> {
        let edges_path = format!("{}_edges.parquet", base_path.display());
        let (rows, cols, vals) = self.components();

        let schema = Arc::new(Schema::new(vec![
            Field::new("row", DataType::UInt32, false),
            Field::new("column", DataType::UInt32, false),
            Field::new("value", DataType::Float32, false),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(UInt32Array::from(rows.to_vec())),
                Arc::new(UInt32Array::from(cols.to_vec())),
                Arc::new(Float32Array::from(vals.to_vec())),
            ],
        )
        .context("Failed to create edges RecordBatch")?;

        write_batch(&edges_path, schema, &batch)
    }

    fn write_meta_parquet(&self, base_path: &Path, properties: GraphProperties) -> Result<()> {
        let meta_path = format!("{}_meta.parquet", base_path.display());

        let schema = Arc::new(Schema::new(vec![
            Field::new("number_of_vertices", DataType::UInt64, false),
            Field::new("directed", DataType::Boolean, false),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(UInt64Array::from(vec![self.number_of_rows() as u64])),
                Arc::new(BooleanArray::from(vec![properties.directed])),
            ],
        )
        .context("Failed to create meta RecordBatch")?;

        write_batch(&meta_path, schema, &batch)
    }

    fn read_edges_parquet(base_path: &Path) -> Result<Vec<(VertexId, VertexId, f32)>> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let file =
            File::open(&edges_path).with_context(|| format!("Failed to open {edges_path}"))?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut edges = Vec::new();

        for batch_result in reader {
            let batch: RecordBatch = batch_result?;

            let rows = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid row column type")?;

            let cols = batch
                .column(1)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid column column type")?;

            let vals = batch
                .column(2)
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("Invalid value column type")?;

            for i in 0..batch.num_rows() {
                edges.push((rows.value(i), cols.value(i), vals.value(i)));
            }
        }

        Ok(edges)
    }

    fn read_meta_parquet(base_path: &Path) -> Result<(usize, GraphProperties)> {
        let meta_path = format!("{}_meta.parquet", base_path.display());

        let file = File::open(&meta_path).with_context(|| format!("Failed to open {meta_path}"))?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        for batch_result in reader {
            let batch: RecordBatch = batch_result?;
            if batch.num_rows() == 0 {
                continue;
            }

            let vertices = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt64Array>()
                .context("Invalid number_of_vertices column type")?;

            let directed = batch
                .column(1)
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("Invalid directed column type")?;

            let number_of_vertices = usize::try_from(vertices.value(0))?;
            let properties = GraphProperties {
                directed: directed.value(0),
                weighted: true,
            };
            return Ok((number_of_vertices, properties));
        }

        anyhow::bail!("{meta_path} has no rows")
    }
}

fn write_batch(path: &str, schema: Arc<Schema>, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(())
}
