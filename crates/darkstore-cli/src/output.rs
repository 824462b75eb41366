//! CSV output for extracted products.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use darkstore_core::Product;

const HEADERS: [&str; 6] = ["category", "name", "url", "price", "oldPrice", "imageUrl"];

/// Writes the records to `path`, creating or truncating the file.
///
/// # Errors
///
/// Returns any I/O or serialization error from the underlying writer.
pub fn write_csv(path: &Path, products: &[Product]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    write_records(file, products)
}

fn write_records<W: Write>(out: W, products: &[Product]) -> anyhow::Result<()> {
    // The header is written up front; serde-driven headers only appear with
    // the first record, and a run where everything was skipped must still
    // produce the full column row.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(HEADERS)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;
    Ok(())
}
