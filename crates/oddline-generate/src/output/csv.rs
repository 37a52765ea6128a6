use std::io::Write;

use crate::catalog::GameBatch;

/// Write a batch as CSV: `line, answer, kind, item_0 .. item_{n-1}`.
///
/// Returns the number of bytes written.
pub fn write_batch_csv<W: Write>(writer: W, batch: &GameBatch) -> Result<u64, csv::Error> {
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(counting);

    let rows = batch.rows();
    let width = rows.iter().map(|row| row.items.len()).max().unwrap_or(0);

    let mut header = vec!["line".to_string(), "answer".to_string(), "kind".to_string()];
    header.extend((0..width).map(|index| format!("item_{index}")));
    writer.write_record(&header)?;

    for (index, row) in rows.into_iter().enumerate() {
        let mut record = vec![index.to_string(), row.answer.to_string(), row.kind];
        record.extend(row.items);
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
