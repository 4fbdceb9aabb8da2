//! Streams dataset records into any byte sink, one JSON object per line.
//! File handling, rotation and upload belong to the caller; this writer
//! only guarantees well-formed JSONL.

use crate::export::error::ExportError;
use crate::export::record::DatasetRecord;
use std::io::Write;

/// JSONL writer over a caller-supplied sink.
pub struct DatasetWriter<W: Write> {
    sink: W,
    records: usize,
}

impl<W: Write> DatasetWriter<W> {
    pub fn new(sink: W) -> Self {
        DatasetWriter { sink, records: 0 }
    }

    /// Serializes one record and terminates it with a newline.
    pub fn write_record(&mut self, record: &DatasetRecord) -> Result<(), ExportError> {
        serde_json::to_writer(&mut self.sink, record)?;
        self.sink.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Flushes and hands the sink back.
    pub fn into_inner(mut self) -> Result<W, ExportError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::answer::StructuredAnswer;
    use crate::types::execute::ExecuteResult;
    use crate::types::plan::Plan;
    use crate::types::time_mode::TimeMode;
    use std::io::{BufRead, BufReader, Seek, SeekFrom};

    fn sample_record(place: &str) -> DatasetRecord {
        DatasetRecord::new(
            place,
            TimeMode::Current,
            Plan::default(),
            ExecuteResult::default(),
            StructuredAnswer::default(),
        )
    }

    #[test]
    fn writes_one_parsable_line_per_record() {
        let mut writer = DatasetWriter::new(Vec::new());
        writer.write_record(&sample_record("Kyoto")).unwrap();
        writer.write_record(&sample_record("Oslo")).unwrap();
        assert_eq!(writer.records_written(), 2);

        let bytes = writer.into_inner().unwrap();
        let lines: Vec<&str> = std::str::from_utf8(&bytes).unwrap().lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["system"].is_string());
            assert!(value["input"]["timestamp_utc"].is_string());
            assert!(value["output"].is_object());
        }
        let second: DatasetRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.input.place, "Oslo");
    }

    #[test]
    fn writes_through_a_real_file() {
        let file = tempfile::tempfile().unwrap();
        let mut writer = DatasetWriter::new(file);
        writer.write_record(&sample_record("Lima")).unwrap();
        let mut file = writer.into_inner().unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut lines = BufReader::new(file).lines();
        let line = lines.next().unwrap().unwrap();
        let record: DatasetRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(record.input.place, "Lima");
        assert!(lines.next().is_none());
    }
}
