pub mod records;

pub use records::{parse_records, read_records, write_records, RecordWriter};
