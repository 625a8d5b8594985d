//! Directory footer of an SPK type 2 segment.
//!
//! The last four double-precision words of a type 2 segment give:
//!
//! * `init`: start epoch of the first record (ET seconds from J2000 TDB),
//! * `intlen`: time span covered by each record (seconds),
//! * `rsize`: record size in **double-precision words**, not bytes,
//! * `n_records`: number of records in the segment.
//!
//! A DAF address counts 8-byte words starting at 1, so the footer of a
//! segment ending at address `final_addr` starts at byte `(final_addr - 4) * 8`.
use hifitime::{Duration, Epoch};
use nom::{number::complete::le_f64, IResult};

use crate::crescent_errors::CrescentError;

#[derive(Debug, PartialEq, Clone)]
pub struct DirectoryData {
    pub init: f64,
    pub intlen: f64,
    pub rsize: usize,
    pub n_records: usize,
}

impl DirectoryData {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, init) = le_f64(input)?;
        let (input, intlen) = le_f64(input)?;
        let (input, rsize) = le_f64(input)?;
        let (input, n_records) = le_f64(input)?;
        Ok((
            input,
            DirectoryData {
                init,
                intlen,
                rsize: rsize as usize,
                n_records: n_records as usize,
            },
        ))
    }

    /// Read the footer of the segment ending at `final_addr` inside the whole kernel image.
    pub fn from_segment(kernel: &[u8], final_addr: usize) -> Result<Self, CrescentError> {
        let start = final_addr
            .checked_sub(4)
            .map(|words| words * 8)
            .filter(|start| start + 32 <= kernel.len())
            .ok_or_else(|| {
                CrescentError::NomParsingError(format!(
                    "segment directory at address {final_addr} lies outside the kernel"
                ))
            })?;
        let (_, directory) = DirectoryData::parse(&kernel[start..start + 32])?;
        Ok(directory)
    }

    /// 0-based index of the record covering `et_seconds`, clamped to the last record.
    pub fn record_index(&self, et_seconds: f64) -> usize {
        let idx = ((et_seconds - self.init) / self.intlen).floor().max(0.0) as usize;
        idx.min(self.n_records.saturating_sub(1))
    }
}

impl std::fmt::Display for DirectoryData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let epoch = Epoch::from_et_seconds(self.init);
        let record_length = Duration::from_seconds(self.intlen);

        writeln!(f, "+----------------+----------------------------+")?;
        writeln!(f, "| {:<14} | {:<26} |", "Field", "Value")?;
        writeln!(f, "+----------------+----------------------------+")?;
        writeln!(f, "| {:<14} | {:<26} |", "init (epoch)", format!("{epoch}"))?;
        writeln!(f, "| {:<14} | {:<26} |", "intlen", format!("{record_length}"))?;
        writeln!(f, "| {:<14} | {:<26} |", "rsize", self.rsize)?;
        writeln!(f, "| {:<14} | {:<26} |", "n_records", self.n_records)?;
        writeln!(f, "+----------------+----------------------------+")
    }
}

#[cfg(test)]
mod test_directory {
    use super::*;

    fn de_directory() -> DirectoryData {
        DirectoryData {
            init: -14200747200.0,
            intlen: 1382400.0,
            rsize: 41,
            n_records: 25112,
        }
    }

    #[test]
    fn test_directory_from_segment() {
        let mut kernel = vec![0u8; 64];
        for (i, value) in [-14200747200.0f64, 1382400.0, 41.0, 25112.0]
            .iter()
            .enumerate()
        {
            kernel[32 + i * 8..40 + i * 8].copy_from_slice(&value.to_le_bytes());
        }
        assert_eq!(DirectoryData::from_segment(&kernel, 8).unwrap(), de_directory());
        assert!(DirectoryData::from_segment(&kernel, 9).is_err());
        assert!(DirectoryData::from_segment(&kernel, 2).is_err());
    }

    #[test]
    fn test_record_index() {
        let dir = de_directory();
        assert_eq!(dir.record_index(dir.init), 0);
        assert_eq!(dir.record_index(dir.init + 1.5 * dir.intlen), 1);
        let end = dir.init + dir.intlen * dir.n_records as f64;
        assert_eq!(dir.record_index(end), dir.n_records - 1);
    }

    #[test]
    fn test_directory_display() {
        let output = format!("{}", de_directory());
        let expected_output = r#"+----------------+----------------------------+
| Field          | Value                      |
+----------------+----------------------------+
| init (epoch)   | 1549-12-31T00:00:00 ET     |
| intlen         | 16 days                    |
| rsize          | 41                         |
| n_records      | 25112                      |
+----------------+----------------------------+
"#;

        assert_eq!(output, expected_output);
    }
}
