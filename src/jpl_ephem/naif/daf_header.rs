//! DAF (Double Precision Array File) file record.
//!
//! The first 1024-byte record of an SPK kernel describes how the rest of the
//! file is laid out:
//!
//! * **`idword`**: format identifier (`"DAF/SPK"`).
//! * **`nd`** / **`ni`**: number of double / integer components of each segment
//!   summary (`2` / `6` for SPK).
//! * **`fward`** / **`bward`**: record numbers (1-based) of the first and last
//!   summary records.
//! * **`free`**: first free address (1-based, in double-precision words).
//! * **`locfmt`**: binary format tag, `"LTL-IEEE"` or `"BIG-IEEE"`.
//!
//! Only little-endian kernels are decoded by this crate; see
//! [`DAFHeader::ensure_little_endian`].
use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

use crate::crescent_errors::CrescentError;

/// Size in bytes of a DAF physical record.
pub const DAF_RECORD_LEN: usize = 1024;

/// In-memory representation of the DAF/SPK file record.
#[derive(Debug, PartialEq, Clone)]
pub struct DAFHeader {
    pub idword: String,
    pub internal_filename: String,
    pub nd: i32,
    pub ni: i32,
    pub fward: i32,
    pub bward: i32,
    pub free: i32,
    pub locfmt: String,
}

impl DAFHeader {
    /// Parse the first 1024-byte DAF record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: byte slice starting at the beginning of the file.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)`, text fields trimmed of their padding.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, id_word) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        // reserved area, FTP validation string and trailing padding
        let (input, _) = take(DAF_RECORD_LEN - 96)(input)?;
        Ok((
            input,
            DAFHeader {
                idword: String::from_utf8_lossy(id_word).trim().to_string(),
                internal_filename: String::from_utf8_lossy(ifname).trim().to_string(),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: String::from_utf8_lossy(locfmt).trim().to_string(),
            },
        ))
    }

    /// Number of double-precision words taken by one segment summary: `ND + ceil(NI / 2)`.
    pub fn summary_words(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }

    /// Reject kernels whose numbers are not stored little-endian.
    pub fn ensure_little_endian(&self) -> Result<(), CrescentError> {
        if self.locfmt == "LTL-IEEE" {
            Ok(())
        } else {
            Err(CrescentError::UnsupportedBinaryFormat(self.locfmt.clone()))
        }
    }
}

impl fmt::Display for DAFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 18;
        const VALUE_WIDTH: usize = 50;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let rows = [
            ("ID Word", self.idword.clone()),
            ("Internal Name", self.internal_filename.clone()),
            ("ND / NI", format!("{} doubles, {} integers", self.nd, self.ni)),
            (
                "Summary records",
                format!("first #{}, last #{}", self.fward, self.bward),
            ),
            ("Free Addr", self.free.to_string()),
            ("Binary Format", self.locfmt.clone()),
        ];

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "DAF File Header",
            "",
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(
                f,
                "| {:<label$}| {:<value$}|",
                label,
                value,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
pub(crate) mod test_daf_header {
    use super::*;

    /// Build a synthetic little-endian DAF file record.
    pub(crate) fn file_record(nd: i32, ni: i32, fward: i32, bward: i32, free: i32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(DAF_RECORD_LEN);
        buf.extend_from_slice(b"DAF/SPK ");
        buf.extend_from_slice(&nd.to_le_bytes());
        buf.extend_from_slice(&ni.to_le_bytes());
        let mut name = b"SYNTHETIC KERNEL".to_vec();
        name.resize(60, b' ');
        buf.extend_from_slice(&name);
        buf.extend_from_slice(&fward.to_le_bytes());
        buf.extend_from_slice(&bward.to_le_bytes());
        buf.extend_from_slice(&free.to_le_bytes());
        buf.extend_from_slice(b"LTL-IEEE");
        buf.resize(DAF_RECORD_LEN, 0);
        buf
    }

    #[test]
    fn test_parse_daf_header() {
        let bytes = file_record(2, 6, 4, 4, 1234);
        let (rest, header) = DAFHeader::parse(&bytes).unwrap();
        assert!(rest.is_empty());
        assert_eq!(
            header,
            DAFHeader {
                idword: "DAF/SPK".to_string(),
                internal_filename: "SYNTHETIC KERNEL".to_string(),
                nd: 2,
                ni: 6,
                fward: 4,
                bward: 4,
                free: 1234,
                locfmt: "LTL-IEEE".to_string(),
            }
        );
        assert_eq!(header.summary_words(), 5);
        assert!(header.ensure_little_endian().is_ok());
    }

    #[test]
    fn test_big_endian_rejected() {
        let mut bytes = file_record(2, 6, 4, 4, 1234);
        bytes[88..96].copy_from_slice(b"BIG-IEEE");
        let (_, header) = DAFHeader::parse(&bytes).unwrap();
        assert_eq!(
            header.ensure_little_endian(),
            Err(CrescentError::UnsupportedBinaryFormat("BIG-IEEE".into()))
        );
    }

    #[test]
    fn test_truncated_header() {
        assert!(DAFHeader::parse(&[0u8; 100]).is_err());
    }

    #[test]
    fn test_display_daf_header() {
        let (_, header) = DAFHeader::parse(&file_record(2, 6, 4, 4, 1234)).unwrap();
        let expected = r#"+-------------------+---------------------------------------------------+
| DAF File Header   |                                                   |
+-------------------+---------------------------------------------------+
| ID Word           | DAF/SPK                                           |
| Internal Name     | SYNTHETIC KERNEL                                  |
| ND / NI           | 2 doubles, 6 integers                             |
| Summary records   | first #4, last #4                                 |
| Free Addr         | 1234                                              |
| Binary Format     | LTL-IEEE                                          |
+-------------------+---------------------------------------------------+
"#;
        assert_eq!(format!("{header}"), expected);
    }
}
