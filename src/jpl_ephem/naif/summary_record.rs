//! Segment summaries (descriptors) of an SPK kernel.
//!
//! Summaries are stored in 1024-byte *summary records* forming a linked list
//! that starts at the record number `FWARD` of the file record. Each summary
//! record begins with three control words (next record, previous record,
//! number of summaries) followed by the packed summaries.
use std::fmt;

use hifitime::Epoch;
use nom::{
    bytes::complete::take,
    number::complete::{le_f64, le_i32},
    IResult,
};

use super::naif_ids::{NaifIds, SpkDataType};

/// Descriptor of one SPK segment (`ND = 2`, `NI = 6`).
#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    /// First epoch covered, ET seconds from J2000.
    pub start_epoch: f64,
    /// Last epoch covered, ET seconds from J2000.
    pub end_epoch: f64,
    pub target: i32,
    pub center: i32,
    pub frame_id: i32,
    pub data_type: i32,
    /// Initial address of the segment data (1-based, double-precision words).
    pub initial_addr: i32,
    /// Final address of the segment data (1-based, double-precision words).
    pub final_addr: i32,
}

impl Summary {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, start_epoch) = le_f64(input)?;
        let (input, end_epoch) = le_f64(input)?;

        let (input, target) = le_i32(input)?;
        let (input, center) = le_i32(input)?;
        let (input, frame_id) = le_i32(input)?;
        let (input, data_type) = le_i32(input)?;
        let (input, initial_addr) = le_i32(input)?;
        let (input, final_addr) = le_i32(input)?;
        Ok((
            input,
            Summary {
                start_epoch,
                end_epoch,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }

    pub fn spk_type(&self) -> SpkDataType {
        SpkDataType::from(self.data_type)
    }

    pub fn covers(&self, et_seconds: f64) -> bool {
        (self.start_epoch..=self.end_epoch).contains(&et_seconds)
    }
}

/// One summary record: the link to the next one and the summaries it holds.
#[derive(Debug, PartialEq, Clone)]
pub struct SummaryRecord {
    /// Record number of the next summary record, `0` for the last one.
    pub next: usize,
    pub summaries: Vec<Summary>,
}

impl SummaryRecord {
    /// Decode a 1024-byte summary record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: the record bytes.
    /// * `summary_words`: stride of one summary in double-precision words (`ND + ceil(NI/2)`).
    pub fn parse(input: &[u8], summary_words: usize) -> IResult<&[u8], Self> {
        let (mut input, (next, _previous, nsum)) = {
            let (input, next) = le_f64(input)?;
            let (input, previous) = le_f64(input)?;
            let (input, nsum) = le_f64(input)?;
            (input, (next, previous, nsum))
        };

        let mut summaries = Vec::with_capacity(nsum as usize);
        for _ in 0..nsum as usize {
            let (rest, bytes) = take(summary_words * 8)(input)?;
            let (_, summary) = Summary::parse(bytes)?;
            summaries.push(summary);
            input = rest;
        }

        Ok((
            input,
            SummaryRecord {
                next: next as usize,
                summaries,
            },
        ))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = Epoch::from_et_seconds(self.start_epoch);
        let end = Epoch::from_et_seconds(self.end_epoch);

        let fields = [
            ("start_epoch", format!("{start}")),
            ("end_epoch", format!("{end}")),
            ("target", NaifIds::describe(self.target)),
            ("center", NaifIds::describe(self.center)),
            ("frame_id", self.frame_id.to_string()),
            ("data_type", self.spk_type().to_string()),
            ("initial_addr", self.initial_addr.to_string()),
            ("final_addr", self.final_addr.to_string()),
        ];

        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        let value_width = fields.iter().map(|(_, v)| v.len()).max().unwrap_or(10);

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = label_width + 2,
            value = value_width + 2
        );

        writeln!(f, "{border}")?;
        writeln!(f, "| {:<label_width$} | {:<value_width$} |", "Field", "Value")?;
        writeln!(f, "{border}")?;
        for (label, value) in fields {
            writeln!(f, "| {label:<label_width$} | {value:<value_width$} |")?;
        }
        writeln!(f, "{border}")
    }
}
