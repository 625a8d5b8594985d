//! High-level loader for NAIF/JPL SPK planetary kernels.
//!
//! This module ties together the DAF file record, the optional JPL text
//! header, the linked list of summary records, the segment directories and the
//! Chebyshev records to expose position/velocity interpolation.
//!
//! # What this module does
//! 1. Reads the whole kernel in memory and decodes the **DAF file record**.
//! 2. Looks for the **JPL text header** in the comment area (optional).
//! 3. Walks the **summary records** to discover segments (`target`, `center`,
//!    addresses, time span).
//! 4. Reads the **directory** of every type 2 segment (`init`, `intlen`,
//!    `rsize`, `n_records`).
//! 5. Decodes the covering **ephemeris record** on demand at interpolation time.
//!
//! # Units & time scales
//! * Times are **ET/TDB seconds from J2000**.
//! * Positions are **kilometers**, velocities are **km/s**, axes are ICRF.
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Sub};

use camino::Utf8Path;
use nalgebra::Vector3;
use tracing::{debug, info};

use super::{
    daf_header::{DAFHeader, DAF_RECORD_LEN},
    directory::DirectoryData,
    ephemeris_record::EphemerisRecord,
    jpl_ephem_header::JPLEphemHeader,
    naif_ids::{NaifIds, SpkDataType},
    summary_record::{Summary, SummaryRecord},
};
use crate::crescent_errors::CrescentError;

/// Cartesian state interpolated from a kernel: position (km) and velocity (km/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpResult {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl Add for InterpResult {
    type Output = InterpResult;

    fn add(self, rhs: Self) -> Self::Output {
        InterpResult {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl Sub for InterpResult {
    type Output = InterpResult;

    fn sub(self, rhs: Self) -> Self::Output {
        InterpResult {
            position: self.position - rhs.position,
            velocity: self.velocity - rhs.velocity,
        }
    }
}

/// One segment of the kernel: its descriptor and, for type 2 data, its directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub summary: Summary,
    pub directory: Option<DirectoryData>,
}

/// In-memory image of a loaded SPK kernel.
#[derive(Debug, Clone)]
pub struct NaifData {
    pub(crate) daf_header: DAFHeader,
    pub(crate) header: Option<JPLEphemHeader>,
    kernel: Vec<u8>,
    segments: HashMap<(i32, i32), Vec<Segment>>,
}

impl NaifData {
    /// Load and decode an SPK kernel from disk.
    ///
    /// Arguments
    /// -----------------
    /// * `file_path`: filesystem location of the `.bsp` kernel.
    ///
    /// Return
    /// ----------
    /// * A [`NaifData`] with all segments indexed by `(target, center)`, or the
    ///   I/O or parsing error encountered.
    pub fn read_naif_file(file_path: &Utf8Path) -> Result<Self, CrescentError> {
        let kernel = std::fs::read(file_path)?;
        info!(path = %file_path, bytes = kernel.len(), "loading SPK kernel");
        NaifData::from_bytes(kernel)
    }

    /// Decode a kernel already held in memory.
    pub fn from_bytes(kernel: Vec<u8>) -> Result<Self, CrescentError> {
        let (_, daf_header) = DAFHeader::parse(&kernel)?;
        daf_header.ensure_little_endian()?;
        if daf_header.fward < 2 {
            return Err(CrescentError::NomParsingError(format!(
                "invalid first summary record number {}",
                daf_header.fward
            )));
        }

        // Comment area: records 2 .. fward - 1
        let comment_end = ((daf_header.fward as usize - 1) * DAF_RECORD_LEN).min(kernel.len());
        let comment = String::from_utf8_lossy(&kernel[DAF_RECORD_LEN.min(comment_end)..comment_end])
            .replace('\0', "\n");
        let header = match JPLEphemHeader::parse(&comment) {
            Ok((_, header)) => Some(header),
            Err(_) => {
                debug!("no JPL text header found in the kernel comment area");
                None
            }
        };

        let summary_words = daf_header.summary_words();
        let mut segments: HashMap<(i32, i32), Vec<Segment>> = HashMap::new();
        let mut record_number = daf_header.fward as usize;

        while record_number != 0 {
            let record = Self::physical_record(&kernel, record_number)?;
            let (_, summary_record) = SummaryRecord::parse(record, summary_words)?;

            for summary in summary_record.summaries {
                let directory = match summary.spk_type() {
                    SpkDataType::ChebyshevPositionOnly => Some(DirectoryData::from_segment(
                        &kernel,
                        summary.final_addr as usize,
                    )?),
                    _ => None,
                };
                debug!(
                    target = summary.target,
                    center = summary.center,
                    data_type = summary.data_type,
                    "segment found"
                );
                segments
                    .entry((summary.target, summary.center))
                    .or_default()
                    .push(Segment { summary, directory });
            }

            if summary_record.next == record_number {
                break;
            }
            record_number = summary_record.next;
        }

        Ok(NaifData {
            daf_header,
            header,
            kernel,
            segments,
        })
    }

    fn physical_record(kernel: &[u8], record_number: usize) -> Result<&[u8], CrescentError> {
        let start = (record_number - 1) * DAF_RECORD_LEN;
        kernel
            .get(start..start + DAF_RECORD_LEN)
            .ok_or_else(|| {
                CrescentError::NomParsingError(format!(
                    "summary record {record_number} lies outside the kernel"
                ))
            })
    }

    /// Ephemeris version announced by the kernel comment, if any.
    pub fn version(&self) -> Option<&str> {
        self.header.as_ref().map(|header| header.version.as_str())
    }

    /// All segments describing `target` relative to `center`.
    pub fn segments(&self, target: i32, center: i32) -> &[Segment] {
        self.segments
            .get(&(target, center))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Interpolate **position** and **velocity** of `target` relative to `center` at an ET epoch.
    ///
    /// Return
    /// ----------
    /// * [`InterpResult`] in km and km/s, or
    ///   * [`CrescentError::MissingSegment`] if the kernel has no such pair,
    ///   * [`CrescentError::EphemerisOutOfRange`] if no segment covers the epoch,
    ///   * [`CrescentError::InvalidSpkDataType`] if the covering segment is not type 2.
    pub fn ephemeris(
        &self,
        target: NaifIds,
        center: NaifIds,
        et_seconds: f64,
    ) -> Result<InterpResult, CrescentError> {
        let (target, center) = (target.to_id(), center.to_id());
        let segments = self.segments(target, center);
        if segments.is_empty() {
            return Err(CrescentError::MissingSegment { target, center });
        }

        let segment = segments
            .iter()
            .find(|segment| segment.summary.covers(et_seconds))
            .ok_or(CrescentError::EphemerisOutOfRange {
                target,
                center,
                et_seconds,
            })?;

        let directory = segment
            .directory
            .as_ref()
            .ok_or(CrescentError::InvalidSpkDataType(segment.summary.data_type))?;

        let idx = directory.record_index(et_seconds);
        let start = (segment.summary.initial_addr as usize - 1 + idx * directory.rsize) * 8;
        let bytes = self
            .kernel
            .get(start..start + directory.rsize * 8)
            .ok_or_else(|| {
                CrescentError::NomParsingError(format!(
                    "record {idx} of segment {target}/{center} lies outside the kernel"
                ))
            })?;
        let (_, record) = EphemerisRecord::parse(bytes, (directory.rsize - 2) / 3)?;

        let (position, velocity) = record.interpolate(et_seconds);
        Ok(InterpResult { position, velocity })
    }
}

impl fmt::Display for NaifData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{:-^78}+", " Ephemeris File Information ")?;
        write!(f, "{}", self.daf_header)?;
        if let Some(header) = &self.header {
            writeln!(f, "{header}")?;
        }
        writeln!(f, "+{:-^78}+", " Available Segments ")?;

        let mut keys: Vec<_> = self.segments.keys().copied().collect();
        keys.sort_unstable();
        for (target, center) in keys {
            for segment in self.segments(target, center) {
                write!(f, "{}", segment.summary)?;
                if let Some(directory) = &segment.directory {
                    write!(f, "{directory}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod synthetic {
    //! Builder for small in-memory SPK kernels used by unit tests.
    use super::*;
    use crate::jpl_ephem::naif::{
        daf_header::test_daf_header::file_record,
        ephemeris_record::test_ephemeris_record::record_bytes,
        summary_record::test_summary::summary_bytes,
    };

    pub(crate) struct SyntheticSegment {
        pub target: i32,
        pub center: i32,
        pub init: f64,
        pub intlen: f64,
        pub records: Vec<EphemerisRecord>,
    }

    impl SyntheticSegment {
        /// A segment with constant velocity `velocity` (km/s) through `origin` at ET 0.
        pub(crate) fn linear(
            target: i32,
            center: i32,
            origin: Vector3<f64>,
            velocity: Vector3<f64>,
            init: f64,
            intlen: f64,
            n_records: usize,
        ) -> Self {
            let records = (0..n_records)
                .map(|i| {
                    let radius = intlen / 2.0;
                    let mid = init + (i as f64 + 0.5) * intlen;
                    let centre = origin + velocity * mid;
                    let slope = velocity * radius;
                    EphemerisRecord {
                        mid,
                        radius,
                        x: vec![centre.x, slope.x, 0.0],
                        y: vec![centre.y, slope.y, 0.0],
                        z: vec![centre.z, slope.z, 0.0],
                    }
                })
                .collect();
            SyntheticSegment {
                target,
                center,
                init,
                intlen,
                records,
            }
        }
    }

    pub(crate) fn kernel(comment: &str, segments: &[SyntheticSegment]) -> Vec<u8> {
        const WORDS_PER_RECORD: usize = DAF_RECORD_LEN / 8;

        // record 1: file record, record 2: comments, record 3: summaries, data afterwards
        let mut data = Vec::new();
        let mut summaries = Vec::new();
        let mut next_addr = 3 * WORDS_PER_RECORD + 1;
        for segment in segments {
            let ncoeff = segment.records[0].x.len();
            let rsize = 2 + 3 * ncoeff;
            let initial_addr = next_addr;
            for record in &segment.records {
                data.extend(record_bytes(record));
            }
            for word in [
                segment.init,
                segment.intlen,
                rsize as f64,
                segment.records.len() as f64,
            ] {
                data.extend_from_slice(&word.to_le_bytes());
            }
            let final_addr = initial_addr + segment.records.len() * rsize + 4 - 1;
            next_addr = final_addr + 1;
            summaries.push(Summary {
                start_epoch: segment.init,
                end_epoch: segment.init + segment.intlen * segment.records.len() as f64,
                target: segment.target,
                center: segment.center,
                frame_id: 1,
                data_type: 2,
                initial_addr: initial_addr as i32,
                final_addr: final_addr as i32,
            });
        }

        let mut kernel = file_record(2, 6, 3, 3, next_addr as i32);

        let mut comment_record = comment.as_bytes().to_vec();
        comment_record.resize(DAF_RECORD_LEN, 0);
        kernel.extend(comment_record);

        let mut summary_record = Vec::with_capacity(DAF_RECORD_LEN);
        summary_record.extend_from_slice(&0.0f64.to_le_bytes());
        summary_record.extend_from_slice(&0.0f64.to_le_bytes());
        summary_record.extend_from_slice(&(summaries.len() as f64).to_le_bytes());
        for summary in &summaries {
            summary_record.extend(summary_bytes(summary));
        }
        summary_record.resize(DAF_RECORD_LEN, 0);
        kernel.extend(summary_record);

        kernel.extend(data);
        kernel
    }
}
