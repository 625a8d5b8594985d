//! Text header embedded in the comment area of JPL planetary kernels.
//!
//! JPL kernels usually carry a line `JPL planetary and lunar ephemeris DE440`
//! and a coverage line `JD   2287184.5   to   JD   2688976.5`. Both are
//! located anywhere in the comment text; the coverage line is optional.
use std::fmt;

use nom::{
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{space0, space1},
    combinator::opt,
    number::complete::double,
    IResult, Parser,
};

#[derive(Debug, PartialEq, Clone)]
pub struct JPLEphemHeader {
    pub version: String,
    pub start_jd: Option<f64>,
    pub end_jd: Option<f64>,
}

impl JPLEphemHeader {
    fn parse_version(input: &str) -> IResult<&str, &str> {
        let (input, _) = take_until("JPL planetary and lunar ephemeris")(input)?;
        let (input, _) = tag("JPL planetary and lunar ephemeris")(input)?;
        let (input, _) = space1(input)?;
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
    }

    fn parse_jd_range(input: &str) -> IResult<&str, (f64, f64)> {
        let (input, _) = take_until("JD")(input)?;
        let (input, (_, _, start_jd, _, _, _, _, _, end_jd)) = (
            tag("JD"),
            space0,
            double,
            space1,
            tag("to"),
            space1,
            tag("JD"),
            space0,
            double,
        )
            .parse(input)?;
        Ok((input, (start_jd, end_jd)))
    }

    /// Parse the header out of the kernel comment text.
    pub fn parse(input: &str) -> IResult<&str, Self> {
        let (input, version) = Self::parse_version(input)?;
        let (input, range) = opt(Self::parse_jd_range).parse(input)?;
        Ok((
            input,
            JPLEphemHeader {
                version: version.to_string(),
                start_jd: range.map(|(start, _)| start),
                end_jd: range.map(|(_, end)| end),
            },
        ))
    }
}

impl fmt::Display for JPLEphemHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JPL ephemeris {}", self.version)?;
        if let (Some(start), Some(end)) = (self.start_jd, self.end_jd) {
            write!(f, " (JD {start:.1} to JD {end:.1})")?;
        }
        Ok(())
    }
}
