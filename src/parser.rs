use crate::error::DraftError;
use crate::srt::Cue;
use crate::timecode::millis_to_micros;

use anyhow::Context;
use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::character::complete::{digit1, line_ending, multispace0, multispace1, space0, space1};
use nom::combinator::{map_res, opt};
use nom::error::{convert_error, ErrorKind, VerboseError};
use nom::multi::many_till;
use nom::sequence::terminated;
use nom::{branch::alt, error_position, Err, IResult};

/// Parses SubRip text into cues, numbered in file order.
pub fn parse(input: &str) -> Result<Vec<Cue>, anyhow::Error> {
    match srt_file(input) {
        Ok((_, cues)) => Ok(cues),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => {
            let conv = convert_error(input, err);
            Err(DraftError::Parse(conv)).context("Failed to parse SRT file")
        }
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

fn optional_bom(input: &str) -> IResult<&str, Option<&str>, VerboseError<&str>> {
    opt(tag("\u{FEFF}"))(input)
}

fn srt_file(input: &str) -> IResult<&str, Vec<Cue>, VerboseError<&str>> {
    let (input, _) = optional_bom(input)?;
    let (input, cues) = all_cues(input)?;
    let (input, _) = end_of_file(input)?;
    Ok((input, cues))
}

fn all_cues(input: &str) -> IResult<&str, Vec<Cue>, VerboseError<&str>> {
    let mut parsed = Vec::new();
    let mut input = input;
    loop {
        match cue(input, parsed.len() + 1) {
            Ok((rem_input, cue)) => {
                parsed.push(cue);
                input = rem_input;
                let (rem_input, _) = multispace0(input)?;
                input = rem_input;
            }
            Err(err) => {
                if input.is_empty() {
                    return Ok((input, parsed));
                } else {
                    return Err(err);
                }
            }
        }
    }
}

fn cue(input: &str, index: usize) -> IResult<&str, Cue, VerboseError<&str>> {
    let (input, _) = multispace0(input)?;
    let (input, _) = terminated(seq_num, multispace1)(input)?;
    let (input, (start, end)) = terminated(show_hide, line_ending)(input)?;
    let (input, text) = cue_text(input)?;

    Ok((
        input,
        Cue {
            index,
            start: millis_to_micros(start),
            end: millis_to_micros(end),
            text: text.join("\n"),
        },
    ))
}

fn end_of_file(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    if input.is_empty() {
        Ok((input, input))
    } else {
        std::result::Result::Err(Err::Error(error_position!(input, ErrorKind::Eof)))
    }
}

fn cue_text(input: &str) -> IResult<&str, Vec<&str>, VerboseError<&str>> {
    let line = terminated(
        take_while1(|c: char| c != '\n' && c != '\r'),
        alt((line_ending, end_of_file)),
    );

    let (input, (lines, _)) = many_till(line, alt((line_ending, end_of_file)))(input)?;

    Ok((input, lines))
}

fn show_hide(input: &str) -> IResult<&str, (i64, i64), VerboseError<&str>> {
    let (input, start) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, end) = timestamp(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (start, end)))
}

/// Which side a short timestamp field is padded on.
#[derive(Debug, Clone, Copy)]
enum Pad {
    /// `1:5:3` reads as `01:05:03`.
    Left,
    /// `,2` reads as `,200`.
    Right,
}

/// Up to `width` digits, zero-padded to `width` before being read. An empty
/// field reads as zero.
fn field<'a>(
    width: usize,
    pad: Pad,
) -> impl FnMut(&'a str) -> IResult<&'a str, i64, VerboseError<&'a str>> {
    map_res(
        take_while_m_n(0, width, |c: char| c.is_ascii_digit()),
        move |digits: &str| match pad {
            Pad::Left => format!("{:0>width$}", digits, width = width).parse::<i64>(),
            Pad::Right => format!("{:0<width$}", digits, width = width).parse::<i64>(),
        },
    )
}

/// A timestamp in milliseconds. Real-world files drop leading zeros and
/// shorten the millisecond field, so every field accepts fewer digits.
fn timestamp(input: &str) -> IResult<&str, i64, VerboseError<&str>> {
    let (input, hours) = field(2, Pad::Left)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = field(2, Pad::Left)(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = field(2, Pad::Left)(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = field(3, Pad::Right)(input)?;

    Ok((
        input,
        ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis,
    ))
}

fn seq_num(input: &str) -> IResult<&str, usize, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}
