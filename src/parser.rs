//! Textual grammars using nom.
//!
//! Parses the ISO-8601-style duration literal carried by `Interval` wire
//! values, plus the decimal and canonical UUID forms.
//!
//! # Duration Syntax
//!
//! ```text
//! -P1Y2M3W4DT5H6M7.25S
//! ┬┬───┬─── ┬──────────
//! ││   │    │
//! ││   │    └── Time run (H, M, S; S may carry up to 9 fraction digits)
//! ││   └── Date run (Y, M, W, D)
//! │└── Designator
//! └── Optional whole-literal negation
//! ```

use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    multi::{many0, many1},
    sequence::{pair, preceded, tuple},
};

use crate::error::{CodecError, CodecResult};
use crate::types::WireType;
use crate::value::Interval;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

/// One `<number><unit>` run of a duration literal.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Component<'a> {
    negative: bool,
    whole: &'a str,
    fraction: Option<&'a str>,
    unit: char,
}

/// Parse a complete duration literal.
pub fn parse_interval(input: &str) -> CodecResult<Interval> {
    let literal = input.trim();
    let fail = |reason: String| CodecError::parse(WireType::Interval, literal, reason);

    let (negated, date, time) = match interval_literal(literal) {
        Ok(("", parts)) => parts,
        Ok((remaining, _)) => {
            let reason = match remaining.chars().find(|c| c.is_ascii_alphabetic()) {
                Some(unit) if !"YMWDHST".contains(unit) => format!("unrecognized unit '{}'", unit),
                _ => format!("unexpected content '{}'", remaining),
            };
            return Err(fail(reason));
        }
        Err(_) => return Err(fail("expected a literal starting with 'P'".to_string())),
    };

    if date.is_empty() && time.is_empty() {
        return Err(fail("no numeric component".to_string()));
    }

    let overflow = || fail("component overflows its storage".to_string());

    let mut months: i32 = 0;
    let mut days: i32 = 0;
    let mut nanos: i64 = 0;

    for component in &date {
        let value = signed_whole(component).ok_or_else(overflow)?;
        let value = i32::try_from(value).map_err(|_| overflow())?;
        match component.unit {
            'Y' => {
                let delta = value.checked_mul(12).ok_or_else(overflow)?;
                months = months.checked_add(delta).ok_or_else(overflow)?;
            }
            'M' => months = months.checked_add(value).ok_or_else(overflow)?,
            'W' => {
                let delta = value.checked_mul(7).ok_or_else(overflow)?;
                days = days.checked_add(delta).ok_or_else(overflow)?;
            }
            _ => days = days.checked_add(value).ok_or_else(overflow)?,
        }
    }

    for component in &time {
        let unit_nanos = match component.unit {
            'H' => NANOS_PER_HOUR,
            'M' => NANOS_PER_MINUTE,
            _ => NANOS_PER_SECOND,
        };
        let fraction = component.fraction.unwrap_or("");
        if fraction.len() > 9 {
            return Err(fail("more than 9 fractional digits".to_string()));
        }
        let delta = component_nanos(component, fraction, unit_nanos).ok_or_else(overflow)?;
        nanos = nanos.checked_add(delta).ok_or_else(overflow)?;
    }

    if negated {
        months = months.checked_neg().ok_or_else(overflow)?;
        days = days.checked_neg().ok_or_else(overflow)?;
        nanos = nanos.checked_neg().ok_or_else(overflow)?;
    }

    Ok(Interval::new(months, days, nanos))
}

/// Validate a decimal literal such as `-12.50`, `.5` or `6.02e23`.
pub fn parse_decimal(input: &str) -> CodecResult<&str> {
    let literal = input.trim();
    match decimal_literal(literal) {
        Ok(("", matched)) => Ok(matched),
        _ => Err(CodecError::parse(
            WireType::Decimal,
            literal,
            "expected digits with an optional sign, fraction and exponent",
        )),
    }
}

/// Whether the input is a UUID in canonical 8-4-4-4-12 hyphenated form.
pub fn is_canonical_uuid(input: &str) -> bool {
    matches!(uuid_literal(input), Ok(("", _)))
}

/// Parse the whole duration literal into its sign and component runs.
fn interval_literal(input: &str) -> IResult<&str, (bool, Vec<Component<'_>>, Vec<Component<'_>>)> {
    let (input, negated) = opt(char('-'))(input)?;
    let (input, _) = char('P')(input)?;
    let (input, date) = many0(date_component)(input)?;
    let (input, time) = opt(preceded(char('T'), many1(time_component)))(input)?;

    Ok((input, (negated.is_some(), date, time.unwrap_or_default())))
}

/// Parse an optionally signed integer followed by a date unit.
fn date_component(input: &str) -> IResult<&str, Component<'_>> {
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, whole) = digit1(input)?;
    let (input, unit) = one_of("YMWD")(input)?;

    Ok((
        input,
        Component {
            negative: sign == Some('-'),
            whole,
            fraction: None,
            unit,
        },
    ))
}

/// Parse an optionally signed decimal followed by a time unit.
fn time_component(input: &str) -> IResult<&str, Component<'_>> {
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, whole) = digit1(input)?;
    let (input, fraction) = opt(preceded(char('.'), digit1))(input)?;
    let (input, unit) = one_of("HMS")(input)?;

    Ok((
        input,
        Component {
            negative: sign == Some('-'),
            whole,
            fraction,
            unit,
        },
    ))
}

fn signed_whole(component: &Component<'_>) -> Option<i64> {
    let whole: i64 = component.whole.parse().ok()?;
    Some(if component.negative { -whole } else { whole })
}

/// Exact nanoseconds of `<whole>.<fraction>` units, sign applied.
fn component_nanos(component: &Component<'_>, fraction: &str, unit_nanos: i64) -> Option<i64> {
    let whole: i64 = component.whole.parse().ok()?;
    let mut total = whole.checked_mul(unit_nanos)?;
    if !fraction.is_empty() {
        let padded: i64 = format!("{:0<9}", fraction).parse().ok()?;
        total = total.checked_add(padded.checked_mul(unit_nanos / NANOS_PER_SECOND)?)?;
    }
    Some(if component.negative { -total } else { total })
}

fn decimal_literal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn uuid_literal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        hex_run(8),
        char('-'),
        hex_run(4),
        char('-'),
        hex_run(4),
        char('-'),
        hex_run(4),
        char('-'),
        hex_run(12),
    )))(input)
}

fn hex_run<'a>(n: usize) -> impl Fn(&'a str) -> IResult<&'a str, &'a str> {
    take_while_m_n(n, n, |c: char| c.is_ascii_hexdigit())
}
