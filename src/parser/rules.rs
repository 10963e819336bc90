use super::ast::{Argument, ParsedStatement};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, multispace1},
    combinator::{map, map_res, opt, recognize, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

// --- Helpers ---

fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        |s: &str| s.to_string(),
    )(input)
}

fn usize_parser(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Wraps a parser so it tolerates surrounding whitespace.
fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// A parenthesised parameter list, nesting allowed. The contents are skipped.
fn parameters(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('('),
        many0(alt((is_not("()"), parameters))),
        char(')'),
    ))(input)
}

fn argument(input: &str) -> IResult<&str, Argument> {
    pair(
        identifier,
        opt(delimited(ws(char('[')), usize_parser, ws(char(']')))),
    )(input)
}

fn argument_list(input: &str) -> IResult<&str, Vec<Argument>> {
    separated_list1(ws(char(',')), argument)(input)
}

pub fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(tag("//"), take_while(|c| c != '\n')))(input)
}

// --- QASM Parsers ---

pub fn openqasm_version(input: &str) -> IResult<&str, String> {
    map(
        tuple((
            tag("OPENQASM"),
            multispace1,
            take_while1(|c: char| c != ';'),
            tag(";"),
        )),
        |(_, _, version, _): (&str, &str, &str, &str)| version.trim().to_string(),
    )(input)
}

pub fn include(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((
            tag("include"),
            multispace1,
            delimited(char('"'), take_while1(|c| c != '"'), char('"')),
            ws(tag(";")),
        )),
        |(_, _, file, _): (&str, &str, &str, &str)| ParsedStatement::Include(file.to_string()),
    )(input)
}

fn register<'a>(keyword: &'static str, input: &'a str) -> IResult<&'a str, (String, usize)> {
    map(
        tuple((
            tag(keyword),
            multispace1,
            identifier,
            delimited(ws(char('[')), usize_parser, ws(char(']'))),
            tag(";"),
        )),
        |(_, _, name, size, _)| (name, size),
    )(input)
}

pub fn qreg(input: &str) -> IResult<&str, ParsedStatement> {
    let (input, (name, size)) = register("qreg", input)?;
    Ok((input, ParsedStatement::QReg(name, size)))
}

pub fn creg(input: &str) -> IResult<&str, ParsedStatement> {
    let (input, (name, size)) = register("creg", input)?;
    Ok((input, ParsedStatement::CReg(name, size)))
}

pub fn measure(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((
            tag("measure"),
            multispace1,
            argument,
            ws(tag("->")),
            argument,
            ws(tag(";")),
        )),
        |(_, _, q, _, c, _)| ParsedStatement::Measure(q, c),
    )(input)
}

pub fn reset(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((tag("reset"), multispace1, argument, ws(tag(";")))),
        |(_, _, q, _)| ParsedStatement::Reset(q),
    )(input)
}

pub fn barrier(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((tag("barrier"), multispace1, argument_list, ws(tag(";")))),
        |(_, _, qubits, _)| ParsedStatement::Barrier(qubits),
    )(input)
}

/// `gate name(params) args { body }` and `opaque name args;` are recognised
/// so they can be reported, but their bodies are not interpreted.
pub fn gate_def(input: &str) -> IResult<&str, ParsedStatement> {
    alt((
        map(
            tuple((
                tag("gate"),
                multispace1,
                identifier,
                take_while(|c| c != '{'),
                delimited(char('{'), take_while(|c| c != '}'), char('}')),
            )),
            |(_, _, name, _, _)| ParsedStatement::GateDef(name),
        ),
        map(
            tuple((
                tag("opaque"),
                multispace1,
                identifier,
                take_while(|c| c != ';'),
                char(';'),
            )),
            |(_, _, name, _, _)| ParsedStatement::GateDef(name),
        ),
    ))(input)
}

pub fn gate_call(input: &str) -> IResult<&str, ParsedStatement> {
    let (input, name) = identifier(input)?;
    let (input, _) = opt(preceded(multispace0, parameters))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, qubits) = argument_list(input)?;
    let (input, _) = ws(tag(";"))(input)?;

    Ok((input, ParsedStatement::Gate(name, qubits)))
}
