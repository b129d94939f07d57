//! Parser for declared member types such as `Record<string, Item[]> | null`.

use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map, opt, recognize};
use nom::error::ParseError;
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use tracing::{instrument, trace};

use crate::domain::entities::{TypeExpr, KEYWORD_TYPES};
use crate::domain::error::DomainError;

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading and
/// trailing whitespace, returning the output of `inner`.
fn ws<'a, F, O, E: ParseError<&'a str>>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Parser<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.'),
    ))(input)
}

// A | B | C, with an optional leading bar
fn union_expr(input: &str) -> IResult<&str, TypeExpr> {
    map(
        preceded(
            opt(ws(char('|'))),
            separated_list1(ws(char('|')), postfix_expr),
        ),
        |mut variants| {
            if variants.len() == 1 {
                variants.remove(0)
            } else {
                TypeExpr::Union(variants)
            }
        },
    )(input)
}

fn array_suffix(input: &str) -> IResult<&str, (char, char)> {
    ws(pair(char('['), ws(char(']'))))(input)
}

// T, T[], T[][]
fn postfix_expr(input: &str) -> IResult<&str, TypeExpr> {
    let (input, base) = ws(primary_expr)(input)?;
    let (input, dims) = many0(array_suffix)(input)?;
    let expr = dims
        .into_iter()
        .fold(base, |acc, _| TypeExpr::Array(Box::new(acc)));
    Ok((input, expr))
}

fn primary_expr(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        delimited(char('('), ws(union_expr), char(')')),
        named_expr,
    ))(input)
}

// Name, optionally followed by generic arguments
fn named_expr(input: &str) -> IResult<&str, TypeExpr> {
    let (input, name) = identifier(input)?;
    let (input, args) = opt(delimited(
        ws(char('<')),
        separated_list1(ws(char(',')), union_expr),
        ws(char('>')),
    ))(input)?;
    Ok((input, named_type(name, args.unwrap_or_default())))
}

fn named_type(name: &str, mut args: Vec<TypeExpr>) -> TypeExpr {
    match (name, args.len()) {
        ("Array" | "ReadonlyArray", 1) => TypeExpr::Array(Box::new(args.remove(0))),
        ("Record", 2) => {
            let value = args.remove(1);
            let key = args.remove(0);
            TypeExpr::Map {
                key: Box::new(key),
                value: Box::new(value),
            }
        }
        (name, 0) if KEYWORD_TYPES.contains(&name) => TypeExpr::Keyword(name.to_string()),
        // Other generics are identified by their base name
        (name, _) => TypeExpr::Reference(name.to_string()),
    }
}

/// Parses a declared type.
///
/// Supports keywords (`string`), references (`Address`), arrays (`T[]`,
/// `Array<T>`), records (`Record<K, V>`), unions (`A | B`) and parentheses.
#[instrument(level = "trace")]
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, DomainError> {
    let result = all_consuming(ws(union_expr))(input)
        .map(|(_, expr)| expr)
        .map_err(|e| DomainError::InvalidTypeExpr {
            input: input.to_string(),
            message: e.to_string(),
        });
    trace!("parsed {:?} -> {:?}", input, result);
    result
}
