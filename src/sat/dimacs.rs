#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A reader for the DIMACS CNF file format.
//!
//! The format is line oriented: `c` lines are comments, a single
//! `p cnf <num_vars> <num_clauses>` problem line precedes the clause data,
//! and each clause is a whitespace-separated run of nonzero signed integer
//! literals terminated by a `0` token. A clause may span several lines. A
//! line starting with `%` ends the clause section; competition files use it
//! as an end-of-data marker.
//!
//! The reader is strict: a missing or malformed problem line, a format token
//! other than `cnf`, non-positive declared counts, a non-integer literal
//! token, an unterminated final clause or a clause count that differs from
//! the declared one are all reported as errors.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::error::{Error, Result};
use crate::sat::literal::Literal;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses DIMACS CNF data from a string.
///
/// # Errors
///
/// Returns any of the parse errors described in [`Error`].
pub fn parse_dimacs_text<L: Literal, S: LiteralStorage<L>>(text: &str) -> Result<Cnf<L, S>> {
    parse_dimacs(io::Cursor::new(text))
}

/// Parses DIMACS CNF data from a buffered reader into a clause database.
///
/// # Errors
///
/// Returns any of the parse errors described in [`Error`].
pub fn parse_dimacs<R: BufRead, L: Literal, S: LiteralStorage<L>>(reader: R) -> Result<Cnf<L, S>> {
    let mut declared: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }

        let mut tokens = line.split_whitespace();
        if line.starts_with('p') {
            if declared.is_some() {
                return Err(Error::MalformedProblemLine(
                    "duplicate problem line".to_string(),
                ));
            }
            declared = Some(parse_problem_line(tokens)?);
            continue;
        }

        if declared.is_none() {
            return Err(Error::MissingProblemLine);
        }

        tokens.try_for_each(|token| {
            let literal: i32 = token
                .parse()
                .map_err(|_| Error::InvalidLiteral(token.to_string()))?;
            if literal == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                current.push(literal);
            }
            Ok::<(), Error>(())
        })?;
    }

    let Some((_, num_clauses)) = declared else {
        return Err(Error::MissingProblemLine);
    };
    if !current.is_empty() {
        return Err(Error::UnterminatedClause);
    }
    if clauses.len() != num_clauses {
        return Err(Error::ClauseCountMismatch {
            expected: num_clauses,
            found: clauses.len(),
        });
    }

    Ok(Cnf::new(clauses))
}

fn parse_problem_line<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<(usize, usize)> {
    // The leading "p" token itself.
    tokens.next();

    let format = tokens
        .next()
        .ok_or_else(|| Error::MalformedProblemLine("missing format token".to_string()))?;
    if format != "cnf" {
        return Err(Error::UnsupportedFormat(format.to_string()));
    }

    let mut count = |name: &str| -> Result<usize> {
        tokens
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| Error::MalformedProblemLine(format!("missing or invalid {name} count")))
    };
    let num_vars = count("variable")?;
    let num_clauses = count("clause")?;

    if num_vars == 0 || num_clauses == 0 {
        return Err(Error::NonPositiveCounts {
            num_vars,
            num_clauses,
        });
    }

    Ok((num_vars, num_clauses))
}

/// Parses the DIMACS CNF file at `path`.
///
/// # Errors
///
/// Returns [`Error::FileOpen`] when the file cannot be opened, and any of
/// the parse errors described in [`Error`] otherwise.
pub fn parse_file<L: Literal, S: LiteralStorage<L>>(path: &Path) -> Result<Cnf<L, S>> {
    let file = std::fs::File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dimacs(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;
    use smallvec::SmallVec;

    type TestCnf = Cnf<PackedLiteral, SmallVec<[PackedLiteral; 8]>>;

    fn parse(text: &str) -> Result<TestCnf> {
        parse_dimacs_text(text)
    }

    #[test]
    fn test_parse_simple() {
        let cnf = parse(
            "c This is a comment\n\
             p cnf 3 2\n\
             1 -2 0\n\
             2 3 0\n",
        )
        .expect("should parse");

        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf[0].len(), 2);
    }

    #[test]
    fn test_clause_spanning_lines() {
        let cnf = parse("p cnf 3 1\n1 2\n3 0\n").expect("should parse");
        assert_eq!(cnf.len(), 1);
        assert_eq!(cnf[0].len(), 3);
    }

    #[test]
    fn test_multiple_clauses_per_line() {
        let cnf = parse("p cnf 2 2\n1 0 -2 0\n").expect("should parse");
        assert_eq!(cnf.len(), 2);
    }

    #[test]
    fn test_comments_between_clauses() {
        let cnf = parse("p cnf 2 2\n1 0\nc mid-file comment\n-2 0\n").expect("should parse");
        assert_eq!(cnf.len(), 2);
    }

    #[test]
    fn test_percent_ends_data() {
        let cnf = parse("p cnf 2 2\n1 0\n-2 0\n%\nnot dimacs at all\n").expect("should parse");
        assert_eq!(cnf.len(), 2);
    }

    #[test]
    fn test_missing_problem_line() {
        assert!(matches!(
            parse("1 -2 0\n"),
            Err(Error::MissingProblemLine)
        ));
        assert!(matches!(
            parse("c only comments\n"),
            Err(Error::MissingProblemLine)
        ));
    }

    #[test]
    fn test_wrong_format_token() {
        assert!(matches!(
            parse("p sat 3 2\n"),
            Err(Error::UnsupportedFormat(f)) if f == "sat"
        ));
    }

    #[test]
    fn test_non_positive_counts() {
        assert!(matches!(
            parse("p cnf 0 2\n"),
            Err(Error::NonPositiveCounts { .. })
        ));
        assert!(matches!(
            parse("p cnf 3 0\n"),
            Err(Error::NonPositiveCounts { .. })
        ));
    }

    #[test]
    fn test_malformed_problem_line() {
        assert!(matches!(
            parse("p cnf three 2\n"),
            Err(Error::MalformedProblemLine(_))
        ));
        assert!(matches!(
            parse("p cnf 3\n"),
            Err(Error::MalformedProblemLine(_))
        ));
    }

    #[test]
    fn test_invalid_literal() {
        assert!(matches!(
            parse("p cnf 3 1\n1 abc 0\n"),
            Err(Error::InvalidLiteral(t)) if t == "abc"
        ));
    }

    #[test]
    fn test_unterminated_clause() {
        assert!(matches!(
            parse("p cnf 3 1\n1 2 3\n"),
            Err(Error::UnterminatedClause)
        ));
    }

    #[test]
    fn test_clause_count_mismatch() {
        assert!(matches!(
            parse("p cnf 3 2\n1 2 0\n"),
            Err(Error::ClauseCountMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_empty_clause_preserved() {
        let cnf = parse("p cnf 2 2\n1 2 0\n0\n").expect("should parse");
        assert_eq!(cnf.len(), 2);
        assert!(cnf[1].is_empty());
    }
}
