//! Grammar for a single requirement declaration:
//!
//! ```text
//! name [ "[" extras "]" ] ( "@" url | versions | "(" versions ")" )? [ ";" marker ]
//! ```

use crate::error::RequirementError;
use crate::marker;
use crate::scanner::Scanner;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Compatible,
    ArbitraryEqual,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
}

impl Operator {
    // Longest tokens first so `===` is never read as `==`.
    const BY_LENGTH: [Operator; 8] = [
        Operator::ArbitraryEqual,
        Operator::Compatible,
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::Less,
        Operator::Greater,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Compatible => "~=",
            Operator::ArbitraryEqual => "===",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::Greater => ">",
        }
    }
}

/// One `<op><version>` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Specifier {
    pub op: Operator,
    pub version: String,
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// A successfully parsed requirement line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written.
    pub name: String,
    pub extras: BTreeSet<String>,
    pub specifiers: Vec<Specifier>,
    pub url: Option<String>,
    pub marker: Option<String>,
}

impl Requirement {
    /// Canonical specifier text: clauses sorted and comma-joined, no whitespace.
    ///
    /// `>=1.0, <2.0` and `<2.0,>=1.0` both render as `<2.0,>=1.0`.
    pub fn specifier_string(&self) -> String {
        let mut clauses: Vec<String> = self.specifiers.iter().map(ToString::to_string).collect();
        clauses.sort();
        clauses.join(",")
    }
}

pub fn parse_requirement(line: &str) -> Result<Requirement, RequirementError> {
    let mut s = Scanner::new(line);
    s.skip_ws();

    let name = parse_name(&mut s)?;
    s.skip_ws();

    let mut extras = BTreeSet::new();
    if s.peek() == Some('[') {
        s.bump();
        extras = parse_extras(&mut s)?;
        s.skip_ws();
    }

    let mut specifiers = Vec::new();
    let mut url = None;
    match s.peek() {
        Some('@') => {
            s.bump();
            url = Some(parse_url(&mut s)?);
        }
        Some('(') => {
            s.bump();
            specifiers = parse_specifiers(&mut s)?;
            s.skip_ws();
            if s.bump() != Some(')') {
                return Err(RequirementError::UnterminatedParen);
            }
        }
        Some(c) if is_operator_start(c) => {
            specifiers = parse_specifiers(&mut s)?;
        }
        _ => {}
    }
    s.skip_ws();

    let mut marker = None;
    if s.peek() == Some(';') {
        s.bump();
        let text = s.take_rest();
        let text = text.trim();
        marker::validate(text)?;
        marker = Some(text.to_string());
    }

    s.skip_ws();
    if let Some(found) = s.peek() {
        return Err(RequirementError::TrailingInput {
            found,
            col: s.col(),
        });
    }

    Ok(Requirement {
        name,
        extras,
        specifiers,
        url,
        marker,
    })
}

fn parse_name(s: &mut Scanner) -> Result<String, RequirementError> {
    if !s.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return Err(RequirementError::EmptyName { col: s.col() });
    }
    let name = s.take_while(is_identifier_char);
    if !is_valid_identifier(&name) {
        return Err(RequirementError::InvalidName { name });
    }
    Ok(name)
}

fn parse_extras(s: &mut Scanner) -> Result<BTreeSet<String>, RequirementError> {
    let mut extras = BTreeSet::new();
    loop {
        s.skip_ws();
        match s.peek() {
            None => return Err(RequirementError::UnterminatedExtras),
            Some(']') => {
                s.bump();
                return Ok(extras);
            }
            Some(_) => {}
        }

        let extra = s.take_while(is_identifier_char);
        if !is_valid_identifier(&extra) {
            let found = if extra.is_empty() {
                s.peek().map(String::from).unwrap_or_default()
            } else {
                extra
            };
            return Err(RequirementError::InvalidExtra { extra: found });
        }
        extras.insert(extra);

        s.skip_ws();
        match s.bump() {
            Some(',') => continue,
            Some(']') => return Ok(extras),
            None => return Err(RequirementError::UnterminatedExtras),
            Some(c) => {
                return Err(RequirementError::InvalidExtra {
                    extra: c.to_string(),
                });
            }
        }
    }
}

fn parse_url(s: &mut Scanner) -> Result<String, RequirementError> {
    s.skip_ws();
    let url = s.take_while(|c| !c.is_whitespace());
    if url.is_empty() || !url.contains(':') {
        return Err(RequirementError::InvalidUrl { url });
    }
    Ok(url)
}

fn parse_specifiers(s: &mut Scanner) -> Result<Vec<Specifier>, RequirementError> {
    let mut out = Vec::new();
    loop {
        s.skip_ws();
        // `name ()` is an explicit empty list.
        if out.is_empty() && s.peek() == Some(')') {
            return Ok(out);
        }

        let Some(op) = Operator::BY_LENGTH
            .into_iter()
            .find(|op| s.starts_with(op.as_str()))
        else {
            let rest = s.take_while(|c| c != ',' && c != ';' && c != ')');
            return Err(RequirementError::InvalidSpecifier {
                spec: rest.trim().to_string(),
                reason: "expected a comparison operator",
            });
        };
        s.advance(op.as_str().chars().count());
        s.skip_ws();

        let col = s.col();
        let version = if op == Operator::ArbitraryEqual {
            s.take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ';' | ')'))
        } else {
            s.take_while(is_version_char)
        };
        if version.is_empty() {
            return Err(RequirementError::MissingVersion {
                op: op.as_str().to_string(),
                col,
            });
        }
        validate_version(op, &version)?;
        out.push(Specifier { op, version });

        s.skip_ws();
        if s.peek() == Some(',') {
            s.bump();
            continue;
        }
        return Ok(out);
    }
}

fn validate_version(op: Operator, version: &str) -> Result<(), RequirementError> {
    if op == Operator::ArbitraryEqual {
        return Ok(());
    }
    let invalid = |reason: &'static str| RequirementError::InvalidSpecifier {
        spec: format!("{}{}", op.as_str(), version),
        reason,
    };

    let body = version.strip_prefix(['v', 'V']).unwrap_or(version);
    let body = match body.split_once('!') {
        Some((epoch, rest)) if !epoch.is_empty() && epoch.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        Some(_) => return Err(invalid("malformed epoch")),
        None => body,
    };

    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("version must start with a digit"));
    }
    if body.contains("..") || body.ends_with('.') {
        return Err(invalid("malformed release segment"));
    }

    let wildcard_ok = matches!(op, Operator::Equal | Operator::NotEqual);
    if body.contains('*') && !(wildcard_ok && body.ends_with(".*") && body.matches('*').count() == 1)
    {
        return Err(invalid(
            "wildcards are only allowed as a trailing `.*` with == or !=",
        ));
    }
    if body.contains('+') && !wildcard_ok {
        return Err(invalid("local versions are only allowed with == or !="));
    }

    if op == Operator::Compatible {
        let release: String = body
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if !release.trim_end_matches('.').contains('.') {
            return Err(invalid("`~=` needs at least two release segments"));
        }
    }

    Ok(())
}

fn is_operator_start(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!' | '~')
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '*' | '+' | '!' | '_' | '-')
}

fn is_valid_identifier(s: &str) -> bool {
    let starts = s.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends = s.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    starts && ends
}
