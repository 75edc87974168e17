//! Environment marker validation.
//!
//! ```text
//! or_expr   = and_expr ( "or" and_expr )*
//! and_expr  = atom ( "and" atom )*
//! atom      = "(" or_expr ")" | value op value
//! value     = environment variable | quoted string
//! op        = "<" | "<=" | "!=" | "==" | ">=" | ">" | "~=" | "===" | "in" | "not in"
//! ```
//!
//! Markers are only validated here; evaluating them against an interpreter is out of scope.

use crate::error::RequirementError;

const ENV_VARS: &[&str] = &[
    "python_version",
    "python_full_version",
    "os_name",
    "sys_platform",
    "platform_release",
    "platform_system",
    "platform_version",
    "platform_machine",
    "platform_python_implementation",
    "implementation_name",
    "implementation_version",
    "extra",
    // Legacy dotted spellings.
    "os.name",
    "sys.platform",
    "platform.version",
    "platform.machine",
    "platform.python_implementation",
    "python_implementation",
];

const COMPARISONS: &[&str] = &["===", "~=", "==", "!=", "<=", ">=", "<", ">"];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    Str,
    Ident(String),
    Op,
}

pub(crate) fn validate(text: &str) -> Result<(), RequirementError> {
    if text.is_empty() {
        return Err(invalid("empty marker after `;`"));
    }
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.or_expr()?;
    match parser.tokens.get(parser.pos) {
        None => Ok(()),
        Some(tok) => Err(invalid(format!("unexpected {} after expression", describe(tok)))),
    }
}

fn invalid(reason: impl Into<String>) -> RequirementError {
    RequirementError::InvalidMarker {
        reason: reason.into(),
    }
}

fn describe(tok: &Token) -> String {
    match tok {
        Token::LParen => "`(`".to_string(),
        Token::RParen => "`)`".to_string(),
        Token::Str => "string".to_string(),
        Token::Ident(name) => format!("`{name}`"),
        Token::Op => "operator".to_string(),
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, RequirementError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            '(' => {
                out.push(Token::LParen);
                i += 1;
            }
            ')' => {
                out.push(Token::RParen);
                i += 1;
            }
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&q| q == c)
                    .ok_or_else(|| invalid("unterminated string"))?;
                out.push(Token::Str);
                i += close + 2;
            }
            c if c.is_ascii_alphanumeric() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || matches!(chars[i], '_' | '.')) {
                    i += 1;
                }
                out.push(Token::Ident(chars[start..i].iter().collect()));
            }
            _ => {
                let rest: String = chars[i..].iter().take(3).collect();
                let op = COMPARISONS
                    .iter()
                    .find(|op| rest.starts_with(*op))
                    .ok_or_else(|| invalid(format!("unexpected character `{c}`")))?;
                out.push(Token::Op);
                i += op.len();
            }
        }
    }

    Ok(out)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn peek_keyword(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(w)) if w == word)
    }

    fn or_expr(&mut self) -> Result<(), RequirementError> {
        self.and_expr()?;
        while self.peek_keyword("or") {
            self.pos += 1;
            self.and_expr()?;
        }
        Ok(())
    }

    fn and_expr(&mut self) -> Result<(), RequirementError> {
        self.atom()?;
        while self.peek_keyword("and") {
            self.pos += 1;
            self.atom()?;
        }
        Ok(())
    }

    fn atom(&mut self) -> Result<(), RequirementError> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            self.or_expr()?;
            return match self.next() {
                Some(Token::RParen) => Ok(()),
                _ => Err(invalid("expected `)`")),
            };
        }
        self.value()?;
        self.operator()?;
        self.value()
    }

    fn value(&mut self) -> Result<(), RequirementError> {
        match self.next() {
            Some(Token::Str) => Ok(()),
            Some(Token::Ident(name)) if ENV_VARS.contains(&name.as_str()) => Ok(()),
            Some(Token::Ident(name)) => Err(invalid(format!(
                "unknown environment variable `{name}`"
            ))),
            Some(tok) => Err(invalid(format!(
                "expected a variable or quoted string, found {}",
                describe(&tok)
            ))),
            None => Err(invalid("expected a variable or quoted string, found end of marker")),
        }
    }

    fn operator(&mut self) -> Result<(), RequirementError> {
        match self.next() {
            Some(Token::Op) => Ok(()),
            Some(Token::Ident(w)) if w == "in" => Ok(()),
            Some(Token::Ident(w)) if w == "not" => match self.next() {
                Some(Token::Ident(w)) if w == "in" => Ok(()),
                _ => Err(invalid("expected `in` after `not`")),
            },
            _ => Err(invalid("expected a comparison operator")),
        }
    }
}
