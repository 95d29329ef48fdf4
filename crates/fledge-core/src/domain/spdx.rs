//! SPDX license expression checking.
//!
//! Syntax only: identifiers are not looked up in the SPDX license list, so
//! `UNLICENSED` and private `LicenseRef-` identifiers pass. Operators are
//! accepted in any case. npm's `SEE LICENSE IN <file>` form is allowed as a
//! whole.

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Word(&'a str),
}

/// Fails with [`DomainError::InvalidLicense`] unless `expression` is a
/// well-formed SPDX license expression.
pub fn check_expression(expression: &str) -> Result<(), DomainError> {
    let trimmed = expression.trim();
    if trimmed.starts_with("SEE LICENSE IN ") {
        return Ok(());
    }

    let mut parser = Parser {
        tokens: tokenize(trimmed),
        position: 0,
    };
    parser
        .document()
        .map_err(|reason| DomainError::InvalidLicense {
            expression: expression.to_string(),
            reason,
        })
}

fn tokenize(expression: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in expression.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token::Word(&expression[s..i]));
            }
            match c {
                '(' => tokens.push(Token::Open),
                ')' => tokens.push(Token::Close),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Word(&expression[s..]));
    }
    tokens
}

/// Recursive descent over
/// `expr := and (OR and)*`, `and := term (AND term)*`,
/// `term := '(' expr ')' | id ['+'] [WITH id]`.
struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn document(&mut self) -> Result<(), String> {
        if self.tokens.is_empty() {
            return Err("expression is empty".into());
        }
        self.expression()?;
        match self.peek() {
            None => Ok(()),
            Some(Token::Close) => Err("unbalanced parentheses".into()),
            Some(Token::Open) => Err("unexpected '('".into()),
            Some(Token::Word(word)) => Err(format!("unexpected '{word}'")),
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn eat_operator(&mut self, operator: &str) -> bool {
        let found = matches!(self.peek(), Some(Token::Word(w)) if w.eq_ignore_ascii_case(operator));
        if found {
            self.position += 1;
        }
        found
    }

    fn expression(&mut self) -> Result<(), String> {
        self.conjunction()?;
        while self.eat_operator("OR") {
            self.conjunction()?;
        }
        Ok(())
    }

    fn conjunction(&mut self) -> Result<(), String> {
        self.term()?;
        while self.eat_operator("AND") {
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Result<(), String> {
        match self.advance() {
            Some(Token::Open) => {
                self.expression()?;
                match self.advance() {
                    Some(Token::Close) => Ok(()),
                    _ => Err("unbalanced parentheses".into()),
                }
            }
            Some(Token::Close) => Err("unexpected ')'".into()),
            Some(Token::Word(word)) if is_operator(word) => {
                Err(format!("expected a license identifier, found '{word}'"))
            }
            Some(Token::Word(word)) => {
                license_id(word)?;
                if self.eat_operator("WITH") {
                    match self.advance() {
                        Some(Token::Word(exception))
                            if !is_operator(exception) && is_idstring(exception) => {}
                        _ => return Err("expected an exception identifier after 'WITH'".into()),
                    }
                }
                Ok(())
            }
            None => Err("expression ends where a license identifier is expected".into()),
        }
    }
}

fn is_operator(word: &str) -> bool {
    ["AND", "OR", "WITH"]
        .iter()
        .any(|op| word.eq_ignore_ascii_case(op))
}

fn license_id(word: &str) -> Result<(), String> {
    let id = word.strip_suffix('+').unwrap_or(word);
    let valid = match id.split_once(':') {
        Some((document, license)) => {
            document.starts_with("DocumentRef-")
                && license.starts_with("LicenseRef-")
                && is_idstring(document)
                && is_idstring(license)
        }
        None => is_idstring(id),
    };
    if valid {
        Ok(())
    } else {
        Err(format!("'{word}' is not a valid license identifier"))
    }
}

fn is_idstring(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}
