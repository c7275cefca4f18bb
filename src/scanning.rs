use crate::error_handling::*;
use log::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    identifier, number, operator, punctuation
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
    /// Character offset of the token's first character.
    pub position: usize,
}

impl Token {
    fn new(content: &str, kind: TokenKind, position: usize) -> Self {
        Self{content: content.into(), kind, position}
    }
}

pub trait Scanner {
    fn get_current(&self) -> Option<Token>;
    fn advance(&mut self) -> Result<()>;
    /// Whether `character` comes right after the current token, with nothing in between.
    fn is_followed_by(&self, character: char) -> bool;
}

pub struct StringScanner<'a> {
    string: &'a str,
    token: Option<Token>,
    index: usize,
    /// Character offset matching the byte offset `index`.
    position: usize,
}

fn is_operator(character: char) -> bool {
    matches!(character, '+' | '-' | '*' | '/' | '^')
}

fn is_punctuation(character: char) -> bool {
    matches!(character, '(' | ')')
}

fn is_digit_or_dot(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

impl<'a> StringScanner<'a> {
    pub fn new(string: &'a str) -> Result<Self> {
        let mut source = Self {
            string,
            token: None,
            index: 0,
            position: 0,
        };
        source.advance()?;
        Ok(source)
    }

    /// Byte length of the run at the cursor whose characters satisfy `predicate`.
    fn count<P: Fn(char) -> bool>(&self, predicate: P) -> usize {
        self.view()
            .chars()
            .take_while(|&c| predicate(c))
            .map(char::len_utf8)
            .sum()
    }

    fn view(&self) -> &'a str {
        &self.string[self.index..]
    }

    /// Moves the cursor `bytes` forward, keeping the character offset in step.
    fn skip(&mut self, bytes: usize) {
        let end = self.index + bytes;
        self.position += self.string[self.index..end].chars().count();
        self.index = end;
    }

    fn skip_whitespace(&mut self) {
        self.skip(self.count(char::is_whitespace));
    }

    fn get_run<P: Fn(char) -> bool>(&self, predicate: P, kind: TokenKind) -> Token {
        let count = self.count(predicate);
        Token::new(&self.string[self.index..(self.index + count)], kind, self.position)
    }

    fn get_single(&self, character: char, kind: TokenKind) -> Token {
        let end = self.index + character.len_utf8();
        Token::new(&self.string[self.index..end], kind, self.position)
    }

    fn get_token(&self) -> Result<Option<Token>> {
        let Some(character) = self.view().chars().next() else {
            return Ok(None);
        };

        let token = if is_digit_or_dot(character) {
            self.get_run(is_digit_or_dot, TokenKind::number)
        } else if character.is_alphabetic() {
            self.get_run(char::is_alphabetic, TokenKind::identifier)
        } else if is_operator(character) {
            self.get_single(character, TokenKind::operator)
        } else if is_punctuation(character) {
            self.get_single(character, TokenKind::punctuation)
        } else {
            return Err(CalcError::invalid_character(character, self.position));
        };
        Ok(Some(token))
    }
}

impl<'a> Scanner for StringScanner<'a> {
    fn get_current(&self) -> Option<Token> {
        self.token.clone()
    }

    fn advance(&mut self) -> Result<()> {
        self.skip_whitespace();
        let token = self.get_token()?;
        if let Some(token) = &token {
            trace!("scanned {:?} '{}' at {}", token.kind, token.content, token.position);
            self.skip(token.content.len());
        }
        self.token = token;
        Ok(())
    }

    fn is_followed_by(&self, character: char) -> bool {
        self.view().starts_with(character)
    }
}
