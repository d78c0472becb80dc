//! Grammars and token helpers shared by engine tests.

use indoc::indoc;
use pgen_core::{DfaStateDef, Grammar, GrammarBuilder, Position, Token, TokenType};

pub const ENDMARKER: TokenType = 0;
pub const NAME: TokenType = 1;
pub const NUMBER: TokenType = 2;
pub const NEWLINE: TokenType = 4;
pub const LPAR: TokenType = 7;
pub const RPAR: TokenType = 8;
pub const PLUS: TokenType = 14;
pub const STAR: TokenType = 16;
/// Not declared by any test grammar.
pub const UNKNOWN: TokenType = 99;

/// `S: 'a' B`, `B: 'b' | 'b' 'b'`
pub fn toy() -> Grammar {
    GrammarBuilder::new("toy")
        .name_token(NAME)
        .token("ENDMARKER", ENDMARKER)
        .token("NAME", NAME)
        .rule(
            "S",
            [
                DfaStateDef::new().arc("'a'", 1),
                DfaStateDef::new().arc("B", 2),
                DfaStateDef::accepting(),
            ],
        )
        .rule(
            "B",
            [
                DfaStateDef::new().arc("'b'", 1),
                DfaStateDef::accepting().arc("'b'", 2),
                DfaStateDef::accepting(),
            ],
        )
        .build()
        .unwrap()
}

/// ```text
/// file: stmt* ENDMARKER
/// stmt: (expr | 'pass') NEWLINE
/// expr: term ('+' term)*
/// term: atom ('*' atom)*
/// atom: NAME | NUMBER | '(' expr ')'
/// ```
pub const CALC: &str = indoc! {r#"
    {
      "name": "calc",
      "name_token": "NAME",
      "tokens": {
        "ENDMARKER": 0, "NAME": 1, "NUMBER": 2, "NEWLINE": 4,
        "LPAR": 7, "RPAR": 8, "PLUS": 14, "STAR": 16
      },
      "operators": { "+": "PLUS", "*": "STAR", "(": "LPAR", ")": "RPAR" },
      "rules": {
        "file": [
          { "arcs": [["stmt", 0], ["ENDMARKER", 1]] },
          { "final": true }
        ],
        "stmt": [
          { "arcs": [["expr", 1], ["'pass'", 1]] },
          { "arcs": [["NEWLINE", 2]] },
          { "final": true }
        ],
        "expr": [
          { "arcs": [["term", 1]] },
          { "final": true, "arcs": [["'+'", 0]] }
        ],
        "term": [
          { "arcs": [["atom", 1]] },
          { "final": true, "arcs": [["'*'", 0]] }
        ],
        "atom": [
          { "arcs": [["NAME", 1], ["NUMBER", 1], ["'('", 2]] },
          { "final": true },
          { "arcs": [["expr", 3]] },
          { "arcs": [["')'", 1]] }
        ]
      }
    }
"#};

pub fn calc() -> Grammar {
    Grammar::from_json(CALC).unwrap()
}

/// Identifier tokens on line 1, separated by single spaces.
pub fn names(words: &[&str]) -> Vec<Token> {
    let mut column = 0;
    let mut tokens = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let prefix = if i == 0 { "" } else { " " };
        tokens.push(Token::new(NAME, *word, Position::new(1, column)).with_prefix(prefix));
        column += word.len() as u32 + 1;
    }
    tokens
}

pub fn name(word: &str) -> Token {
    Token::new(NAME, word, Position::new(1, 0))
}

/// Tokenize calc source. Spaces become prefixes, unknown characters get
/// type [`UNKNOWN`], and an `ENDMARKER` closes the stream.
pub fn lex(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut prefix = String::new();
    let (mut line, mut column) = (1, 0);
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        let start = Position::new(line, column);
        column += 1;
        let (kind, value) = match c {
            ' ' => {
                prefix.push(c);
                continue;
            }
            '\n' => {
                line += 1;
                column = 0;
                (NEWLINE, c.to_string())
            }
            '+' => (PLUS, c.to_string()),
            '*' => (STAR, c.to_string()),
            '(' => (LPAR, c.to_string()),
            ')' => (RPAR, c.to_string()),
            c if c.is_alphanumeric() => {
                let mut word = c.to_string();
                while let Some(&next) = chars.peek()
                    && next.is_alphanumeric()
                {
                    word.push(next);
                    chars.next();
                    column += 1;
                }
                let kind = if c.is_ascii_digit() { NUMBER } else { NAME };
                (kind, word)
            }
            other => (UNKNOWN, other.to_string()),
        };
        tokens.push(Token::new(kind, value, start).with_prefix(std::mem::take(&mut prefix)));
    }

    tokens.push(Token::new(ENDMARKER, "", Position::new(line, column)).with_prefix(prefix));
    tokens
}
