//! Best-effort CSS parsing.
//!
//! Builds the statement list while keeping selector, at-rule, and value text
//! raw. Constructs the tokenizer cannot make sense of are skipped, never
//! reported: an unparseable statement must not fail a build.

use cssparser::Delimiter;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::SourcePosition;
use cssparser::Token;

use crate::stylesheet::AtRule;
use crate::stylesheet::Declaration;
use crate::stylesheet::Rule;
use crate::stylesheet::Statement;
use crate::stylesheet::Stylesheet;

pub fn parse_stylesheet(css: &str) -> Stylesheet {
  let mut input = ParserInput::new(css);
  let mut parser = Parser::new(&mut input);
  let mut statements = Vec::new();

  loop {
    let start = parser.position();
    let token = match parser.next_including_whitespace_and_comments() {
      Ok(token) => token.clone(),
      Err(_) => break,
    };

    match token {
      Token::WhiteSpace(_) | Token::Semicolon | Token::CDO | Token::CDC => {}
      Token::Comment(text) => statements.push(Statement::Comment(text.to_string())),
      Token::AtKeyword(name) => {
        let at_rule = parse_at_rule(&mut parser, name.to_string());
        statements.push(Statement::AtRule(at_rule));
      }
      _ => {
        if let Some(rule) = parse_qualified_rule(&mut parser, start) {
          statements.push(Statement::Rule(rule));
        }
      }
    }
  }

  Stylesheet { statements }
}

/// Parse a qualified rule whose first selector token was already consumed at
/// `start`; the raw selector is sliced back out of the input.
fn parse_qualified_rule<'i>(parser: &mut Parser<'i, '_>, start: SourcePosition) -> Option<Rule> {
  let _ = parser.parse_until_before(Delimiter::CurlyBracketBlock, |input| {
    while input.next_including_whitespace_and_comments().is_ok() {}
    Ok::<_, ParseError<()>>(())
  });

  let selector = parser.slice_from(start).trim().to_string();

  // Selector text with nothing after it, e.g. trailing garbage at the end
  // of the input.
  parser.expect_curly_bracket_block().ok()?;

  let declarations = parser
    .parse_nested_block(|input| Ok::<_, ParseError<()>>(parse_declaration_list(input)))
    .unwrap_or_default();

  Some(Rule {
    selector,
    declarations,
  })
}

fn parse_at_rule<'i>(parser: &mut Parser<'i, '_>, name: String) -> AtRule {
  parser.skip_whitespace();
  let prelude_start = parser.position();

  let _ = parser.parse_until_before(
    Delimiter::Semicolon | Delimiter::CurlyBracketBlock,
    |input| {
      while input.next_including_whitespace_and_comments().is_ok() {}
      Ok::<_, ParseError<()>>(())
    },
  );

  let prelude = parser.slice_from(prelude_start).trim().to_string();

  match parser.next() {
    Ok(Token::CurlyBracketBlock) => {
      let block = parser
        .parse_nested_block(|input| {
          let start = input.position();
          while input.next_including_whitespace_and_comments().is_ok() {}
          Ok::<_, ParseError<()>>(input.slice_from(start).trim().to_string())
        })
        .unwrap_or_default();

      AtRule {
        name,
        prelude,
        block: Some(block),
      }
    }
    // Semicolon or end of input: the statement form.
    _ => AtRule {
      name,
      prelude,
      block: None,
    },
  }
}

fn parse_declaration_list<'i>(input: &mut Parser<'i, '_>) -> Vec<Declaration> {
  let mut declarations = Vec::new();

  loop {
    input.skip_whitespace();
    if input.is_exhausted() {
      break;
    }

    let property = input.try_parse(|input| {
      let name = input.expect_ident()?.to_string();
      input.expect_colon()?;
      Ok::<_, ParseError<()>>(name)
    });

    let Ok(property) = property else {
      // Not a declaration; drop everything up to the next semicolon.
      skip_to_semicolon(input);
      continue;
    };

    input.skip_whitespace();
    let value_start = input.position();
    let mut important = false;

    loop {
      match input.next() {
        Err(_) => break,
        Ok(Token::Semicolon) => break,
        Ok(Token::Delim('!')) => {
          if input
            .try_parse(|input| input.expect_ident_matching("important"))
            .is_ok()
          {
            important = true;
          }
          break;
        }
        Ok(_) => {}
      }
    }

    let full_slice = input.slice_from(value_start).trim();
    let value = if important {
      full_slice
        .trim_end_matches(';')
        .trim_end()
        .trim_end_matches("important")
        .trim_end()
        .trim_end_matches('!')
        .trim_end()
    } else {
      full_slice.trim_end_matches(';').trim_end()
    };

    if !value.is_empty() {
      declarations.push(Declaration {
        property,
        value: value.to_string(),
        important,
      });
    }
  }

  declarations
}

fn skip_to_semicolon(input: &mut Parser<'_, '_>) {
  loop {
    match input.next() {
      Err(_) => break,
      Ok(Token::Semicolon) => break,
      Ok(_) => {}
    }
  }
}
