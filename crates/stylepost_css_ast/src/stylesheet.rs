/// A parsed stylesheet: the ordered list of top-level statements.
///
/// Statement order is significant. Transforms may insert and remove
/// statements, but must never reorder statements they do not touch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
  pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
  Rule(Rule),
  AtRule(AtRule),
  /// A top-level comment; holds the text between `/*` and `*/`.
  Comment(String),
}

/// A style rule: raw selector text plus a declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
  pub selector: String,
  pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
  pub property: String,
  pub value: String,
  pub important: bool,
}

/// An at-rule, kept raw. `block` is `None` for the statement form
/// (`@import ...;`) and holds the raw block text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
  pub name: String,
  pub prelude: String,
  pub block: Option<String>,
}

impl Stylesheet {
  pub fn parse(css: &str) -> Self {
    crate::parser::parse_stylesheet(css)
  }

  pub fn to_css_string(&self) -> String {
    self
      .statements
      .iter()
      .map(Statement::to_css_string)
      .collect::<Vec<_>>()
      .join("\n")
  }
}

impl Statement {
  pub fn to_css_string(&self) -> String {
    match self {
      Statement::Rule(rule) => rule.to_css_string(),
      Statement::AtRule(at_rule) => at_rule.to_css_string(),
      Statement::Comment(text) => format!("/*{text}*/"),
    }
  }

  pub fn as_rule(&self) -> Option<&Rule> {
    match self {
      Statement::Rule(rule) => Some(rule),
      _ => None,
    }
  }
}

impl Rule {
  /// Canonical text form of the whole rule, selector and declarations both.
  pub fn to_css_string(&self) -> String {
    if self.declarations.is_empty() {
      return format!("{} {{}}", self.selector);
    }

    let block = self
      .declarations
      .iter()
      .map(Declaration::to_css_string)
      .collect::<Vec<_>>()
      .join("; ");

    format!("{} {{ {} }}", self.selector, block)
  }
}

impl Declaration {
  pub fn to_css_string(&self) -> String {
    if self.important {
      format!("{}: {} !important", self.property, self.value)
    } else {
      format!("{}: {}", self.property, self.value)
    }
  }
}

impl AtRule {
  pub fn to_css_string(&self) -> String {
    let head = if self.prelude.is_empty() {
      format!("@{}", self.name)
    } else {
      format!("@{} {}", self.name, self.prelude)
    };

    match &self.block {
      Some(block) if block.is_empty() => format!("{head} {{}}"),
      Some(block) => format!("{head} {{ {block} }}"),
      None => format!("{head};"),
    }
  }
}
