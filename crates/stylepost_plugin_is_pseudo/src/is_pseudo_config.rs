use serde::Deserialize;

/// The `preserve` option: keep both pseudo-class forms as adjacent rules, or
/// collapse to a single canonical one.
///
/// Deserializes untagged from any JSON scalar shape the option accepts.
/// `"matches"` selects the collapse-to-`:matches()` mode; any other truthy
/// value means preserve-both; falsy values (`false`, `0`, `""`) collapse to
/// `:is()`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Preserve {
  Toggle(bool),
  Number(f64),
  Keyword(String),
}

impl Default for Preserve {
  fn default() -> Self {
    Preserve::Toggle(true)
  }
}

impl Preserve {
  pub fn is_truthy(&self) -> bool {
    match self {
      Preserve::Toggle(value) => *value,
      Preserve::Number(value) => *value != 0.0,
      Preserve::Keyword(keyword) => !keyword.is_empty(),
    }
  }

  pub fn is_matches_keyword(&self) -> bool {
    matches!(self, Preserve::Keyword(keyword) if keyword == "matches")
  }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IsPseudoConfig {
  #[serde(default)]
  pub preserve: Preserve,
}
