use anyhow::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use stylepost_core::diagnostic::Diagnostic;
use stylepost_core::diagnostic::ErrorKind;
use stylepost_core::plugin::PluginContext;
use stylepost_core::plugin::PostProcessorPlugin;
use stylepost_css_ast::Rule;
use stylepost_css_ast::Statement;
use stylepost_css_ast::Stylesheet;

use crate::is_pseudo_config::IsPseudoConfig;
use crate::is_pseudo_config::Preserve;

pub const PLUGIN_NAME: &str = "stylepost-is-pseudo";

/// First `:is(` or `:matches(` occurrence, case-insensitive.
static IS_MATCHES: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i):(is|matches)\(").unwrap()
});

const REPLACEMENT_IS: &str = ":is(";
const REPLACEMENT_MATCHES: &str = ":matches(";

/// Rewrites rules using the interchangeable `:matches()`/`:is()` selector
/// pseudo-classes so the output carries both forms as adjacent rules, or a
/// single canonical form, per the `preserve` option.
#[derive(Debug)]
pub struct StylepostIsPseudoPlugin {
  preserve: Preserve,
}

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
  #[serde(rename = "stylepost-is-pseudo")]
  config: Option<IsPseudoConfig>,
}

impl StylepostIsPseudoPlugin {
  pub fn new(ctx: &PluginContext) -> Result<Self, Error> {
    let config = ctx.config.load_package_json::<PackageJson>().map_or_else(
      |err| {
        let diagnostic = err.downcast_ref::<Diagnostic>();

        if diagnostic.is_some_and(|d| d.kind != ErrorKind::NotFound) {
          return Err(err);
        }

        Ok(IsPseudoConfig::default())
      },
      |config| Ok(config.contents.config.unwrap_or_default()),
    )?;

    Ok(StylepostIsPseudoPlugin {
      preserve: config.preserve,
    })
  }

  pub fn from_config(config: IsPseudoConfig) -> Self {
    StylepostIsPseudoPlugin {
      preserve: config.preserve,
    }
  }
}

/// A rule equals its previous sibling when that sibling is itself a rule
/// using one of the two pseudo-classes, and the two rules render to the same
/// text once both spellings are canonicalized to `:is(`. The full rendered
/// rule is compared, so identical selectors over different declaration
/// blocks do not count as duplicates.
fn equals_prev_rule(rule: &Rule, prev: Option<&Statement>) -> bool {
  let Some(Statement::Rule(prev_rule)) = prev else {
    return false;
  };

  if !IS_MATCHES.is_match(&prev_rule.selector) {
    return false;
  }

  let rule_string = rule.to_css_string();
  let prev_rule_string = prev_rule.to_css_string();

  if rule_string == prev_rule_string {
    return true;
  }

  IS_MATCHES.replace_all(&rule_string, REPLACEMENT_IS)
    == IS_MATCHES.replace_all(&prev_rule_string, REPLACEMENT_IS)
}

impl PostProcessorPlugin for StylepostIsPseudoPlugin {
  fn name(&self) -> &'static str {
    PLUGIN_NAME
  }

  #[tracing::instrument(level = "debug", skip_all, fields(plugin = "stylepost-is-pseudo"))]
  fn process(&self, stylesheet: &mut Stylesheet) -> Result<(), Error> {
    let replace_with_matches = self.preserve.is_matches_keyword();
    let preserve_both = self.preserve.is_truthy() && !replace_with_matches;

    let replacement = if replace_with_matches {
      REPLACEMENT_MATCHES
    } else {
      REPLACEMENT_IS
    };

    // Mutations only ever touch the current statement or its immediate
    // predecessor, so a plain index cursor stays valid: removal of the
    // predecessor shifts the cursor back, an insertion before the current
    // statement shifts it forward.
    let mut index = 0;
    while index < stylesheet.statements.len() {
      let Some(rule) = stylesheet.statements[index].as_rule() else {
        index += 1;
        continue;
      };

      if !IS_MATCHES.is_match(&rule.selector) {
        index += 1;
        continue;
      }

      let prev = index
        .checked_sub(1)
        .map(|prev_index| &stylesheet.statements[prev_index]);

      if equals_prev_rule(rule, prev) {
        // The predecessor is a redundant duplicate. Dropping it regardless
        // of mode is what keeps repeated runs from growing the stylesheet.
        tracing::debug!(selector = %rule.selector, "Merging adjacent duplicate rule");
        stylesheet.statements.remove(index - 1);
        index -= 1;
      } else if preserve_both {
        let mut duplicate = rule.clone();
        duplicate.selector = IS_MATCHES
          .replace(&duplicate.selector, REPLACEMENT_MATCHES)
          .into_owned();
        stylesheet
          .statements
          .insert(index, Statement::Rule(duplicate));
        index += 1;
      }

      if let Statement::Rule(rule) = &mut stylesheet.statements[index] {
        rule.selector = IS_MATCHES.replace(&rule.selector, replacement).into_owned();
      }

      index += 1;
    }

    Ok(())
  }
}
