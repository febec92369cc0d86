use thiserror::Error;

/// Broad classification of an infrastructure error, so callers can react to
/// the class without matching on message text (e.g. a missing config file is
/// fine, a corrupt one is not).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
  NotFound,
  ParseError,
  Unknown,
}

/// A structured, user-facing error raised by pipeline infrastructure.
///
/// Carried through `anyhow::Error`; callers that care about the kind
/// downcast back to `Diagnostic`.
#[derive(Debug, Error, PartialEq)]
#[error("{message}")]
pub struct Diagnostic {
  pub kind: ErrorKind,
  pub message: String,
}

impl Diagnostic {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Diagnostic {
      kind,
      message: message.into(),
    }
  }
}

#[macro_export]
macro_rules! diagnostic_error {
  ($kind:path, $fmt:literal $($arg:tt)*) => {
    anyhow::Error::from($crate::diagnostic::Diagnostic::new(
      $kind,
      format!($fmt $($arg)*),
    ))
  };
  ($fmt:literal $($arg:tt)*) => {
    anyhow::Error::from($crate::diagnostic::Diagnostic::new(
      $crate::diagnostic::ErrorKind::Unknown,
      format!($fmt $($arg)*),
    ))
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn displays_the_message() {
    let diagnostic = Diagnostic::new(ErrorKind::NotFound, "missing package.json");

    assert_eq!(diagnostic.to_string(), "missing package.json");
  }

  #[test]
  fn survives_an_anyhow_round_trip() {
    let error = diagnostic_error!("no plugin named {}", "stylepost-unknown");

    let diagnostic = error.downcast_ref::<Diagnostic>().unwrap();
    assert_eq!(diagnostic.kind, ErrorKind::Unknown);
    assert_eq!(diagnostic.message, "no plugin named stylepost-unknown");
  }

  #[test]
  fn accepts_an_explicit_kind() {
    let error = diagnostic_error!(ErrorKind::NotFound, "missing {}", "package.json");

    let diagnostic = error.downcast_ref::<Diagnostic>().unwrap();
    assert_eq!(diagnostic.kind, ErrorKind::NotFound);
    assert_eq!(diagnostic.message, "missing package.json");
  }
}
