//! Required-field checks applied to every input before it reaches a store.
//!
//! Structural problems (a missing key, a string where a number belongs) are
//! caught by deserialisation; this layer catches the values serde accepts but
//! the data model does not, chiefly empty required strings.

use crate::{Error, Result};

/// Implemented by every input type accepted by a store mutation.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

/// Accumulates problems for one input so the caller sees all of them at once.
#[derive(Debug)]
pub struct Checker {
  context:  String,
  problems: Vec<String>,
}

impl Checker {
  pub fn new(context: impl Into<String>) -> Self {
    Self { context: context.into(), problems: Vec::new() }
  }

  /// Record a problem if `value` is empty.
  pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
    if value.is_empty() {
      self.problems.push(format!("`{field}` is required"));
    }
    self
  }

  /// Like [`Checker::require`], for fields that are optional in the input.
  pub fn require_if_present(
    &mut self,
    field: &str,
    value: Option<&str>,
  ) -> &mut Self {
    if let Some(v) = value {
      self.require(field, v);
    }
    self
  }

  /// Record a problem if `value` is absent.
  pub fn require_present<T>(&mut self, field: &str, value: Option<&T>) -> &mut Self {
    if value.is_none() {
      self.problems.push(format!("`{field}` is required"));
    }
    self
  }

  /// Fold the result of a nested validation into this one.
  pub fn nested(&mut self, result: Result<()>) -> &mut Self {
    if let Err(e) = result {
      match e {
        Error::Validation(msg) => self.problems.push(msg),
        other => self.problems.push(other.to_string()),
      }
    }
    self
  }

  pub fn finish(&mut self) -> Result<()> {
    if self.problems.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation(format!(
        "{}: {}",
        self.context,
        self.problems.join("; ")
      )))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_checker_passes() {
    assert!(Checker::new("thing").require("a", "x").finish().is_ok());
  }

  #[test]
  fn collects_every_problem() {
    let err = Checker::new("education")
      .require("institution", "")
      .require("degree", "")
      .require("field", "CS")
      .finish()
      .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("education"), "{msg}");
    assert!(msg.contains("`institution` is required"), "{msg}");
    assert!(msg.contains("`degree` is required"), "{msg}");
    assert!(!msg.contains("`field`"), "{msg}");
  }

  #[test]
  fn optional_fields_only_checked_when_present() {
    assert!(
      Checker::new("basic")
        .require_if_present("name", None)
        .finish()
        .is_ok()
    );
    assert!(
      Checker::new("basic")
        .require_if_present("name", Some(""))
        .finish()
        .is_err()
    );
  }
}
