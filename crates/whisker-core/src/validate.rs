//! Collector for business-rule violations.
//!
//! Unlike decoding, validation never stops early: every rule runs and all
//! violations are reported together.

use whisker_types::error::{ParamsError, Violation};

#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.items.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record a violation unless `ok` holds.
    pub fn ensure(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `Ok` when nothing was recorded, otherwise every violation at once.
    pub fn into_result(self) -> Result<(), ParamsError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ParamsError::ValidationFailed(self.items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_is_ok() {
        assert!(Violations::default().into_result().is_ok());
    }

    #[test]
    fn keeps_every_violation_in_order() {
        let mut violations = Violations::default();
        violations.push("a", "first");
        violations.ensure(true, "b", "skipped");
        violations.ensure(false, "c", "second");
        assert_eq!(violations.len(), 2);

        let Err(ParamsError::ValidationFailed(items)) = violations.into_result() else {
            panic!("expected ValidationFailed");
        };
        let fields: Vec<_> = items.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["a", "c"]);
    }
}
