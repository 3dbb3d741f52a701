//! Raw form input and its validation gate.

use crate::error::ValidationError;
use serde::Serialize;

/// The four text fields of the add form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseForm {
    /// Amount text.
    pub amount: String,
    /// Category text.
    pub category: String,
    /// Date text.
    pub date: String,
    /// Description text.
    pub description: String,
}

/// Trimmed form fields with amount, category, and date known to be present.
///
/// The amount is still text: turning it into a number belongs to the insert
/// path, where a failure is reported as a storage error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    /// Trimmed amount text, non-empty.
    pub amount: String,
    /// Trimmed category, non-empty.
    pub category: String,
    /// Trimmed date, non-empty.
    pub date: String,
    /// Trimmed description, possibly empty.
    pub description: String,
}

impl ExpenseForm {
    /// Creates a form with all four fields filled in.
    #[must_use]
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    /// Trims every field and checks the required ones.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequired`] when amount, category,
    /// or date is empty after trimming.
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        let amount = self.amount.trim();
        let category = self.category.trim();
        let date = self.date.trim();

        if amount.is_empty() || category.is_empty() || date.is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        Ok(ValidatedForm {
            amount: amount.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            description: self.description.trim().to_string(),
        })
    }

    /// Empties all four fields.
    pub fn clear(&mut self) {
        self.amount.clear();
        self.category.clear();
        self.date.clear();
        self.description.clear();
    }

    /// Returns true if every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount.is_empty()
            && self.category.is_empty()
            && self.date.is_empty()
            && self.description.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_validate_trims_fields() {
        let form = ExpenseForm::new(" 12.50 ", " Food", "2024-01-01 ", "  Lunch  ");
        let valid = form.validate().unwrap();
        assert_eq!(valid.amount, "12.50");
        assert_eq!(valid.category, "Food");
        assert_eq!(valid.date, "2024-01-01");
        assert_eq!(valid.description, "Lunch");
    }

    #[test]
    fn test_description_optional() {
        let form = ExpenseForm::new("1", "Food", "2024-01-01", "");
        assert_eq!(form.validate().unwrap().description, "");
    }

    #[test_case("", "Food", "2024-01-01" ; "missing amount")]
    #[test_case("12", "  ", "2024-01-01" ; "blank category")]
    #[test_case("12", "Food", "" ; "missing date")]
    #[test_case("\t", "\n", " " ; "all whitespace")]
    fn test_validate_rejects(amount: &str, category: &str, date: &str) {
        let form = ExpenseForm::new(amount, category, date, "anything");
        assert_eq!(form.validate(), Err(ValidationError::MissingRequired));
    }

    #[test]
    fn test_amount_not_parsed_by_validation() {
        let form = ExpenseForm::new("abc", "Food", "2024-01-01", "");
        assert_eq!(form.validate().unwrap().amount, "abc");
    }

    #[test]
    fn test_clear() {
        let mut form = ExpenseForm::new("1", "a", "b", "c");
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
        assert_eq!(form, ExpenseForm::default());
    }

    proptest! {
        #[test]
        fn prop_whitespace_required_field_never_validates(
            pad in "[ \t]{0,4}",
            category in "[A-Za-z]{1,10}",
            date in "[0-9-]{1,10}",
        ) {
            let form = ExpenseForm::new(pad, category, date, "");
            prop_assert_eq!(form.validate(), Err(ValidationError::MissingRequired));
        }

        #[test]
        fn prop_valid_fields_are_trimmed(
            amount in "[0-9]{1,6}",
            category in "[A-Za-z]{1,10}",
            date in "[0-9-]{1,10}",
        ) {
            let form = ExpenseForm::new(
                format!(" {amount} "),
                format!("{category}\t"),
                date.clone(),
                " ",
            );
            let valid = form.validate().unwrap();
            prop_assert_eq!(valid.amount, amount);
            prop_assert_eq!(valid.category, category);
            prop_assert_eq!(valid.date, date);
            prop_assert_eq!(valid.description, "");
        }
    }
}
