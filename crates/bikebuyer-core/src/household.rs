//! Derived household attributes sent alongside the raw form fields.
//!
//! The scoring model was trained with a `divorced` indicator that the
//! registration form never asks for. It is approximated from the marital
//! status and the declared number of children.

use crate::profile::MaritalStatus;

/// Infers the `divorced` indicator: a single applicant who declares at
/// least one child.
#[must_use]
pub fn infer_divorced(marital_status: MaritalStatus, total_children: u32) -> bool {
    marital_status == MaritalStatus::Single && total_children > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_with_children_is_divorced() {
        assert!(infer_divorced(MaritalStatus::Single, 2));
    }

    #[test]
    fn single_without_children_is_not_divorced() {
        assert!(!infer_divorced(MaritalStatus::Single, 0));
    }

    #[test]
    fn married_is_never_divorced() {
        assert!(!infer_divorced(MaritalStatus::Married, 0));
        assert!(!infer_divorced(MaritalStatus::Married, 3));
    }
}
