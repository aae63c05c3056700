use thiserror::Error;

use crate::domain::product::ProductId;

/// Failures surfaced by catalog query operations.
///
/// These never cross the transport boundary as raw faults; the HTTP layer
/// translates each variant into its client-visible payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The text identifier did not parse as an integer.
    #[error("invalid product identifier `{0}`")]
    InvalidId(String),
    /// Well-formed identifier with no matching record.
    #[error("no product with id {0}")]
    NotFound(ProductId),
    /// A numeric filter bound failed to parse. Only produced in strict
    /// filter mode; the permissive default drops the bound instead.
    #[error("invalid {field} value `{value}`")]
    InvalidPriceBound { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::CatalogError;
    use crate::domain::product::ProductId;

    #[test]
    fn invalid_id_carries_offending_text() {
        let error = CatalogError::InvalidId("abc".to_string());
        assert_eq!(error.to_string(), "invalid product identifier `abc`");
    }

    #[test]
    fn not_found_names_the_missing_id() {
        let error = CatalogError::NotFound(ProductId(9999));
        assert_eq!(error.to_string(), "no product with id 9999");
    }

    #[test]
    fn invalid_bound_names_field_and_value() {
        let error = CatalogError::InvalidPriceBound { field: "minPrice", value: "cheap".to_string() };
        assert_eq!(error.to_string(), "invalid minPrice value `cheap`");
    }
}
