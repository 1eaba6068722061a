//! Strongly-typed identifiers used across the domain.
//!
//! Products and customers carry caller-assigned codes (`"LAPTOP001"`,
//! `"CUST001"`); order identifiers are generated sequentially by the
//! repository.

use serde::{Deserialize, Serialize};

/// Identifier of a product (caller-assigned code).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a customer (caller-assigned code).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

/// Identifier of an order (`ORD-NNNNNN`, generated by the repository).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

macro_rules! impl_str_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_str_newtype!(ProductId);
impl_str_newtype!(CustomerId);
impl_str_newtype!(OrderId);

impl OrderId {
    /// Format the n-th order number as `ORD-NNNNNN` (zero-padded to six digits).
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("ORD-{n:06}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_are_zero_padded_to_six_digits() {
        assert_eq!(OrderId::from_sequence(1).as_str(), "ORD-000001");
        assert_eq!(OrderId::from_sequence(42).as_str(), "ORD-000042");
        assert_eq!(OrderId::from_sequence(1_000_000).as_str(), "ORD-1000000");
    }

    #[test]
    fn ids_display_as_their_code() {
        let id = ProductId::new("LAPTOP001");
        assert_eq!(id.to_string(), "LAPTOP001");
        assert_eq!(id.as_str(), "LAPTOP001");
    }
}
