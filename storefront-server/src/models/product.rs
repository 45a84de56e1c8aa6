//! Product record and validated input
//!
//! `ProductPayload` is what clients send; `ProductDraft` is the same data
//! after validation and is the only input type the repositories accept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for product names
const MAX_NAME_LEN: usize = 255;

/// Fraction digits kept for prices, matching `NUMERIC(10, 2)`
const PRICE_SCALE: u32 = 2;

/// Largest price `NUMERIC(10, 2)` can store
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Persisted product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub amount: i32,
    pub description: Option<String>,
}

impl Product {
    /// Build a record from a draft and a storage-assigned id.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id: id.get(),
            name: draft.name,
            price: draft.price,
            amount: draft.amount,
            description: draft.description,
        }
    }
}

/// Product id taken from a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(i32);

impl ProductId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parse a path segment as a product id.
    ///
    /// # Example
    /// ```
    /// use storefront_server::models::ProductId;
    ///
    /// assert_eq!(ProductId::parse("42").unwrap().get(), 42);
    /// assert!(ProductId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        s.parse::<i32>().map(Self).map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: "invalid product id",
        })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Create/update request body
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub amount: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated product fields, everything except the id
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub amount: i32,
    pub description: Option<String>,
}

impl ProductDraft {
    /// Validate raw fields.
    ///
    /// # Rules
    /// - Name must contain a non-whitespace character, max 255 characters
    /// - Price must be >= 0 and is rounded to 2 fraction digits
    /// - Price must fit `NUMERIC(10, 2)`
    /// - Amount must be >= 0
    pub fn new(
        name: String,
        price: Decimal,
        amount: i32,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        if price < Decimal::ZERO {
            return Err(ValidationError::Negative { field: "price" });
        }

        let price = price.round_dp(PRICE_SCALE);
        if price > MAX_PRICE {
            return Err(ValidationError::OutOfRange {
                field: "price",
                max: MAX_PRICE.to_string(),
            });
        }

        if amount < 0 {
            return Err(ValidationError::Negative { field: "amount" });
        }

        Ok(Self {
            name,
            price,
            amount,
            description,
        })
    }
}

impl TryFrom<ProductPayload> for ProductDraft {
    type Error = ValidationError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        Self::new(
            payload.name,
            payload.price,
            payload.amount,
            payload.description,
        )
    }
}
