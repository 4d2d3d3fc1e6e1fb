//! Canonical column names for the four entity record sets.
//!
//! All normalizers, the integrator, and the tests address columns through
//! these constants so the join and aggregation code stays free of string
//! literals.

/// Customer record-set columns.
pub mod customer {
    /// Unique customer key (Int64).
    pub const ID: &str = "id";
    /// Email address (Utf8).
    pub const EMAIL: &str = "email";
    /// Age in years (Int64).
    pub const AGE: &str = "age";
    /// Free-text active flag, normalized to `{"Sim", "Não", ""}` (Utf8).
    pub const ACTIVE_FLAG: &str = "active_flag";
    /// City name (Utf8).
    pub const CITY: &str = "city";
    /// Two-letter state code (Utf8).
    pub const STATE: &str = "state";
    /// Registration date, `dd/mm/yyyy` after cleaning (Utf8, nullable).
    pub const REGISTRATION_DATE: &str = "registration_date";
    /// Phone number, `"N/A"` when missing (Utf8).
    pub const PHONE: &str = "phone";
    /// Monthly income, non-negative after cleaning (Float64).
    pub const MONTHLY_INCOME: &str = "monthly_income";
}

/// Sale record-set columns.
pub mod sale {
    /// Foreign key to the customer record set (Int64).
    pub const CUSTOMER_ID: &str = "customer_id";
    /// Foreign key to the product record set (Utf8).
    pub const PRODUCT_NAME: &str = "product_name";
    /// Salesperson responsible for the sale (Utf8).
    pub const SELLER: &str = "seller";
    /// Units sold, positive after cleaning (Int64).
    pub const QUANTITY: &str = "quantity";
    /// Price per unit, positive after cleaning (Float64).
    pub const UNIT_PRICE: &str = "unit_price";
    /// Sale date, `dd/mm/yyyy` after cleaning (Utf8, nullable).
    pub const SALE_DATE: &str = "sale_date";
    /// Derived `quantity × unit_price`, rounded to 2 decimals (Float64).
    pub const TOTAL_REVENUE: &str = "total_revenue";
}

/// Product record-set columns.
pub mod product {
    /// Unique product key (Utf8).
    pub const NAME: &str = "name";
    /// Cost price, parsed from comma-decimal text when needed (Float64,
    /// nullable).
    pub const COST_PRICE: &str = "cost_price";
    /// Stock-entry date, `dd/mm/yyyy` after cleaning (Utf8, nullable).
    pub const STOCK_DATE: &str = "stock_date";
    /// Units in stock, floored at zero after cleaning (Int64).
    pub const CURRENT_STOCK: &str = "current_stock";
    /// Product category, consolidated vocabulary after cleaning (Utf8).
    pub const CATEGORY: &str = "category";
}

/// Review record-set columns.
pub mod review {
    /// Foreign key to the product record set (Utf8).
    pub const PRODUCT_NAME: &str = "product_name";
    /// Numeric rating (Float64).
    pub const RATING: &str = "rating";
    /// Whether the reviewer recommends the product (Boolean after cleaning).
    pub const RECOMMENDS: &str = "recommends";
    /// Review text, non-empty after cleaning (Utf8).
    pub const COMMENT: &str = "comment";
    /// Review date, structured `Date32` after cleaning (nullable).
    pub const REVIEW_DATE: &str = "review_date";
}

/// Per-product average rating appended by the integrator (Float64, nullable).
pub const AVG_PRODUCT_RATING: &str = "avg_product_rating";
