//! Validation helpers shared by both services
//!
//! Kept as plain functions returning a static message so each service can
//! wrap failures in its own error type.

/// Validate a stock mutation quantity: strictly positive
pub fn validate_stock_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

/// Validate a customer name for order placement
pub fn validate_customer_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Customer name cannot be empty");
    }
    if name.len() > 255 {
        return Err("Customer name too long");
    }
    Ok(())
}

/// Validate a product SKU: non-empty after trimming
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.trim().is_empty() {
        return Err("SKU cannot be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_stock_quantity(1).is_ok());
        assert!(validate_stock_quantity(100).is_ok());
        assert!(validate_stock_quantity(0).is_err());
        assert!(validate_stock_quantity(-5).is_err());
    }

    #[test]
    fn customer_name_rules() {
        assert!(validate_customer_name("Ada Lovelace").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn sku_rules() {
        assert!(validate_sku("SKU-001").is_ok());
        assert!(validate_sku(" ").is_err());
    }
}
