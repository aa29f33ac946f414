//! Validation helpers shared by the backend services

/// Review ratings are whole stars between 1 and 5.
pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err("Rating must be between 1 and 5")
    }
}

/// Order and batch quantities must be positive.
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity > 0 {
        Ok(())
    } else {
        Err("Quantity must be positive")
    }
}

/// Report row limits must be positive.
pub fn validate_limit(limit: i64) -> Result<(), &'static str> {
    if limit > 0 {
        Ok(())
    } else {
        Err("Limit must be positive")
    }
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn limit_must_be_positive() {
        assert!(validate_limit(10).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(-1).is_err());
    }

    #[test]
    fn email_basic_shape() {
        assert!(validate_email("shopper@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
    }
}
