//! Local form validation.
//!
//! These checks run before any request is built, so a validation failure
//! never reaches the network. The server re-validates everything it
//! persists; the messages here mirror what the UI has always shown.

use crate::SweetRequest;

/// Minimum accepted password length, matching the server's relaxed policy.
pub const MIN_PASSWORD_LEN: usize = 3;
pub const MIN_USERNAME_LEN: usize = 3;

/// Default restock amount when the per-row quantity field is left empty.
pub const DEFAULT_RESTOCK_QTY: u32 = 5;

pub fn validate_login(username_or_email: &str, password: &str) -> Result<(), String> {
    if username_or_email.trim().is_empty() {
        return Err("Username or email is required".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 3 characters".into());
    }
    Ok(())
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".into());
    }
    if username.trim().len() < MIN_USERNAME_LEN {
        return Err("Username must be at least 3 characters".into());
    }
    if email.trim().is_empty() {
        return Err("Email is required".into());
    }
    if !is_valid_email(email.trim()) {
        return Err("Please enter a valid email address".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 3 characters".into());
    }
    if password != confirm_password {
        return Err("Passwords do not match".into());
    }
    Ok(())
}

/// Rough `local@domain.tld` shape check; not an RFC parser.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !domain.contains(char::is_whitespace)
}

/// Parses and validates the add/edit form fields into a wire payload.
pub fn parse_sweet_form(
    name: &str,
    category: &str,
    price: &str,
    quantity: &str,
) -> Result<SweetRequest, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required".into());
    }
    let category = category.trim();
    if category.is_empty() {
        return Err("Category is required".into());
    }
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| "Invalid price entered".to_string())?;
    if !price.is_finite() {
        return Err("Invalid price entered".into());
    }
    if price <= 0.0 {
        return Err("Price must be greater than 0".into());
    }
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| "Invalid quantity entered".to_string())?;
    if quantity < 0 {
        return Err("Quantity cannot be negative".into());
    }
    let quantity = u32::try_from(quantity).map_err(|_| "Invalid quantity entered".to_string())?;
    Ok(SweetRequest {
        name: name.to_string(),
        category: category.to_string(),
        price,
        quantity,
    })
}

/// Parses the per-row restock amount; an empty field means the default.
pub fn parse_restock_qty(input: &str) -> Result<u32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_RESTOCK_QTY);
    }
    let qty: i64 = input
        .parse()
        .map_err(|_| "Restock quantity must be greater than 0".to_string())?;
    if qty <= 0 {
        return Err("Restock quantity must be greater than 0".into());
    }
    u32::try_from(qty).map_err(|_| "Restock quantity must be greater than 0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            validate_login("  ", "secret"),
            Err("Username or email is required".into())
        );
        assert_eq!(
            validate_login("alice", ""),
            Err("Password is required".into())
        );
        assert_eq!(
            validate_login("alice", "ab"),
            Err("Password must be at least 3 characters".into())
        );
        assert_eq!(validate_login("alice", "abc"), Ok(()));
    }

    #[test]
    fn registration_checks_run_in_order() {
        assert_eq!(
            validate_registration("", "a@b.c", "abc", "abc"),
            Err("Username is required".into())
        );
        assert_eq!(
            validate_registration("al", "a@b.c", "abc", "abc"),
            Err("Username must be at least 3 characters".into())
        );
        assert_eq!(
            validate_registration("alice", "", "abc", "abc"),
            Err("Email is required".into())
        );
        assert_eq!(
            validate_registration("alice", "not-an-email", "abc", "abc"),
            Err("Please enter a valid email address".into())
        );
        assert_eq!(
            validate_registration("alice", "a@b.c", "abc", "abd"),
            Err("Passwords do not match".into())
        );
        assert_eq!(validate_registration("alice", "a@b.c", "abc", "abc"), Ok(()));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@example.co.uk"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn sweet_form_happy_path_trims_text() {
        let req = parse_sweet_form(" Fudge ", " Chocolate ", "2.50", "12").unwrap();
        assert_eq!(req.name, "Fudge");
        assert_eq!(req.category, "Chocolate");
        assert_eq!(req.price, 2.5);
        assert_eq!(req.quantity, 12);
    }

    #[test]
    fn sweet_form_rejections() {
        assert_eq!(
            parse_sweet_form("", "c", "1", "1"),
            Err("Name is required".into())
        );
        assert_eq!(
            parse_sweet_form("n", " ", "1", "1"),
            Err("Category is required".into())
        );
        assert_eq!(
            parse_sweet_form("n", "c", "abc", "1"),
            Err("Invalid price entered".into())
        );
        assert_eq!(
            parse_sweet_form("n", "c", "NaN", "1"),
            Err("Invalid price entered".into())
        );
        assert_eq!(
            parse_sweet_form("n", "c", "0", "1"),
            Err("Price must be greater than 0".into())
        );
        assert_eq!(
            parse_sweet_form("n", "c", "1", "-1"),
            Err("Quantity cannot be negative".into())
        );
        assert_eq!(
            parse_sweet_form("n", "c", "1", "1.5"),
            Err("Invalid quantity entered".into())
        );
    }

    #[test]
    fn restock_qty_defaults_and_rejects_non_positive() {
        assert_eq!(parse_restock_qty(""), Ok(DEFAULT_RESTOCK_QTY));
        assert_eq!(parse_restock_qty(" 7 "), Ok(7));
        assert_eq!(
            parse_restock_qty("0"),
            Err("Restock quantity must be greater than 0".into())
        );
        assert_eq!(
            parse_restock_qty("-3"),
            Err("Restock quantity must be greater than 0".into())
        );
        assert_eq!(
            parse_restock_qty("lots"),
            Err("Restock quantity must be greater than 0".into())
        );
    }
}
