//! Pure field validators. Each function checks every constraint and
//! reports all failing fields at once so the caller can display the
//! full list instead of one problem per attempt.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationErrors;
use crate::shoes::repo::{NewShoe, ShoeUpdate};

pub const USERNAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 255;
pub const PASSWORD_MIN: usize = 8;
pub const TEXT_FIELD_MAX: usize = 100;
pub const CONDITION_MAX: usize = 50;
pub const IMAGE_MAX: usize = 255;
pub const SIZE_MAX: f64 = 20.0;
pub const PRICE_MAX: f64 = 100_000.0;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    email.len() <= EMAIL_MAX && EMAIL_RE.is_match(email)
}

/// Minimum password policy: at least 8 characters with at least one
/// letter and one digit.
pub fn is_acceptable_password(password: &str) -> bool {
    password.len() >= PASSWORD_MIN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    if username.is_empty() {
        errs.push("username", "must not be empty");
    } else if username.len() > USERNAME_MAX {
        errs.push("username", format!("must be at most {USERNAME_MAX} characters"));
    }

    if !is_valid_email(email) {
        errs.push("email", "must be a valid email address");
    }

    if !is_acceptable_password(password) {
        errs.push(
            "password",
            format!("must be at least {PASSWORD_MIN} characters and contain a letter and a digit"),
        );
    }

    errs.into_result()
}

fn check_text(
    errs: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: usize,
) {
    if value.is_empty() {
        errs.push(field, "must not be empty");
    } else if value.len() > max {
        errs.push(field, format!("must be at most {max} characters"));
    }
}

fn check_size(errs: &mut ValidationErrors, size: f64) {
    if !size.is_finite() || size <= 0.0 {
        errs.push("size", "must be a positive number");
    } else if size > SIZE_MAX {
        errs.push("size", format!("must be at most {SIZE_MAX}"));
    }
}

fn check_price(errs: &mut ValidationErrors, price: f64) {
    if !price.is_finite() || price <= 0.0 {
        errs.push("price", "must be a positive number");
    } else if price > PRICE_MAX {
        errs.push("price", format!("must be at most {PRICE_MAX}"));
    }
}

fn check_image(errs: &mut ValidationErrors, image: &str) {
    if image.is_empty() {
        errs.push("image", "must not be empty when given");
    } else if image.len() > IMAGE_MAX {
        errs.push("image", format!("must be at most {IMAGE_MAX} characters"));
    }
}

pub fn validate_new_shoe(shoe: &NewShoe) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    check_text(&mut errs, "brand", &shoe.brand, TEXT_FIELD_MAX);
    check_text(&mut errs, "model", &shoe.model, TEXT_FIELD_MAX);
    check_text(&mut errs, "colorway", &shoe.colorway, TEXT_FIELD_MAX);
    check_text(&mut errs, "condition", &shoe.condition, CONDITION_MAX);
    check_size(&mut errs, shoe.size);
    check_price(&mut errs, shoe.price);
    if let Some(image) = &shoe.image {
        check_image(&mut errs, image);
    }

    errs.into_result()
}

/// Same bounds as `validate_new_shoe`, applied only to the fields present.
/// A fully empty update is rejected.
pub fn validate_shoe_update(update: &ShoeUpdate) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    if update.is_empty() {
        errs.push("update", "at least one field must be given");
        return errs.into_result();
    }

    if let Some(brand) = &update.brand {
        check_text(&mut errs, "brand", brand, TEXT_FIELD_MAX);
    }
    if let Some(model) = &update.model {
        check_text(&mut errs, "model", model, TEXT_FIELD_MAX);
    }
    if let Some(colorway) = &update.colorway {
        check_text(&mut errs, "colorway", colorway, TEXT_FIELD_MAX);
    }
    if let Some(condition) = &update.condition {
        check_text(&mut errs, "condition", condition, CONDITION_MAX);
    }
    if let Some(size) = update.size {
        check_size(&mut errs, size);
    }
    if let Some(price) = update.price {
        check_price(&mut errs, price);
    }
    if let Some(Some(image)) = &update.image {
        check_image(&mut errs, image);
    }

    errs.into_result()
}
