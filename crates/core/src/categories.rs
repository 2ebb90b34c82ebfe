//! Category constants and validation rules.

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;

/// Color assigned when a category is created without one (neutral gray).
pub const DEFAULT_CATEGORY_COLOR: &str = "#A3A3A3";

/// Categories seeded for every newly registered user, in creation order.
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Random Thoughts", "#A78BFA"),
    ("School", "#60A5FA"),
    ("Personal", "#F59E0B"),
];

/// Validate a category name: non-empty after trimming, within the length
/// limit.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name must not be empty".to_string());
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name must be at most {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a category color: a `#RRGGBB` hex string, exactly 7 characters.
pub fn validate_color(color: &str) -> Result<(), String> {
    let mut chars = color.chars();
    let valid = chars.next() == Some('#')
        && color.len() == 7
        && chars.all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err("Color must be a hex string like #A3A3A3".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_category_name("School").is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name("   ").is_err());
    }

    #[test]
    fn test_name_length_boundary() {
        let at_limit = "x".repeat(MAX_CATEGORY_NAME_LENGTH);
        assert!(validate_category_name(&at_limit).is_ok());

        let over_limit = "x".repeat(MAX_CATEGORY_NAME_LENGTH + 1);
        assert!(validate_category_name(&over_limit).is_err());
    }

    #[test]
    fn test_valid_colors() {
        assert!(validate_color("#A3A3A3").is_ok());
        assert!(validate_color("#a78bfa").is_ok());
        assert!(validate_color("#000000").is_ok());
    }

    #[test]
    fn test_invalid_colors() {
        assert!(validate_color("A3A3A3").is_err(), "missing leading #");
        assert!(validate_color("#A3A3").is_err(), "too short");
        assert!(validate_color("#A3A3A3FF").is_err(), "too long");
        assert!(validate_color("#GGGGGG").is_err(), "non-hex digits");
        assert!(validate_color("").is_err());
    }

    #[test]
    fn test_default_categories_are_well_formed() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 3);
        for (name, color) in DEFAULT_CATEGORIES {
            assert!(validate_category_name(name).is_ok());
            assert!(validate_color(color).is_ok());
        }
    }
}
