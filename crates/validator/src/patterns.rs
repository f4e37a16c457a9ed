//! Common validation regexes
//!
//! Ready-made patterns for [`Rule::with_regex`](crate::Rule::with_regex).
//! All patterns are anchored; combine with an unanchored pattern when a
//! substring match is wanted.

/// Integer, optionally negative.
pub const INTEGER: &str = r"^-?\d+$";

/// Non-negative integer (positive or zero).
pub const POSITIVE_INTEGER: &str = r"^\d+$";

/// Non-positive integer (negative or zero).
pub const MINUS_INTEGER: &str = r"^((-\d+)|(0+))$";

/// Decimal number.
pub const DECIMALS: &str = r"^(-?\d+)(\.\d+)?$";

/// Latin letters only.
pub const ALPHABET: &str = "^[A-Za-z]+$";

/// Upper-case latin letters only.
pub const ALPHABET_UPPER: &str = "^[A-Z]+$";

/// Lower-case latin letters only.
pub const ALPHABET_LOWER: &str = "^[a-z]+$";

/// Digits and latin letters.
pub const NUMBER_ALPHABET: &str = "^[A-Za-z0-9]+$";

/// Digits, latin letters and underscores.
pub const NUMBER_UNDERLINE_ALPHABET: &str = r"^\w+$";

/// Email address.
pub const EMAIL: &str = r"^[\w-]+(\.[\w-]+)*@[\w-]+(\.[\w-]+)+$";

/// CJK unified ideographs (possibly empty).
pub const CHINESE: &str = r"^[\u{4e00}-\u{9fa5}]*$";
