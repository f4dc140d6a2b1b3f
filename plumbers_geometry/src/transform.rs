// Copyright 2025 the Plumbers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;

use kurbo::Vec2;

use crate::GeometryError;

/// Extract the translation component from a computed CSS `transform` value.
///
/// - `none` or an empty value is no translation.
/// - `matrix(a, b, c, d, e, f)` translates by `(e, f)`.
/// - `matrix3d(...)` is not decomposed and reports no translation.
///
/// Any other shape is a [`GeometryError::MalformedTransform`].
pub fn parse_translation(transform: &str) -> Result<Vec2, GeometryError> {
    let value = transform.trim();
    if value.is_empty() || value == "none" || value.starts_with("matrix3d(") {
        return Ok(Vec2::ZERO);
    }

    let malformed = || GeometryError::MalformedTransform(value.to_string());
    let inner = value
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut coeffs = [0.0_f64; 6];
    let mut count = 0;
    for part in inner.split(',') {
        let slot = coeffs.get_mut(count).ok_or_else(malformed)?;
        *slot = part.trim().parse().map_err(|_| malformed())?;
        count += 1;
    }
    if count != coeffs.len() {
        return Err(malformed());
    }
    Ok(Vec2::new(coeffs[4], coeffs[5]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero() {
        assert_eq!(parse_translation("none"), Ok(Vec2::ZERO));
        assert_eq!(parse_translation(""), Ok(Vec2::ZERO));
    }

    #[test]
    fn matrix_translation() {
        assert_eq!(
            parse_translation("matrix(1, 0, 0, 1, -24, 12.5)"),
            Ok(Vec2::new(-24.0, 12.5))
        );
        assert_eq!(
            parse_translation("matrix(1,0,0,1,3,4)"),
            Ok(Vec2::new(3.0, 4.0))
        );
    }

    #[test]
    fn matrix3d_is_not_decomposed() {
        assert_eq!(
            parse_translation("matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 10, 20, 0, 1)"),
            Ok(Vec2::ZERO)
        );
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(parse_translation("translate(10px, 20px)").is_err());
        assert!(parse_translation("matrix(1, 0, 0, 1, 2)").is_err());
        assert!(parse_translation("matrix(1, 0, 0, 1, 2, 3, 4)").is_err());
        assert!(parse_translation("matrix(1, 0, 0, 1, x, 3)").is_err());
    }
}
