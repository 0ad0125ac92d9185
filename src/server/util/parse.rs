use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_string() {
        assert_eq!(parse_u64_from_string("123".to_string()).unwrap(), 123);
    }

    #[test]
    fn rejects_non_numeric_string() {
        let result = parse_u64_from_string("abc".to_string());

        assert!(matches!(result, Err(AppError::InternalErr(_))));
    }
}
