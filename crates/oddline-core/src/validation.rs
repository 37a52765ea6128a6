use crate::config::{LineConfig, MAX_SAFE_INTEGER, MIN_LINE_LENGTH, NumericRange, RangeInput};
use crate::error::{GenerationError, Result};

/// Validate raw range endpoints into integer bounds.
///
/// This checks, in order:
/// - both endpoints are finite
/// - both endpoints are whole numbers
/// - both endpoints are within `MAX_SAFE_INTEGER` of zero
/// - `min < max`
pub fn validate_range(range: RangeInput) -> Result<NumericRange> {
    let RangeInput { min, max } = range;
    if !min.is_finite() || !max.is_finite() {
        return Err(GenerationError::NonFiniteRange { min, max });
    }
    if min.fract() != 0.0 || max.fract() != 0.0 {
        return Err(GenerationError::NonIntegerRange { min, max });
    }
    let limit = MAX_SAFE_INTEGER as f64;
    if min.abs() > limit || max.abs() > limit {
        return Err(GenerationError::RangeOutOfBounds {
            min,
            max,
            limit: MAX_SAFE_INTEGER,
        });
    }

    let (min, max) = (min as i64, max as i64);
    if min >= max {
        return Err(GenerationError::InvalidOrder { min, max });
    }
    Ok(NumericRange { min, max })
}

pub fn validate_count(lines: usize) -> Result<()> {
    if lines == 0 {
        return Err(GenerationError::NonPositiveCount(lines));
    }
    Ok(())
}

pub fn validate_line_length(line_length: usize) -> Result<()> {
    if line_length < MIN_LINE_LENGTH {
        return Err(GenerationError::LineLengthTooSmall {
            requested: line_length,
            minimum: MIN_LINE_LENGTH,
        });
    }
    Ok(())
}

/// Require the range to hold at least `required` integers.
pub fn validate_span(range: NumericRange, required: i64) -> Result<()> {
    let span = range.span();
    if span < required {
        return Err(GenerationError::RangeTooSmall { span, required });
    }
    Ok(())
}

/// Require `line_length + slack` symbols to fit in an alphabet of
/// `alphabet_size`, returning the largest start offset that does.
pub fn validate_alphabet_window(
    line_length: usize,
    alphabet_size: usize,
    slack: usize,
) -> Result<usize> {
    let available = alphabet_size.saturating_sub(slack);
    if line_length > available {
        return Err(GenerationError::AlphabetWindowExceeded {
            requested: line_length,
            available,
        });
    }
    Ok(available - line_length)
}

/// Run the full check chain for a range-based sequence generator.
///
/// `required_span` maps the line length to the smallest acceptable span.
pub fn validate_sequence_config(
    range: RangeInput,
    config: &LineConfig,
    required_span: impl Fn(usize) -> i64,
) -> Result<NumericRange> {
    let range = validate_range(range)?;
    validate_count(config.lines)?;
    validate_line_length(config.line_length)?;
    validate_span(range, required_span(config.line_length))?;
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lines: usize, line_length: usize) -> LineConfig {
        LineConfig::new(lines, 1).with_line_length(line_length)
    }

    fn slack_two(line_length: usize) -> i64 {
        line_length as i64 + 2
    }

    #[test]
    fn rejects_non_finite_endpoints() {
        let result = validate_range(RangeInput::new(f64::NAN, 10.0));
        assert!(matches!(result, Err(GenerationError::NonFiniteRange { .. })));
        let result = validate_range(RangeInput::new(1.0, f64::INFINITY));
        assert!(matches!(result, Err(GenerationError::NonFiniteRange { .. })));
    }

    #[test]
    fn rejects_fractional_endpoints() {
        let result = validate_range(RangeInput::new(1.5, 10.0));
        assert!(matches!(result, Err(GenerationError::NonIntegerRange { .. })));
    }

    #[test]
    fn rejects_endpoints_past_safe_integers() {
        let result = validate_range(RangeInput::new(1.0, 1e30));
        assert!(matches!(result, Err(GenerationError::RangeOutOfBounds { .. })));

        let result = validate_range(RangeInput::new(-9_007_199_254_740_992.0, 0.0));
        assert!(matches!(result, Err(GenerationError::RangeOutOfBounds { .. })));

        let edge = MAX_SAFE_INTEGER as f64;
        assert_eq!(
            validate_range(RangeInput::new(-edge, edge)),
            Ok(NumericRange {
                min: -MAX_SAFE_INTEGER,
                max: MAX_SAFE_INTEGER
            })
        );
    }

    #[test]
    fn rejects_min_not_below_max() {
        assert_eq!(
            validate_range(RangeInput::from((10, 9))),
            Err(GenerationError::InvalidOrder { min: 10, max: 9 })
        );
        assert_eq!(
            validate_range(RangeInput::from((5, 5))),
            Err(GenerationError::InvalidOrder { min: 5, max: 5 })
        );
    }

    #[test]
    fn checks_run_in_declared_order() {
        // Both the order and the count are wrong; order is reported first.
        let result = validate_sequence_config(RangeInput::from((9, 1)), &config(0, 2), slack_two);
        assert!(matches!(result, Err(GenerationError::InvalidOrder { .. })));

        let result = validate_sequence_config(RangeInput::from((1, 2)), &config(0, 2), slack_two);
        assert_eq!(result, Err(GenerationError::NonPositiveCount(0)));

        let result = validate_sequence_config(RangeInput::from((1, 2)), &config(1, 2), slack_two);
        assert_eq!(
            result,
            Err(GenerationError::LineLengthTooSmall {
                requested: 2,
                minimum: 3
            })
        );

        let result = validate_sequence_config(RangeInput::from((1, 7)), &config(1, 6), slack_two);
        assert_eq!(
            result,
            Err(GenerationError::RangeTooSmall {
                span: 7,
                required: 8
            })
        );
    }

    #[test]
    fn span_boundary_is_inclusive() {
        let ok = validate_sequence_config(RangeInput::from((1, 8)), &config(1, 6), slack_two);
        assert_eq!(ok, Ok(NumericRange { min: 1, max: 8 }));
    }

    #[test]
    fn alphabet_window_reports_max_start() {
        assert_eq!(validate_alphabet_window(6, 26, 1), Ok(19));
        assert_eq!(validate_alphabet_window(25, 26, 1), Ok(0));
        assert_eq!(
            validate_alphabet_window(26, 26, 1),
            Err(GenerationError::AlphabetWindowExceeded {
                requested: 26,
                available: 25
            })
        );
    }
}
