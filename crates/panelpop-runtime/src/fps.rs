//! Average frame-rate sampling for the FPS overlay

/// Samples above this are start-up artifacts, not real rates
pub const FPS_SPIKE_LIMIT: f64 = 2_000_000.0;

/// Significant digits shown by the overlay
pub const FPS_DIGITS: usize = 5;

/// `frames / seconds`, reported as 0 when the ratio is above
/// [`FPS_SPIKE_LIMIT`] or not a finite number.
pub fn average_fps(frames: u64, seconds_since_start: f64) -> f64 {
    let fps = frames as f64 / seconds_since_start;
    if fps.is_finite() && fps <= FPS_SPIKE_LIMIT {
        fps
    } else {
        0.0
    }
}

/// Format like C's `%g` with `digits` significant digits: trailing zeros
/// trimmed, scientific notation for very large or small magnitudes.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
