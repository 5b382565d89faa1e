//! Numeric and text helpers shared by the pipeline stages.

/// Round `value` to `decimals` places, resolving ties to even.
///
/// The value is scaled, rounded half-to-even, and scaled back, which is how
/// tabular tooling typically rounds percentages. `round(0.125, 2)` gives
/// `0.12`, `round(62.5, 0)` gives `62.0`.
///
/// # Example
///
/// ```
/// use attendance_pipeline::core::transforms::round_decimals;
///
/// assert_eq!(round_decimals(66.666_666, 2), 66.67);
/// assert_eq!(round_decimals(75.0, 2), 75.0);
/// ```
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Arithmetic mean of the values, or `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Title-case a name: the first letter of every alphabetic run is
/// upper-cased and the rest lower-cased.
///
/// Any non-alphabetic character (space, hyphen, apostrophe, digit) starts a
/// new run, so `"mary-ann o'neil"` becomes `"Mary-Ann O'Neil"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}
