//! The widget's data model.

/// Snapshot of a greeter's state.
///
/// `display_name` is never empty: every write goes through
/// [`WidgetState::sanitize_name`], which substitutes the configured fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    /// The name shown in the greeting.
    pub display_name: String,
    /// Number of accepted clicks. Never decreases.
    pub click_count: u64,
}

impl WidgetState {
    /// Creates a state with the given name (sanitized against `fallback`) and count.
    #[must_use]
    pub fn new(name: &str, fallback: &str, click_count: u64) -> Self {
        Self {
            display_name: Self::sanitize_name(name, fallback),
            click_count,
        }
    }

    /// Returns `name` unchanged unless it is empty or whitespace only, in which case
    /// `fallback` is returned instead.
    #[must_use]
    pub fn sanitize_name(name: &str, fallback: &str) -> String {
        if name.trim().is_empty() {
            fallback.to_owned()
        } else {
            name.to_owned()
        }
    }

    /// Returns the count after one more click.
    #[must_use]
    pub const fn next_count(&self) -> u64 {
        self.click_count.saturating_add(1)
    }
}

/// Parses a click count from an untrusted string source such as an HTML attribute.
///
/// Surrounding whitespace is ignored and the leading run of ASCII digits is used, so
/// `"12abc"` yields 12. Anything without a leading digit yields 0, as do negative
/// numbers. Values too large for `u64` saturate.
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    let digits = raw.trim_start();
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}
