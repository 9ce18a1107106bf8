//! # Bounded Counter
//!
//! An integer quantity held inside a fixed inclusive range.
//!
//! ## Input Coercion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_value(raw)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Text? ──► parse as a number ("" counts as 0, 0x/0o/0b accepted)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Not finite (NaN, inf, garbage)? ──► minimum                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Truncate toward zero (4.9 → 4, -4.9 → -4)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Clamp into [minimum, maximum]                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Differs from current? ──► store + on_change(new)                      │
//! │                    else ──► nothing                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::BoundedCounter;
//!
//! let mut counter = BoundedCounter::default(); // 1..=999, starts at 1
//! counter.set_value(4.9);
//! assert_eq!(counter.value(), 4);
//! counter.increase_by(1000);
//! assert_eq!(counter.value(), 999);
//! counter.set_value("abc");
//! assert_eq!(counter.value(), 1);
//! ```

use std::fmt;

use crate::validation::{validate_range, ValidationResult};
use crate::{MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};

/// Change callback; receives the new value.
pub type CounterCallback = Box<dyn FnMut(i64)>;

// =============================================================================
// Raw Quantity
// =============================================================================

/// Numeric-ish input as it arrives from an editable field.
#[derive(Debug, Clone, PartialEq)]
pub enum RawQuantity {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawQuantity {
    /// Truncated integer value, or `None` if the input is not a finite
    /// number. Blank text reads as zero.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RawQuantity::Int(value) => Some(*value),
            RawQuantity::Float(value) => truncate(*value),
            RawQuantity::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Some(0);
                }
                parse_number(text).and_then(truncate)
            }
        }
    }

    fn to_integer(&self, fallback: i64) -> i64 {
        self.as_integer().unwrap_or(fallback)
    }
}

/// Decimal or exponent notation, or an unsigned `0x`/`0o`/`0b` literal.
fn parse_number(text: &str) -> Option<f64> {
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return text.parse().ok(),
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

fn truncate(value: f64) -> Option<i64> {
    // `as` saturates at the i64 bounds.
    value.is_finite().then(|| value.trunc() as i64)
}

impl From<i64> for RawQuantity {
    fn from(value: i64) -> Self {
        RawQuantity::Int(value)
    }
}

impl From<i32> for RawQuantity {
    fn from(value: i32) -> Self {
        RawQuantity::Int(i64::from(value))
    }
}

impl From<u32> for RawQuantity {
    fn from(value: u32) -> Self {
        RawQuantity::Int(i64::from(value))
    }
}

impl From<f64> for RawQuantity {
    fn from(value: f64) -> Self {
        RawQuantity::Float(value)
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        RawQuantity::Text(value.to_string())
    }
}

impl From<String> for RawQuantity {
    fn from(value: String) -> Self {
        RawQuantity::Text(value)
    }
}

// =============================================================================
// Counter Options
// =============================================================================

/// Construction parameters for [`BoundedCounter`].
///
/// ## Defaults
/// - `minimum`: 1
/// - `maximum`: 999
/// - start: `minimum`
pub struct CounterOptions {
    initial_value: Option<RawQuantity>,
    minimum: i64,
    maximum: i64,
    on_change: Option<CounterCallback>,
}

impl CounterOptions {
    pub fn new() -> Self {
        CounterOptions {
            initial_value: None,
            minimum: MIN_ITEM_QUANTITY,
            maximum: MAX_ITEM_QUANTITY,
            on_change: None,
        }
    }

    pub fn initial(mut self, value: impl Into<RawQuantity>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn range(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(i64) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Builds the counter.
    ///
    /// The starting value goes through the same coercion and clamping as
    /// [`BoundedCounter::set_value`] but does not fire the callback.
    ///
    /// ## Errors
    /// `ValidationError::InvertedRange` if `minimum > maximum`.
    pub fn build(self) -> ValidationResult<BoundedCounter> {
        validate_range(self.minimum, self.maximum)?;

        let start = self
            .initial_value
            .map(|raw| raw.to_integer(self.minimum))
            .unwrap_or(self.minimum);

        Ok(BoundedCounter {
            value: start.clamp(self.minimum, self.maximum),
            minimum: self.minimum,
            maximum: self.maximum,
            on_change: self.on_change,
        })
    }
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CounterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterOptions")
            .field("initial_value", &self.initial_value)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

// =============================================================================
// Bounded Counter
// =============================================================================

/// Integer holder that enforces `minimum <= value <= maximum` and reports
/// only net changes.
pub struct BoundedCounter {
    value: i64,
    minimum: i64,
    maximum: i64,
    on_change: Option<CounterCallback>,
}

impl BoundedCounter {
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    pub fn is_at_minimum(&self) -> bool {
        self.value == self.minimum
    }

    pub fn is_at_maximum(&self) -> bool {
        self.value == self.maximum
    }

    /// Replaces the change callback.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: FnMut(i64) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Coerces, clamps and stores `next`.
    ///
    /// Returns `true` if the stored value changed (and the callback fired).
    pub fn set_value(&mut self, next: impl Into<RawQuantity>) -> bool {
        let normalized = next
            .into()
            .to_integer(self.minimum)
            .clamp(self.minimum, self.maximum);

        if normalized == self.value {
            return false;
        }

        self.value = normalized;
        if let Some(callback) = self.on_change.as_mut() {
            callback(normalized);
        }
        true
    }

    /// `set_value(value + 1)`.
    pub fn increase(&mut self) -> bool {
        self.increase_by(1)
    }

    /// `set_value(value - 1)`.
    pub fn decrease(&mut self) -> bool {
        self.decrease_by(1)
    }

    pub fn increase_by(&mut self, step: i64) -> bool {
        self.set_value(self.value.saturating_add(step))
    }

    pub fn decrease_by(&mut self, step: i64) -> bool {
        self.set_value(self.value.saturating_sub(step))
    }
}

impl Default for BoundedCounter {
    /// Range 1..=999 starting at 1.
    fn default() -> Self {
        BoundedCounter {
            value: MIN_ITEM_QUANTITY,
            minimum: MIN_ITEM_QUANTITY,
            maximum: MAX_ITEM_QUANTITY,
            on_change: None,
        }
    }
}

impl fmt::Debug for BoundedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCounter")
            .field("value", &self.value)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Counter over 1..=999 that records every callback value.
    fn tracked(initial: i64) -> (BoundedCounter, Rc<RefCell<Vec<i64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let counter = CounterOptions::new()
            .initial(initial)
            .on_change(move |v| sink.borrow_mut().push(v))
            .build()
            .unwrap();
        (counter, seen)
    }

    #[test]
    fn test_defaults() {
        let counter = CounterOptions::new().build().unwrap();
        assert_eq!(counter.value(), 1);
        assert_eq!(counter.minimum(), 1);
        assert_eq!(counter.maximum(), 999);

        let default = BoundedCounter::default();
        assert_eq!(default.value(), 1);
        assert_eq!(default.maximum(), 999);
    }

    #[test]
    fn test_start_defaults_to_minimum() {
        let counter = CounterOptions::new().range(5, 10).build().unwrap();
        assert_eq!(counter.value(), 5);
    }

    #[test]
    fn test_initial_value_is_coerced_and_clamped() {
        let high = CounterOptions::new().initial(5000).build().unwrap();
        assert_eq!(high.value(), 999);

        let frac = CounterOptions::new().initial(7.8).build().unwrap();
        assert_eq!(frac.value(), 7);

        let junk = CounterOptions::new()
            .initial("junk")
            .range(3, 9)
            .build()
            .unwrap();
        assert_eq!(junk.value(), 3);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = CounterOptions::new().range(10, 1).build().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedRange {
                minimum: 10,
                maximum: 1
            }
        );
    }

    #[test]
    fn test_construction_does_not_fire_callback() {
        let (_counter, seen) = tracked(50);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_clamps_below_and_above() {
        let (mut counter, _) = tracked(10);

        counter.set_value(0);
        assert_eq!(counter.value(), 1);

        counter.set_value(1500);
        assert_eq!(counter.value(), 999);

        counter.set_value(-40);
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn test_truncates_not_rounds() {
        let mut counter = BoundedCounter::default();

        counter.set_value(4.9);
        assert_eq!(counter.value(), 4);

        counter.set_value("12.99");
        assert_eq!(counter.value(), 12);
    }

    #[test]
    fn test_non_finite_falls_back_to_minimum() {
        let mut counter = CounterOptions::new()
            .initial(50)
            .range(2, 100)
            .build()
            .unwrap();

        counter.set_value(f64::NAN);
        assert_eq!(counter.value(), 2);

        counter.set_value(40);
        counter.set_value(f64::INFINITY);
        assert_eq!(counter.value(), 2);

        counter.set_value(40);
        counter.set_value("twelve");
        assert_eq!(counter.value(), 2);
    }

    #[test]
    fn test_text_input_parses() {
        let mut counter = BoundedCounter::default();

        counter.set_value(" 42 ");
        assert_eq!(counter.value(), 42);

        counter.set_value("1e2");
        assert_eq!(counter.value(), 100);

        // Empty text reads as zero, then clamps up to the minimum.
        counter.set_value("");
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn test_callback_only_on_net_change() {
        let (mut counter, seen) = tracked(5);

        assert!(counter.set_value(6));
        assert!(!counter.set_value(6));
        assert!(!counter.set_value(6.7));
        assert!(counter.set_value(2000));
        assert!(!counter.set_value(1000));

        assert_eq!(*seen.borrow(), vec![6, 999]);
    }

    #[test]
    fn test_increase_at_maximum_is_noop() {
        let (mut counter, seen) = tracked(999);

        assert!(!counter.increase());
        assert_eq!(counter.value(), 999);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_decrease_at_minimum_is_noop() {
        let (mut counter, seen) = tracked(1);

        assert!(!counter.decrease());
        assert!(counter.is_at_minimum());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_large_steps_saturate() {
        let (mut counter, seen) = tracked(3);

        counter.increase_by(1000);
        assert!(counter.is_at_maximum());

        counter.decrease_by(i64::MAX);
        assert!(counter.is_at_minimum());

        counter.increase_by(i64::MAX);
        assert_eq!(counter.value(), 999);

        assert_eq!(*seen.borrow(), vec![999, 1, 999]);
    }

    #[test]
    fn test_step_by_one() {
        let (mut counter, seen) = tracked(5);

        counter.increase();
        counter.increase();
        counter.decrease();

        assert_eq!(counter.value(), 6);
        assert_eq!(*seen.borrow(), vec![6, 7, 6]);
    }

    #[test]
    fn test_set_on_change_replaces_callback() {
        let mut counter = BoundedCounter::default();
        counter.set_value(3);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        counter.set_on_change(move |v| sink.borrow_mut().push(v));
        counter.increase();

        assert_eq!(*seen.borrow(), vec![4]);
    }

    #[test]
    fn test_raw_quantity_as_integer() {
        assert_eq!(RawQuantity::from(7).as_integer(), Some(7));
        assert_eq!(RawQuantity::from(-2.7).as_integer(), Some(-2));
        assert_eq!(RawQuantity::from("  ").as_integer(), Some(0));
        assert_eq!(RawQuantity::from("3.5").as_integer(), Some(3));
        assert_eq!(RawQuantity::from("NaN").as_integer(), None);
        assert_eq!(RawQuantity::from("inf").as_integer(), None);
        assert_eq!(RawQuantity::from("x1").as_integer(), None);
        assert_eq!(RawQuantity::from(f64::NEG_INFINITY).as_integer(), None);
    }

    #[test]
    fn test_prefixed_literals() {
        assert_eq!(RawQuantity::from("0x10").as_integer(), Some(16));
        assert_eq!(RawQuantity::from(" 0XfF ").as_integer(), Some(255));
        assert_eq!(RawQuantity::from("0o17").as_integer(), Some(15));
        assert_eq!(RawQuantity::from("0b101").as_integer(), Some(5));
        assert_eq!(RawQuantity::from("0x").as_integer(), None);
        assert_eq!(RawQuantity::from("0b102").as_integer(), None);
        assert_eq!(RawQuantity::from("0x+1").as_integer(), None);
        assert_eq!(RawQuantity::from("-0x10").as_integer(), None);

        let mut counter = BoundedCounter::default();
        counter.set_value("0x10");
        assert_eq!(counter.value(), 16);
    }

    #[test]
    fn test_options_carry_builder_settings() {
        let options = CounterOptions::new().initial("7").range(2, 9);
        let rendered = format!("{:?}", options);
        assert!(rendered.contains("minimum: 2"));
        assert!(rendered.contains("maximum: 9"));

        let counter = options.build().unwrap();
        assert_eq!(counter.value(), 7);
        assert_eq!((counter.minimum(), counter.maximum()), (2, 9));
    }

    #[test]
    fn test_huge_float_saturates_into_range() {
        let mut counter = BoundedCounter::default();
        counter.set_value(1e300);
        assert_eq!(counter.value(), 999);
        counter.set_value(-1e300);
        assert_eq!(counter.value(), 1);
    }
}
