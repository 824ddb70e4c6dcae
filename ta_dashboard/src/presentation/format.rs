//! Display formatting. Undefined (`NaN`) values render as `n/a`.

pub const UNDEFINED: &str = "n/a";

/// OBV is shown in millions of shares.
pub const OBV_SCALE: f64 = 1_000_000.0;

pub fn currency(value: f64) -> String {
    if value.is_finite() {
        if value < 0.0 {
            format!("-${:.2}", value.abs())
        } else {
            format!("${value:.2}")
        }
    } else {
        UNDEFINED.to_string()
    }
}

pub fn number(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        UNDEFINED.to_string()
    }
}

/// Signed, e.g. `+1.23%` / `-0.50%`.
pub fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:+.2}%")
    } else {
        UNDEFINED.to_string()
    }
}

pub fn millions(raw: f64) -> f64 {
    raw / OBV_SCALE
}

/// `NaN` becomes `None` so JSON output carries `null` for undefined values.
pub fn defined(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
