//! Guaraní amount formatting.
//!
//! The guaraní has no subunits, so every amount in the system is a plain
//! non-negative integer. Display formatting groups digits in threes with a
//! `.` separator (es-PY convention), independent of the host locale so that
//! generated WhatsApp messages are byte-for-byte reproducible.

/// Format an integer guaraní amount with `.` thousands separators.
///
/// The currency label is not included; callers prefix `Gs. ` themselves.
///
/// # Examples
///
/// ```
/// use mbarete_core::money::format_gs;
///
/// assert_eq!(format_gs(0), "0");
/// assert_eq!(format_gs(17000), "17.000");
/// assert_eq!(format_gs(1250000), "1.250.000");
/// ```
#[must_use]
pub fn format_gs(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
