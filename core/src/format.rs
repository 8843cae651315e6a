/// Compact magnitude: `2.5M`, `1.5K`, or the plain integer below a thousand.
pub fn format_magnitude(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{}M", one_decimal(n, 1_000_000))
    } else if n >= 1_000 {
        format!("{}K", one_decimal(n, 1_000))
    } else {
        n.to_string()
    }
}

/// `n / unit` to one decimal, rounding on the exact binary value of the
/// quotient with ties going up.
///
/// `n / unit` lands exactly on a tie in binary only when
/// `n % (unit / 2) == unit / 4` (1250, 3750, 1_250_000, ...). Everything else
/// is never exactly halfway, so `{:.1}` already rounds it correctly.
fn one_decimal(n: u64, unit: u64) -> String {
    if n % (unit / 2) == unit / 4 {
        let tenths = (n + unit / 20) / (unit / 10);
        format!("{}.{}", tenths / 10, tenths % 10)
    } else {
        format!("{:.1}", n as f64 / unit as f64)
    }
}
