//! Display formatting helpers for catalog and dashboard views.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Render a 0.0–1.0 completion fraction as a whole percentage label.
pub fn progress_label(fraction: f64) -> String {
    let percent = (fraction.clamp(0.0, 1.0) * 100.0).round();
    format!("{percent:.0}% complete")
}

/// Render a server-formatted price, falling back to "Free" when absent.
pub fn price_label(price: Option<&str>) -> String {
    match price {
        Some(p) if !p.trim().is_empty() => p.trim().to_owned(),
        _ => "Free".to_owned(),
    }
}
