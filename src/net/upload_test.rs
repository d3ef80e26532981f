use super::*;

// =============================================================
// Progress math
// =============================================================

#[test]
fn progress_is_a_fraction_of_total() {
    assert!((progress_percent(0.0, 200.0) - 0.0).abs() < f64::EPSILON);
    assert!((progress_percent(50.0, 200.0) - 25.0).abs() < f64::EPSILON);
    assert!((progress_percent(200.0, 200.0) - 100.0).abs() < f64::EPSILON);
}

#[test]
fn unknown_total_reports_zero() {
    assert!((progress_percent(512.0, 0.0) - 0.0).abs() < f64::EPSILON);
    assert!((progress_percent(512.0, -1.0) - 0.0).abs() < f64::EPSILON);
}

#[test]
fn overshoot_is_clamped() {
    assert!((progress_percent(300.0, 200.0) - 100.0).abs() < f64::EPSILON);
}
