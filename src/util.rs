/// `part / whole` as a whole-number percentage, rounded half away from zero.
/// Zero when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> u32 {
    match whole {
        0 => 0,
        w => ((part as f64 / w as f64) * 100.0).round() as u32,
    }
}

/// Elapsed seconds as `MM:SS`. Minutes keep growing past 99.
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Mean of `total` over `count` items, or `None` with no items.
pub fn mean(total: u64, count: u64) -> Option<f64> {
    match count {
        positive if positive > 0 => Some(total as f64 / count as f64),
        _ => None,
    }
}
