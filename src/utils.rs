pub const MAX_SKILL_LEVEL: i32 = 5;

pub fn calculate_sp_per_minute(primary: f64, secondary: f64) -> f64 {
    primary + (secondary / 2.0)
}

/// Total SP a skill of the given rank holds once `level` is trained.
pub fn calculate_sp_for_level(rank: i64, level: i32) -> i64 {
    if !(1..=MAX_SKILL_LEVEL).contains(&level) {
        return 0;
    }
    let base: f64 = 2.0;
    let exponent = 2.5 * (level as f64 - 1.0);
    // Ceiling the base SP before multiplying by rank matches EVE's behavior
    let base_sp = (base.powf(exponent) * 250.0).ceil();
    (base_sp * rank.max(0) as f64) as i64
}

/// Highest level whose SP threshold is covered by `points`.
pub fn level_for_sp(rank: i64, points: i64) -> i32 {
    if rank <= 0 {
        return 0;
    }
    (1..=MAX_SKILL_LEVEL)
        .take_while(|&level| calculate_sp_for_level(rank, level) <= points)
        .last()
        .unwrap_or(0)
}
