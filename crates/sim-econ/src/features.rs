//! Feature roll-ups: per-category quality levels, average scale and development progress.

use sim_core::{Feature, Game};
use std::collections::BTreeSet;

/// Highest quality level a single feature can reach.
pub const MAX_FEATURE_SCALE: f64 = 4.0;

/// Aggregated progress of all game features sharing a category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryProgress {
    pub category: String,
    /// Sum of the quality levels reached by each feature of the category.
    pub level: u32,
    pub points: f64,
    /// Element-wise sum of the features' point scales, scaled by game size.
    pub point_scale: Vec<f64>,
}

/// Number of thresholds in `scale` that `points` strictly exceeds.
fn scale_level(points: f64, scale: &[f64]) -> u32 {
    scale
        .iter()
        .enumerate()
        .filter(|(_, s)| points > **s)
        .map(|(i, _)| i as u32 + 1)
        .last()
        .unwrap_or(0)
}

fn game_features<'a>(game: &'a Game, features: &'a [Feature]) -> impl Iterator<Item = &'a Feature> {
    features.iter().filter(|f| game.feature_ids.contains(&f.id))
}

/// Group the game's features by category, first-seen order.
///
/// Example: one feature with point scale [100, 200, 300, 400], game size 1
/// and 250 points reaches level 2.
pub fn feature_progress_by_category(game: &Game, features: &[Feature]) -> Vec<CategoryProgress> {
    let size = f64::from(game.game_size);
    let mut out: Vec<CategoryProgress> = Vec::new();
    for f in game_features(game, features) {
        let points = game.progress_of(&f.id);
        let scale: Vec<f64> = f.point_scale.iter().map(|s| s * size).collect();
        let level = scale_level(points, &scale);
        match out.iter_mut().find(|c| c.category == f.category) {
            Some(c) => {
                c.level += level;
                c.points += points;
                for (acc, s) in c.point_scale.iter_mut().zip(&scale) {
                    *acc += s;
                }
            }
            None => out.push(CategoryProgress {
                category: f.category.clone(),
                level,
                points,
                point_scale: scale,
            }),
        }
    }
    out
}

/// Sum of the level-2 thresholds over all categories.
pub fn level2_point_scale(progress: &[CategoryProgress]) -> f64 {
    progress
        .iter()
        .map(|c| c.point_scale.get(1).copied().unwrap_or(0.0))
        .sum()
}

/// Development progress: total feature points over the level-2 point scale.
/// Returns 0 when the game has no scored features.
pub fn game_progress(game: &Game, features: &[Feature]) -> f64 {
    let denom = level2_point_scale(&feature_progress_by_category(game, features));
    let ratio = game.total_feature_progress() / denom;
    if denom <= 0.0 || !ratio.is_finite() {
        0.0
    } else {
        ratio
    }
}

/// Mean quality level (0..=4) over the game's features, unscaled by game size.
/// Returns 0 for a game without features.
pub fn average_feature_scale(game: &Game, features: &[Feature]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for f in game_features(game, features) {
        let points = game.progress_of(&f.id);
        let level = (0..4usize)
            .rev()
            .find(|i| points > f.threshold(*i))
            .map_or(0, |i| i + 1);
        total += level as f64;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Every transitive dependency of `feature`, each listed once.
pub fn dependencies_all<'a>(feature: &Feature, features: &'a [Feature]) -> Vec<&'a Feature> {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::new();
    let mut stack: Vec<&str> = feature.dependencies.iter().map(String::as_str).collect();
    while let Some(tag) = stack.pop() {
        if !visited.insert(tag) {
            continue;
        }
        for f in features.iter().filter(|f| f.tag == tag) {
            out.push(f);
            stack.extend(f.dependencies.iter().map(String::as_str));
        }
    }
    out
}

/// A feature is revealed once all its transitive dependencies are researched.
pub fn is_revealed(feature: &Feature, features: &[Feature]) -> bool {
    dependencies_all(feature, features)
        .iter()
        .all(|f| f.is_researched())
}
