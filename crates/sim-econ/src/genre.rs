//! Genre saturation per platform and genre pair compatibility.

use crate::EconError;
use sim_core::{Game, Genre, GenreCompatibility, Platform, PlatformId};
use std::collections::BTreeMap;
use tracing::debug;

/// Share of released games per (platform, genre).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenreFactorMatrix {
    rows: BTreeMap<PlatformId, BTreeMap<Genre, f64>>,
}

impl GenreFactorMatrix {
    /// Recompute from every game currently on the market.
    ///
    /// Each platform gets one row; a genre's factor is the number of released
    /// games on the platform carrying it over the platform's released game count
    /// (at least 1).
    pub fn compute(platforms: &[Platform], games: &[Game]) -> Self {
        let released: Vec<&Game> = games.iter().filter(|g| g.phase.is_on_market()).collect();
        let mut rows = BTreeMap::new();
        for p in platforms {
            let same_platform: Vec<&&Game> = released
                .iter()
                .filter(|g| g.platform_ids.contains(&p.id))
                .collect();
            let denom = same_platform.len().max(1) as f64;
            let row = Genre::ALL
                .iter()
                .map(|genre| {
                    let n = same_platform
                        .iter()
                        .filter(|g| g.genres.contains(genre))
                        .count();
                    (*genre, n as f64 / denom)
                })
                .collect();
            rows.insert(p.id.clone(), row);
        }
        debug!(platforms = rows.len(), released = released.len(), "genre factor matrix");
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Factor of one genre on one platform.
    pub fn factor(&self, platform: &PlatformId, genre: Genre) -> Result<f64, EconError> {
        let row = self
            .rows
            .get(platform)
            .ok_or_else(|| EconError::MissingGenreMatrix(platform.clone()))?;
        row.get(&genre)
            .copied()
            .ok_or_else(|| EconError::MissingGenreFactor {
                platform: platform.clone(),
                genre,
            })
    }
}

/// Unordered genre pair scores. Missing pairs score 1.0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenreCompatibilityTable {
    scores: BTreeMap<(Genre, Genre), f64>,
}

fn key(a: Genre, b: Genre) -> (Genre, Genre) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl GenreCompatibilityTable {
    pub fn new(entries: &[GenreCompatibility]) -> Self {
        let scores = entries.iter().map(|e| (key(e.a, e.b), e.score)).collect();
        Self { scores }
    }

    pub fn score(&self, a: Genre, b: Genre) -> f64 {
        self.scores.get(&key(a, b)).copied().unwrap_or(1.0)
    }

    /// Product of the scores of every distinct genre pair; 1.0 for a single genre.
    pub fn combined(&self, genres: &[Genre]) -> f64 {
        let mut product = 1.0;
        for (i, a) in genres.iter().enumerate() {
            for b in &genres[i + 1..] {
                product *= self.score(*a, *b);
            }
        }
        product
    }
}

/// Market appetite for a game: genre factor of its first genre on its first
/// platform, times the compatibility of its genre mix.
pub fn genre_factor(
    game: &Game,
    matrix: &GenreFactorMatrix,
    table: &GenreCompatibilityTable,
) -> Result<f64, EconError> {
    let platform = game
        .platform_ids
        .first()
        .ok_or_else(|| EconError::MissingPlatform(game.id.to_string()))?;
    let genre = *game
        .genres
        .first()
        .ok_or_else(|| EconError::MissingGenre(game.id.to_string()))?;
    Ok(matrix.factor(platform, genre)? * table.combined(&game.genres))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sim_core::{GameId, License, Phase, PlatformSpecs};

    fn platform(id: &str) -> Platform {
        let t = NaiveDate::from_ymd_opt(1977, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Platform {
            id: PlatformId::new(id),
            tag: None,
            name: id.to_uppercase(),
            release_date: t,
            discontinue_date: t,
            released: true,
            discontinued: false,
            generation: 1,
            units: vec![],
            units_sold: 0,
            average_game_price: Decimal::new(25, 0),
            media: vec![],
            license: License::default(),
            specs: PlatformSpecs::default(),
        }
    }

    fn released(id: &str, platform: &str, genres: Vec<Genre>) -> Game {
        let mut g = Game::new(
            GameId::new(id),
            id,
            vec![PlatformId::new(platform)],
            genres,
            None,
            None,
            vec![],
        );
        g.phase = Phase::Release;
        g
    }

    #[test]
    fn matrix_counts_released_games_per_platform() {
        let platforms = vec![platform("p1"), platform("p2")];
        let mut dev = released("d", "p1", vec![Genre::Action]);
        dev.phase = Phase::Alpha;
        let games = vec![
            released("a", "p1", vec![Genre::Action]),
            released("b", "p1", vec![Genre::Action, Genre::Puzzle]),
            released("c", "p1", vec![Genre::Sports]),
            released("e", "p1", vec![Genre::Racing]),
            dev,
        ];
        let m = GenreFactorMatrix::compute(&platforms, &games);
        let p1 = PlatformId::new("p1");
        assert_eq!(m.factor(&p1, Genre::Action).unwrap(), 0.5);
        assert_eq!(m.factor(&p1, Genre::Puzzle).unwrap(), 0.25);
        assert_eq!(m.factor(&PlatformId::new("p2"), Genre::Action).unwrap(), 0.0);
        assert!(matches!(
            m.factor(&PlatformId::new("p3"), Genre::Action),
            Err(EconError::MissingGenreMatrix(_))
        ));
    }

    #[test]
    fn compatibility_is_symmetric_and_multiplies() {
        let table = GenreCompatibilityTable::new(&[
            GenreCompatibility { a: Genre::Action, b: Genre::Puzzle, score: 0.5 },
            GenreCompatibility { a: Genre::Sports, b: Genre::Action, score: 0.8 },
        ]);
        assert_eq!(table.score(Genre::Puzzle, Genre::Action), 0.5);
        assert_eq!(table.score(Genre::Strategy, Genre::Racing), 1.0);
        assert_eq!(table.combined(&[Genre::Action]), 1.0);
        let c = table.combined(&[Genre::Action, Genre::Puzzle, Genre::Sports]);
        assert!((c - 0.4).abs() < 1e-12);
    }

    #[test]
    fn genre_factor_requires_platform_and_genre() {
        let platforms = vec![platform("p1")];
        let games = vec![released("a", "p1", vec![Genre::Action])];
        let m = GenreFactorMatrix::compute(&platforms, &games);
        let table = GenreCompatibilityTable::default();
        assert_eq!(genre_factor(&games[0], &m, &table).unwrap(), 1.0);
        let mut g = games[0].clone();
        g.genres.clear();
        assert!(matches!(genre_factor(&g, &m, &table), Err(EconError::MissingGenre(_))));
        g.platform_ids.clear();
        assert!(matches!(genre_factor(&g, &m, &table), Err(EconError::MissingPlatform(_))));
    }
}
