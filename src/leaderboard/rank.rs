// src/leaderboard/rank.rs

use std::cmp::Ordering;

use crate::models::leaderboard::AggregatedStanding;

/// Standings order: score desc, accuracy desc, then user id asc.
pub fn compare_standings(a: &AggregatedStanding, b: &AggregatedStanding) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| b.total_accuracy.cmp(&a.total_accuracy))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Sorts standings and assigns positions `1..=N`.
///
/// Ties never share a rank: two users level on score and accuracy get
/// consecutive ranks.
pub fn rank(mut standings: Vec<AggregatedStanding>) -> Vec<AggregatedStanding> {
    standings.sort_by(compare_standings);

    for (index, standing) in standings.iter_mut().enumerate() {
        standing.rank = (index + 1) as u32;
    }

    standings
}
