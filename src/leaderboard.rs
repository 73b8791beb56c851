use rocket::serde::{self, Deserialize, Serialize};

use crate::database::GameScore;

/// A collection kept sorted by descending score.
/// Adding an item caps the collection at `capacity` items.
/// Items with equal scores keep their insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard<T: LeaderboardItem> {
    collection: Vec<T>,
    capacity: usize,
}

impl<T: LeaderboardItem> Leaderboard<T> {
    /// Sorts `collection` without dropping anything,
    /// even when it holds more than `capacity` items.
    pub fn new(collection: Vec<T>, capacity: usize) -> Self {
        let mut leaderboard = Self {
            collection,
            capacity,
        };
        leaderboard.sort();
        leaderboard
    }

    pub fn add(&mut self, item: T) {
        self.collection.push(item);
        self.sort();
        self.collection.truncate(self.capacity);
    }

    /// Returns the `count` best items.
    pub fn top(&self, count: usize) -> &[T] {
        &self.collection[..count.min(self.collection.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.collection.iter()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn stats(&self) -> LeaderboardStats {
        LeaderboardStats::from_scores(self.iter().map(|item| item.score()))
    }

    pub fn into_inner(self) -> Vec<T> {
        self.collection
    }

    fn sort(&mut self) {
        // Stable sort, ties stay in insertion order
        self.collection.sort_by(|a, b| b.score().cmp(&a.score()));
    }
}

impl<T: LeaderboardItem> Serialize for Leaderboard<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.collection.serialize(serializer)
    }
}

pub trait LeaderboardItem: Serialize {
    fn score(&self) -> GameScore;
}

/// Aggregates over every stored item.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_games: usize,
    pub highest_score: GameScore,
    /// Rounded to one decimal.
    pub average_score: f64,
}

impl LeaderboardStats {
    pub fn from_scores(scores: impl Iterator<Item = GameScore>) -> Self {
        let (total_games, highest_score, sum) = scores.fold(
            (0usize, 0 as GameScore, 0u64),
            |(count, highest, sum), score| (count + 1, highest.max(score), sum + score as u64),
        );

        let average_score = if total_games == 0 {
            0.0
        } else {
            (sum as f64 / total_games as f64 * 10.0).round() / 10.0
        };

        Self {
            total_games,
            highest_score,
            average_score,
        }
    }
}
