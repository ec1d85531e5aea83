//! Ordering of post listings
//!
//! The posts endpoint returns posts newest first, but "newest" is not any
//! single field: `date` can be backdated, and `id` inverts even among posts
//! sharing a `date`. Listings observed so far are ordered by the string
//! `date ++ created_at`, descending. Further tie-breakers may exist that a
//! small sample does not reveal, so listings are audited against every
//! candidate ordering instead of assuming one.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::models::Post;

/// The derived key listings are sorted by: `date` followed by `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey(String);

impl SortKey {
    pub fn of(post: &Post) -> Self {
        let mut key = String::with_capacity(post.date.len() + post.created_at.len());
        key.push_str(&post.date);
        key.push_str(&post.created_at);
        SortKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort posts the way the server lists them: by `SortKey`, descending.
///
/// Stable, so posts with equal keys keep their relative order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| std::cmp::Reverse(SortKey::of(p)));
}

/// Candidate orderings, each descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderHypothesis {
    Id,
    CreatedAt,
    Date,
    DateThenCreatedAt,
    ConcatenatedKey,
}

impl OrderHypothesis {
    pub const ALL: [OrderHypothesis; 5] = [
        OrderHypothesis::Id,
        OrderHypothesis::CreatedAt,
        OrderHypothesis::Date,
        OrderHypothesis::DateThenCreatedAt,
        OrderHypothesis::ConcatenatedKey,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OrderHypothesis::Id => "id",
            OrderHypothesis::CreatedAt => "created_at",
            OrderHypothesis::Date => "date",
            OrderHypothesis::DateThenCreatedAt => "date, created_at",
            OrderHypothesis::ConcatenatedKey => "date ++ created_at",
        }
    }

    /// Ascending comparison of two posts under this hypothesis.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            OrderHypothesis::Id => a.id.cmp(&b.id),
            OrderHypothesis::CreatedAt => a.created_at.cmp(&b.created_at),
            OrderHypothesis::Date => a.date.cmp(&b.date),
            OrderHypothesis::DateThenCreatedAt => (&a.date, &a.created_at).cmp(&(&b.date, &b.created_at)),
            OrderHypothesis::ConcatenatedKey => SortKey::of(a).cmp(&SortKey::of(b)),
        }
    }
}

impl fmt::Display for OrderHypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Adjacent pair that is out of order under some hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inversion {
    /// Position of the earlier post in the listing
    pub index: usize,
    pub earlier_id: u64,
    pub later_id: u64,
}

/// Every adjacent pair where the later post should have come first.
///
/// Ties are not inversions.
pub fn find_inversions(posts: &[Post], hypothesis: OrderHypothesis) -> Vec<Inversion> {
    posts
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| hypothesis.compare(&pair[0], &pair[1]) == Ordering::Less)
        .map(|(index, pair)| Inversion {
            index,
            earlier_id: pair[0].id,
            later_id: pair[1].id,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct HypothesisResult {
    pub hypothesis: OrderHypothesis,
    pub inversions: usize,
    pub first_inversion: Option<Inversion>,
}

impl HypothesisResult {
    pub fn is_consistent(&self) -> bool {
        self.inversions == 0
    }
}

/// Outcome of checking one listing against every hypothesis.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    pub posts: usize,
    pub results: Vec<HypothesisResult>,
}

impl OrderReport {
    pub fn result(&self, hypothesis: OrderHypothesis) -> Option<&HypothesisResult> {
        self.results.iter().find(|r| r.hypothesis == hypothesis)
    }

    pub fn is_consistent_with(&self, hypothesis: OrderHypothesis) -> bool {
        self.result(hypothesis).is_some_and(HypothesisResult::is_consistent)
    }

    pub fn consistent_hypotheses(&self) -> Vec<OrderHypothesis> {
        self.results
            .iter()
            .filter(|r| r.is_consistent())
            .map(|r| r.hypothesis)
            .collect()
    }
}

pub fn audit(posts: &[Post]) -> OrderReport {
    let results = OrderHypothesis::ALL
        .iter()
        .map(|&hypothesis| {
            let inversions = find_inversions(posts, hypothesis);
            HypothesisResult {
                hypothesis,
                inversions: inversions.len(),
                first_inversion: inversions.into_iter().next(),
            }
        })
        .collect();

    OrderReport {
        posts: posts.len(),
        results,
    }
}
