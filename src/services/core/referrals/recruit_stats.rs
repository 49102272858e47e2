// src/services/core/referrals/recruit_stats.rs

//! Pure aggregation functions over a paginated list of recruit edges,
//! as handed to dashboard resolvers.

use crate::types::RecruitEdge;
use chrono::Duration;

/// Number of recruits in the list. A missing list counts as zero.
pub fn get_total_recruits_count(edges: Option<&[RecruitEdge]>) -> usize {
    edges.map(|e| e.len()).unwrap_or(0)
}

/// Number of recruits who remained active for at least one day after
/// joining. Exactly 24 hours qualifies; anything less, or a recruit who was
/// never active, does not.
pub fn get_recruits_active_for_at_least_one_day(edges: Option<&[RecruitEdge]>) -> usize {
    let Some(edges) = edges else { return 0 };
    edges
        .iter()
        .filter(|edge| match edge.node.last_active {
            Some(last_active) => last_active - edge.node.recruited_at >= Duration::hours(24),
            None => false,
        })
        .count()
}

/// Number of recruits who have opened at least one tab.
pub fn get_recruits_with_at_least_one_tab(edges: Option<&[RecruitEdge]>) -> usize {
    let Some(edges) = edges else { return 0 };
    edges.iter().filter(|edge| edge.node.has_opened_one_tab).count()
}
