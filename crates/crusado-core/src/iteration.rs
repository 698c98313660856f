use crate::error::{CrusadoError, Result};
use crate::tracker::WorkItemTracker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Past,
    Current,
    Future,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationAttributes {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub finish_date: Option<String>,
    #[serde(default)]
    pub time_frame: Option<TimeFrame>,
}

/// A team iteration as returned by the team settings API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iteration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub attributes: Option<IterationAttributes>,
}

/// Which iterations to ask the tracker for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationScope {
    All,
    Current,
}

/// Pick the iteration `offset` positions away from the current one.
///
/// 0 is the current iteration, 1 the next, -1 the previous.
pub fn select_relative<'a>(
    iterations: &'a [Iteration],
    current_id: &str,
    offset: i64,
) -> Result<&'a Iteration> {
    let index = iterations
        .iter()
        .position(|i| i.id == current_id)
        .ok_or_else(|| CrusadoError::CurrentIterationNotListed(current_id.to_string()))?;

    let out_of_range = || {
        if offset > 0 {
            CrusadoError::OffsetTooFarInFuture(offset)
        } else {
            CrusadoError::OffsetTooFarInPast(offset)
        }
    };
    let target = (index as i64).checked_add(offset).ok_or_else(out_of_range)?;
    let target = usize::try_from(target).map_err(|_| out_of_range())?;
    iterations.get(target).ok_or_else(out_of_range)
}

/// Every iteration paired with its offset from the current one.
pub fn with_offsets<'a>(iterations: &'a [Iteration], current_id: &str) -> Vec<(Option<i64>, &'a Iteration)> {
    let current = iterations.iter().position(|i| i.id == current_id);
    iterations
        .iter()
        .enumerate()
        .map(|(i, it)| (current.map(|c| i as i64 - c as i64), it))
        .collect()
}

/// The single iteration the tracker reports as current.
pub fn current<T: WorkItemTracker + ?Sized>(tracker: &T) -> Result<Iteration> {
    let mut found = tracker.list_iterations(IterationScope::Current)?;
    if found.len() != 1 {
        return Err(CrusadoError::CurrentIterationUnidentifiable(found.len()));
    }
    Ok(found.remove(0))
}

/// Resolve the iteration path `offset` iterations away from the current one.
pub fn resolve_path<T: WorkItemTracker + ?Sized>(tracker: &T, offset: i64) -> Result<String> {
    let current = current(tracker)?;
    let all = tracker.list_iterations(IterationScope::All)?;
    let target = select_relative(&all, &current.id, offset)?;
    tracing::info!(current = %current.name, target = %target.name, offset, "resolved iteration");

    match &target.path {
        Some(path) if !path.is_empty() => Ok(path.clone()),
        _ => Err(CrusadoError::IterationPathNotSet),
    }
}
