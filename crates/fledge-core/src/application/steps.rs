//! Step combinators.
//!
//! A [`Step`] takes a changeset snapshot and yields the next one. Steps
//! compose two ways: [`chain_steps`] runs them one after another and stops
//! at the first failure; [`join_steps`] runs them concurrently against the
//! same snapshot and merges what each one added.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tracing::debug;

use crate::domain::{Changeset, FileContent, Outcome, RelativePath, all, chain_async};
use crate::error::FledgeResult;

/// What every step resolves to: fatal error, expected failure, or the next
/// changeset.
pub type StepResult = FledgeResult<Outcome<Changeset>>;

type StepFn = dyn Fn(Changeset) -> BoxFuture<'static, StepResult> + Send + Sync;

/// A cloneable, reusable staging step.
#[derive(Clone)]
pub struct Step {
    run: Arc<StepFn>,
}

impl Step {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Changeset) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StepResult> + Send + 'static,
    {
        Self {
            run: Arc::new(move |changeset| f(changeset).boxed()),
        }
    }

    /// Passes the changeset through unchanged.
    pub fn identity() -> Self {
        Self::new(|changeset| async move { Ok(Ok(changeset)) })
    }

    /// Stages fixed content at `path`.
    pub fn insert(path: RelativePath, content: impl Into<FileContent>) -> Self {
        let content = content.into();
        Self::new(move |changeset| {
            let staged = changeset.insert(path.clone(), content.clone());
            async move { Ok(staged) }
        })
    }

    pub fn run(&self, changeset: Changeset) -> BoxFuture<'static, StepResult> {
        (self.run)(changeset)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").finish_non_exhaustive()
    }
}

/// Fold the input through each step in order.
///
/// Step N+1 starts only after step N succeeded; the first failure is
/// returned as-is and later steps are never invoked. No steps at all is
/// the identity.
pub fn chain_steps(steps: impl IntoIterator<Item = Step>) -> Step {
    let steps: Arc<[Step]> = steps.into_iter().collect();
    Step::new(move |changeset| {
        let steps = Arc::clone(&steps);
        async move {
            let mut current: Outcome<Changeset> = Ok(changeset);
            for step in steps.iter() {
                current = chain_async(current, |changeset| step.run(changeset)).await?;
                if current.is_err() {
                    break;
                }
            }
            Ok(current)
        }
    })
}

/// Run independent steps concurrently on one snapshot and merge them.
///
/// Every sibling runs to completion. A fatal error from any sibling wins
/// (leftmost first); otherwise the first failure in sibling order is
/// returned. When all succeed, each sibling's additions are inserted into
/// the snapshot in sibling order then path order, so two siblings staging
/// the same path fail the join with `NotEmpty`.
pub fn join_steps(steps: impl IntoIterator<Item = Step>) -> Step {
    let steps: Arc<[Step]> = steps.into_iter().collect();
    Step::new(move |base| {
        let steps = Arc::clone(&steps);
        async move {
            let settled = join_all(steps.iter().map(|step| step.run(base.clone()))).await;
            let outcomes = settled.into_iter().collect::<FledgeResult<Vec<_>>>()?;
            let candidates = match all(outcomes) {
                Ok(candidates) => candidates,
                Err(reason) => {
                    debug!(%reason, "joined step failed");
                    return Ok(Err(reason));
                }
            };

            let additions: Vec<_> = candidates
                .iter()
                .flat_map(|candidate| candidate.additions_since(&base))
                .map(|(path, content)| (path.clone(), content.clone()))
                .collect();
            debug!(
                siblings = candidates.len(),
                additions = additions.len(),
                "merging joined steps"
            );
            drop(candidates);
            Ok(base.insert_all(additions))
        }
    })
}
