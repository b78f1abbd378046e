//! Bounded-parallel reduce.
//!
//! Keeps up to `jobs` tasks running at once; when one finishes, its result is
//! merged into the accumulator and the next queued item is started until the
//! queue is empty.

use anyhow::Result;
use std::future::Future;

/// Runs `task` for every item with at most `jobs` tasks in flight and folds
/// the results with `merge`, in completion order. `merge` must be
/// associative and commutative for the result to be deterministic.
///
/// A panicking task fails the whole run.
pub async fn reduce<I, T, A, R, F, Fut, M>(
    jobs: usize,
    items: I,
    init: A,
    task: F,
    mut merge: M,
) -> Result<A>
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
    M: FnMut(A, R) -> A,
{
    let jobs = jobs.max(1);
    let mut queue = items.into_iter();
    let mut acc = init;
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < jobs {
            let Some(item) = queue.next() else {
                break;
            };
            join_set.spawn(task(item));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let value = res.map_err(|e| anyhow::anyhow!("task join: {}", e))?;
        acc = merge(acc, value);
    }

    Ok(acc)
}
