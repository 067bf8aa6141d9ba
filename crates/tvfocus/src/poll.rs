use std::{
    cmp::Ordering,
    collections::binary_heap::BinaryHeap,
    time::{Duration, Instant},
};

use crate::surface::TransientKey;

/// Work the session defers to a later tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Retry acquiring initial focus.
    InitialFocus,
    /// Periodic registry resync. Reschedules itself when run.
    Resync,
    /// A delayed view change pass belonging to view change `epoch`.
    ViewSync {
        /// The view change this pass belongs to.
        epoch: u64,
    },
    /// A transient UI timer expired.
    Transient(TransientKey),
}

/// A task with its due time.
#[derive(Debug)]
struct Pending {
    /// Scheduled time.
    time: Instant,
    /// Insertion sequence, so equal times run in scheduling order.
    seq: u64,
    /// Task to run.
    task: Task,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for Pending {}

/// Reverse order so tasks with the closest time are at the top.
impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reverse order so tasks with the closest time are at the top.
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A heap of deferred tasks. Time is supplied by the caller, so nothing here
/// sleeps or spawns.
#[derive(Default, Debug)]
pub struct Scheduler {
    /// Pending task heap.
    tasks: BinaryHeap<Pending>,
    /// Next insertion sequence number.
    seq: u64,
}

impl Scheduler {
    /// Schedule `task` to run `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: Task) {
        self.seq += 1;
        self.tasks.push(Pending {
            time: now + delay,
            seq: self.seq,
            task,
        });
    }

    /// Drop every pending task matching `pred`. Returns the number dropped.
    pub fn cancel(&mut self, pred: impl Fn(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|p| !pred(&p.task));
        before - self.tasks.len()
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Is any pending task matching `pred`?
    pub fn contains(&self, pred: impl Fn(&Task) -> bool) -> bool {
        self.tasks.iter().any(|p| pred(&p.task))
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Is the heap empty?
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The time until the next task is due. We return None if nothing is
    /// pending, and a duration of 0 if the top-most task is overdue.
    pub fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.tasks.peek().map(|top| {
            top.time
                .checked_duration_since(now)
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn collect(&mut self, now: Instant) -> Vec<Task> {
        let mut v = vec![];
        while let Some(p) = self.tasks.peek() {
            if p.time > now {
                break;
            }
            if let Some(p) = self.tasks.pop() {
                v.push(p.task);
            }
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_heap() {
        let now = Instant::now();
        let mut s = Scheduler::default();

        assert_eq!(s.next_wait(now), None);
        s.schedule(now, Duration::from_secs(10), Task::InitialFocus);
        assert_eq!(s.next_wait(now), Some(Duration::from_secs(10)));
        s.schedule(now, Duration::from_secs(100), Task::Resync);
        assert_eq!(s.next_wait(now), Some(Duration::from_secs(10)));
        assert_eq!(s.collect(now + Duration::from_secs(11)), vec![Task::InitialFocus]);
        assert_eq!(s.next_wait(now), Some(Duration::from_secs(100)));
        assert_eq!(
            s.next_wait(now + Duration::from_secs(200)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn equal_times_run_in_order() {
        let now = Instant::now();
        let mut s = Scheduler::default();
        let d = Duration::from_millis(5);
        s.schedule(now, d, Task::ViewSync { epoch: 1 });
        s.schedule(now, d, Task::Resync);
        s.schedule(now, d, Task::ViewSync { epoch: 2 });
        assert_eq!(
            s.collect(now + d),
            vec![
                Task::ViewSync { epoch: 1 },
                Task::Resync,
                Task::ViewSync { epoch: 2 }
            ]
        );
        assert!(s.is_empty());
    }

    #[test]
    fn cancel() {
        let now = Instant::now();
        let mut s = Scheduler::default();
        let key = TransientKey::new("controls");
        s.schedule(now, Duration::from_secs(1), Task::Transient(key.clone()));
        s.schedule(now, Duration::from_secs(2), Task::Resync);
        s.schedule(now, Duration::from_secs(3), Task::Transient(key.clone()));
        assert_eq!(s.cancel(|t| *t == Task::Transient(key.clone())), 2);
        assert_eq!(s.len(), 1);
        assert!(s.contains(|t| *t == Task::Resync));
        s.cancel_all();
        assert!(s.is_empty());
        assert!(s.collect(now + Duration::from_secs(10)).is_empty());
    }
}
