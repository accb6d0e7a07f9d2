use std::collections::BTreeMap;

use tracing::debug;

/// Owner of a delayed write. Tearing a scope down cancels its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewScope {
    ChatPopup,
    FeedbackBanner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredEvent {
    BotReply { text: String },
    BotNotice { text: String },
    HideFeedbackBanners,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub owner: ViewScope,
    pub due_at_ms: u64,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTask {
    owner: ViewScope,
    due_at_ms: u64,
    event: DeferredEvent,
}

/// Fire-once delayed events keyed by id. Hosts either fire a task when its
/// own timer elapses or drive the queue with a clock via [`Self::take_due`].
#[derive(Debug, Clone)]
pub struct TaskScheduler {
    next_id: u64,
    pending: BTreeMap<TaskId, PendingTask>,
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self {
            next_id: 1,
            pending: BTreeMap::new(),
        }
    }
}

impl TaskScheduler {
    pub fn schedule(
        &mut self,
        owner: ViewScope,
        now_ms: u64,
        delay_ms: u64,
        event: DeferredEvent,
    ) -> ScheduledTask {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let due_at_ms = now_ms.saturating_add(delay_ms);
        debug!(task = id.0, ?owner, due_at_ms, "scheduled deferred event");
        self.pending.insert(
            id,
            PendingTask {
                owner,
                due_at_ms,
                event,
            },
        );
        ScheduledTask {
            id,
            owner,
            due_at_ms,
            delay_ms,
        }
    }

    /// Removes and returns the event, or `None` if it already fired or was cancelled.
    pub fn take(&mut self, id: TaskId) -> Option<DeferredEvent> {
        self.pending.remove(&id).map(|task| task.event)
    }

    pub fn cancel_scope(&mut self, owner: ViewScope) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, task| task.owner != owner);
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            debug!(?owner, cancelled, "cancelled deferred events");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    /// Due events ordered by due time, then scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(TaskId, DeferredEvent)> {
        let mut due = self
            .pending
            .iter()
            .filter(|(_, task)| task.due_at_ms <= now_ms)
            .map(|(id, task)| (task.due_at_ms, *id))
            .collect::<Vec<_>>();
        due.sort_unstable();
        due.into_iter()
            .filter_map(|(_, id)| self.take(id).map(|event| (id, event)))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_in_scope(&self, owner: ViewScope) -> usize {
        self.pending
            .values()
            .filter(|task| task.owner == owner)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str) -> DeferredEvent {
        DeferredEvent::BotReply {
            text: text.to_string(),
        }
    }

    #[test]
    fn take_due_orders_by_due_time_then_id() {
        let mut scheduler = TaskScheduler::default();
        scheduler.schedule(ViewScope::ChatPopup, 0, 1_000, reply("late"));
        scheduler.schedule(ViewScope::ChatPopup, 0, 500, reply("early"));
        scheduler.schedule(ViewScope::FeedbackBanner, 0, 5_000, DeferredEvent::HideFeedbackBanners);

        let due = scheduler
            .take_due(1_000)
            .into_iter()
            .map(|(_, event)| event)
            .collect::<Vec<_>>();

        assert_eq!(due, vec![reply("early"), reply("late")]);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = TaskScheduler::default();
        let chat = scheduler.schedule(ViewScope::ChatPopup, 10, 500, reply("hello"));
        let banner =
            scheduler.schedule(ViewScope::FeedbackBanner, 10, 5_000, DeferredEvent::HideFeedbackBanners);

        assert_eq!(scheduler.cancel_scope(ViewScope::ChatPopup), 1);
        assert_eq!(scheduler.take(chat.id), None);
        assert_eq!(scheduler.pending_in_scope(ViewScope::FeedbackBanner), 1);
        assert_eq!(
            scheduler.take(banner.id),
            Some(DeferredEvent::HideFeedbackBanners)
        );
    }

    #[test]
    fn tasks_fire_at_most_once() {
        let mut scheduler = TaskScheduler::default();
        let task = scheduler.schedule(ViewScope::ChatPopup, 0, 500, reply("once"));
        assert_eq!(task.due_at_ms, 500);
        assert!(scheduler.take(task.id).is_some());
        assert!(scheduler.take(task.id).is_none());
        assert!(scheduler.take_due(u64::MAX).is_empty());
    }
}
