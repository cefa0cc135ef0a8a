//! Short-lived user notifications.
//!
//! Messages leave the queue only through their own timers: the owner schedules a
//! fade and a removal when a toast is enqueued and reports back when they fire.

use chrono::NaiveDateTime;

/// Ids grow with creation order, so they double as the creation sequence.
pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub text: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationQueue {
    next_id: ToastId,
    toasts: Vec<Toast>,
}

impl NotificationQueue {
    /// Appends a toast. Identical texts are kept as separate entries.
    pub(crate) fn enqueue(
        &mut self,
        text: impl Into<String>,
        kind: ToastKind,
        created_at: NaiveDateTime,
    ) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            text: text.into(),
            kind,
            phase: ToastPhase::Visible,
            created_at,
        });
        id
    }

    pub(crate) fn fade(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|toast| toast.id == id) {
            Some(toast) if toast.phase == ToastPhase::Visible => {
                toast.phase = ToastPhase::Fading;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn expire(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
