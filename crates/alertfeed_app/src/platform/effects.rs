//! Executes core effects against the engine and the local store.
use std::collections::VecDeque;
use std::time::Duration;

use alertfeed_core::{Effect, Msg, RemoteFailure};
use alertfeed_engine::{DraftPersistence, EngineEvent, EngineHandle, LocalStore};
use feed_logging::{feed_debug, feed_warn};

pub struct EffectRunner {
    engine: EngineHandle,
    drafts: DraftPersistence,
    store: LocalStore,
    local: VecDeque<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: LocalStore) -> Self {
        Self {
            engine,
            drafts: DraftPersistence::new(store.clone()),
            store,
            local: VecDeque::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_one(effect);
        }
    }

    fn run_one(&mut self, effect: Effect) {
        match effect {
            Effect::Call {
                request_id,
                request,
            } => {
                feed_debug!("Call {} -> {}", request_id, request.label());
                self.engine.enqueue_call(request_id, request);
            }
            Effect::StartTimer { timer, period } => self.engine.start_timer(timer, period),
            Effect::StopTimer { timer } => self.engine.stop_timer(timer),
            Effect::ScheduleToast {
                id,
                fade_after,
                remove_after,
            } => self.engine.schedule_toast(id, fade_after, remove_after),
            Effect::SnapshotDraft { user_id, draft } => {
                if let Err(err) = self.drafts.snapshot(user_id, &draft) {
                    feed_warn!("Draft autosave failed: {}", err);
                }
            }
            Effect::RestoreDraft { user_id } => {
                let draft = self.drafts.restore(user_id);
                self.local.push_back(Msg::DraftRestored(draft));
            }
            Effect::ClearDraft { user_id } => {
                if let Err(err) = self.drafts.clear(user_id) {
                    feed_warn!("Failed to clear draft: {}", err);
                }
            }
            Effect::MarkOnboardingSeen => {
                if let Err(err) = self.store.mark_onboarding_seen() {
                    feed_warn!("Failed to record onboarding: {}", err);
                }
            }
        }
    }

    pub fn onboarding_seen(&self) -> bool {
        self.store.onboarding_seen()
    }

    /// Next message to feed back into the core. Local results come first.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        if let Some(msg) = self.local.pop_front() {
            return Some(msg);
        }
        self.engine.recv_timeout(timeout).map(translate)
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

pub fn translate(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CallCompleted { request_id, result } => Msg::CallCompleted {
            request_id,
            outcome: result.map_err(RemoteFailure::from),
        },
        EngineEvent::TimerFired(timer) => Msg::TimerFired(timer),
        EngineEvent::ToastFaded(id) => Msg::ToastFaded(id),
        EngineEvent::ToastExpired(id) => Msg::ToastExpired(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alertfeed_core::{RemoteFailureKind, TimerKind};
    use alertfeed_engine::GatewayError;

    #[test]
    fn gateway_errors_become_remote_failures() {
        let msg = translate(EngineEvent::CallCompleted {
            request_id: 4,
            result: Err(GatewayError::Http {
                status: 409,
                message: "URL already exists".to_string(),
            }),
        });
        let Msg::CallCompleted { request_id, outcome } = msg else {
            panic!("expected CallCompleted");
        };
        assert_eq!(request_id, 4);
        let failure = outcome.unwrap_err();
        assert_eq!(failure.kind, RemoteFailureKind::Http(409));
        assert_eq!(failure.message, "URL already exists");
    }

    #[test]
    fn timer_and_toast_events_pass_through() {
        assert_eq!(
            translate(EngineEvent::TimerFired(TimerKind::Poll)),
            Msg::TimerFired(TimerKind::Poll)
        );
        assert_eq!(translate(EngineEvent::ToastExpired(2)), Msg::ToastExpired(2));
    }
}
