//! Alertfeed engine: remote calls, timers and durable local state.
mod client;
mod engine;
mod error;
mod gateway;
mod local_store;
mod persist;

use alertfeed_core::{ApiResponse, RequestId, TimerKind, ToastId};

pub use client::{decode_response, ApiClient};
pub use engine::EngineHandle;
pub use error::{EngineError, GatewayError};
pub use gateway::{
    Gateway, GatewayRequest, GatewaySettings, Method, ReqwestGateway, USER_ID_HEADER,
};
pub use local_store::{DraftPersistence, Identity, LocalStore};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CallCompleted {
        request_id: RequestId,
        result: Result<ApiResponse, GatewayError>,
    },
    TimerFired(TimerKind),
    ToastFaded(ToastId),
    ToastExpired(ToastId),
}
