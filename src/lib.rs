//! Notification delegate proxy
//!
//! Guarantees that exactly one object is registered as the operating
//! system's push-notification delegate while still letting two consumers
//! observe every callback: a first-party notification SDK and whatever
//! delegate the host application had installed before.
//!
//! # Features
//! - Chains every callback to the previously installed delegate (held weakly)
//! - Buffers push events until the SDK signals readiness, then drains them in
//!   arrival order
//! - Opt-in display of notifications arriving while the app is foregrounded
//! - Lazy process-wide registration that never double-installs
//! - Completions that always reach the OS, even when a collaborator is
//!   missing or misbehaves

pub mod buffer;
pub mod chain;
pub mod completion;
pub mod delegate;
pub mod event;
pub mod policy;
pub mod proxy;
pub mod registrar;
pub mod sdk;

pub use completion::Completion;
pub use delegate::{
    NotificationCenter, NotificationDelegate, PresentationResponder, ResponseCompletion,
};
pub use event::{
    ForegroundPresentation, Notification, NotificationResponse, OpaqueEvent, SdkEvent,
    DEFAULT_ACTION,
};
pub use proxy::NotificationDelegateProxy;
pub use registrar::{register_as_delegate, shared_proxy};
pub use sdk::SdkHandler;
