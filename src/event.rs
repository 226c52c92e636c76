//! Notification payload data model
//!
//! Mirrors the surface the OS delivery mechanism exposes: a notification
//! with its opaque provider payload, and the user's response to one.
//! Payloads pass through the proxy untouched.

use serde::{Deserialize, Serialize};

/// Action identifier reported when the user opens a notification with a
/// plain tap rather than a custom action button
pub const DEFAULT_ACTION: &str = "default";

/// A notification delivered by the OS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// OS-assigned request identifier
    pub identifier: String,
    /// Display title, if the payload carries one
    pub title: Option<String>,
    /// Display body, if the payload carries one
    pub body: Option<String>,
    /// Raw provider payload (the push's user-info dictionary)
    pub user_info: serde_json::Value,
}

impl Notification {
    /// Create a notification with no content and an empty provider payload
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: None,
            body: None,
            user_info: serde_json::Value::Null,
        }
    }
}

/// The user's interaction with a delivered notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// Identifier of the action the user took (`DEFAULT_ACTION` for a tap)
    pub action_identifier: String,
    /// The notification the user acted on
    pub notification: Notification,
}

impl NotificationResponse {
    /// Response for a plain tap on `notification`
    pub fn tapped(notification: Notification) -> Self {
        Self {
            action_identifier: DEFAULT_ACTION.to_string(),
            notification,
        }
    }
}

/// A delegate callback outside the two push-related kinds.
///
/// The proxy forwards these to the previous delegate verbatim; the SDK never
/// sees them and nothing is buffered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueEvent {
    /// Callback name
    pub name: String,
    /// Raw callback payload
    pub payload: serde_json::Value,
}

/// How the OS should handle a notification arriving while the application
/// is in the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForegroundPresentation {
    /// Do not interrupt the user
    #[default]
    Suppress,
    /// Display the notification normally
    Show,
}

impl ForegroundPresentation {
    /// Whether the notification will be visible to the user
    pub fn is_shown(self) -> bool {
        matches!(self, ForegroundPresentation::Show)
    }
}

/// A push-related delegate event bound for the first-party SDK
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdkEvent {
    /// Notification received while the application was foregrounded
    ForegroundDelivery(Notification),
    /// User interacted with a notification
    Response(NotificationResponse),
}

impl SdkEvent {
    /// Stable event name, for bridges that dispatch by string
    pub fn kind(&self) -> &'static str {
        match self {
            SdkEvent::ForegroundDelivery(_) => "foreground_delivery",
            SdkEvent::Response(_) => "notification_response",
        }
    }
}
