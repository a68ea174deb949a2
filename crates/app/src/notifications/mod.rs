//! Order notifications.
//!
//! Events are queued on an unbounded channel after the originating
//! transaction commits, then fanned out to every registered channel by a
//! background worker. Channel failures are logged and counted, never
//! returned to the caller.

mod dispatcher;
mod email;
mod errors;
mod events;
mod sms;

pub use dispatcher::*;
pub use email::{EmailChannel, EmailConfig};
pub use errors::NotificationError;
pub use events::NotificationEvent;
pub use sms::{DEFAULT_SMS_API_URL, SmsChannel, SmsConfig};
