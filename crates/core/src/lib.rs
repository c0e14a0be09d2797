//! Core types for the hookrelay webhook relay.
//!
//! Everything in this crate is pure: parsing an inbound property event,
//! rendering it into Slack blocks, choosing a channel, and mapping the result
//! of a delivery to the response reported back to the sender. Delivery itself
//! sits behind the [`Notifier`] trait.

pub mod event;
pub mod kind;
pub mod message;
pub mod notifier;
pub mod outcome;
pub mod route;
pub mod samples;

pub use event::{InboundEvent, ParseError, UNKNOWN, UNNAMED};
pub use kind::EventKind;
pub use message::{Block, MessageBlocks, MessageBuilder, MessageSettings, TextObject};
pub use notifier::{Notifier, NotifyError};
pub use outcome::RelayOutcome;
pub use route::ChannelRouter;
pub use samples::{sample_event, sample_events};
