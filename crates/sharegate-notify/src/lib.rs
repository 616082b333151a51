//! # Sharegate Notify
//!
//! Change-event fan-out for the sharegate core.
//!
//! ## Overview
//!
//! After a grant mutation commits, every connected client should learn
//! that sharing state changed - without the mutation path ever waiting on
//! a slow consumer. The [`ChangeNotifier`] keeps a concurrency-safe
//! registry of transient subscriber channels and fans
//! [`ChangeEvent`]s out to them best-effort.
//!
//! ## Delivery Contract
//!
//! At-most-once, per subscriber. Sends are non-blocking: a full channel
//! drops the event for that subscriber, a closed channel removes the
//! subscriber from the registry. No history is kept - a late subscriber
//! learns nothing about past changes. Consumers reconcile by re-fetching
//! state, not by trusting delivery.

pub mod event;
pub mod notifier;

pub use event::ChangeEvent;
pub use notifier::{ChangeNotifier, SubscriberId, Subscription, DEFAULT_CHANNEL_CAPACITY};
