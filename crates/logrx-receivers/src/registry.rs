//! Receiver registry — the fixed table of known receiver kinds.
//!
//! The table is a compile-time perfect hash map keyed by identifier, so a
//! duplicate identifier fails the build. It is immutable and can be read from
//! any thread without synchronisation.
//!
//! To add a kind, implement [`ReceiverKind`] and add one entry below. The
//! identifier is persisted in user configuration: never rename one.

use crate::file::FileReceiver;
use crate::stdin::StdinReceiver;
use crate::{Receiver, ReceiverKind};

/// Builds a fresh, default-configured receiver. Performs no I/O.
pub type ReceiverFactory = fn() -> Box<dyn Receiver>;

/// Registry entry for one receiver kind.
#[derive(Debug, Clone, Copy)]
pub struct ReceiverDescriptor {
    /// Stable lookup key.
    pub identifier: &'static str,
    /// Presentation label, if the kind declares one.
    pub display_name: Option<&'static str>,
    pub factory: ReceiverFactory,
}

impl ReceiverDescriptor {
    /// Descriptor for kind `R`.
    pub const fn of<R: ReceiverKind>() -> Self {
        Self {
            identifier: R::IDENTIFIER,
            display_name: R::DISPLAY_NAME,
            factory: construct::<R>,
        }
    }

    /// Label to show users: the display name, or the identifier when the
    /// kind declares none.
    pub fn label(&self) -> &'static str {
        self.display_name.unwrap_or(self.identifier)
    }

    pub fn create(&self) -> Box<dyn Receiver> {
        (self.factory)()
    }
}

fn construct<R: ReceiverKind>() -> Box<dyn Receiver> {
    Box::new(R::default())
}

static RECEIVERS: phf::OrderedMap<&'static str, ReceiverDescriptor> = phf::phf_ordered_map! {
    "file" => ReceiverDescriptor::of::<FileReceiver>(),
    "stdin" => ReceiverDescriptor::of::<StdinReceiver>(),
};

/// Every registered kind, in registration order.
pub fn list() -> Vec<&'static ReceiverDescriptor> {
    RECEIVERS.values().collect()
}

pub fn descriptor(identifier: &str) -> Option<&'static ReceiverDescriptor> {
    RECEIVERS.get(identifier)
}

/// Create a default-configured receiver of kind `identifier`, or `None` when
/// no such kind is registered (e.g. configuration naming a removed kind).
pub fn create(identifier: &str) -> Option<Box<dyn Receiver>> {
    let created = descriptor(identifier).map(ReceiverDescriptor::create);
    if created.is_none() {
        tracing::debug!(identifier, "no receiver registered under identifier");
    }
    created
}
