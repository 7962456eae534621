//! Page lifecycle port.

/// Port for reloading the hosting page.
///
/// A reload discards every piece of in-memory notifier state; only persisted
/// storage survives it.
#[cfg_attr(test, mockall::automock)]
pub trait PageLifecycle: Send + Sync {
    fn reload(&self);
}
