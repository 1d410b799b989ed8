/// UI widget builders
///
/// This module builds the widget tree from state:
/// - Photo cards and the three feed layouts (feed.rs)
/// - Modal overlays for forms and confirmation (modal.rs)
///
/// Nothing here owns state; every builder borrows it and emits
/// `crate::Message` values for the reducer.

pub mod feed;
pub mod modal;
