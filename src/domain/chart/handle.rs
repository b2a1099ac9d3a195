use super::value_objects::VisibleRange;
use std::rc::Rc;

/// Callback invoked with the chart's new logical range (`None` when the
/// chart has no data to show).
pub type RangeChangeCallback = Rc<dyn Fn(Option<VisibleRange>)>;

/// Releases a range-change subscription
pub type Unsubscribe = Box<dyn FnOnce()>;

/// The part of a rendered chart the sync coordinator talks to.
///
/// Implementations may fire their own range-change callbacks synchronously
/// from inside `set_visible_range`.
pub trait ChartHandle {
    fn visible_range(&self) -> Option<VisibleRange>;
    fn set_visible_range(&self, range: VisibleRange);
    fn on_visible_range_change(&self, callback: RangeChangeCallback) -> Unsubscribe;
}

/// Runs work on the next tick of the UI event loop (an animation frame in
/// the browser).
pub trait FrameScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>);
}
