//! Time-axis synchronization between a primary chart and its sub-charts.
//!
//! One primary chart owns the shared visible range. When the user scrolls or
//! zooms it, the new logical range is written to every follower. Applying a
//! range to a chart can synchronously fire that chart's own range-change
//! callback, so each follower carries an in-flight counter that is raised
//! before the apply and lowered one frame later; callbacks arriving inside
//! that window are echoes and never reach the shared range. Primary events
//! raised re-entrantly while a propagation is running are dropped the same
//! way.
//!
//! Everything runs on the UI thread: state lives in `Rc<RefCell<_>>` and no
//! borrow is held while calling into a chart.

use crate::domain::chart::{ChartHandle, FrameScheduler, RangeChangeCallback, Unsubscribe, VisibleRange};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info, log_trace, log_warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

const COMPONENT: LogComponent = LogComponent::Application("ChartSync");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRole {
    Primary,
    Follower,
}

/// Counters for what the coordinator did with incoming range events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Primary events that updated the shared range
    pub propagations: u64,
    /// Events dropped by the loop guard
    pub suppressed_echoes: u64,
    /// User-driven follower changes; followers never write the shared range
    pub ignored_follower_changes: u64,
}

struct PrimarySlot {
    id: RegistrationId,
    chart: Rc<dyn ChartHandle>,
    unsubscribe: Option<Unsubscribe>,
}

struct FollowerSlot {
    chart: Rc<dyn ChartHandle>,
    in_flight: u32,
    unsubscribe: Option<Unsubscribe>,
}

fn release(unsubscribe: Option<Unsubscribe>) {
    if let Some(unsubscribe) = unsubscribe {
        unsubscribe();
    }
}

#[derive(Default)]
struct SyncState {
    primary: Option<PrimarySlot>,
    followers: BTreeMap<RegistrationId, FollowerSlot>,
    shared_range: Option<VisibleRange>,
    propagating: bool,
    next_id: u64,
    stats: SyncStats,
}

impl Drop for SyncState {
    fn drop(&mut self) {
        if let Some(mut primary) = self.primary.take() {
            release(primary.unsubscribe.take());
        }
        for (_, mut follower) in std::mem::take(&mut self.followers) {
            release(follower.unsubscribe.take());
        }
    }
}

struct Shared {
    state: RefCell<SyncState>,
    scheduler: Rc<dyn FrameScheduler>,
}

/// Resets `propagating` on every exit path of a propagation
struct PropagationGuard<'a>(&'a Shared);

impl Drop for PropagationGuard<'_> {
    fn drop(&mut self) {
        self.0.state.borrow_mut().propagating = false;
    }
}

impl Shared {
    fn allocate_id(&self) -> RegistrationId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        RegistrationId(state.next_id)
    }

    fn on_primary_change(self: &Rc<Self>, id: RegistrationId, range: Option<VisibleRange>) {
        let Some(range) = range else {
            return;
        };

        let targets: Vec<(RegistrationId, Rc<dyn ChartHandle>)> = {
            let mut state = self.state.borrow_mut();
            if state.primary.as_ref().map(|p| p.id) != Some(id) {
                return;
            }
            if state.propagating {
                state.stats.suppressed_echoes += 1;
                log_trace!(COMPONENT, "suppressed re-entrant primary range {:?}", range);
                return;
            }
            state.shared_range = Some(range);
            state.propagating = true;
            state.stats.propagations += 1;
            state
                .followers
                .iter_mut()
                .map(|(follower_id, slot)| {
                    slot.in_flight += 1;
                    (*follower_id, slot.chart.clone())
                })
                .collect()
        };

        let _guard = PropagationGuard(self.as_ref());
        for (follower_id, chart) in targets {
            // an earlier apply may have unregistered this follower
            if !self.state.borrow().followers.contains_key(&follower_id) {
                continue;
            }
            chart.set_visible_range(range);
            self.schedule_clear(follower_id);
        }
    }

    fn on_follower_change(&self, id: RegistrationId, range: Option<VisibleRange>) {
        let mut state = self.state.borrow_mut();
        let in_flight = match state.followers.get(&id) {
            Some(slot) => slot.in_flight > 0,
            None => return,
        };
        if in_flight {
            state.stats.suppressed_echoes += 1;
            log_trace!(COMPONENT, "follower {:?} echoed {:?}", id, range);
        } else {
            state.stats.ignored_follower_changes += 1;
            log_debug!(COMPONENT, "follower {:?} moved on its own to {:?}", id, range);
        }
    }

    fn schedule_clear(self: &Rc<Self>, id: RegistrationId) {
        let weak = Rc::downgrade(self);
        self.scheduler.schedule(Box::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut state = shared.state.borrow_mut();
            if let Some(slot) = state.followers.get_mut(&id) {
                slot.in_flight = slot.in_flight.saturating_sub(1);
            }
        }));
    }

    fn unregister(&self, id: RegistrationId, role: ChartRole) {
        let unsubscribe = {
            let mut state = self.state.borrow_mut();
            match role {
                ChartRole::Primary => {
                    // already replaced by a newer primary
                    if state.primary.as_ref().map(|p| p.id) != Some(id) {
                        return;
                    }
                    state.primary.take().and_then(|mut slot| slot.unsubscribe.take())
                }
                ChartRole::Follower => match state.followers.remove(&id) {
                    Some(mut slot) => slot.unsubscribe.take(),
                    None => return,
                },
            }
        };
        release(unsubscribe);
        log_info!(COMPONENT, "{:?} {:?} unregistered", role, id);
    }
}

/// Disposer returned by registration. Dropping it (or calling
/// [`ChartRegistration::unregister`]) detaches the chart.
#[derive(Debug)]
pub struct ChartRegistration {
    shared: Weak<Shared>,
    id: RegistrationId,
    role: ChartRole,
}

impl ChartRegistration {
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    pub fn role(&self) -> ChartRole {
        self.role
    }

    pub fn unregister(self) {
        drop(self);
    }
}

impl Drop for ChartRegistration {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.unregister(self.id, self.role);
        }
    }
}

/// Keeps follower charts on the primary chart's visible logical range.
///
/// One instance per chart group; pass it explicitly to every chart that
/// takes part.
pub struct ChartSyncCoordinator {
    shared: Rc<Shared>,
}

impl ChartSyncCoordinator {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self { shared: Rc::new(Shared { state: RefCell::new(SyncState::default()), scheduler }) }
    }

    /// Make `chart` the source of the shared range. A previously registered
    /// primary is detached (last registration wins). Followers are not
    /// touched until the new primary reports a range change.
    pub fn register_primary(&self, chart: Rc<dyn ChartHandle>) -> ChartRegistration {
        let id = self.shared.allocate_id();
        let weak = Rc::downgrade(&self.shared);
        let callback: RangeChangeCallback = Rc::new(move |range| {
            if let Some(shared) = weak.upgrade() {
                shared.on_primary_change(id, range);
            }
        });
        let unsubscribe = chart.on_visible_range_change(callback);

        let previous = self.shared.state.borrow_mut().primary.replace(PrimarySlot {
            id,
            chart,
            unsubscribe: Some(unsubscribe),
        });
        if let Some(mut previous) = previous {
            log_warn!(COMPONENT, "primary {:?} replaced by {:?}", previous.id, id);
            release(previous.unsubscribe.take());
        }
        log_info!(COMPONENT, "primary {:?} registered", id);

        ChartRegistration { shared: Rc::downgrade(&self.shared), id, role: ChartRole::Primary }
    }

    /// Attach a follower. It keeps its own view until the next primary
    /// change or an explicit [`request_resync`](Self::request_resync).
    pub fn register_follower(&self, chart: Rc<dyn ChartHandle>) -> ChartRegistration {
        let id = self.shared.allocate_id();
        let weak = Rc::downgrade(&self.shared);
        let callback: RangeChangeCallback = Rc::new(move |range| {
            if let Some(shared) = weak.upgrade() {
                shared.on_follower_change(id, range);
            }
        });
        let unsubscribe = chart.on_visible_range_change(callback);

        self.shared.state.borrow_mut().followers.insert(
            id,
            FollowerSlot { chart, in_flight: 0, unsubscribe: Some(unsubscribe) },
        );
        log_info!(COMPONENT, "follower {:?} registered", id);

        ChartRegistration { shared: Rc::downgrade(&self.shared), id, role: ChartRole::Follower }
    }

    /// Last range taken from a primary. Survives primary deregistration.
    pub fn shared_range(&self) -> Option<VisibleRange> {
        self.shared.state.borrow().shared_range
    }

    /// Pull the primary's live range onto one follower, e.g. after the
    /// follower remounted its series and auto-fitted. Returns `false` when
    /// there is no primary, the primary has no range yet, or `follower` is
    /// not a live follower of this coordinator.
    pub fn request_resync(&self, follower: &ChartRegistration) -> bool {
        if follower.role != ChartRole::Follower || !self.owns(follower) {
            return false;
        }

        let (primary, target) = {
            let state = self.shared.state.borrow();
            match (state.primary.as_ref(), state.followers.get(&follower.id)) {
                (Some(primary), Some(slot)) => (primary.chart.clone(), slot.chart.clone()),
                _ => return false,
            }
        };
        let Some(range) = primary.visible_range() else {
            return false;
        };

        match self.shared.state.borrow_mut().followers.get_mut(&follower.id) {
            Some(slot) => slot.in_flight += 1,
            None => return false,
        }
        target.set_visible_range(range);
        self.shared.schedule_clear(follower.id);
        log_debug!(COMPONENT, "follower {:?} resynced to {:?}", follower.id, range);
        true
    }

    pub fn has_primary(&self) -> bool {
        self.shared.state.borrow().primary.is_some()
    }

    pub fn follower_count(&self) -> usize {
        self.shared.state.borrow().followers.len()
    }

    /// Whether a range applied to this follower is still inside its echo window
    pub fn is_follower_syncing(&self, follower: &ChartRegistration) -> bool {
        self.owns(follower)
            && self
                .shared
                .state
                .borrow()
                .followers
                .get(&follower.id)
                .is_some_and(|slot| slot.in_flight > 0)
    }

    pub fn stats(&self) -> SyncStats {
        self.shared.state.borrow().stats
    }

    fn owns(&self, registration: &ChartRegistration) -> bool {
        Weak::ptr_eq(&registration.shared, &Rc::downgrade(&self.shared))
    }
}
