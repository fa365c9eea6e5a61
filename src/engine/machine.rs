//! The machine: definition, runtime position and the deferred event queue.

use super::trace::{sm_trace, Tracer};
use crate::config::{MachineConfig, ReentrancyMode, UnresolvedTargetPolicy};
use crate::core::{
    Action, EventId, MatchPolicy, State, StateChange, StateHistory, StateId, Transition,
};
use crate::error::{FsmError, Result};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Registered states plus index references into them.
#[derive(Default)]
pub(crate) struct Definition {
    pub(crate) states: Vec<State>,
    /// Runtime position.
    pub(crate) current: Option<usize>,
    /// State that receives `add_transition` calls: the last one added.
    pub(crate) editing: Option<usize>,
    pub(crate) default: Option<usize>,
}

impl Definition {
    /// Last state registered under `id`.
    pub(crate) fn position(&self, id: StateId) -> Option<usize> {
        self.states.iter().rposition(|s| s.id == id)
    }

    pub(crate) fn current(&self) -> Option<&State> {
        self.current.map(|idx| &self.states[idx])
    }

    pub(crate) fn default_state(&self) -> Option<&State> {
        self.default.map(|idx| &self.states[idx])
    }

    /// Transition selected for `event`: the default state's exact match,
    /// then the current state's exact match, then the current state's
    /// wildcard transition.
    pub(crate) fn select(
        &self,
        event: EventId,
        wildcard: Option<EventId>,
        policy: MatchPolicy,
    ) -> Option<&Transition> {
        if let Some(found) = self.default_state().and_then(|s| s.find(event, policy)) {
            return Some(found);
        }
        self.current()?.find_or_wildcard(event, wildcard, policy)
    }
}

pub(crate) struct Inner {
    pub(crate) config: MachineConfig,
    pub(crate) tracer: Tracer,
    pub(crate) definition: RefCell<Definition>,
    pub(crate) queue: RefCell<VecDeque<EventId>>,
    pub(crate) processing: Cell<bool>,
    pub(crate) history: RefCell<StateHistory>,
    destroyed: Cell<bool>,
}

/// Clears the reentrancy flag when the draining frame exits, on error and
/// unwind too.
struct DrainGuard<'a>(&'a Cell<bool>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Inner {
    pub(crate) fn ensure_live(&self) -> Result<()> {
        if self.destroyed.get() {
            Err(FsmError::InvalidHandle)
        } else {
            Ok(())
        }
    }

    pub(crate) fn name(&self, id: u32) -> String {
        self.tracer.name(id)
    }

    pub(crate) fn trace_line(&self, line: u32, args: fmt::Arguments<'_>) {
        if let Err(err) = self.tracer.write(line, args) {
            tracing::warn!(error = %err, "failed to write trace line");
        }
    }

    fn add_state(&self, id: StateId, entry: Option<Action>) -> Result<()> {
        self.ensure_live()?;
        let mut def = self.definition.borrow_mut();
        if def.position(id).is_some() {
            return Err(FsmError::DuplicateState { id });
        }

        def.states.push(State::new(id, entry));
        let idx = def.states.len() - 1;
        def.current = Some(idx);
        def.editing = Some(idx);
        if self.config.default_state == Some(id) {
            def.default = Some(idx);
        }
        tracing::trace!(state = id, "registered state");
        Ok(())
    }

    fn add_transition(&self, event: EventId, action: Option<Action>, next: StateId) -> Result<()> {
        self.ensure_live()?;
        let mut def = self.definition.borrow_mut();
        let idx = def.editing.ok_or(FsmError::NoCurrentState)?;
        def.states[idx].push(Transition::new(event, action, next));
        Ok(())
    }

    fn current_id(&self) -> Option<StateId> {
        self.definition.borrow().current().map(State::id)
    }

    fn current_state(&self) -> Result<StateId> {
        self.ensure_live()?;
        self.current_id().ok_or(FsmError::NoCurrentState)
    }

    pub(crate) fn process_event(&self, event: EventId) -> Result<()> {
        self.ensure_live()?;
        self.queue.borrow_mut().push_back(event);

        if self.processing.replace(true) {
            // A drain further up the stack picks this event up.
            if self.config.reentrancy == ReentrancyMode::Legacy {
                self.processing.set(false);
            }
            tracing::trace!(event, "queued event behind active drain");
            return Ok(());
        }

        let _guard = DrainGuard(&self.processing);
        self.drain()
    }

    /// Drain events already sitting in the queue, as a top-level
    /// `process_event` would.
    pub(crate) fn drain_pending(&self) -> Result<()> {
        if self.processing.replace(true) {
            return Err(FsmError::Busy);
        }
        let _guard = DrainGuard(&self.processing);
        self.drain()
    }

    fn next_event(&self) -> Option<EventId> {
        self.queue.borrow_mut().pop_front()
    }

    fn drain(&self) -> Result<()> {
        while let Some(event) = self.next_event() {
            self.dispatch(event)?;
        }
        Ok(())
    }

    fn dispatch(&self, event: EventId) -> Result<()> {
        let (state, selected) = {
            let def = self.definition.borrow();
            let current = def.current().ok_or(FsmError::NoCurrentState)?;
            sm_trace!(
                self,
                "Process current state {} event {}\n",
                self.name(current.id),
                self.name(event)
            );
            let selected = def
                .select(event, self.config.default_event, self.config.match_policy)
                .map(|t| (t.action.clone(), t.next));
            (current.id, selected)
        };
        tracing::debug!(state, event, "dispatching event");

        let Some((action, next)) = selected else {
            sm_trace!(
                self,
                "No match for state {} for event {}\n",
                self.name(state),
                self.name(event)
            );
            tracing::trace!(state, event, "no transition matched");
            return Ok(());
        };

        if let Some(action) = action {
            action.run()?;
        }

        // The action may have moved the machine or destroyed it.
        let Some(current) = self.current_id() else {
            return Ok(());
        };

        if next == current {
            sm_trace!(self, "Same state {}\n", self.name(current));
            tracing::trace!(state = current, event, "self transition");
            return Ok(());
        }

        if self.definition.borrow().position(next).is_none() {
            sm_trace!(
                self,
                "Couldn't find next state from {} to {}\n",
                self.name(current),
                self.name(next)
            );
            tracing::warn!(
                from = current,
                to = next,
                event,
                "transition target is not a registered state"
            );
            return match self.config.unresolved_target {
                UnresolvedTargetPolicy::Ignore => Ok(()),
                UnresolvedTargetPolicy::Error => Err(FsmError::UnresolvedTarget {
                    from: current,
                    to: next,
                }),
            };
        }

        sm_trace!(
            self,
            "Changing state from {} to {}\n",
            self.name(current),
            self.name(next)
        );
        tracing::debug!(from = current, to = next, event, "changing state");
        self.arrive(next, Some(event)).map(|_| ())
    }

    /// Make `target` current, record it and run its entry action. Returns
    /// false if no such state is registered.
    fn arrive(&self, target: StateId, event: Option<EventId>) -> Result<bool> {
        let (from, entry) = {
            let mut def = self.definition.borrow_mut();
            let Some(idx) = def.position(target) else {
                return Ok(false);
            };
            let from = def.current().map(State::id);
            def.current = Some(idx);
            (from, def.states[idx].entry.clone())
        };

        self.history
            .borrow_mut()
            .record(StateChange::now(from, target, event));

        if let Some(entry) = entry {
            entry.run()?;
        }
        Ok(true)
    }

    fn reset(&self, target: StateId) -> Result<bool> {
        self.ensure_live()?;
        let arrived = self.arrive(target, None)?;
        if arrived {
            tracing::debug!(state = target, "machine reset");
        } else {
            tracing::debug!(state = target, "reset target is not registered");
        }
        Ok(arrived)
    }

    fn destroy(&self) -> Result<()> {
        self.ensure_live()?;
        self.destroyed.set(true);

        let released = std::mem::take(&mut *self.definition.borrow_mut());
        self.queue.borrow_mut().clear();
        self.history.borrow_mut().clear();
        self.tracer.release();
        tracing::debug!(states = released.states.len(), "machine destroyed");
        drop(released);
        Ok(())
    }
}

/// A table-driven state machine.
///
/// States and transitions are registered up front; events are then fed
/// through [`process_event`](Machine::process_event). Events raised by
/// callbacks while the machine is draining are queued and handled, in
/// order, once the raising callback returns.
///
/// # Example
///
/// ```rust
/// use tabled_fsm::Machine;
///
/// const IDLE: u32 = 1;
/// const RUNNING: u32 = 2;
/// const START: u32 = 10;
/// const STOP: u32 = 11;
///
/// let machine = Machine::builder()
///     .translator(|id: u32| id.to_string())
///     .build()
///     .unwrap();
///
/// machine.add_state(IDLE).unwrap();
/// machine.add_transition(START, RUNNING).unwrap();
/// machine.add_state(RUNNING).unwrap();
/// machine.add_transition(STOP, IDLE).unwrap();
///
/// machine.reset(IDLE).unwrap();
/// machine.process_event(START).unwrap();
/// assert_eq!(machine.current_state().unwrap(), RUNNING);
/// ```
pub struct Machine {
    inner: Rc<Inner>,
}

/// Non-owning handle for callbacks that feed events back into a machine.
///
/// Every operation fails with [`FsmError::InvalidHandle`] once the machine
/// has been dropped or destroyed.
#[derive(Clone)]
pub struct MachineRef {
    inner: Weak<Inner>,
}

impl Machine {
    /// Start building a machine.
    pub fn builder() -> crate::builder::MachineBuilder {
        crate::builder::MachineBuilder::new()
    }

    pub(crate) fn from_parts(config: MachineConfig, tracer: Tracer) -> Self {
        let history = StateHistory::with_limit(config.history_limit);
        Self {
            inner: Rc::new(Inner {
                config,
                tracer,
                definition: RefCell::new(Definition::default()),
                queue: RefCell::new(VecDeque::new()),
                processing: Cell::new(false),
                history: RefCell::new(history),
                destroyed: Cell::new(false),
            }),
        }
    }

    pub(crate) fn inner(&self) -> &Inner {
        &self.inner
    }

    /// Non-owning handle for callbacks to capture.
    pub fn downgrade(&self) -> MachineRef {
        MachineRef {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Settings the machine was built with.
    pub fn config(&self) -> &MachineConfig {
        &self.inner.config
    }

    /// Register a state and make it the target of following
    /// `add_transition` calls. It also becomes the current state.
    pub fn add_state(&self, id: impl Into<StateId>) -> Result<()> {
        self.inner.add_state(id.into(), None)
    }

    /// Like [`add_state`](Machine::add_state), running `entry` on every
    /// arrival.
    pub fn add_state_with_entry(&self, id: impl Into<StateId>, entry: Action) -> Result<()> {
        self.inner.add_state(id.into(), Some(entry))
    }

    /// Add a transition to the most recently added state. `next` is resolved
    /// when the transition fires.
    pub fn add_transition(&self, event: impl Into<EventId>, next: impl Into<StateId>) -> Result<()> {
        self.inner.add_transition(event.into(), None, next.into())
    }

    /// Like [`add_transition`](Machine::add_transition), running `action`
    /// before the state changes.
    pub fn add_transition_with_action(
        &self,
        event: impl Into<EventId>,
        action: Action,
        next: impl Into<StateId>,
    ) -> Result<()> {
        self.inner
            .add_transition(event.into(), Some(action), next.into())
    }

    /// Queue `event` and, unless a drain is already running, handle every
    /// queued event in FIFO order.
    ///
    /// A callback error stops the drain and is returned here; events still
    /// queued are handled by the next call.
    pub fn process_event(&self, event: impl Into<EventId>) -> Result<()> {
        self.inner.process_event(event.into())
    }

    /// Id of the current state.
    pub fn current_state(&self) -> Result<StateId> {
        self.inner.current_state()
    }

    /// Move to `id` and run its entry action. Returns `Ok(false)` without
    /// moving when no state has that id.
    pub fn reset(&self, id: impl Into<StateId>) -> Result<bool> {
        self.inner.reset(id.into())
    }

    /// Write a diagnostic line to the trace sink.
    pub fn trace(&self, line: u32, args: fmt::Arguments<'_>) -> Result<()> {
        self.inner.ensure_live()?;
        Ok(self.inner.tracer.write(line, args)?)
    }

    /// Release every state, transition and queued event. The machine is
    /// unusable afterwards.
    pub fn destroy(&self) -> Result<()> {
        self.inner.destroy()
    }

    /// True while a drain is running.
    pub fn is_processing(&self) -> bool {
        self.inner.processing.get()
    }

    /// Events queued but not yet dispatched, oldest first.
    pub fn pending_events(&self) -> Vec<EventId> {
        self.inner.queue.borrow().iter().copied().collect()
    }

    /// Registered state ids in registration order.
    pub fn state_ids(&self) -> Vec<StateId> {
        self.inner
            .definition
            .borrow()
            .states
            .iter()
            .map(State::id)
            .collect()
    }

    /// True when a state with `id` is registered.
    pub fn has_state(&self, id: impl Into<StateId>) -> bool {
        self.inner.definition.borrow().position(id.into()).is_some()
    }

    /// The default state, once a state with the configured id is registered.
    pub fn default_state(&self) -> Option<StateId> {
        self.inner.definition.borrow().default_state().map(State::id)
    }

    /// Snapshot of the recorded state changes.
    pub fn history(&self) -> StateHistory {
        self.inner.history.borrow().clone()
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let def = self.inner.definition.borrow();
        f.debug_struct("Machine")
            .field("states", &def.states.len())
            .field("current", &def.current().map(State::id))
            .field("pending", &self.inner.queue.borrow().len())
            .field("processing", &self.inner.processing.get())
            .finish()
    }
}

impl MachineRef {
    fn inner(&self) -> Result<Rc<Inner>> {
        self.inner.upgrade().ok_or(FsmError::InvalidHandle)
    }

    /// Queue `event`; see [`Machine::process_event`].
    pub fn process_event(&self, event: impl Into<EventId>) -> Result<()> {
        self.inner()?.process_event(event.into())
    }

    /// Id of the current state.
    pub fn current_state(&self) -> Result<StateId> {
        self.inner()?.current_state()
    }

    /// Move to `id`; see [`Machine::reset`].
    pub fn reset(&self, id: impl Into<StateId>) -> Result<bool> {
        self.inner()?.reset(id.into())
    }

    /// True while the machine is draining its queue.
    pub fn is_processing(&self) -> Result<bool> {
        Ok(self.inner()?.processing.get())
    }
}

impl fmt::Debug for MachineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineRef")
            .field("live", &(self.inner.strong_count() > 0))
            .finish()
    }
}
