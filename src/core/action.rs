//! Client callbacks run on entry to a state or when a transition fires.

use crate::error::Result;
use std::fmt;
use std::rc::Rc;

/// Zero-argument, side-effecting client callback.
///
/// Actions capture whatever context they need. An action that wants to feed
/// events back into the machine captures a [`MachineRef`](crate::MachineRef)
/// and calls `process_event` on it; the event is queued and handled after
/// the action returns.
///
/// # Example
///
/// ```rust
/// use tabled_fsm::Action;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let hits = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&hits);
/// let action = Action::new(move || {
///     counter.set(counter.get() + 1);
///     Ok(())
/// });
///
/// action.run().unwrap();
/// action.run().unwrap();
/// assert_eq!(hits.get(), 2);
/// ```
#[derive(Clone)]
pub struct Action {
    callback: Rc<dyn Fn() -> Result<()>>,
}

impl Action {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Action {
            callback: Rc::new(callback),
        }
    }

    /// Action that always succeeds, for callbacks that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self::new(move || {
            callback();
            Ok(())
        })
    }

    pub fn run(&self) -> Result<()> {
        (self.callback)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
