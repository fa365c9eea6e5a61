//! Macros for declaring state and event id tables.

/// Declare a `u32`-backed id enum together with its translator.
///
/// The generated enum is `Copy`, converts into `u32` (so it can be passed
/// straight to registration calls) and gets:
///
/// - `id(self) -> u32`
/// - `from_id(u32) -> Option<Self>`
/// - `name(self) -> &'static str`
/// - `translate(u32) -> &'static str`, total over `u32`: unknown ids render
///   as `"UNKNOWN"`, suitable as a machine translator.
///
/// # Example
///
/// ```
/// use tabled_fsm::fsm_ids;
///
/// fsm_ids! {
///     pub enum Ids {
///         Idle = 1,
///         Moving = 2,
///         Go = 100,
///         Halt = 101,
///     }
/// }
///
/// assert_eq!(u32::from(Ids::Go), 100);
/// assert_eq!(Ids::from_id(2), Some(Ids::Moving));
/// assert_eq!(Ids::translate(101), "Halt");
/// assert_eq!(Ids::translate(7), "UNKNOWN");
/// ```
#[macro_export]
macro_rules! fsm_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value
            ),*
        }

        impl $name {
            pub const fn id(self) -> u32 {
                self as u32
            }

            pub fn from_id(id: u32) -> Option<Self> {
                $(
                    if id == Self::$variant as u32 {
                        return Some(Self::$variant);
                    }
                )*
                None
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn translate(id: u32) -> &'static str {
                Self::from_id(id).map_or("UNKNOWN", Self::name)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value as u32
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Machine;

    fsm_ids! {
        enum Door {
            Closed = 1,
            Open = 2,
            Push = 10,
            Pull = 11,
        }
    }

    #[test]
    fn fsm_ids_macro_generates_table() {
        assert_eq!(Door::Closed.id(), 1);
        assert_eq!(Door::Pull.name(), "Pull");
        assert_eq!(Door::from_id(10), Some(Door::Push));
        assert_eq!(Door::from_id(3), None);
        assert_eq!(Door::translate(2), "Open");
        assert_eq!(Door::translate(3), "UNKNOWN");
    }

    #[test]
    fn ids_drive_a_machine() {
        let machine = Machine::builder()
            .translator(Door::translate)
            .build()
            .unwrap();
        machine.add_state(Door::Closed).unwrap();
        machine.add_transition(Door::Pull, Door::Open).unwrap();
        machine.add_state(Door::Open).unwrap();
        machine.add_transition(Door::Push, Door::Closed).unwrap();
        machine.reset(Door::Closed).unwrap();

        machine.process_event(Door::Pull).unwrap();

        let state = Door::from_id(machine.current_state().unwrap());
        assert_eq!(state, Some(Door::Open));
    }

    #[test]
    fn fsm_ids_supports_visibility() {
        fsm_ids! {
            pub enum PublicIds {
                A = 5,
            }
        }

        assert_eq!(u32::from(PublicIds::A), 5);
    }
}
