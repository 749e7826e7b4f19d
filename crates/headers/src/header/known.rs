//! The known-header fast path.
//!
//! A small closed set of header names makes up almost all real traffic. Each of
//! them gets a fixed storage slot and a bit in the collection's 64-bit presence
//! word, so reading `Host` or `Connection` costs a name match and a field read
//! instead of a hash lookup.
//!
//! [`KnownHeaders`] is the capability the collection dispatches to. A layout only
//! has to name its slots and hand out its storage; the fast operations are
//! provided on top of that and keep the presence bits consistent. Layouts are
//! normally generated with the crate-internal `known_headers!` macro, see
//! [`RequestHeaderSlots`](crate::header::RequestHeaderSlots).

use crate::header::FieldValues;

#[inline]
const fn bit(index: usize) -> u64 {
    1 << index
}

/// Outcome of [`KnownHeaders::add_fast`].
#[derive(Debug)]
pub enum AddFast {
    /// The slot was empty and now holds the value.
    Added,
    /// The slot already holds a value; nothing changed.
    Occupied,
    /// The name has no slot in this layout; the value is handed back.
    Unknown(FieldValues),
}

/// Fixed-slot storage for a closed set of header names.
///
/// Bit *i* of the `bits` word passed to every operation means "slot *i* holds a
/// value". The word lives in the collection; implementations only read and update
/// it through these methods, and keep every slot whose bit is clear empty.
pub trait KnownHeaders: Default + Clone {
    /// Canonical slot names, indexed by slot. A layout has at most 64 slots.
    const NAMES: &'static [&'static str];

    /// Maps a header name, compared ASCII case insensitively, to its slot.
    fn slot_index(name: &str) -> Option<usize>;

    fn slots(&self) -> &[FieldValues];

    fn slots_mut(&mut self) -> &mut [FieldValues];

    /// Returns the value of a known, present header.
    ///
    /// `None` covers both "not a known name" and "known but absent".
    #[inline]
    fn get_fast(&self, bits: u64, name: &str) -> Option<&FieldValues> {
        let index = Self::slot_index(name)?;
        if bits & bit(index) == 0 {
            return None;
        }
        self.slots().get(index)
    }

    /// `Some(present)` for a known name, `None` when the name has no slot.
    #[inline]
    fn contains_fast(&self, bits: u64, name: &str) -> Option<bool> {
        Self::slot_index(name).map(|index| bits & bit(index) != 0)
    }

    /// Stores `value` in the slot for `name`, replacing any previous value.
    ///
    /// Hands `value` back when the name has no slot.
    #[inline]
    fn set_fast(&mut self, bits: &mut u64, name: &str, value: FieldValues) -> Result<(), FieldValues> {
        let Some(index) = Self::slot_index(name) else {
            return Err(value);
        };
        self.slots_mut()[index] = value;
        *bits |= bit(index);
        Ok(())
    }

    /// Stores `value` only if the slot for `name` is empty.
    #[inline]
    fn add_fast(&mut self, bits: &mut u64, name: &str, value: FieldValues) -> AddFast {
        let Some(index) = Self::slot_index(name) else {
            return AddFast::Unknown(value);
        };
        if *bits & bit(index) != 0 {
            return AddFast::Occupied;
        }
        self.slots_mut()[index] = value;
        *bits |= bit(index);
        AddFast::Added
    }

    /// Pushes one more value onto the slot for `name`.
    ///
    /// Hands `value` back when the name has no slot.
    #[inline]
    fn append_fast(&mut self, bits: &mut u64, name: &str, value: String) -> Result<(), String> {
        let Some(index) = Self::slot_index(name) else {
            return Err(value);
        };
        self.slots_mut()[index].push(value);
        *bits |= bit(index);
        Ok(())
    }

    /// `Some(removed)` for a known name, `None` when the name has no slot.
    #[inline]
    fn remove_fast(&mut self, bits: &mut u64, name: &str) -> Option<bool> {
        let index = Self::slot_index(name)?;
        if *bits & bit(index) == 0 {
            return Some(false);
        }
        self.slots_mut()[index].clear();
        *bits &= !bit(index);
        Some(true)
    }

    /// Empties every present slot and zeroes the presence word.
    fn clear_fast(&mut self, bits: &mut u64) {
        let slots = self.slots_mut();
        let mut remaining = *bits;
        while remaining != 0 {
            slots[remaining.trailing_zeros() as usize].clear();
            remaining &= remaining - 1;
        }
        *bits = 0;
    }

    #[inline]
    fn count_fast(bits: u64) -> usize {
        bits.count_ones() as usize
    }
}

/// A layout without any known slot: every name goes to the fallback map.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKnownHeaders;

impl KnownHeaders for NoKnownHeaders {
    const NAMES: &'static [&'static str] = &[];

    #[inline]
    fn slot_index(_name: &str) -> Option<usize> {
        None
    }

    fn slots(&self) -> &[FieldValues] {
        &[]
    }

    fn slots_mut(&mut self) -> &mut [FieldValues] {
        &mut []
    }
}

/// Generates a [`KnownHeaders`] layout.
///
/// Every slot is declared as `(index, getter, CONST_NAME, "Canonical-Name");`
/// with indices counting up from zero in declaration order. The macro emits the
/// storage struct, an associated name constant and a typed getter per slot, and
/// the [`KnownHeaders`] implementation.
macro_rules! known_headers {
    (
        $(#[$docs:meta])*
        $vis:vis struct $layout:ident {
        $(
            $(#[$slot_docs:meta])*
            ($index:literal, $getter:ident, $konst:ident, $name:literal);
        )+
        }
    ) => {
        $(#[$docs])*
        #[derive(Clone)]
        $vis struct $layout {
            slots: [$crate::header::FieldValues; [$($name),+].len()],
        }

        const _: () = assert!([$($name),+].len() <= 64, "a known header layout has at most 64 slots");

        impl $layout {
        $(
            $(#[$slot_docs])*
            pub const $konst: &'static str = $name;
        )+

        $(
            #[doc = concat!("Returns the `", $name, "` field, empty when absent.")]
            #[inline]
            pub fn $getter(&self) -> &$crate::header::FieldValues {
                &self.slots[$index]
            }
        )+
        }

        impl Default for $layout {
            fn default() -> Self {
                Self { slots: std::array::from_fn(|_| $crate::header::FieldValues::new()) }
            }
        }

        impl std::fmt::Debug for $layout {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let present = <Self as $crate::header::KnownHeaders>::NAMES
                    .iter()
                    .zip(self.slots.iter())
                    .filter(|(_, value)| !value.is_empty());
                f.debug_map().entries(present).finish()
            }
        }

        impl $crate::header::KnownHeaders for $layout {
            const NAMES: &'static [&'static str] = &[$($name),+];

            #[inline]
            fn slot_index(name: &str) -> Option<usize> {
                // length and first byte rule out most slots before any byte loop runs
                let len = name.len();
                let first = name.as_bytes().first()?.to_ascii_lowercase();
            $(
                if len == $name.len()
                    && first == $name.as_bytes()[0].to_ascii_lowercase()
                    && name.eq_ignore_ascii_case($name)
                {
                    return Some($index);
                }
            )+
                None
            }

            #[inline]
            fn slots(&self) -> &[$crate::header::FieldValues] {
                &self.slots
            }

            #[inline]
            fn slots_mut(&mut self) -> &mut [$crate::header::FieldValues] {
                &mut self.slots
            }
        }
    };
}

pub(crate) use known_headers;
