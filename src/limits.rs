//! Process-wide default size guards.
//!
//! Unbounded containers and strings get a default maximum size so
//! adversarial input cannot force unbounded work. The defaults are a
//! deliberate global knob: schema constructors read the value in force at
//! construction time and bake it into a `size` refinement, so replacing the
//! defaults is never retroactive: already-built schemas keep the bound
//! they captured. Per-schema [`crate::Schema::size`] overrides beat both.
//!
//! The knob is guarded by a single lock so late configuration from another
//! thread is safe, though the expected pattern is configuration at program
//! start.

use parking_lot::RwLock;

/// Default maximum sizes per guarded family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDefaults {
    /// Maximum character count for `string` schemas.
    pub string: usize,
    /// Maximum element count for `array` schemas.
    pub array: usize,
    /// Maximum element count for `set` schemas.
    pub set: usize,
    /// Maximum entry count for `map` schemas.
    pub map: usize,
}

impl Default for SizeDefaults {
    fn default() -> Self {
        Self {
            string: 1000,
            array: 500,
            set: 250,
            map: 250,
        }
    }
}

static DEFAULTS: RwLock<SizeDefaults> = RwLock::new(SizeDefaults {
    string: 1000,
    array: 500,
    set: 250,
    map: 250,
});

/// The defaults currently in force.
pub fn defaults() -> SizeDefaults {
    *DEFAULTS.read()
}

/// Replaces the process-wide defaults. Affects only schemas constructed
/// afterwards.
pub fn set_defaults(new: SizeDefaults) {
    *DEFAULTS.write() = new;
}
