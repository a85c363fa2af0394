//! Module identity inside a single build.

use serde::Serialize;

/// Unique identifier for a module fetched during a build.
///
/// Module ids index the bundler's module arena; statements hold one as a
/// back-reference to the module that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModuleId(pub u32);

impl ModuleId {
    pub const NONE: ModuleId = ModuleId(u32::MAX);

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
