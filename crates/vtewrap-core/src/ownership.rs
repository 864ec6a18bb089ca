//! Scoped ownership of one native object reference

use crate::native::NativeLibrary;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// One strong reference to a native object.
///
/// Acquired by sinking the object's floating reference on construction and
/// released by exactly one `unref` when dropped. Not `Clone`: sharing goes
/// through an `Rc<NativeRef<_>>` so the release still happens once.
pub struct NativeRef<L: NativeLibrary> {
    library: Rc<L>,
    handle: L::Handle,
}

impl<L: NativeLibrary> NativeRef<L> {
    /// Take ownership of a freshly allocated, floating `handle`.
    ///
    /// # Safety
    /// `handle` must come straight from `library.terminal_new()` and must not
    /// be adopted or released anywhere else; the returned value releases it.
    pub unsafe fn adopt(library: Rc<L>, handle: L::Handle) -> Self {
        library.ref_sink(handle);
        debug!("Acquired native reference {:?}", handle);
        Self { library, handle }
    }

    pub fn handle(&self) -> L::Handle {
        self.handle
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn library_rc(&self) -> &Rc<L> {
        &self.library
    }
}

impl<L: NativeLibrary> Drop for NativeRef<L> {
    fn drop(&mut self) {
        debug!("Releasing native reference {:?}", self.handle);
        // SAFETY: `adopt` took exactly one reference and this is its only release
        unsafe { self.library.unref(self.handle) };
    }
}

impl<L: NativeLibrary> fmt::Debug for NativeRef<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRef").field("handle", &self.handle).finish()
    }
}
