//! Scoped batch edit.
//!
//! Construction starts a batched edit on the backend. [`SafeEditingSession::execute`]
//! runs the unit of work with errors and panics contained, then stops the
//! edit. Dropping the session saves and refreshes, on every exit path.

use std::panic::{catch_unwind, AssertUnwindSafe};

use sweep_core::errors::{BatchError, SweepErrorCode};

use crate::backend::AssetDatabase;

pub struct SafeEditingSession<'b, B: AssetDatabase + ?Sized> {
    backend: &'b mut B,
    editing: bool,
}

impl<'b, B: AssetDatabase + ?Sized> SafeEditingSession<'b, B> {
    pub fn new(backend: &'b mut B) -> Self {
        tracing::debug!("starting batched asset edit");
        backend.start_asset_editing();
        Self {
            backend,
            editing: true,
        }
    }

    /// Run `work` against the backend.
    ///
    /// An error or panic is logged and returned, never propagated. Editing
    /// stops either way; the session itself saves on drop.
    pub fn execute<T, F>(mut self, work: F) -> Result<T, BatchError>
    where
        F: FnOnce(&mut B) -> Result<T, BatchError>,
    {
        let backend = &mut *self.backend;
        let outcome = match catch_unwind(AssertUnwindSafe(|| work(backend))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                tracing::error!(code = err.error_code(), error = %err, "batch edit failed");
                Err(err)
            }
            Err(payload) => {
                let err = BatchError::from_panic(&*payload);
                tracing::error!(code = err.error_code(), error = %err, "batch edit panicked");
                Err(err)
            }
        };
        self.stop_editing();
        outcome
    }

    fn stop_editing(&mut self) {
        if self.editing {
            self.backend.stop_asset_editing();
            self.editing = false;
        }
    }
}

impl<B: AssetDatabase + ?Sized> Drop for SafeEditingSession<'_, B> {
    fn drop(&mut self) {
        self.stop_editing();
        self.backend.save_assets();
        self.backend.refresh();
        tracing::debug!("batched asset edit closed");
    }
}
