//! Use-after-dispose guard shared by round entities

use crate::error::SimError;

/// Disposed flag checked at the top of every public method of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    entity: &'static str,
    disposed: bool,
}

impl Lifecycle {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            disposed: false,
        }
    }

    #[inline]
    pub fn check(&self, op: &'static str) -> Result<(), SimError> {
        if self.disposed {
            return Err(SimError::Disposed {
                entity: self.entity,
                op,
            });
        }
        Ok(())
    }

    /// Mark disposed; a second call fails like any other use after dispose
    pub fn dispose(&mut self) -> Result<(), SimError> {
        self.check("dispose")?;
        self.disposed = true;
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
