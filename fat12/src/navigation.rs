// Directory navigation stack
//
// An ordered stack of absolute sector addresses, top = current directory.
// The root frame sits at the bottom and can never be popped, so the stack
// is never empty.

use fatscope_core::FatscopeError;
use log::debug;

#[derive(Debug, Clone)]
pub struct NavStack {
    frames: Vec<u32>,
}

impl NavStack {
    /// Start a session at the root directory.
    pub fn new(root_sector: u32) -> Self {
        Self {
            frames: vec![root_sector],
        }
    }

    /// Sector address of the current directory.
    pub fn current(&self) -> u32 {
        *self.frames.last().expect("stack always holds the root frame")
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Descend into a subdirectory.
    pub fn enter(&mut self, sector: u32) {
        debug!("entering directory at sector {}", sector);
        self.frames.push(sector);
    }

    /// Go back to the parent directory and return its address.
    ///
    /// At the root this is a no-op reported as `NavigationUnderflow`; the
    /// stack is left unchanged.
    pub fn back(&mut self) -> Result<u32, FatscopeError> {
        if self.frames.len() == 1 {
            return Err(FatscopeError::NavigationUnderflow);
        }
        self.frames.pop();
        Ok(self.current())
    }
}
