// Sector-level access to a backing volume image
//
// All on-disk interpretation happens over buffers produced here; the
// interpreter itself never seeks or reads.

use crate::error::FatscopeError;

/// Fixed physical block size for this volume format.
pub const SECTOR_SIZE: usize = 512;

/// The sole I/O capability the interpreter requires: fetch one sector
/// by absolute index.
pub trait SectorSource {
    fn read_sector(&mut self, index: u32) -> Result<[u8; SECTOR_SIZE], FatscopeError>;
}
