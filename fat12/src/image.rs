// Sector sources backed by an image file or an in-memory byte vector

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use fatscope_core::{FatscopeError, SectorSource, SECTOR_SIZE};
use log::trace;

/// A volume image on disk, read one sector at a time.
pub struct ImageFile {
    file: File,
}

impl ImageFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FatscopeError> {
        let file = File::open(path)?;
        Ok(Self { file })
    }
}

impl SectorSource for ImageFile {
    fn read_sector(&mut self, index: u32) -> Result<[u8; SECTOR_SIZE], FatscopeError> {
        let offset = index as u64 * SECTOR_SIZE as u64;
        trace!("reading sector {} at offset {:#x}", index, offset);

        self.file.seek(SeekFrom::Start(offset))?;
        let mut buffer = [0u8; SECTOR_SIZE];
        self.file.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

/// A whole volume image held in memory. Mainly useful for tests and for
/// callers that already loaded the image.
#[derive(Debug)]
pub struct MemoryImage {
    bytes: Vec<u8>,
}

impl MemoryImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl SectorSource for MemoryImage {
    fn read_sector(&mut self, index: u32) -> Result<[u8; SECTOR_SIZE], FatscopeError> {
        let start = index as usize * SECTOR_SIZE;
        let end = start + SECTOR_SIZE;
        if end > self.bytes.len() {
            return Err(FatscopeError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("sector {} is past the end of the image", index),
            )));
        }

        let mut buffer = [0u8; SECTOR_SIZE];
        buffer.copy_from_slice(&self.bytes[start..end]);
        Ok(buffer)
    }
}
