// Directory sector scanning
//
// A directory is a run of 32-byte slots. Scanning inspects the first byte
// of each slot (and the attribute byte for long-name continuations) and
// either stops, skips, or decodes. The scan never crosses a sector
// boundary; multi-sector directories are handled by scanning each sector
// in turn until the span runs out or the end marker appears.

use fatscope_core::{FatscopeError, SECTOR_SIZE};
use log::trace;

use crate::constants::*;
use crate::dir_entry::{DirEntry, FatAttributes};

/// Result of scanning one directory sector.
#[derive(Debug)]
pub struct SectorScan {
    /// Live entries in slot order.
    pub entries: Vec<DirEntry>,
    /// True when the end-of-directory marker was seen; no further sectors
    /// of this directory hold entries.
    pub end_of_directory: bool,
}

/// Scan one 512-byte directory sector.
///
/// Slot policy: first byte `0x00` ends the directory, `0xE5` marks a
/// deleted slot, `0x2E` marks the `.`/`..` pseudo-entries, and attribute
/// byte `0x0F` marks a long-filename continuation. All skipped slots are
/// invisible to the caller's numbering. Zero yielded entries means an
/// empty directory, not a failure.
pub fn scan_sector(buffer: &[u8]) -> Result<SectorScan, FatscopeError> {
    if buffer.len() != SECTOR_SIZE {
        return Err(FatscopeError::InvalidInput(format!(
            "directory sector buffer is {} bytes, expected {}",
            buffer.len(),
            SECTOR_SIZE
        )));
    }

    let mut entries = Vec::new();

    for slot in buffer.chunks_exact(DIR_ENTRY_SIZE) {
        match slot[DIR_NAME] {
            ENTRY_END => {
                trace!("end-of-directory marker after {} live entries", entries.len());
                return Ok(SectorScan {
                    entries,
                    end_of_directory: true,
                });
            }
            ENTRY_DELETED => continue,
            // Skips any name starting with '.', which covers exactly the
            // self/parent pseudo-entries: a valid 8.3 name cannot begin
            // with '.'
            ENTRY_DOT => continue,
            _ => {}
        }

        if slot[DIR_ATTR] == FatAttributes::LFN {
            continue;
        }

        entries.push(DirEntry::decode(slot)?);
    }

    Ok(SectorScan {
        entries,
        end_of_directory: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{ByteOrder, LittleEndian};

    fn file_slot(name: &[u8; 8], ext: &[u8; 3], cluster: u16, size: u32) -> [u8; 32] {
        let mut slot = [0u8; 32];
        slot[..8].copy_from_slice(name);
        slot[8..11].copy_from_slice(ext);
        slot[DIR_ATTR] = FatAttributes::ARCHIVE;
        LittleEndian::write_u16(&mut slot[DIR_FST_CLUS..], cluster);
        LittleEndian::write_u32(&mut slot[DIR_FILE_SIZE..], size);
        slot
    }

    fn sector_of(slots: &[[u8; 32]]) -> Vec<u8> {
        let mut sector = vec![0u8; SECTOR_SIZE];
        for (i, slot) in slots.iter().enumerate() {
            sector[i * 32..(i + 1) * 32].copy_from_slice(slot);
        }
        sector
    }

    #[test]
    fn end_marker_stops_the_scan() {
        // Entry placed after the end marker must never be decoded
        let sector = sector_of(&[
            file_slot(b"BEFORE  ", b"TXT", 4, 1),
            [0u8; 32],
            file_slot(b"AFTER   ", b"TXT", 5, 1),
        ]);
        let scan = scan_sector(&sector).unwrap();
        assert!(scan.end_of_directory);
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.entries[0].name, "BEFORE.TXT");
    }

    #[test]
    fn deleted_and_dot_slots_are_invisible() {
        let mut deleted = file_slot(b"GONE    ", b"TXT", 4, 1);
        deleted[0] = ENTRY_DELETED;
        let mut dot = [0u8; 32];
        dot[..8].copy_from_slice(b".       ");
        dot[DIR_ATTR] = FatAttributes::DIRECTORY;

        let sector = sector_of(&[deleted, dot, file_slot(b"KEPT    ", b"TXT", 5, 9)]);
        let scan = scan_sector(&sector).unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.entries[0].name, "KEPT.TXT");
        assert!(!scan.end_of_directory);
    }

    #[test]
    fn long_name_slots_are_invisible() {
        let mut lfn = [0u8; 32];
        lfn[0] = 0x41;
        lfn[DIR_ATTR] = FatAttributes::LFN;

        let sector = sector_of(&[lfn, file_slot(b"SHORT   ", b"TXT", 6, 3)]);
        let scan = scan_sector(&sector).unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.entries[0].name, "SHORT.TXT");
    }

    #[test]
    fn all_slots_zero_is_an_empty_directory() {
        let scan = scan_sector(&vec![0u8; SECTOR_SIZE]).unwrap();
        assert!(scan.entries.is_empty());
        assert!(scan.end_of_directory);
    }

    #[test]
    fn full_sector_without_end_marker() {
        let slots: Vec<[u8; 32]> = (0..16)
            .map(|i| file_slot(b"FILE    ", b"BIN", 2 + i as u16, 1))
            .collect();
        let scan = scan_sector(&sector_of(&slots)).unwrap();
        assert_eq!(scan.entries.len(), 16);
        assert!(!scan.end_of_directory);
    }

    #[test]
    fn rejects_non_sector_buffer() {
        let err = scan_sector(&[0u8; 64]).unwrap_err();
        assert!(matches!(err, FatscopeError::InvalidInput(_)));
    }

    #[test]
    fn scans_self_entry_then_file_then_end() {
        let mut dot = [0u8; 32];
        dot[..8].copy_from_slice(b".       ");
        dot[DIR_ATTR] = FatAttributes::DIRECTORY;

        let sector = sector_of(&[dot, file_slot(b"GREETING", b"TXT", 2, 13), [0u8; 32]]);
        let scan = scan_sector(&sector).unwrap();
        assert!(scan.end_of_directory);
        assert_eq!(scan.entries.len(), 1);

        let entry = &scan.entries[0];
        assert_eq!(entry.name, "GREETING.TXT");
        assert!(!entry.is_directory());
        assert_eq!(entry.size, 13);
    }
}
