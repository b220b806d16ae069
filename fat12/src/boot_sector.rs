// FAT12 boot sector decoding
//
// Field extraction is offset-based with explicit little-endian reads rather
// than a struct overlay, so the decoded snapshot is independent of host
// layout and padding rules.

use byteorder::{ByteOrder, LittleEndian};
use fatscope_core::{FatscopeError, SECTOR_SIZE};
use serde::Serialize;

use crate::constants::*;

/// Immutable volume geometry snapshot, decoded once from sector 0.
///
/// Every address computation on the volume derives from this snapshot;
/// nothing re-reads the boot sector afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeGeometry {
    pub oem_name: String,
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub fat_count: u8,
    pub root_dir_entries: u16,
    pub total_sectors: u32,
    pub media_descriptor: u8,
    pub fat_size_sectors: u16,
    pub volume_label: String,
    pub fs_type: String,

    // Derived at decode time; identical if recomputed from the fields above
    pub root_dir_sector: u32,
    pub root_dir_sector_count: u32,
    pub data_region_start_sector: u32,
}

impl VolumeGeometry {
    /// Decode the 512-byte boot sector.
    ///
    /// The buffer must be exactly one sector; the caller's I/O layer is
    /// responsible for producing it. No signature or label validation
    /// happens here - a higher layer may reject non-FAT12 volumes.
    pub fn decode(buffer: &[u8]) -> Result<Self, FatscopeError> {
        if buffer.len() != SECTOR_SIZE {
            return Err(FatscopeError::GeometryDecode(format!(
                "boot sector buffer is {} bytes, expected {}",
                buffer.len(),
                SECTOR_SIZE
            )));
        }

        let bytes_per_sector = LittleEndian::read_u16(&buffer[BPB_BYTES_PER_SEC..]);
        if bytes_per_sector == 0 {
            return Err(FatscopeError::GeometryDecode(
                "bytes per sector is zero".to_string(),
            ));
        }

        let sectors_per_cluster = buffer[BPB_SEC_PER_CLUS];
        let reserved_sectors = LittleEndian::read_u16(&buffer[BPB_RSVD_SEC_CNT..]);
        let fat_count = buffer[BPB_NUM_FATS];
        let root_dir_entries = LittleEndian::read_u16(&buffer[BPB_ROOT_ENT_CNT..]);
        let media_descriptor = buffer[BPB_MEDIA];
        let fat_size_sectors = LittleEndian::read_u16(&buffer[BPB_FAT_SZ16..]);

        // The 16-bit sector count is authoritative unless zero
        let total_sectors_16 = LittleEndian::read_u16(&buffer[BPB_TOT_SEC16..]);
        let total_sectors = if total_sectors_16 != 0 {
            total_sectors_16 as u32
        } else {
            LittleEndian::read_u32(&buffer[BPB_TOT_SEC32..])
        };

        let root_dir_sector = reserved_sectors as u32 + fat_count as u32 * fat_size_sectors as u32;
        let root_dir_sector_count = (root_dir_entries as u32 * DIR_ENTRY_SIZE as u32
            + bytes_per_sector as u32
            - 1)
            / bytes_per_sector as u32;
        let data_region_start_sector = root_dir_sector + root_dir_sector_count;

        Ok(Self {
            oem_name: trimmed_label(&buffer[BS_OEM_NAME..BS_OEM_NAME + 8]),
            bytes_per_sector,
            sectors_per_cluster,
            reserved_sectors,
            fat_count,
            root_dir_entries,
            total_sectors,
            media_descriptor,
            fat_size_sectors,
            volume_label: trimmed_label(&buffer[BS_VOL_LAB..BS_VOL_LAB + 11]),
            fs_type: trimmed_label(&buffer[BS_FIL_SYS_TYPE..BS_FIL_SYS_TYPE + 8]),
            root_dir_sector,
            root_dir_sector_count,
            data_region_start_sector,
        })
    }
}

fn trimmed_label(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
