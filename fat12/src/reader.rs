// FAT12 volume reader and browsing session
//
// Composes the boot sector decoder, directory scanner, address translation
// and the navigation stack over an abstract sector source. One reader owns
// one session: its geometry snapshot and navigation stack are private to
// it, and decoded entries are returned by value, never held in shared
// state between calls.

use fatscope_core::{FatscopeError, SectorSource, SECTOR_SIZE};
use log::{debug, info};

use crate::boot_sector::VolumeGeometry;
use crate::constants::MIN_DATA_CLUSTER;
use crate::dir_entry::DirEntry;
use crate::directory::scan_sector;
use crate::layout::cluster_to_sector;
use crate::navigation::NavStack;

#[derive(Debug)]
pub struct Fat12Reader<S: SectorSource> {
    source: S,
    geometry: VolumeGeometry,
    nav: NavStack,
}

impl<S: SectorSource> Fat12Reader<S> {
    /// Open a volume: decode sector 0, check the filesystem label, and
    /// start a browsing session at the root directory.
    pub fn open(mut source: S) -> Result<Self, FatscopeError> {
        let boot = source.read_sector(0)?;
        let geometry = VolumeGeometry::decode(&boot)?;

        if !geometry.fs_type.starts_with("FAT") {
            return Err(FatscopeError::NotSupported(format!(
                "filesystem label {:?} is not a FAT12 volume",
                geometry.fs_type
            )));
        }

        info!("FAT12 volume opened:");
        info!("  Bytes per sector: {}", geometry.bytes_per_sector);
        info!("  Sectors per cluster: {}", geometry.sectors_per_cluster);
        info!("  Root entries: {}", geometry.root_dir_entries);
        info!("  Root directory sector: {}", geometry.root_dir_sector);
        info!("  Data region start: {}", geometry.data_region_start_sector);

        let nav = NavStack::new(geometry.root_dir_sector);
        Ok(Self {
            source,
            geometry,
            nav,
        })
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    /// Sector address of the current directory.
    pub fn current_directory(&self) -> u32 {
        self.nav.current()
    }

    pub fn depth(&self) -> usize {
        self.nav.depth()
    }

    /// Number of sectors a directory starting at `sector` occupies.
    ///
    /// The root directory has a fixed span recorded in the boot sector;
    /// any other directory spans one cluster, the contiguous unit the
    /// format guarantees without chain following.
    fn directory_span(&self, sector: u32) -> u32 {
        if sector == self.geometry.root_dir_sector {
            self.geometry.root_dir_sector_count
        } else {
            self.geometry.sectors_per_cluster as u32
        }
    }

    /// List the directory starting at the given sector address.
    ///
    /// Entries are in slot order; the display index of an entry is its
    /// position + 1, accumulated across all sectors of the directory.
    pub fn read_directory(&mut self, sector: u32) -> Result<Vec<DirEntry>, FatscopeError> {
        let span = self.directory_span(sector);
        let mut entries = Vec::new();

        for offset in 0..span {
            let buffer = self.source.read_sector(sector + offset)?;
            let scan = scan_sector(&buffer)?;
            entries.extend(scan.entries);
            if scan.end_of_directory {
                break;
            }
        }

        debug!("directory at sector {}: {} entries", sector, entries.len());
        Ok(entries)
    }

    /// List the current directory.
    pub fn list_current(&mut self) -> Result<Vec<DirEntry>, FatscopeError> {
        self.read_directory(self.nav.current())
    }

    /// Fetch the entry with the given 1-based display index from the
    /// current directory.
    pub fn entry_at(&mut self, index: usize) -> Result<DirEntry, FatscopeError> {
        if index == 0 {
            return Err(FatscopeError::InvalidInput(
                "display indices start at 1".to_string(),
            ));
        }
        let entries = self.list_current()?;
        entries
            .into_iter()
            .nth(index - 1)
            .ok_or_else(|| FatscopeError::NotFound(format!("no entry with index {}", index)))
    }

    /// Descend into the subdirectory with the given display index.
    pub fn enter(&mut self, index: usize) -> Result<DirEntry, FatscopeError> {
        let entry = self.entry_at(index)?;
        if !entry.is_directory() {
            return Err(FatscopeError::InvalidInput(format!(
                "{} is not a directory",
                entry.name
            )));
        }
        if entry.start_cluster < MIN_DATA_CLUSTER {
            return Err(FatscopeError::Addressing(format!(
                "directory {} has reserved start cluster {}",
                entry.name, entry.start_cluster
            )));
        }

        let sector = cluster_to_sector(&self.geometry, entry.start_cluster)?;
        self.nav.enter(sector);
        Ok(entry)
    }

    /// Go back to the parent directory. At the root this reports
    /// `NavigationUnderflow` and changes nothing.
    pub fn back(&mut self) -> Result<u32, FatscopeError> {
        self.nav.back()
    }

    /// Read a file's contents: consecutive sectors from its start cluster,
    /// truncated to the recorded size.
    pub fn read_file(&mut self, entry: &DirEntry) -> Result<Vec<u8>, FatscopeError> {
        if entry.is_directory() {
            return Err(FatscopeError::InvalidInput(format!(
                "{} is a directory, not a file",
                entry.name
            )));
        }
        if entry.size == 0 {
            return Ok(Vec::new());
        }

        let start = cluster_to_sector(&self.geometry, entry.start_cluster)?;
        let sector_count = (entry.size as usize + SECTOR_SIZE - 1) / SECTOR_SIZE;
        debug!(
            "reading {} ({} bytes, {} sectors from sector {})",
            entry.name, entry.size, sector_count, start
        );

        let mut data = Vec::with_capacity(sector_count * SECTOR_SIZE);
        for offset in 0..sector_count as u32 {
            data.extend_from_slice(&self.source.read_sector(start + offset)?);
        }
        data.truncate(entry.size as usize);
        Ok(data)
    }

    /// Resolve a `/`-separated path to a directory's sector address,
    /// starting from the root. Matching is case-insensitive on the 8.3
    /// display name. The session's navigation stack is not touched.
    pub fn resolve_dir(&mut self, path: &str) -> Result<u32, FatscopeError> {
        let mut sector = self.geometry.root_dir_sector;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            let entries = self.read_directory(sector)?;
            let dir = entries
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(part) && e.is_directory())
                .ok_or_else(|| FatscopeError::NotFound(format!("directory {}", part)))?;
            sector = cluster_to_sector(&self.geometry, dir.start_cluster)?;
        }

        Ok(sector)
    }

    /// Resolve a path to a file entry and read its contents.
    pub fn read_file_at(&mut self, path: &str) -> Result<Vec<u8>, FatscopeError> {
        let trimmed = path.trim_end_matches('/');
        let (dir_path, file_name) = match trimmed.rfind('/') {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => ("", trimmed),
        };
        if file_name.is_empty() {
            return Err(FatscopeError::InvalidInput("empty file name".to_string()));
        }

        let sector = self.resolve_dir(dir_path)?;
        let entries = self.read_directory(sector)?;
        let file = entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(file_name) && !e.is_directory())
            .ok_or_else(|| FatscopeError::NotFound(format!("file {}", file_name)))?
            .clone();

        self.read_file(&file)
    }
}
