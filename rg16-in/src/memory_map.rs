//! This submodule exists to map an RG16 file as a memory map and expose it
//! through the [`ByteSource`] trait.
use memmap2::{Mmap, MmapOptions};
use rg16_core::{ByteSource, Rg16Error};

/// A memory-mapped RG16 file, paired with the file handle that backs the
/// map (the handle must outlive the map).
pub struct MappedRg16 {
    map: Mmap,
    _file: std::fs::File,
}

impl MappedRg16 {
    /// Map `path` into memory. The file is opened read-only.
    pub fn open(path: &str) -> Result<MappedRg16, Rg16Error> {
        let (map, file) = map_file_to_memory(path)?;
        Ok(MappedRg16 { map, _file: file })
    }
}

impl ByteSource for MappedRg16 {
    fn len(&self) -> usize {
        self.map.len()
    }

    fn read_at(&self, offset: usize, len: usize) -> Result<&[u8], Rg16Error> {
        let end = offset.saturating_add(len);
        if end > self.map.len() {
            return Err(Rg16Error::TruncatedSource { offset, want: len });
        }
        Ok(&self.map[offset..end])
    }
}

/// Opens `path` and maps it into memory.
pub(crate) fn map_file_to_memory(path: &str) -> Result<(Mmap, std::fs::File), Rg16Error> {
    let file = std::fs::File::open(path)?;
    let map = unsafe { MmapOptions::new().map(&file)? };
    Ok((map, file))
}
