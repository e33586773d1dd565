//! FAT enum for the different FAT types.

use std::fmt;

/// Represents the different types of FAT filesystems.
///
/// # Values
/// - `FAT12`: 12-bit File Allocation Table entries
/// - `FAT16`: 16-bit File Allocation Table entries
/// - `FAT32`: 32-bit File Allocation Table entries (most common on large volumes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FATType {
    FAT12,
    FAT16,
    FAT32,
}

impl FATType {
    /// Determines the FAT type based on the number of clusters in the data region.
    ///
    /// - `FAT12` if cluster count < 4085
    /// - `FAT16` if cluster count < 65525
    /// - `FAT32` otherwise
    pub fn from_cluster_count(clus_cnt: u32) -> Self {
        if clus_cnt < 4085 {
            FATType::FAT12
        } else if clus_cnt < 65525 {
            FATType::FAT16
        } else {
            FATType::FAT32
        }
    }
}

impl fmt::Display for FATType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FATType::FAT12 => "FAT12",
            FATType::FAT16 => "FAT16",
            FATType::FAT32 => "FAT32",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_count_thresholds() {
        assert_eq!(FATType::from_cluster_count(0), FATType::FAT12);
        assert_eq!(FATType::from_cluster_count(4084), FATType::FAT12);
        assert_eq!(FATType::from_cluster_count(4085), FATType::FAT16);
        assert_eq!(FATType::from_cluster_count(65524), FATType::FAT16);
        assert_eq!(FATType::from_cluster_count(65525), FATType::FAT32);
    }
}
