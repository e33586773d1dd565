//! Partition type codes found in MBR partition table entries.
//!
//! Only the most common DOS partition types are named. Any other code is rendered
//! as its raw value. See <https://en.wikipedia.org/wiki/Partition_type> for the full list.

use std::fmt::{self, Display};

/// Returns the name registered for a partition type code, if any.
///
/// 0x82 is shared by Solaris x86 and Linux swap; the Linux meaning is kept.
fn pt_type_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x00 => "Empty",
        0x01 => "FAT12, CHS",
        0x04 => "FAT16, 16–32 MB, CHS",
        0x05 => "Microsoft Extended, CHS",
        0x06 => "FAT16, 32 MB–2GB, CHS",
        0x07 => "NTFS",
        0x0B => "FAT32, CHS",
        0x0C => "FAT32, LBA",
        0x0E => "FAT16, 32 MB–2GB, LBA",
        0x0F => "Microsoft Extended, LBA",
        0x11 => "Hidden FAT12, CHS",
        0x14 => "Hidden FAT16, 16–32 MB, CHS",
        0x16 => "Hidden FAT16, 32 MB–2GB, CHS",
        0x1B => "Hidden FAT32, CHS",
        0x1C => "Hidden FAT32, LBA",
        0x1E => "Hidden FAT16, 32 MB–2GB, LBA",
        0x42 => "Microsoft MBR. Dynamic Disk",
        0x82 => "Linux Swap",
        0x83 => "Linux",
        0x84 => "Hibernation",
        0x85 => "Linux Extended",
        0x86 | 0x87 => "NTFS Volume Set",
        0xA0 | 0xA1 => "Hibernation",
        0xA5 => "FreeBSD",
        0xA6 => "OpenBSD",
        0xA8 => "Mac OSX",
        0xA9 => "NetBSD",
        0xAB => "Mac OSX Boot",
        0xB7 => "BSDI",
        0xB8 => "BSDI swap",
        0xEE => "EFI GPT Disk",
        0xEF => "EFI System Partition",
        0xFB => "Vmware File System",
        0xFC => "Vmware swap",
        _ => return None,
    };
    Some(name)
}

/// Looks up the human-readable name of a partition type code.
///
/// Never fails: an unknown code is returned as `0x` followed by two lowercase hex digits.
pub fn lookup(code: u8) -> String {
    PTType::from_byte(code).to_string()
}

/// Represents the type of a partition table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PTType {
    /// A registered partition type, with its code and name.
    Known(u8, &'static str),
    /// Unknown partition type, encapsulating the raw type byte.
    Unknown(u8),
}

impl PTType {
    /// Creates a `PTType` instance from a raw byte.
    pub fn from_byte(byte: u8) -> Self {
        match pt_type_name(byte) {
            Some(name) => PTType::Known(byte, name),
            None => PTType::Unknown(byte),
        }
    }

    /// The raw type byte.
    pub fn code(&self) -> u8 {
        match *self {
            PTType::Known(code, _) | PTType::Unknown(code) => code,
        }
    }
}

impl Display for PTType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PTType::Known(_, name) => write!(f, "{name}"),
            PTType::Unknown(b) => write!(f, "0x{b:02x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_are_named() {
        assert_eq!(lookup(0x07), "NTFS");
        assert_eq!(lookup(0x0C), "FAT32, LBA");
        assert_eq!(lookup(0xEE), "EFI GPT Disk");
        assert_eq!(lookup(0x00), "Empty");
    }

    #[test]
    fn linux_swap_wins_for_0x82() {
        assert_eq!(lookup(0x82), "Linux Swap");
    }

    #[test]
    fn unknown_codes_fall_back_to_lowercase_hex() {
        assert_eq!(lookup(0x02), "0x02");
        assert_eq!(lookup(0xDA), "0xda");
        assert_eq!(PTType::from_byte(0xDA), PTType::Unknown(0xDA));
    }

    #[test]
    fn lookup_is_total() {
        for code in 0..=u8::MAX {
            let name = lookup(code);
            assert!(!name.is_empty());
            assert_eq!(PTType::from_byte(code).code(), code);
        }
    }
}
