//! Boot information record
//!
//! The kernel writes one [`BootInfo`] into a frame at boot and maps it into
//! the initial thread (slot [`Slot::BootInfoFrame`](keel_cap::Slot)). It
//! describes the initial capability space: which slots are free, which hold
//! frames of the user image, which hold untyped memory and which hold
//! device frames.
//!
//! The record is read-only after boot and may be shared freely as
//! `&'static BootInfo`. Its layout is fixed by declaration order and must
//! match the kernel byte for byte; every offset is asserted below.

use core::fmt;
use core::mem::{offset_of, size_of};

use keel_cap::{CPtr, Word};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

/// Maximum number of untyped descriptors in a boot info record.
pub const MAX_UNTYPED: usize = 167;

/// Maximum number of device regions in a boot info record.
pub const MAX_DEVICE_REGIONS: usize = 199;

/// Size of the boot info record in bytes.
pub const BOOT_INFO_SIZE: usize = 4084;

/// Result type for boot info operations.
pub type BootInfoResult<T> = Result<T, BootInfoError>;

/// Half-open range `[start, end)` of capability slots.
#[derive(Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SlotRegion {
    /// First slot in the region.
    pub start: CPtr,
    /// First slot past the region.
    pub end: CPtr,
}

impl SlotRegion {
    /// Create a region. Returns `None` if `end < start`.
    #[must_use]
    pub const fn new(start: CPtr, end: CPtr) -> Option<Self> {
        if start.raw() <= end.raw() {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Empty region positioned at `at`.
    #[must_use]
    pub const fn empty(at: CPtr) -> Self {
        Self { start: at, end: at }
    }

    /// Check that `start <= end`.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.start.raw() <= self.end.raw()
    }

    /// Number of slots. Zero for empty or malformed regions.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.raw().saturating_sub(self.start.raw()) as usize
    }

    /// Check whether the region holds no slots.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `slot` lies inside the region.
    #[inline]
    #[must_use]
    pub const fn contains(&self, slot: CPtr) -> bool {
        self.start.raw() <= slot.raw() && slot.raw() < self.end.raw()
    }

    /// Iterate over the slots in the region.
    pub fn iter(&self) -> impl Iterator<Item = CPtr> + use<> {
        (self.start.raw()..self.end.raw()).map(CPtr::from_raw)
    }
}

impl fmt::Debug for SlotRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.raw(), self.end.raw())
    }
}

/// Frames of one device, as handed to the initial thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DeviceRegion {
    /// Physical base address of the device.
    pub base_paddr: Word,
    /// Size of each frame, as a power of two.
    pub frame_size_bits: Word,
    /// Slots holding the frame capabilities.
    pub frames: SlotRegion,
}

/// One untyped memory descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UntypedDesc {
    /// Physical address of the memory.
    pub paddr: Word,
    /// Size as a power of two.
    pub size_bits: u8,
}

impl UntypedDesc {
    /// Size in bytes, or `None` if `size_bits` does not fit in 64 bits.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        1u64.checked_shl(self.size_bits as u32)
    }
}

/// The slot regions of a boot info record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Free slots in the initial CNode.
    Empty,
    /// Frames shared with other nodes.
    SharedFrames,
    /// Frames of the user image.
    UserImageFrames,
    /// Page tables of the user image.
    UserImagePts,
    /// Untyped memory.
    Untyped,
}

impl RegionKind {
    /// All region kinds in record order.
    pub const ALL: [Self; 5] = [
        Self::Empty,
        Self::SharedFrames,
        Self::UserImageFrames,
        Self::UserImagePts,
        Self::Untyped,
    ];

    /// Get the region name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::SharedFrames => "shared_frames",
            Self::UserImageFrames => "user_image_frames",
            Self::UserImagePts => "user_image_pts",
            Self::Untyped => "untyped",
        }
    }
}

/// Errors from reading, checking or building a boot info record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum BootInfoError {
    /// A slot region has `end < start`.
    InvalidRegion(RegionKind),
    /// More untyped slots than descriptors.
    TooManyUntyped {
        /// Number of untyped slots.
        count: usize,
    },
    /// Device region count past the table.
    TooManyDeviceRegions {
        /// Recorded count.
        count: Word,
    },
    /// A device region's frame range has `end < start`.
    InvalidDeviceRegion {
        /// Index into the device region table.
        index: usize,
    },
    /// Byte slice shorter than the record.
    TooShort {
        /// Length of the slice.
        len: usize,
    },
    /// Byte slice not aligned for the record.
    Misaligned,
    /// Growing a slot region would run past the last slot.
    SlotOverflow(RegionKind),
}

impl BootInfoError {
    /// Get a static description.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRegion(_) => "slot region end before start",
            Self::TooManyUntyped { .. } => "too many untyped slots",
            Self::TooManyDeviceRegions { .. } => "too many device regions",
            Self::InvalidDeviceRegion { .. } => "device region end before start",
            Self::TooShort { .. } => "buffer too short for boot info",
            Self::Misaligned => "buffer misaligned for boot info",
            Self::SlotOverflow(_) => "slot region ends at the last slot",
        }
    }
}

impl fmt::Display for BootInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion(kind) => write!(f, "{}: {}", self.as_str(), kind.name()),
            Self::TooManyUntyped { count } => {
                write!(f, "{}: {} > {}", self.as_str(), count, MAX_UNTYPED)
            }
            Self::TooManyDeviceRegions { count } => {
                write!(f, "{}: {} > {}", self.as_str(), count, MAX_DEVICE_REGIONS)
            }
            Self::InvalidDeviceRegion { index } => write!(f, "{}: {}", self.as_str(), index),
            Self::TooShort { len } => {
                write!(f, "{}: {} < {}", self.as_str(), len, BOOT_INFO_SIZE)
            }
            Self::Misaligned => f.write_str(self.as_str()),
            Self::SlotOverflow(kind) => write!(f, "{}: {}", self.as_str(), kind.name()),
        }
    }
}

/// Boot information handed to the initial thread.
#[derive(Clone, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct BootInfo {
    /// Index of this node.
    pub node_id: Word,
    /// Number of nodes in the system.
    pub num_nodes: Word,
    /// Number of IOMMU page table levels.
    pub num_iopt_levels: Word,
    /// Address of the initial thread's IPC buffer.
    pub ipc_buffer: Word,
    /// Free slots in the initial CNode.
    pub empty: SlotRegion,
    /// Shared frame caps.
    pub shared_frames: SlotRegion,
    /// User image frame caps.
    pub user_image_frames: SlotRegion,
    /// User image page table caps.
    pub user_image_pts: SlotRegion,
    /// Untyped memory caps.
    pub untyped: SlotRegion,
    /// Physical address of each untyped, by position in `untyped`.
    pub untyped_paddr_list: [Word; MAX_UNTYPED],
    /// Size bits of each untyped, by position in `untyped`.
    pub untyped_size_bits_list: [u8; MAX_UNTYPED],
    /// Size of the initial CNode, as a power of two.
    pub init_thread_cnode_size_bits: u8,
    /// Number of valid entries in `device_regions`.
    pub num_device_regions: Word,
    /// Device frame regions.
    pub device_regions: [DeviceRegion; MAX_DEVICE_REGIONS],
    /// Scheduling domain of the initial thread.
    pub init_thread_domain: u8,
    _pad: [u8; 3],
}

impl BootInfo {
    /// Create a zeroed record for the kernel or a test fixture to fill in.
    #[must_use]
    pub fn new() -> Self {
        Self::new_zeroed()
    }

    /// View a mapped boot info frame as a record.
    ///
    /// The record is checked with [`validate`](Self::validate) before it is
    /// returned. Bytes past the record are ignored.
    pub fn from_bytes(bytes: &[u8]) -> BootInfoResult<&Self> {
        if bytes.len() < BOOT_INFO_SIZE {
            return Err(BootInfoError::TooShort { len: bytes.len() });
        }
        let (info, _) = Self::ref_from_prefix(bytes).map_err(|_| BootInfoError::Misaligned)?;
        info.validate()?;
        Ok(info)
    }

    /// Get one of the slot regions.
    #[must_use]
    pub const fn region(&self, kind: RegionKind) -> SlotRegion {
        match kind {
            RegionKind::Empty => self.empty,
            RegionKind::SharedFrames => self.shared_frames,
            RegionKind::UserImageFrames => self.user_image_frames,
            RegionKind::UserImagePts => self.user_image_pts,
            RegionKind::Untyped => self.untyped,
        }
    }

    /// Check the record's invariants.
    ///
    /// Every slot region must have `start <= end`, there may be at most
    /// [`MAX_UNTYPED`] untyped slots and [`MAX_DEVICE_REGIONS`] device
    /// regions, and every counted device region must be well formed.
    pub fn validate(&self) -> BootInfoResult<()> {
        for kind in RegionKind::ALL {
            let region = self.region(kind);
            if !region.is_valid() {
                log::warn!("boot info: {} region {:?} ends before it starts", kind.name(), region);
                return Err(BootInfoError::InvalidRegion(kind));
            }
        }

        if self.untyped.len() > MAX_UNTYPED {
            log::warn!("boot info: {} untyped slots exceed the descriptor table", self.untyped.len());
            return Err(BootInfoError::TooManyUntyped {
                count: self.untyped.len(),
            });
        }

        let count = self.num_device_regions;
        if count as usize > MAX_DEVICE_REGIONS {
            log::warn!("boot info: {} device regions exceed the table", count);
            return Err(BootInfoError::TooManyDeviceRegions { count });
        }

        for (index, region) in self.device_regions().iter().enumerate() {
            if !region.frames.is_valid() {
                log::warn!(
                    "boot info: device region {} at {:#x} has frames {:?}",
                    index,
                    region.base_paddr,
                    region.frames
                );
                return Err(BootInfoError::InvalidDeviceRegion { index });
            }
        }

        Ok(())
    }

    /// Iterate over the untyped capabilities and their descriptors.
    pub fn untyped_iter(&self) -> impl Iterator<Item = (CPtr, UntypedDesc)> + '_ {
        self.untyped
            .iter()
            .zip(self.untyped_paddr_list.iter().zip(self.untyped_size_bits_list.iter()))
            .map(|(cptr, (&paddr, &size_bits))| (cptr, UntypedDesc { paddr, size_bits }))
    }

    /// Get the descriptor for untyped capability `cptr`.
    #[must_use]
    pub fn untyped_desc(&self, cptr: CPtr) -> Option<UntypedDesc> {
        if !self.untyped.contains(cptr) {
            return None;
        }
        let index = (cptr.raw() - self.untyped.start.raw()) as usize;
        Some(UntypedDesc {
            paddr: *self.untyped_paddr_list.get(index)?,
            size_bits: *self.untyped_size_bits_list.get(index)?,
        })
    }

    /// Get the valid device regions, clamped to the table size.
    #[must_use]
    pub fn device_regions(&self) -> &[DeviceRegion] {
        let count = (self.num_device_regions as usize).min(MAX_DEVICE_REGIONS);
        &self.device_regions[..count]
    }

    // -- Producer side

    /// Set the free slot region.
    pub fn set_empty_region(&mut self, region: SlotRegion) {
        self.empty = region;
    }

    /// Set the shared frame region.
    pub fn set_shared_frames_region(&mut self, region: SlotRegion) {
        self.shared_frames = region;
    }

    /// Set the user image frame region.
    pub fn set_user_image_frames_region(&mut self, region: SlotRegion) {
        self.user_image_frames = region;
    }

    /// Set the user image page table region.
    pub fn set_user_image_pts_region(&mut self, region: SlotRegion) {
        self.user_image_pts = region;
    }

    /// Set the untyped region.
    ///
    /// Descriptors are kept by position, so existing entries now describe
    /// the slots of the new region.
    pub fn set_untyped_region(&mut self, region: SlotRegion) {
        self.untyped = region;
    }

    /// Append an untyped descriptor and extend the untyped region by one
    /// slot. Returns the slot the capability occupies.
    pub fn push_untyped(&mut self, paddr: Word, size_bits: u8) -> BootInfoResult<CPtr> {
        let index = self.untyped.len();
        if index >= MAX_UNTYPED {
            return Err(BootInfoError::TooManyUntyped { count: index + 1 });
        }
        let slot = self.untyped.end;
        let end = slot
            .raw()
            .checked_add(1)
            .ok_or(BootInfoError::SlotOverflow(RegionKind::Untyped))?;
        self.untyped_paddr_list[index] = paddr;
        self.untyped_size_bits_list[index] = size_bits;
        self.untyped.end = CPtr::from_raw(end);
        Ok(slot)
    }

    /// Append a device region. Returns its index.
    pub fn push_device_region(
        &mut self,
        base_paddr: Word,
        frame_size_bits: Word,
        frames: SlotRegion,
    ) -> BootInfoResult<usize> {
        let index = self.num_device_regions as usize;
        if index >= MAX_DEVICE_REGIONS {
            return Err(BootInfoError::TooManyDeviceRegions {
                count: self.num_device_regions.saturating_add(1),
            });
        }
        if !frames.is_valid() {
            return Err(BootInfoError::InvalidDeviceRegion { index });
        }
        self.device_regions[index] = DeviceRegion {
            base_paddr,
            frame_size_bits,
            frames,
        };
        self.num_device_regions += 1;
        Ok(index)
    }

    /// Log the record.
    pub fn log_summary(&self) {
        log::info!(
            "boot info: node {}/{}, ipc buffer {:#x}, cnode {} bits, domain {}",
            self.node_id,
            self.num_nodes,
            self.ipc_buffer,
            self.init_thread_cnode_size_bits,
            self.init_thread_domain
        );
        for kind in RegionKind::ALL {
            let region = self.region(kind);
            log::info!("  {:<18} {:?} ({} slots)", kind.name(), region, region.len());
        }
        for (cptr, desc) in self.untyped_iter() {
            log::debug!("  untyped {} at {:#010x}, {} bits", cptr, desc.paddr, desc.size_bits);
        }
        for region in self.device_regions() {
            log::debug!(
                "  device at {:#010x}, {} bit frames {:?}",
                region.base_paddr,
                region.frame_size_bits,
                region.frames
            );
        }
    }
}

impl Default for BootInfo {
    fn default() -> Self {
        Self::new()
    }
}

// Compile-time verification of layout
const _: () = {
    assert!(size_of::<SlotRegion>() == 8);
    assert!(size_of::<DeviceRegion>() == 16);
    assert!(size_of::<BootInfo>() == BOOT_INFO_SIZE);
    assert!(BOOT_INFO_SIZE <= 4096);

    assert!(offset_of!(BootInfo, node_id) == 0);
    assert!(offset_of!(BootInfo, num_nodes) == 4);
    assert!(offset_of!(BootInfo, num_iopt_levels) == 8);
    assert!(offset_of!(BootInfo, ipc_buffer) == 12);
    assert!(offset_of!(BootInfo, empty) == 16);
    assert!(offset_of!(BootInfo, shared_frames) == 24);
    assert!(offset_of!(BootInfo, user_image_frames) == 32);
    assert!(offset_of!(BootInfo, user_image_pts) == 40);
    assert!(offset_of!(BootInfo, untyped) == 48);
    assert!(offset_of!(BootInfo, untyped_paddr_list) == 56);
    assert!(offset_of!(BootInfo, untyped_size_bits_list) == 724);
    assert!(offset_of!(BootInfo, init_thread_cnode_size_bits) == 891);
    assert!(offset_of!(BootInfo, num_device_regions) == 892);
    assert!(offset_of!(BootInfo, device_regions) == 896);
    assert!(offset_of!(BootInfo, init_thread_domain) == 4080);
};

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn region(start: Word, end: Word) -> SlotRegion {
        SlotRegion::new(CPtr::from_raw(start), CPtr::from_raw(end)).unwrap()
    }

    /// A record shaped like the one the kernel hands out: user image
    /// directly after the initial caps, one empty shared region, three
    /// untypeds and two devices.
    fn fixture() -> BootInfo {
        let mut info = BootInfo::new();
        info.num_nodes = 1;
        info.ipc_buffer = 0x0010_0000;
        info.init_thread_cnode_size_bits = 12;
        info.set_shared_frames_region(SlotRegion::empty(CPtr::from_raw(12)));
        info.set_user_image_frames_region(region(12, 20));
        info.set_user_image_pts_region(region(20, 21));
        info.set_untyped_region(SlotRegion::empty(CPtr::from_raw(21)));
        info.push_untyped(0x8000_0000, 20).unwrap();
        info.push_untyped(0x8010_0000, 20).unwrap();
        info.push_untyped(0x9000_0000, 24).unwrap();
        info.push_device_region(0x1000_0000, 12, region(24, 26)).unwrap();
        info.push_device_region(0x1001_0000, 12, region(26, 27)).unwrap();
        info.set_empty_region(region(27, 1 << 12));
        info
    }

    #[test]
    fn test_slot_region_new() {
        assert!(SlotRegion::new(CPtr::from_raw(5), CPtr::from_raw(4)).is_none());
        let empty = region(7, 7);
        assert!(empty.is_valid());
        assert!(empty.is_empty());
        assert!(!empty.contains(CPtr::from_raw(7)));
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_slot_region_iter() {
        let r = region(3, 6);
        assert_eq!(r.len(), 3);
        assert!(r.contains(CPtr::from_raw(3)));
        assert!(!r.contains(CPtr::from_raw(6)));
        let mut slots = r.iter();
        assert_eq!(slots.next(), Some(CPtr::from_raw(3)));
        assert_eq!(slots.next(), Some(CPtr::from_raw(4)));
        assert_eq!(slots.next(), Some(CPtr::from_raw(5)));
        assert_eq!(slots.next(), None);
    }

    #[test]
    fn test_fixture_regions_ordered() {
        let info = fixture();
        for kind in RegionKind::ALL {
            let r = info.region(kind);
            assert!(r.start.raw() <= r.end.raw(), "{}", kind.name());
        }
        for device in info.device_regions() {
            assert!(device.frames.start.raw() <= device.frames.end.raw());
        }
        assert!(info.shared_frames.is_empty());
        assert_eq!(info.validate(), Ok(()));
    }

    #[test]
    fn test_untyped_iter() {
        let info = fixture();
        let untypeds: [(CPtr, UntypedDesc); 3] = [
            (CPtr::from_raw(21), UntypedDesc { paddr: 0x8000_0000, size_bits: 20 }),
            (CPtr::from_raw(22), UntypedDesc { paddr: 0x8010_0000, size_bits: 20 }),
            (CPtr::from_raw(23), UntypedDesc { paddr: 0x9000_0000, size_bits: 24 }),
        ];
        assert!(info.untyped_iter().eq(untypeds.iter().copied()));
        assert_eq!(info.untyped_desc(CPtr::from_raw(23)), Some(untypeds[2].1));
        assert_eq!(info.untyped_desc(CPtr::from_raw(24)), None);
        assert_eq!(untypeds[2].1.size(), Some(1 << 24));
    }

    #[test]
    fn test_device_regions_clamped() {
        let mut info = fixture();
        assert_eq!(info.device_regions().len(), 2);
        assert_eq!(info.device_regions()[1].base_paddr, 0x1001_0000);

        info.num_device_regions = 1000;
        assert_eq!(info.device_regions().len(), MAX_DEVICE_REGIONS);
        assert_eq!(
            info.validate(),
            Err(BootInfoError::TooManyDeviceRegions { count: 1000 })
        );
    }

    #[test]
    fn test_validate_rejects_inverted_region() {
        let mut info = fixture();
        info.user_image_pts = SlotRegion {
            start: CPtr::from_raw(21),
            end: CPtr::from_raw(20),
        };
        assert_eq!(
            info.validate(),
            Err(BootInfoError::InvalidRegion(RegionKind::UserImagePts))
        );
    }

    #[test]
    fn test_validate_rejects_bad_device_region() {
        let mut info = fixture();
        info.device_regions[1].frames = SlotRegion {
            start: CPtr::from_raw(30),
            end: CPtr::from_raw(29),
        };
        assert_eq!(
            info.validate(),
            Err(BootInfoError::InvalidDeviceRegion { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_oversized_untyped() {
        let mut info = fixture();
        info.untyped = region(100, 100 + MAX_UNTYPED as Word + 1);
        assert_eq!(
            info.validate(),
            Err(BootInfoError::TooManyUntyped { count: MAX_UNTYPED + 1 })
        );
    }

    #[test]
    fn test_push_untyped_full() {
        let mut info = BootInfo::new();
        info.set_untyped_region(SlotRegion::empty(CPtr::from_raw(16)));
        for i in 0..MAX_UNTYPED {
            assert_eq!(
                info.push_untyped(i as Word, 12),
                Ok(CPtr::from_raw(16 + i as Word))
            );
        }
        assert_eq!(
            info.push_untyped(0, 12),
            Err(BootInfoError::TooManyUntyped { count: MAX_UNTYPED + 1 })
        );
        assert_eq!(info.untyped.len(), MAX_UNTYPED);
        assert_eq!(info.validate(), Ok(()));
    }

    #[test]
    fn test_trailing_padding_zeroed() {
        let mut info = fixture();
        info.init_thread_domain = 0xFF;
        let bytes = info.as_bytes();
        assert_eq!(bytes[4080], 0xFF);
        assert_eq!(&bytes[4081..], &[0, 0, 0]);
    }

    #[test]
    fn test_push_untyped_at_last_slot() {
        let mut info = BootInfo::new();
        info.set_untyped_region(SlotRegion::empty(CPtr::from_raw(Word::MAX)));
        assert_eq!(
            info.push_untyped(0x8000_0000, 12),
            Err(BootInfoError::SlotOverflow(RegionKind::Untyped))
        );
        // Nothing was written.
        assert_eq!(info.untyped, SlotRegion::empty(CPtr::from_raw(Word::MAX)));
        assert_eq!(info.untyped_paddr_list[0], 0);
        assert_eq!(info.untyped_size_bits_list[0], 0);

        info.set_untyped_region(SlotRegion::empty(CPtr::from_raw(Word::MAX - 1)));
        assert_eq!(
            info.push_untyped(0x8000_0000, 12),
            Ok(CPtr::from_raw(Word::MAX - 1))
        );
        assert_eq!(info.untyped.end, CPtr::from_raw(Word::MAX));
    }

    #[test]
    fn test_push_device_region_full() {
        let mut info = BootInfo::new();
        for i in 0..MAX_DEVICE_REGIONS {
            assert_eq!(info.push_device_region(0, 12, region(0, 0)), Ok(i));
        }
        assert!(info.push_device_region(0, 12, region(0, 0)).is_err());
        assert_eq!(info.device_regions().len(), MAX_DEVICE_REGIONS);
    }

    #[test]
    fn test_from_bytes() {
        let info = fixture();
        let view = BootInfo::from_bytes(info.as_bytes()).unwrap();
        assert_eq!(view.ipc_buffer, 0x0010_0000);
        assert_eq!(view.untyped, info.untyped);
        assert_eq!(view.device_regions(), info.device_regions());
    }

    #[test]
    fn test_from_bytes_errors() {
        #[repr(C, align(4))]
        struct Frame([u8; 4096]);

        let frame = Frame([0; 4096]);
        assert!(BootInfo::from_bytes(&frame.0).is_ok());
        assert_eq!(
            BootInfo::from_bytes(&frame.0[..100]).unwrap_err(),
            BootInfoError::TooShort { len: 100 }
        );
        assert_eq!(
            BootInfo::from_bytes(&frame.0[1..]).unwrap_err(),
            BootInfoError::Misaligned
        );
    }

    #[test]
    fn test_from_bytes_validates() {
        let mut info = fixture();
        info.empty = SlotRegion {
            start: CPtr::from_raw(9),
            end: CPtr::from_raw(1),
        };
        assert_eq!(
            BootInfo::from_bytes(info.as_bytes()).unwrap_err(),
            BootInfoError::InvalidRegion(RegionKind::Empty)
        );
    }

    #[test]
    fn test_byte_offsets() {
        let info = fixture();
        let bytes = info.as_bytes();
        assert_eq!(bytes.len(), BOOT_INFO_SIZE);
        // untyped.start
        assert_eq!(&bytes[48..52], &21u32.to_ne_bytes());
        // second device region's base address
        assert_eq!(&bytes[912..916], &0x1001_0000u32.to_ne_bytes());
        assert_eq!(bytes[891], 12);
    }

    #[test]
    fn test_error_display() {
        use std::string::ToString;

        assert_eq!(
            BootInfoError::InvalidRegion(RegionKind::Untyped).to_string(),
            "slot region end before start: untyped"
        );
        assert_eq!(
            BootInfoError::TooShort { len: 8 }.to_string(),
            "buffer too short for boot info: 8 < 4084"
        );
    }
}
