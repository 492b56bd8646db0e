#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
bitflags::bitflags! {
    ///options for begin_plot
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PlotFlags: u32 {
        const NO_TITLE = 1 << 0;
        const NO_LEGEND = 1 << 1;
        const NO_MOUSE_TEXT = 1 << 2;
        const NO_CLIP = 1 << 3;
        const NO_MENUS = 1 << 4;
        const CANVAS_ONLY = Self::NO_TITLE.bits() | Self::NO_LEGEND.bits() | Self::NO_MOUSE_TEXT.bits();
    }
}
bitflags::bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AxisFlags: u32 {
        const NO_LABEL = 1 << 0;
        const NO_GRID_LINES = 1 << 1;
        const NO_TICK_MARKS = 1 << 2;
        const NO_TICK_LABELS = 1 << 3;
        const LOCK_MIN = 1 << 4;
        const LOCK_MAX = 1 << 5;
        const AUTO_FIT = 1 << 6;
        const INVERT = 1 << 7;
        const PAN_STRETCH = 1 << 8;
        const LOCK = Self::LOCK_MIN.bits() | Self::LOCK_MAX.bits();
        const NO_DECORATIONS = Self::NO_LABEL.bits() | Self::NO_GRID_LINES.bits() | Self::NO_TICK_LABELS.bits();
    }
}
bitflags::bitflags! {
    ///flags shared by every plot item
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u32 {
        const NO_LEGEND = 1 << 0;
        const NO_FIT = 1 << 1;
    }
}
bitflags::bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ScatterFlags: u32 {
        const NO_LEGEND = ItemFlags::NO_LEGEND.bits();
        const NO_FIT = ItemFlags::NO_FIT.bits();
    }
}
bitflags::bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct LineFlags: u32 {
        const NO_LEGEND = ItemFlags::NO_LEGEND.bits();
        const NO_FIT = ItemFlags::NO_FIT.bits();
        ///a segment from every two consecutive points
        const SEGMENTS = 1 << 10;
        ///connect the last point back to the first
        const LOOP = 1 << 11;
        ///drop segments touching a nan instead of breaking the line
        const SKIP_NAN = 1 << 12;
    }
}
bitflags::bitflags! {
    ///flags for filled series: triangles, quads, surfaces and meshes
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FillFlags: u32 {
        const NO_LEGEND = ItemFlags::NO_LEGEND.bits();
        const NO_FIT = ItemFlags::NO_FIT.bits();
        const NO_LINES = 1 << 10;
        const NO_FILL = 1 << 11;
        const NO_MARKERS = 1 << 12;
    }
}
pub type TriangleFlags = FillFlags;
pub type QuadFlags = FillFlags;
pub type SurfaceFlags = FillFlags;
pub type MeshFlags = FillFlags;
bitflags::bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ImageFlags: u32 {
        const NO_LEGEND = ItemFlags::NO_LEGEND.bits();
        const NO_FIT = ItemFlags::NO_FIT.bits();
    }
}
bitflags::bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct LegendFlags: u32 {
        ///entries do not toggle item visibility
        const NO_BUTTONS = 1 << 0;
        ///hovering an entry does not highlight the item
        const NO_HIGHLIGHT_ITEM = 1 << 1;
        const HORIZONTAL = 1 << 2;
    }
}
bitflags::bitflags! {
    ///position inside a rectangle, an empty set is the center
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Location: u32 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const WEST = 1 << 2;
        const EAST = 1 << 3;
        const NORTH_WEST = Self::NORTH.bits() | Self::WEST.bits();
        const NORTH_EAST = Self::NORTH.bits() | Self::EAST.bits();
        const SOUTH_WEST = Self::SOUTH.bits() | Self::WEST.bits();
        const SOUTH_EAST = Self::SOUTH.bits() | Self::EAST.bits();
    }
}
impl Location {
    pub const CENTER: Location = Location::empty();
    ///the eight outer locations in menu order
    pub const ALL: [Location; 8] = [
        Location::NORTH_WEST,
        Location::NORTH,
        Location::NORTH_EAST,
        Location::WEST,
        Location::EAST,
        Location::SOUTH_WEST,
        Location::SOUTH,
        Location::SOUTH_EAST,
    ];
}
macro_rules! item_flags {
    ($($t:ty),*) => {
        $(impl From<$t> for ItemFlags {
            fn from(value: $t) -> Self {
                ItemFlags::from_bits_truncate(value.bits())
            }
        })*
    };
}
item_flags!(ScatterFlags, LineFlags, FillFlags, ImageFlags);
