use crate::error::{Error, Result};
use crate::types::col32;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
///indices of the built in colormaps
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Colormap {
    ///seaborn deep
    #[default]
    Deep = 0,
    ///matplotlib Set1
    Dark = 1,
    ///matplotlib Pastel1
    Pastel = 2,
    Paired = 3,
    Viridis = 4,
    Plasma = 5,
    Hot = 6,
    Cool = 7,
    Pink = 8,
    Jet = 9,
    Twilight = 10,
    RdBu = 11,
    BrBG = 12,
    PiYG = 13,
    Spectral = 14,
    ///white to black
    Greys = 15,
}
impl From<Colormap> for usize {
    fn from(value: Colormap) -> Self {
        value as usize
    }
}
const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    col32(r, g, b, 255)
}
const DEEP: [u32; 10] = [
    4289753676, 4283598045, 4285048917, 4283584196, 4289950337, 4284512403, 4291005402,
    4287401100, 4285839820, 4291671396,
];
const DARK: [u32; 9] = [
    4280031972, 4290281015, 4283084621, 4288892568, 4278222847, 4281597951, 4280833702,
    4290740727, 4288256409,
];
const PASTEL: [u32; 9] = [
    4289639675, 4293119411, 4291161036, 4293184478, 4289124862, 4291624959, 4290631909,
    4293712637, 4294111986,
];
const PAIRED: [u32; 12] = [
    4293119554, 4290017311, 4287291314, 4281114675, 4288256763, 4280031971, 4285513725,
    4278222847, 4292260554, 4288298346, 4288282623, 4280834481,
];
const VIRIDIS: [u32; 11] = [
    4283695428, 4285867080, 4287054913, 4287455029, 4287526954, 4287402273, 4286883874,
    4285579076, 4283552122, 4280737725, 4280674301,
];
const PLASMA: [u32; 11] = [
    4287039501, 4288480321, 4289200234, 4288941455, 4287638193, 4286072780, 4284638433,
    4283139314, 4281771772, 4280667900, 4280416752,
];
const HOT: [u32; 11] = [
    4278190144, 4278190208, 4278190271, 4278190335, 4278206719, 4278223103, 4278239231,
    4278255615, 4283826175, 4289396735, 4294967295,
];
const COOL: [u32; 11] = [
    4294967040, 4294960666, 4294954035, 4294947661, 4294941030, 4294934656, 4294928025,
    4294921651, 4294915020, 4294908646, 4294902015,
];
const PINK: [u32; 11] = [
    4278190154, 4282532475, 4284308894, 4285690554, 4286879686, 4287870160, 4288794330,
    4289651940, 4291685869, 4293392118, 4294967295,
];
const JET: [u32; 11] = [
    4289331200, 4294901760, 4294923520, 4294945280, 4294967040, 4289396565, 4283826090,
    4278255615, 4278233855, 4278212095, 4278190335,
];
const TWILIGHT: [u32; 11] = [
    rgb(226, 217, 226),
    rgb(166, 191, 202),
    rgb(109, 144, 192),
    rgb(95, 88, 176),
    rgb(83, 30, 124),
    rgb(47, 20, 54),
    rgb(100, 25, 75),
    rgb(159, 60, 80),
    rgb(192, 117, 94),
    rgb(208, 179, 158),
    rgb(226, 217, 226),
];
const RDBU: [u32; 11] = [
    rgb(103, 0, 31),
    rgb(178, 24, 43),
    rgb(214, 96, 77),
    rgb(244, 165, 130),
    rgb(253, 219, 199),
    rgb(247, 247, 247),
    rgb(209, 229, 240),
    rgb(146, 197, 222),
    rgb(67, 147, 195),
    rgb(33, 102, 172),
    rgb(5, 48, 97),
];
const BRBG: [u32; 11] = [
    rgb(84, 48, 5),
    rgb(140, 81, 10),
    rgb(191, 129, 45),
    rgb(223, 194, 125),
    rgb(246, 232, 195),
    rgb(245, 245, 245),
    rgb(199, 234, 229),
    rgb(128, 205, 193),
    rgb(53, 151, 143),
    rgb(1, 102, 94),
    rgb(0, 60, 48),
];
const PIYG: [u32; 11] = [
    rgb(142, 1, 82),
    rgb(197, 27, 125),
    rgb(222, 119, 174),
    rgb(241, 182, 218),
    rgb(253, 224, 239),
    rgb(247, 247, 247),
    rgb(230, 245, 208),
    rgb(184, 225, 134),
    rgb(127, 188, 65),
    rgb(77, 146, 33),
    rgb(39, 100, 25),
];
const SPECTRAL: [u32; 11] = [
    rgb(158, 1, 66),
    rgb(213, 62, 79),
    rgb(244, 109, 67),
    rgb(253, 174, 97),
    rgb(254, 224, 139),
    rgb(255, 255, 191),
    rgb(230, 245, 152),
    rgb(171, 221, 164),
    rgb(102, 194, 165),
    rgb(50, 136, 189),
    rgb(94, 79, 162),
];
const GREYS: [u32; 2] = [0xFFFFFFFF, 0xFF000000];
///mix packed colors a and b by s in [0, 256]
pub(crate) fn mix_u32(a: u32, b: u32, s: u32) -> u32 {
    let af = 256 - s;
    let bf = s;
    let al = a & 0x00ff00ff;
    let ah = (a & 0xff00ff00) >> 8;
    let bl = b & 0x00ff00ff;
    let bh = (b & 0xff00ff00) >> 8;
    let ml = al.wrapping_mul(af).wrapping_add(bl.wrapping_mul(bf));
    let mh = ah.wrapping_mul(af).wrapping_add(bh.wrapping_mul(bf));
    (mh & 0xff00ff00) | ((ml & 0xff00ff00) >> 8)
}
#[derive(Debug, Clone)]
struct ColormapData {
    name: String,
    keys: Vec<u32>,
    qualitative: bool,
    table: Vec<u32>,
}
impl ColormapData {
    fn build_table(&mut self) {
        self.table.clear();
        if self.qualitative {
            self.table.extend_from_slice(&self.keys);
        } else {
            self.table.reserve(255 * (self.keys.len() - 1) + 1);
            for w in self.keys.windows(2) {
                self.table.extend((0..255).map(|s| mix_u32(w[0], w[1], s)));
            }
            self.table.extend(self.keys.last());
        }
    }
}
///named palettes, continuous ones expanded into lookup tables
#[derive(Debug, Clone)]
pub struct Colormaps {
    maps: Vec<ColormapData>,
    by_name: HashMap<String, usize>,
}
impl Default for Colormaps {
    fn default() -> Self {
        let mut c = Self::empty();
        let builtin: [(&str, &[u32], bool); 16] = [
            ("Deep", &DEEP, true),
            ("Dark", &DARK, true),
            ("Pastel", &PASTEL, true),
            ("Paired", &PAIRED, true),
            ("Viridis", &VIRIDIS, false),
            ("Plasma", &PLASMA, false),
            ("Hot", &HOT, false),
            ("Cool", &COOL, false),
            ("Pink", &PINK, false),
            ("Jet", &JET, false),
            ("Twilight", &TWILIGHT, false),
            ("RdBu", &RDBU, false),
            ("BrBG", &BRBG, false),
            ("PiYG", &PIYG, false),
            ("Spectral", &SPECTRAL, false),
            ("Greys", &GREYS, false),
        ];
        for (name, keys, qual) in builtin {
            c.push(name, keys, qual);
        }
        c
    }
}
impl Colormaps {
    ///a store without any colormap
    pub fn empty() -> Self {
        Self {
            maps: Vec::new(),
            by_name: HashMap::new(),
        }
    }
    fn push(&mut self, name: &str, keys: &[u32], qualitative: bool) -> usize {
        let idx = self.maps.len();
        let mut data = ColormapData {
            name: name.to_string(),
            keys: keys.to_vec(),
            qualitative,
            table: Vec::new(),
        };
        data.build_table();
        self.maps.push(data);
        self.by_name.insert(name.to_string(), idx);
        idx
    }
    ///registers a colormap, returns its index
    pub fn append(&mut self, name: &str, keys: &[u32], qualitative: bool) -> Result<usize> {
        if keys.len() < 2 {
            return Err(Error::ColormapTooSmall(keys.len()));
        }
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateColormap(name.to_string()));
        }
        let idx = self.push(name, keys, qualitative);
        log::debug!("registered colormap {name:?} at {idx} with {} keys", keys.len());
        Ok(idx)
    }
    pub fn count(&self) -> usize {
        self.maps.len()
    }
    pub fn contains(&self, cmap: usize) -> bool {
        cmap < self.maps.len()
    }
    pub fn name(&self, cmap: usize) -> Option<&str> {
        self.maps.get(cmap).map(|m| m.name.as_str())
    }
    pub fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
    pub fn is_qualitative(&self, cmap: usize) -> bool {
        self.maps[cmap].qualitative
    }
    pub fn keys(&self, cmap: usize) -> &[u32] {
        &self.maps[cmap].keys
    }
    pub fn key_count(&self, cmap: usize) -> usize {
        self.maps[cmap].keys.len()
    }
    pub fn key_color(&self, cmap: usize, idx: usize) -> u32 {
        self.maps[cmap].keys[idx]
    }
    ///replaces one key and rebuilds the lookup table
    pub fn set_key_color(&mut self, cmap: usize, idx: usize, value: u32) {
        let map = &mut self.maps[cmap];
        map.keys[idx] = value;
        map.build_table();
    }
    pub fn table(&self, cmap: usize) -> &[u32] {
        &self.maps[cmap].table
    }
    ///nearest table entry at t in [0, 1]
    pub fn lerp_table(&self, cmap: usize, t: f32) -> u32 {
        let map = &self.maps[cmap];
        let size = map.table.len();
        let idx = if map.qualitative {
            ((size as f32 * t) as isize).clamp(0, size as isize - 1) as usize
        } else {
            (((size - 1) as f32 * t + 0.5) as isize).clamp(0, size as isize - 1) as usize
        };
        map.table[idx]
    }
}
