use crate::constants::{CONTACT, LAZY_IMAGES, NAVIGATION, PERFORMANCE, REVEAL, SCROLL_TOP};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer};

bitflags! {
    /// Represents a set of site modules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ModuleSet: u32 {
        const NAVIGATION = 1 << 0;
        const REVEAL = 1 << 1;
        const SCROLL_TOP = 1 << 2;
        const CONTACT = 1 << 3;
        const LAZY_IMAGES = 1 << 4;
        const PERFORMANCE = 1 << 5;

        const ALL = Self::NAVIGATION.bits()
            | Self::REVEAL.bits()
            | Self::SCROLL_TOP.bits()
            | Self::CONTACT.bits()
            | Self::LAZY_IMAGES.bits()
            | Self::PERFORMANCE.bits();
    }
}

impl Default for ModuleSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<&str> for ModuleSet {
    fn from(s: &str) -> Self {
        match s {
            NAVIGATION => Self::NAVIGATION,
            REVEAL => Self::REVEAL,
            SCROLL_TOP => Self::SCROLL_TOP,
            CONTACT => Self::CONTACT,
            LAZY_IMAGES => Self::LAZY_IMAGES,
            PERFORMANCE => Self::PERFORMANCE,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for ModuleSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModuleSetRepr {
    Bits(u32),
    Name(String),
    Names(Vec<String>),
}

/// Accepts raw bits, a single module name (or `"all"`), or a list of names.
impl<'de> Deserialize<'de> for ModuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ModuleSetRepr::deserialize(deserializer)? {
            ModuleSetRepr::Bits(bits) => Self::from(bits),
            ModuleSetRepr::Name(name) => Self::from(name.as_str()),
            ModuleSetRepr::Names(names) => {
                names.iter().fold(Self::empty(), |set, name| set | Self::from(name.as_str()))
            },
        })
    }
}
