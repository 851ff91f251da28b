use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// Largest type id a [`TypedIndex`] can hold.
pub const MAX_TYPE_ID: usize = (1 << 7) - 1;
/// Largest index a [`TypedIndex`] can hold.
pub const MAX_INDEX: usize = (1 << 24) - 1;

const EXISTS_BIT: u32 = 1 << 31;
const TYPE_MASK: u32 = 0x7F00_0000;
const INDEX_MASK: u32 = 0x00FF_FFFF;

/// Represents an index with an associated type packed into a single integer.
///
/// From most to least significant bit: 1 bit marking the index as a real reference,
/// 7 bits of type id, 24 bits of index. The default value is all zeroes and refers to nothing.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypedIndex {
    packed: u32,
}

impl TypedIndex {
    /// Creates a new TypedIndex.
    ///
    /// # Panics
    /// If `type_id > 127` or `index >= 2^24`; the fields are never silently truncated.
    #[inline(always)]
    pub fn new(type_id: usize, index: usize) -> Self {
        assert!(
            type_id <= MAX_TYPE_ID,
            "Do you really have that many type indices, or is the index corrupt? Type id: {type_id}"
        );
        assert!(
            index <= MAX_INDEX,
            "Do you really have that many instances, or is the index corrupt? Index: {index}"
        );
        // The set top bit marks the index as explicitly constructed, so it is a 'real' reference.
        // A default TypedIndex has a 0 there and stands for an empty reference.
        Self {
            packed: ((type_id as u32) << 24) | (index as u32) | EXISTS_BIT,
        }
    }

    /// Creates a new TypedIndex, reporting out of range fields as an error.
    pub fn try_new(type_id: usize, index: usize) -> Result<Self, ShapeError> {
        if type_id > MAX_TYPE_ID {
            return Err(ShapeError::TypeIdOutOfRange { type_id });
        }
        if index > MAX_INDEX {
            return Err(ShapeError::IndexOutOfRange { index });
        }
        Ok(Self::new(type_id, index))
    }

    /// Reinterprets a packed value, e.g. one read back from a saved scene.
    #[inline(always)]
    pub const fn from_packed(packed: u32) -> Self {
        Self { packed }
    }

    /// Bit packed representation of the typed index.
    #[inline(always)]
    pub const fn packed(&self) -> u32 {
        self.packed
    }

    /// Gets the type index of the object.
    #[inline(always)]
    pub const fn type_id(&self) -> usize {
        ((self.packed & TYPE_MASK) >> 24) as usize
    }

    /// Gets the index of the object.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        (self.packed & INDEX_MASK) as usize
    }

    /// Gets whether this index actually refers to anything.
    /// The type id and index should only be used if this is true.
    #[inline(always)]
    pub const fn exists(&self) -> bool {
        self.packed & EXISTS_BIT != 0
    }
}

impl fmt::Display for TypedIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}, {}>", self.type_id(), self.index())
    }
}
