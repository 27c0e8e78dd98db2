use super::constants::*;
use std::fmt;

/// The kind named by the low nibble of a tag byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    DictionaryStart,
    DictionaryEnd,
    ArrayStart,
    ArrayEnd,
    String,
    Null,
    Bit,
    Boolean,
    Int32,
    Float,
    Double,
    Int64,
    Int16,
    Int8,
}

impl Tag {
    /// Looks up the tag for a low nibble, returning `None` for the reserved values 6 and
    /// 15.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::encoding::Tag;
    ///
    /// assert_eq!(Tag::from_nibble(0x0c), Some(Tag::Int64));
    /// assert_eq!(Tag::from_nibble(0x06), None);
    /// ```
    pub fn from_nibble(nibble: u8) -> Option<Tag> {
        use Tag::*;
        match nibble & MASK_TAG {
            DICTIONARY_START => Some(DictionaryStart),
            DICTIONARY_END => Some(DictionaryEnd),
            ARRAY_START => Some(ArrayStart),
            ARRAY_END => Some(ArrayEnd),
            STRING => Some(String),
            NULL => Some(Null),
            BIT => Some(Bit),
            BOOLEAN => Some(Boolean),
            INT_32 => Some(Int32),
            FLOAT => Some(Float),
            DOUBLE => Some(Double),
            INT_64 => Some(Int64),
            INT_16 => Some(Int16),
            INT_8 => Some(Int8),
            _ => None,
        }
    }

    /// The low nibble written for this tag.
    pub fn nibble(self) -> u8 {
        use Tag::*;
        match self {
            DictionaryStart => DICTIONARY_START,
            DictionaryEnd => DICTIONARY_END,
            ArrayStart => ARRAY_START,
            ArrayEnd => ARRAY_END,
            String => STRING,
            Null => NULL,
            Bit => BIT,
            Boolean => BOOLEAN,
            Int32 => INT_32,
            Float => FLOAT,
            Double => DOUBLE,
            Int64 => INT_64,
            Int16 => INT_16,
            Int8 => INT_8,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Tag::*;
        let name = match self {
            DictionaryStart => "dictionary start",
            DictionaryEnd => "dictionary end",
            ArrayStart => "array start",
            ArrayEnd => "array end",
            String => "string",
            Null => "null",
            Bit => "bit",
            Boolean => "boolean",
            Int32 => "int32",
            Float => "float",
            Double => "double",
            Int64 => "int64",
            Int16 => "int16",
            Int8 => "int8",
        };
        f.write_str(name)
    }
}

/// The kinds of value that need a terminator when no inline length is used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Composite {
    String,
    Array,
    Dictionary,
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Composite::String => f.write_str("string"),
            Composite::Array => f.write_str("array"),
            Composite::Dictionary => f.write_str("dictionary"),
        }
    }
}
