//! Little-endian NBT codec (the on-disk layout).
//!
//! Every integer, float and length prefix is little-endian; string lengths
//! are `u16`, array and list lengths are `i32`. Compound entries are
//! written in key order so equal values encode to equal bytes.

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::tag::{NbtCompound, NbtRoot, NbtTag, TagType};

/// Maximum compound/list nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 512;

// -----------------------------------------------------------------------
// Decoding
// -----------------------------------------------------------------------

struct Decoder<'a, B: Buf> {
    buf: &'a mut B,
}

impl<B: Buf> Decoder<'_, B> {
    fn need(&self, n: usize) -> Result<(), NbtError> {
        if self.buf.remaining() < n {
            Err(NbtError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    fn u8(&mut self) -> Result<u8, NbtError> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    fn i32(&mut self) -> Result<i32, NbtError> {
        self.need(4)?;
        Ok(self.buf.get_i32_le())
    }

    fn len(&mut self) -> Result<usize, NbtError> {
        let len = self.i32()?;
        usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))
    }

    fn string(&mut self) -> Result<String, NbtError> {
        self.need(2)?;
        let len = self.buf.get_u16_le() as usize;
        self.need(len)?;
        let raw = self.buf.copy_to_bytes(len);
        String::from_utf8(raw.to_vec()).map_err(|_| NbtError::InvalidUtf8)
    }

    /// Reads `len` fixed-width elements, checking the remaining size up front
    /// so a bogus length cannot trigger a huge allocation.
    fn array<T>(
        &mut self,
        width: usize,
        mut read: impl FnMut(&mut B) -> T,
    ) -> Result<Vec<T>, NbtError> {
        let len = self.len()?;
        self.need(len.saturating_mul(width))?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(read(&mut *self.buf));
        }
        Ok(out)
    }

    fn tag_type(&mut self) -> Result<TagType, NbtError> {
        let id = self.u8()?;
        TagType::from_id(id).ok_or(NbtError::UnknownTagType(id))
    }

    fn payload(&mut self, ty: TagType, depth: usize) -> Result<NbtTag, NbtError> {
        if depth > MAX_DEPTH {
            return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
        }
        let tag = match ty {
            TagType::End => return Err(NbtError::UnknownTagType(0)),
            TagType::Byte => NbtTag::Byte(self.u8()? as i8),
            TagType::Short => {
                self.need(2)?;
                NbtTag::Short(self.buf.get_i16_le())
            }
            TagType::Int => NbtTag::Int(self.i32()?),
            TagType::Long => {
                self.need(8)?;
                NbtTag::Long(self.buf.get_i64_le())
            }
            TagType::Float => {
                self.need(4)?;
                NbtTag::Float(self.buf.get_f32_le())
            }
            TagType::Double => {
                self.need(8)?;
                NbtTag::Double(self.buf.get_f64_le())
            }
            TagType::ByteArray => NbtTag::ByteArray(self.array(1, |b| b.get_i8())?),
            TagType::IntArray => NbtTag::IntArray(self.array(4, |b| b.get_i32_le())?),
            TagType::LongArray => NbtTag::LongArray(self.array(8, |b| b.get_i64_le())?),
            TagType::String => NbtTag::String(self.string()?),
            TagType::List => {
                let elem = self.u8()?;
                let len = self.len()?;
                if len == 0 {
                    NbtTag::List(Vec::new())
                } else {
                    let elem = TagType::from_id(elem).ok_or(NbtError::UnknownTagType(elem))?;
                    let mut list = Vec::with_capacity(len.min(self.buf.remaining()));
                    for _ in 0..len {
                        list.push(self.payload(elem, depth + 1)?);
                    }
                    NbtTag::List(list)
                }
            }
            TagType::Compound => NbtTag::Compound(self.compound(depth + 1)?),
        };
        Ok(tag)
    }

    fn compound(&mut self, depth: usize) -> Result<NbtCompound, NbtError> {
        if depth > MAX_DEPTH {
            return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
        }
        let mut map = NbtCompound::new();
        loop {
            let ty = self.tag_type()?;
            if ty == TagType::End {
                return Ok(map);
            }
            let name = self.string()?;
            let tag = self.payload(ty, depth)?;
            map.insert(name, tag);
        }
    }
}

/// Decode one named root compound, leaving any trailing bytes in `buf`.
pub fn read_nbt_le(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    let mut de = Decoder { buf };
    let id = de.u8()?;
    if id != TagType::Compound.id() {
        return Err(NbtError::ExpectedCompound { got: id });
    }
    let name = de.string()?;
    let compound = de.compound(0)?;
    Ok(NbtRoot { name, compound })
}

// -----------------------------------------------------------------------
// Encoding
// -----------------------------------------------------------------------

/// Encode `root` as a named root compound.
pub fn write_nbt_le(buf: &mut impl BufMut, root: &NbtRoot) {
    buf.put_u8(TagType::Compound.id());
    put_string(buf, &root.name);
    put_compound(buf, &root.compound);
}

fn put_string(buf: &mut impl BufMut, s: &str) {
    // Strings longer than u16::MAX are truncated at a char boundary.
    let mut end = s.len().min(u16::MAX as usize);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    buf.put_u16_le(end as u16);
    buf.put_slice(&s.as_bytes()[..end]);
}

/// Length prefix for arrays and lists. Anything past `i32::MAX` elements
/// is dropped; callers write only the first `len` elements.
fn put_len(buf: &mut impl BufMut, len: usize) -> usize {
    let len = len.min(i32::MAX as usize);
    buf.put_i32_le(len as i32);
    len
}

fn put_compound(buf: &mut impl BufMut, map: &NbtCompound) {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (name, tag) in entries {
        buf.put_u8(tag.tag_type().id());
        put_string(buf, name);
        put_payload(buf, tag);
    }
    buf.put_u8(TagType::End.id());
}

fn put_payload(buf: &mut impl BufMut, tag: &NbtTag) {
    match tag {
        NbtTag::Byte(v) => buf.put_i8(*v),
        NbtTag::Short(v) => buf.put_i16_le(*v),
        NbtTag::Int(v) => buf.put_i32_le(*v),
        NbtTag::Long(v) => buf.put_i64_le(*v),
        NbtTag::Float(v) => buf.put_f32_le(*v),
        NbtTag::Double(v) => buf.put_f64_le(*v),
        NbtTag::String(s) => put_string(buf, s),
        NbtTag::ByteArray(arr) => {
            let len = put_len(buf, arr.len());
            arr[..len].iter().for_each(|&v| buf.put_i8(v));
        }
        NbtTag::IntArray(arr) => {
            let len = put_len(buf, arr.len());
            arr[..len].iter().for_each(|&v| buf.put_i32_le(v));
        }
        NbtTag::LongArray(arr) => {
            let len = put_len(buf, arr.len());
            arr[..len].iter().for_each(|&v| buf.put_i64_le(v));
        }
        NbtTag::List(list) => {
            let elem = list.first().map_or(TagType::End, NbtTag::tag_type);
            buf.put_u8(elem.id());
            let len = put_len(buf, list.len());
            for item in &list[..len] {
                put_payload(buf, item);
            }
        }
        NbtTag::Compound(map) => put_compound(buf, map),
    }
}
