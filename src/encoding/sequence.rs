// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequence codec for arrays and lists.
//!
//! # Frame layout
//!
//! ```text
//! +-------------+--------+----------------------------------------+
//! | count (i32) | stride | elements                               |
//! | 4 bytes LE  | 1 byte |                                        |
//! +-------------+--------+----------------------------------------+
//!
//! stride = N > 0   each element is exactly N raw bytes
//! stride = 0       each element is [u16 LE length][length bytes]
//! ```
//!
//! The stride comes from the element type's registered fixed length, never
//! from the items. Arrays and lists share the framing.

use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use tracing::trace;

use super::codec::GameCodec;
use super::cursor::FrameCursor;
use crate::core::{CodecError, Result, TypeDescriptor, Value};

/// Size of the count and stride header.
pub const HEADER_LEN: usize = 5;

/// Largest element encoding the variable-length path can carry.
pub const MAX_ELEMENT_LEN: usize = u16::MAX as usize;

/// Width of the variable-length element prefix.
const PREFIX_LEN: usize = 2;

/// Count and stride at the head of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameHeader {
    pub count: i32,
    pub stride: u8,
}

impl FrameHeader {
    /// Check if elements are raw fixed-width spans.
    pub fn is_fixed(&self) -> bool {
        self.stride > 0
    }

    /// Append the header.
    pub fn write(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; HEADER_LEN];
        LittleEndian::write_i32(&mut buf[..4], self.count);
        buf[4] = self.stride;
        out.extend_from_slice(&buf);
    }

    /// Read the header from the cursor.
    pub fn read(cursor: &mut FrameCursor<'_>) -> Result<Self> {
        let count = cursor.read_i32()?;
        let stride = cursor.read_u8()?;
        if count < 0 {
            return Err(CodecError::malformed(0, format!("negative element count {count}")));
        }
        Ok(Self { count, stride })
    }
}

/// Write a frame, encoding each item with `encode`.
///
/// On error the output buffer is restored to its original length.
pub fn write_frame<T, F>(
    out: &mut Vec<u8>,
    element_name: &str,
    stride: u8,
    items: &[T],
    mut encode: F,
) -> Result<()>
where
    F: FnMut(&T, &mut Vec<u8>) -> Result<()>,
{
    let count = i32::try_from(items.len()).map_err(|_| {
        CodecError::invalid_value(
            element_name,
            format!("{} elements exceed the i32 count field", items.len()),
        )
    })?;

    let start = out.len();
    let header = FrameHeader { count, stride };
    trace!(element = element_name, count, stride, "writing sequence frame");
    header.write(out);
    out.reserve(items.len() * usize::from(stride.max(PREFIX_LEN as u8)));

    for (index, item) in items.iter().enumerate() {
        let result = if header.is_fixed() {
            write_fixed(out, element_name, stride, index, item, &mut encode)
        } else {
            write_prefixed(out, element_name, index, item, &mut encode)
        };
        if let Err(e) = result {
            out.truncate(start);
            return Err(e);
        }
    }
    Ok(())
}

fn write_fixed<T, F>(
    out: &mut Vec<u8>,
    element_name: &str,
    stride: u8,
    index: usize,
    item: &T,
    encode: &mut F,
) -> Result<()>
where
    F: FnMut(&T, &mut Vec<u8>) -> Result<()>,
{
    let element_start = out.len();
    encode(item, out)?;
    let written = out.len() - element_start;
    if written != usize::from(stride) {
        return Err(CodecError::invalid_value(
            element_name,
            format!("element {index} encoded to {written} bytes, stride is {stride}"),
        ));
    }
    Ok(())
}

fn write_prefixed<T, F>(
    out: &mut Vec<u8>,
    element_name: &str,
    index: usize,
    item: &T,
    encode: &mut F,
) -> Result<()>
where
    F: FnMut(&T, &mut Vec<u8>) -> Result<()>,
{
    let prefix_at = out.len();
    out.extend_from_slice(&[0u8; PREFIX_LEN]);
    encode(item, out)?;
    let len = out.len() - prefix_at - PREFIX_LEN;
    let len = u16::try_from(len).map_err(|_| {
        CodecError::invalid_value(
            element_name,
            format!("element {index} encoded to {len} bytes, limit is {MAX_ELEMENT_LEN}"),
        )
    })?;
    LittleEndian::write_u16(&mut out[prefix_at..prefix_at + PREFIX_LEN], len);
    Ok(())
}

/// Read a frame, decoding each element span with `decode`.
///
/// An empty buffer yields no elements. The frame's stride must equal
/// `expected_stride`. Bytes after the last element are ignored.
pub fn read_frame<T, F>(
    data: &[u8],
    element_name: &str,
    expected_stride: u8,
    mut decode: F,
) -> Result<Vec<T>>
where
    F: FnMut(&[u8]) -> Result<T>,
{
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut cursor = FrameCursor::new(data);
    let header = FrameHeader::read(&mut cursor)?;
    trace!(
        element = element_name,
        count = header.count,
        stride = header.stride,
        "reading sequence frame"
    );

    if header.stride != expected_stride {
        return Err(CodecError::malformed(
            4,
            format!(
                "stride {} does not match element type {element_name} (expected {expected_stride})",
                header.stride
            ),
        ));
    }

    let count = header.count as usize;
    let min_element = usize::from(header.stride.max(PREFIX_LEN as u8));
    let mut items = Vec::with_capacity(count.min(cursor.remaining() / min_element));

    for _ in 0..count {
        let span_len = if header.is_fixed() {
            usize::from(header.stride)
        } else {
            usize::from(cursor.read_u16()?)
        };
        let at = cursor.position();
        let span = cursor.read_bytes(span_len)?;
        items.push(decode(span).map_err(|e| e.at_offset(at))?);
    }
    Ok(items)
}

/// Element boundaries of a frame, found without knowing the element type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameLayout {
    pub header: FrameHeader,
    /// Byte range of each element's encoding (prefixes excluded)
    pub elements: Vec<Range<usize>>,
    /// Bytes after the last element
    pub trailing: usize,
}

/// Walk a frame and report its element spans.
pub fn inspect_frame(data: &[u8]) -> Result<FrameLayout> {
    let header = if data.is_empty() {
        FrameHeader { count: 0, stride: 0 }
    } else {
        FrameHeader::read(&mut FrameCursor::new(data))?
    };
    let mut cursor = FrameCursor::new(data);
    cursor.skip(HEADER_LEN.min(data.len()))?;

    let mut elements = Vec::new();
    for _ in 0..header.count {
        let len = if header.is_fixed() {
            usize::from(header.stride)
        } else {
            usize::from(cursor.read_u16()?)
        };
        let start = cursor.position();
        cursor.skip(len)?;
        elements.push(start..start + len);
    }

    Ok(FrameLayout {
        header,
        elements,
        trailing: cursor.remaining(),
    })
}

/// Encode dynamic items as a frame of `element`.
pub fn encode_sequence(
    codec: &GameCodec,
    element: &TypeDescriptor,
    items: &[Value],
    out: &mut Vec<u8>,
) -> Result<()> {
    let stride = codec.stride_of(element)?;
    let element_name = element.to_string();

    write_frame(out, &element_name, stride, items, |item, out| {
        match item.descriptor() {
            Some(ty) if ty == *element => codec.serialize_into(item, out),
            // Null is a zero-length element on the variable path
            None if stride == 0 => Ok(()),
            None => Err(CodecError::invalid_value(
                &element_name,
                "null element in a fixed-stride sequence",
            )),
            Some(ty) => Err(CodecError::invalid_value(
                &element_name,
                format!("sequence item has type {ty}"),
            )),
        }
    })
}

/// Decode a frame of `element` into dynamic items.
pub fn decode_sequence(
    codec: &GameCodec,
    element: &TypeDescriptor,
    data: &[u8],
) -> Result<Vec<Value>> {
    let stride = codec.stride_of(element)?;
    read_frame(data, &element.to_string(), stride, |span| {
        codec.deserialize(span, element)
    })
}
