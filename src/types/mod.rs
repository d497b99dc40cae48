// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-width value types carried by the codec.

pub mod color;
pub mod decimal;
pub mod geometry;

pub use color::{Color, Color32};
pub use decimal::Decimal;
pub use geometry::{Quaternion, Rect, Vector2, Vector3, Vector4};
