// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON conversion for codec values.
//!
//! The wire format is not self-describing, so reading JSON needs the target
//! [`TypeDescriptor`]. Value types accept either an object keyed by field name
//! or an array of fields in wire order. Non-finite floats are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"`.

use std::str::FromStr;

use serde_json::{json, Map, Number};

use crate::core::{
    CodecError, CompositeLayout, Result, ScalarType, TypeDescriptor, TypeRegistry, Value,
    ValueTypeKind,
};
use crate::types::{Color, Color32, Decimal, Quaternion, Rect, Vector2, Vector3, Vector4};

type Json = serde_json::Value;

/// Field names of a built-in value type, in wire order.
pub fn value_type_fields(kind: ValueTypeKind) -> &'static [&'static str] {
    match kind {
        ValueTypeKind::Vector2 => &["x", "y"],
        ValueTypeKind::Vector3 => &["x", "y", "z"],
        ValueTypeKind::Vector4 | ValueTypeKind::Quaternion => &["x", "y", "z", "w"],
        ValueTypeKind::Rect => &["x", "y", "width", "height"],
        ValueTypeKind::Color | ValueTypeKind::Color32 => &["r", "g", "b", "a"],
    }
}

// =============================================================================
// Value -> JSON
// =============================================================================

/// Render a value as JSON.
///
/// Composites are rendered by field name when `registry` knows their layout.
pub fn value_to_json(value: &Value, registry: &TypeRegistry) -> Json {
    match value {
        Value::Bool(v) => json!(v),
        Value::UInt8(v) => json!(v),
        Value::Int8(v) => json!(v),
        Value::Char(c) => json!(c.to_string()),
        Value::Int16(v) => json!(v),
        Value::UInt16(v) => json!(v),
        Value::Int32(v) => json!(v),
        Value::UInt32(v) => json!(v),
        Value::Int64(v) => json!(v),
        Value::UInt64(v) => json!(v),
        Value::Float32(v) => float32_to_json(*v),
        Value::Float64(v) => float_to_json(*v),
        Value::Decimal(d) => json!(d.to_string()),
        Value::String(s) => json!(s),
        Value::Vector2(v) => floats_object(ValueTypeKind::Vector2, &[v.x, v.y]),
        Value::Vector3(v) => floats_object(ValueTypeKind::Vector3, &[v.x, v.y, v.z]),
        Value::Vector4(v) => floats_object(ValueTypeKind::Vector4, &[v.x, v.y, v.z, v.w]),
        Value::Quaternion(v) => floats_object(ValueTypeKind::Quaternion, &[v.x, v.y, v.z, v.w]),
        Value::Rect(v) => floats_object(ValueTypeKind::Rect, &[v.x, v.y, v.width, v.height]),
        Value::Color(v) => floats_object(ValueTypeKind::Color, &[v.r, v.g, v.b, v.a]),
        Value::Color32(v) => json!({ "r": v.r, "g": v.g, "b": v.b, "a": v.a }),
        Value::Composite { type_name, fields } => match registry.composite(type_name) {
            Some(layout) if layout.fields().len() == fields.len() => {
                let mut obj = Map::new();
                for (field, value) in layout.fields().iter().zip(fields) {
                    obj.insert(field.name.clone(), value_to_json(value, registry));
                }
                Json::Object(obj)
            }
            _ => Json::Array(fields.iter().map(|f| value_to_json(f, registry)).collect()),
        },
        Value::Enum(e) => match e.member_name() {
            Some(name) => json!(name),
            None => raw_to_json(e.raw),
        },
        Value::Array { items, .. } | Value::List { items, .. } => {
            Json::Array(items.iter().map(|v| value_to_json(v, registry)).collect())
        }
        Value::Null => Json::Null,
    }
}

fn float_to_json(v: f64) -> Json {
    match Number::from_f64(v) {
        Some(n) => Json::Number(n),
        None if v.is_nan() => json!("NaN"),
        None if v > 0.0 => json!("inf"),
        None => json!("-inf"),
    }
}

/// Render an f32 by its shortest f32 text, so `0.1f32` stays `0.1`.
fn float32_to_json(v: f32) -> Json {
    match v.to_string().parse::<f64>() {
        Ok(widened) if v.is_finite() => float_to_json(widened),
        _ => float_to_json(f64::from(v)),
    }
}

fn floats_object(kind: ValueTypeKind, values: &[f32]) -> Json {
    let obj = value_type_fields(kind)
        .iter()
        .zip(values)
        .map(|(name, v)| (name.to_string(), float32_to_json(*v)))
        .collect::<Map<_, _>>();
    Json::Object(obj)
}

fn raw_to_json(raw: i128) -> Json {
    if let Ok(v) = i64::try_from(raw) {
        json!(v)
    } else if let Ok(v) = u64::try_from(raw) {
        json!(v)
    } else {
        json!(raw.to_string())
    }
}

// =============================================================================
// JSON -> Value
// =============================================================================

/// Build a value of type `ty` from JSON.
pub fn value_from_json(json: &Json, ty: &TypeDescriptor, registry: &TypeRegistry) -> Result<Value> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    match ty {
        TypeDescriptor::Scalar(s) => scalar_from_json(json, *s),
        TypeDescriptor::ValueType(kind) => value_type_from_json(json, *kind),
        TypeDescriptor::Composite(name) => {
            let layout = registry
                .composite(name)
                .ok_or_else(|| CodecError::unsupported(name.clone()))?;
            composite_from_json(json, layout)
        }
        TypeDescriptor::Enum(e) => {
            let raw = match json {
                Json::String(name) => e.member_value(name).ok_or_else(|| {
                    CodecError::invalid_value(e.name(), format!("no member named '{name}'"))
                })?,
                other => integer_from_json(other, e.name())?,
            };
            Ok(Value::enumeration(e, raw))
        }
        TypeDescriptor::Array(element) | TypeDescriptor::List(element) => {
            let items = json
                .as_array()
                .ok_or_else(|| mismatch(ty, json))?
                .iter()
                .map(|item| value_from_json(item, element, registry))
                .collect::<Result<Vec<_>>>()?;
            Ok(match ty {
                TypeDescriptor::Array(_) => Value::array((**element).clone(), items),
                _ => Value::list((**element).clone(), items),
            })
        }
    }
}

fn mismatch(ty: &TypeDescriptor, json: &Json) -> CodecError {
    CodecError::invalid_value(ty.to_string(), format!("cannot read {json} as {ty}"))
}

fn integer_from_json(json: &Json, type_name: &str) -> Result<i128> {
    let parsed = match json {
        Json::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        Json::String(s) => s.parse::<i128>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        CodecError::invalid_value(type_name, format!("{json} is not an integer"))
    })
}

fn float_from_json(json: &Json, type_name: &str) -> Result<f64> {
    let parsed = match json {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => match s.as_str() {
            "NaN" | "nan" => Some(f64::NAN),
            "inf" | "Infinity" => Some(f64::INFINITY),
            "-inf" | "-Infinity" => Some(f64::NEG_INFINITY),
            other => other.parse().ok(),
        },
        _ => None,
    };
    parsed.ok_or_else(|| CodecError::invalid_value(type_name, format!("{json} is not a number")))
}

fn scalar_from_json(json: &Json, ty: ScalarType) -> Result<Value> {
    let name = ty.name();
    match ty {
        ScalarType::Bool => json
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| mismatch(&ty.into(), json)),
        ScalarType::Char => {
            let s = json.as_str().ok_or_else(|| mismatch(&ty.into(), json))?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(CodecError::invalid_value(
                    name,
                    format!("expected one character, got {s:?}"),
                )),
            }
        }
        ScalarType::Float32 => Ok(Value::Float32(float_from_json(json, name)? as f32)),
        ScalarType::Float64 => Ok(Value::Float64(float_from_json(json, name)?)),
        ScalarType::Decimal => {
            let text = match json {
                Json::String(s) => s.clone(),
                Json::Number(n) => n.to_string(),
                _ => return Err(mismatch(&ty.into(), json)),
            };
            Ok(Value::Decimal(Decimal::from_str(&text)?))
        }
        ScalarType::String => json
            .as_str()
            .map(Value::from)
            .ok_or_else(|| mismatch(&ty.into(), json)),
        _ => {
            let raw = integer_from_json(json, name)?;
            Value::integer(ty, raw)
                .ok_or_else(|| CodecError::invalid_value(name, format!("{raw} is out of range")))
        }
    }
}

/// Field values in wire order, from an object or an array.
fn ordered_fields<'a>(json: &'a Json, names: &[&str], type_name: &str) -> Result<Vec<&'a Json>> {
    let fields = match json {
        Json::Array(items) if items.len() == names.len() => items.iter().collect(),
        Json::Object(obj) => names
            .iter()
            .map(|name| {
                obj.get(*name).ok_or_else(|| {
                    CodecError::invalid_value(type_name, format!("missing field '{name}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        _ => {
            return Err(CodecError::invalid_value(
                type_name,
                format!("expected {} fields, got {json}", names.len()),
            ))
        }
    };
    Ok(fields)
}

fn value_type_from_json(json: &Json, kind: ValueTypeKind) -> Result<Value> {
    let name = kind.name();
    let fields = ordered_fields(json, value_type_fields(kind), name)?;
    let floats = || {
        fields
            .iter()
            .map(|field| float_from_json(field, name).map(|v| v as f32))
            .collect::<Result<Vec<f32>>>()
    };

    Ok(match kind {
        ValueTypeKind::Color32 => {
            let mut bytes = [0u8; 4];
            for (byte, field) in bytes.iter_mut().zip(&fields) {
                let raw = integer_from_json(field, name)?;
                *byte = u8::try_from(raw).map_err(|_| {
                    CodecError::invalid_value(name, format!("{raw} is out of range"))
                })?;
            }
            let [r, g, b, a] = bytes;
            Value::Color32(Color32::new(r, g, b, a))
        }
        ValueTypeKind::Vector2 => {
            let f = floats()?;
            Value::Vector2(Vector2::new(f[0], f[1]))
        }
        ValueTypeKind::Vector3 => {
            let f = floats()?;
            Value::Vector3(Vector3::new(f[0], f[1], f[2]))
        }
        ValueTypeKind::Vector4 => {
            let f = floats()?;
            Value::Vector4(Vector4::new(f[0], f[1], f[2], f[3]))
        }
        ValueTypeKind::Quaternion => {
            let f = floats()?;
            Value::Quaternion(Quaternion::new(f[0], f[1], f[2], f[3]))
        }
        ValueTypeKind::Rect => {
            let f = floats()?;
            Value::Rect(Rect::new(f[0], f[1], f[2], f[3]))
        }
        ValueTypeKind::Color => {
            let f = floats()?;
            Value::Color(Color::new(f[0], f[1], f[2], f[3]))
        }
    })
}

fn composite_from_json(json: &Json, layout: &CompositeLayout) -> Result<Value> {
    let names: Vec<&str> = layout.fields().iter().map(|f| f.name.as_str()).collect();
    let fields = ordered_fields(json, &names, layout.name())?
        .into_iter()
        .zip(layout.fields())
        .map(|(value, field)| scalar_from_json(value, field.ty))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Composite {
        type_name: layout.name().to_string(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::EnumType;

    fn registry() -> TypeRegistry {
        let layout = CompositeLayout::new(
            "GridPos",
            [("x", ScalarType::Int16), ("y", ScalarType::Int16)],
        )
        .unwrap();
        TypeRegistry::builder()
            .with_builtins()
            .register_composite(layout)
            .unwrap()
            .build()
    }

    #[test]
    fn test_scalars_from_json() {
        let r = registry();
        let read = |j: Json, s: ScalarType| value_from_json(&j, &s.into(), &r);
        assert_eq!(read(json!(-1), ScalarType::Int32).unwrap(), Value::Int32(-1));
        assert_eq!(
            read(json!(u64::MAX), ScalarType::UInt64).unwrap(),
            Value::UInt64(u64::MAX)
        );
        assert!(read(json!(300), ScalarType::UInt8).is_err());
        assert_eq!(read(json!("x"), ScalarType::Char).unwrap(), Value::Char('x'));
        assert!(read(json!("xy"), ScalarType::Char).is_err());
        assert_eq!(read(json!(true), ScalarType::Bool).unwrap(), Value::Bool(true));
        assert_eq!(
            read(json!("-1.50"), ScalarType::Decimal).unwrap(),
            Value::Decimal(Decimal::new(-150, 2).unwrap())
        );
        let Value::Float32(nan) = read(json!("NaN"), ScalarType::Float32).unwrap() else {
            panic!("expected float32");
        };
        assert!(nan.is_nan());
    }

    #[test]
    fn test_value_types_from_json() {
        let r = registry();
        let ty = TypeDescriptor::from(ValueTypeKind::Vector3);
        let expected = Value::Vector3(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(value_from_json(&json!([1, 2, 3]), &ty, &r).unwrap(), expected);
        assert_eq!(
            value_from_json(&json!({"x": 1, "y": 2, "z": 3}), &ty, &r).unwrap(),
            expected
        );
        assert!(value_from_json(&json!([1, 2]), &ty, &r).is_err());

        let c = value_from_json(
            &json!([255, 0, 0, 255]),
            &ValueTypeKind::Color32.into(),
            &r,
        )
        .unwrap();
        assert_eq!(c, Value::Color32(Color32::new(255, 0, 0, 255)));
    }

    #[test]
    fn test_composite_json() {
        let r = registry();
        let ty = TypeDescriptor::Composite("GridPos".into());
        let value = value_from_json(&json!({"x": 3, "y": -4}), &ty, &r).unwrap();
        assert_eq!(
            value,
            Value::Composite {
                type_name: "GridPos".into(),
                fields: vec![Value::Int16(3), Value::Int16(-4)],
            }
        );
        assert_eq!(value_to_json(&value, &r), json!({"x": 3, "y": -4}));
        assert!(value_from_json(&json!({"x": 3}), &ty, &r).is_err());
    }

    #[test]
    fn test_enum_json() {
        let r = registry();
        let faction = Arc::new(
            EnumType::new("Faction", ScalarType::Int32)
                .unwrap()
                .with_member("Red", 1),
        );
        let ty = TypeDescriptor::Enum(faction.clone());
        assert_eq!(
            value_from_json(&json!("Red"), &ty, &r).unwrap(),
            Value::enumeration(&faction, 1)
        );
        assert_eq!(
            value_from_json(&json!(42), &ty, &r).unwrap(),
            Value::enumeration(&faction, 42)
        );
        assert!(value_from_json(&json!("Green"), &ty, &r).is_err());
        assert_eq!(value_to_json(&Value::enumeration(&faction, 1), &r), json!("Red"));
        assert_eq!(value_to_json(&Value::enumeration(&faction, 7), &r), json!(7));
    }

    #[test]
    fn test_sequence_json() {
        let r = registry();
        let ty = TypeDescriptor::list(TypeDescriptor::array(ScalarType::String.into()));
        let value = value_from_json(&json!([["a", "b"], []]), &ty, &r).unwrap();
        assert_eq!(value.descriptor(), Some(ty));
        assert_eq!(value_to_json(&value, &r), json!([["a", "b"], []]));
    }

    #[test]
    fn test_non_finite_floats_to_json() {
        let r = registry();
        assert_eq!(value_to_json(&Value::Float64(f64::NAN), &r), json!("NaN"));
        assert_eq!(value_to_json(&Value::Float32(f32::NEG_INFINITY), &r), json!("-inf"));
        assert_eq!(value_to_json(&Value::Float64(1.5), &r), json!(1.5));
    }

    #[test]
    fn test_float32_renders_shortest_form() {
        let r = registry();
        assert_eq!(value_to_json(&Value::Float32(0.1), &r), json!(0.1));
        assert_eq!(value_to_json(&Value::Float32(-2.7), &r), json!(-2.7));
        assert_eq!(
            value_to_json(&Value::Vector2(Vector2::new(0.1, 0.3)), &r),
            json!({"x": 0.1, "y": 0.3})
        );

        let back = value_from_json(&json!(0.1), &ScalarType::Float32.into(), &r).unwrap();
        assert_eq!(back, Value::Float32(0.1));
    }
}
