// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema file and type expression tests.

use std::fs;
use std::path::PathBuf;

use gamewire::encoding::json::{value_from_json, value_to_json};
use gamewire::{CodecError, SchemaConfig, TypeDescriptor, Value};
use serde_json::json;

const GAME_SCHEMA: &str = r#"
[[composite]]
name = "GridPos"
fields = [["x", "int16"], ["y", "int16"]]

[[composite]]
name = "Stats"
fields = [["hp", "uint16"], ["speed", "float"], ["alive", "bool"]]

[[enum]]
name = "Faction"
underlying = "int32"
members = { Neutral = 0, Red = 1, Blue = 2 }

[[enum]]
name = "Tier"
underlying = "uint8"
members = { Bronze = 1, Silver = 2, Gold = 3 }
"#;

/// Cleanup guard for test temporary files
struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn temp_schema(contents: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let path = std::env::temp_dir().join(format!(
        "gamewire_schema_{}_{}.toml",
        std::process::id(),
        random
    ));
    fs::write(&path, contents).unwrap();
    (path.clone(), CleanupGuard(path))
}

#[test]
fn test_load_from_path() {
    let (path, _guard) = temp_schema(GAME_SCHEMA);
    let schema = SchemaConfig::from_path(&path).unwrap();
    assert_eq!(schema.composites.len(), 2);
    assert_eq!(schema.enums.len(), 2);
}

#[test]
fn test_composite_strides() {
    let schema = SchemaConfig::from_toml_str(GAME_SCHEMA).unwrap();
    let codec = schema.build_codec().unwrap();
    assert_eq!(codec.stride_of(&schema.resolve("GridPos").unwrap()).unwrap(), 4);
    assert_eq!(codec.stride_of(&schema.resolve("Stats").unwrap()).unwrap(), 7);
    assert_eq!(codec.stride_of(&schema.resolve("Tier").unwrap()).unwrap(), 0);
}

#[test]
fn test_composite_list_round_trip() {
    let schema = SchemaConfig::from_toml_str(GAME_SCHEMA).unwrap();
    let codec = schema.build_codec().unwrap();
    let ty = schema.resolve("list<GridPos>").unwrap();

    let value = value_from_json(
        &json!([{"x": 1, "y": 2}, [3, 4]]),
        &ty,
        codec.registry(),
    )
    .unwrap();
    let bytes = codec.serialize(&value).unwrap();
    assert_eq!(bytes.len(), 4 + 1 + 2 * 4);
    assert_eq!(bytes[4], 4);

    let back = codec.deserialize(&bytes, &ty).unwrap();
    assert_eq!(back, value);
    assert_eq!(
        value_to_json(&back, codec.registry()),
        json!([{"x": 1, "y": 2}, {"x": 3, "y": 4}])
    );
}

#[test]
fn test_enum_json_round_trip() {
    let schema = SchemaConfig::from_toml_str(GAME_SCHEMA).unwrap();
    let codec = schema.build_codec().unwrap();
    let ty = schema.resolve("Tier[]").unwrap();

    let value = value_from_json(&json!(["Gold", 2, 9]), &ty, codec.registry()).unwrap();
    let bytes = codec.serialize(&value).unwrap();
    assert_eq!(bytes, vec![3, 0, 0, 0, 0, 1, 0, 3, 1, 0, 2, 1, 0, 9]);

    let back = codec.deserialize(&bytes, &ty).unwrap();
    assert_eq!(
        value_to_json(&back, codec.registry()),
        json!(["Gold", "Silver", 9])
    );
}

#[test]
fn test_unknown_member_name() {
    let schema = SchemaConfig::from_toml_str(GAME_SCHEMA).unwrap();
    let codec = schema.build_codec().unwrap();
    let ty = schema.resolve("Faction").unwrap();
    let err = value_from_json(&json!("Green"), &ty, codec.registry()).unwrap_err();
    assert!(matches!(err, CodecError::InvalidValue { .. }));
}

#[test]
fn test_schema_without_codec_entry() {
    // Names resolve through the schema, but a bare codec has no composites
    let schema = SchemaConfig::from_toml_str(GAME_SCHEMA).unwrap();
    let ty = schema.resolve("GridPos").unwrap();
    assert_eq!(ty, TypeDescriptor::Composite("GridPos".into()));

    let codec = gamewire::GameCodec::new();
    assert!(!codec.supports(&ty));
    let err = codec
        .serialize(&Value::Composite {
            type_name: "GridPos".into(),
            fields: vec![Value::Int16(0), Value::Int16(0)],
        })
        .unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_invalid_schema_file() {
    let (path, _guard) = temp_schema("[[composite]]\nname = 3\n");
    let err = SchemaConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, CodecError::InvalidSchema { .. }));
}
