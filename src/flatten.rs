//! Custom serde Serializer that flattens any `Serialize` value into a
//! [`FlatStore`] of dotted keys and canonical scalar text.
//!
//! Works on a parsed `serde_yaml::Value`, on a [`Tree`](crate::tree::Tree),
//! or on any struct or map. Mappings and structs are recursed into;
//! scalars become leaves:
//!
//! - strings are kept verbatim
//! - integers and booleans use their usual decimal / `true` / `false` form
//! - floats use the shortest round-trip form, with `.inf`, `-.inf`, `.nan`
//! - null becomes the empty string
//! - unit enum variants become the variant name
//!
//! Sequences have no flat-key representation and fail with
//! [`UnsupportedValueShape`](PropymlError::UnsupportedValueShape), as do
//! strings spanning several lines: a flat file holds one entry per line.

use serde::ser::{self, Impossible, Serialize};

use crate::error::PropymlError;
use crate::store::FlatStore;

/// Flatten a `Serialize` value into dotted key-value pairs.
///
/// `{server: {port: 8080, tls: {enabled: true}}}` →
/// `[("server.port", "8080"), ("server.tls.enabled", "true")]`
///
/// A null root flattens to an empty store. Any other non-mapping root is
/// rejected with [`RootNotMapping`](PropymlError::RootNotMapping).
pub fn flatten<S: Serialize + ?Sized>(source: &S) -> Result<FlatStore, PropymlError> {
    let mut out = FlatStore::new();
    let serializer = FlattenSerializer {
        prefix: String::new(),
        out: &mut out,
    };
    source.serialize(serializer)?;
    Ok(out)
}

struct FlattenSerializer<'a> {
    prefix: String,
    out: &'a mut FlatStore,
}

impl FlattenSerializer<'_> {
    fn emit(self, value: String) -> Result<(), PropymlError> {
        if self.prefix.is_empty() {
            return Err(PropymlError::RootNotMapping { shape: "scalar" });
        }
        if has_line_break(&self.prefix) {
            return Err(PropymlError::InvalidKey {
                key: self.prefix,
                reason: "key contains a line break".into(),
            });
        }
        if has_line_break(&value) {
            return Err(PropymlError::UnsupportedValueShape {
                key: self.prefix,
                shape: "multi-line string",
            });
        }
        if self.out.contains_key(&self.prefix) {
            return Err(PropymlError::DuplicateKey { key: self.prefix });
        }
        self.out.insert(self.prefix, value);
        Ok(())
    }

    fn unsupported(self, shape: &'static str) -> PropymlError {
        if self.prefix.is_empty() {
            PropymlError::RootNotMapping { shape }
        } else {
            PropymlError::UnsupportedValueShape {
                key: self.prefix,
                shape,
            }
        }
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        ".nan".into()
    } else if v == f64::INFINITY {
        ".inf".into()
    } else if v == f64::NEG_INFINITY {
        "-.inf".into()
    } else {
        format!("{v:?}")
    }
}

impl<'a> ser::Serializer for FlattenSerializer<'a> {
    type Ok = ();
    type Error = PropymlError;
    type SerializeSeq = Impossible<(), PropymlError>;
    type SerializeTuple = Impossible<(), PropymlError>;
    type SerializeTupleStruct = Impossible<(), PropymlError>;
    type SerializeTupleVariant = Impossible<(), PropymlError>;
    type SerializeMap = FlattenMapSerializer<'a>;
    type SerializeStruct = FlattenStructSerializer<'a>;
    type SerializeStructVariant = FlattenStructSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<(), Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<(), Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<(), Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<(), Self::Error> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<(), Self::Error> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<(), Self::Error> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<(), Self::Error> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<(), Self::Error> {
        self.emit(format_float(v))
    }

    fn serialize_char(self, v: char) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<(), Self::Error> {
        self.emit(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Self::Error> {
        Err(self.unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<(), Self::Error> {
        self.serialize_unit()
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Self::Error> {
        // An empty document parses as null: nothing to flatten.
        if self.prefix.is_empty() {
            return Ok(());
        }
        self.emit(String::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Self::Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(self.unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(self.unsupported("sequence"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(self.unsupported("sequence"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(self.unsupported("sequence"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(FlattenMapSerializer {
            prefix: self.prefix,
            out: self.out,
            current_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(FlattenStructSerializer {
            prefix: self.prefix,
            out: self.out,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(FlattenStructSerializer {
            prefix: self.prefix,
            out: self.out,
        })
    }
}

fn dotted(prefix: &str, key: &str) -> Result<String, PropymlError> {
    let joined = if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    };
    if key.is_empty() {
        return Err(PropymlError::InvalidKey {
            key: joined,
            reason: "mapping key is empty".into(),
        });
    }
    Ok(joined)
}

// --- SerializeStruct ---

struct FlattenStructSerializer<'a> {
    prefix: String,
    out: &'a mut FlatStore,
}

impl ser::SerializeStruct for FlattenStructSerializer<'_> {
    type Ok = ();
    type Error = PropymlError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        let serializer = FlattenSerializer {
            prefix: dotted(&self.prefix, key)?,
            out: self.out,
        };
        value.serialize(serializer)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FlattenStructSerializer<'_> {
    type Ok = ();
    type Error = PropymlError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// --- SerializeMap ---

struct FlattenMapSerializer<'a> {
    prefix: String,
    out: &'a mut FlatStore,
    current_key: Option<String>,
}

impl ser::SerializeMap for FlattenMapSerializer<'_> {
    type Ok = ();
    type Error = PropymlError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> {
        let key_serializer = KeySerializer {
            prefix: &self.prefix,
        };
        self.current_key = Some(key.serialize(key_serializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self.current_key.take().ok_or_else(|| {
            PropymlError::Serialize("serialize_value called without serialize_key".into())
        })?;
        let serializer = FlattenSerializer {
            prefix: dotted(&self.prefix, &key)?,
            out: self.out,
        };
        value.serialize(serializer)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// --- Key serializer (scalar mapping keys to text) ---

struct KeySerializer<'p> {
    prefix: &'p str,
}

impl KeySerializer<'_> {
    fn reject(self) -> PropymlError {
        let key = if self.prefix.is_empty() {
            "<root>".to_string()
        } else {
            self.prefix.to_string()
        };
        PropymlError::InvalidKey {
            key,
            reason: "mapping keys must be scalars".into(),
        }
    }
}

impl ser::Serializer for KeySerializer<'_> {
    type Ok = String;
    type Error = PropymlError;
    type SerializeSeq = Impossible<String, PropymlError>;
    type SerializeTuple = Impossible<String, PropymlError>;
    type SerializeTupleStruct = Impossible<String, PropymlError>;
    type SerializeTupleVariant = Impossible<String, PropymlError>;
    type SerializeMap = Impossible<String, PropymlError>;
    type SerializeStruct = Impossible<String, PropymlError>;
    type SerializeStructVariant = Impossible<String, PropymlError>;

    fn serialize_str(self, v: &str) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_bool(self, v: bool) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_i8(self, v: i8) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_i16(self, v: i16) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_i32(self, v: i32) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_i64(self, v: i64) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_u8(self, v: u8) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_u16(self, v: u16) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_u32(self, v: u32) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_u64(self, v: u64) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_f32(self, v: f32) -> Result<String, Self::Error> {
        Ok(format_float(v as f64))
    }
    fn serialize_f64(self, v: f64) -> Result<String, Self::Error> {
        Ok(format_float(v))
    }
    fn serialize_char(self, v: char) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_bytes(self, _: &[u8]) -> Result<String, Self::Error> {
        Err(self.reject())
    }
    fn serialize_none(self) -> Result<String, Self::Error> {
        Err(self.reject())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, v: &T) -> Result<String, Self::Error> {
        v.serialize(self)
    }
    fn serialize_unit(self) -> Result<String, Self::Error> {
        Err(self.reject())
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<String, Self::Error> {
        Err(self.reject())
    }
    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        v: &'static str,
    ) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        v: &T,
    ) -> Result<String, Self::Error> {
        v.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<String, Self::Error> {
        Err(self.reject())
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(self.reject())
    }
    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(self.reject())
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(self.reject())
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(self.reject())
    }
    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(self.reject())
    }
    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Err(self.reject())
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(self.reject())
    }
}
