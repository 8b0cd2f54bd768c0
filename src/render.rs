//! Custom serde Serializer that writes any `Serialize` value back out in
//! config-block syntax, the inverse of [`value`](crate::value).
//!
//! Enum variants become constructor applications (`TopW L 90`), struct
//! variants become records (`Static { xpos = 0, … }`), sequences become lists
//! and strings are quoted. Applications in argument position are wrapped in
//! parentheses: `Run (Com "uname" [] "" 10)`.

use std::fmt::Write as _;

use serde::ser::{self, Impossible, Serialize};

use crate::error::RenderError;

/// Render `value` as a config literal.
pub fn to_source<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    let mut out = String::new();
    value.serialize(SourceSerializer {
        out: &mut out,
        argument: false,
    })?;
    Ok(out)
}

/// Quote `s` as a string literal, escaping what the reader unescapes.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

struct SourceSerializer<'a> {
    out: &'a mut String,
    /// Set when the value is an argument of an enclosing constructor.
    argument: bool,
}

impl<'a> SourceSerializer<'a> {
    fn emit(self, text: &str) -> Result<(), RenderError> {
        self.out.push_str(text);
        Ok(())
    }

    fn emit_display(self, value: impl std::fmt::Display) -> Result<(), RenderError> {
        write!(self.out, "{value}").map_err(|e| RenderError(e.to_string()))
    }

    /// Start `variant` applied to arguments, opening a parenthesis if needed.
    fn open_application(self, variant: &str) -> ApplicationRenderer<'a> {
        if self.argument {
            self.out.push('(');
        }
        self.out.push_str(variant);
        ApplicationRenderer {
            out: self.out,
            parenthesized: self.argument,
        }
    }
}

impl<'a> ser::Serializer for SourceSerializer<'a> {
    type Ok = ();
    type Error = RenderError;
    type SerializeSeq = ListRenderer<'a>;
    type SerializeTuple = ListRenderer<'a>;
    type SerializeTupleStruct = ListRenderer<'a>;
    type SerializeTupleVariant = ApplicationRenderer<'a>;
    type SerializeMap = Impossible<(), RenderError>;
    type SerializeStruct = RecordRenderer<'a>;
    type SerializeStructVariant = RecordRenderer<'a>;

    fn serialize_bool(self, v: bool) -> Result<(), Self::Error> {
        self.emit(if v { "True" } else { "False" })
    }

    fn serialize_i8(self, v: i8) -> Result<(), Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<(), Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<(), Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<(), Self::Error> {
        self.emit_display(v)
    }

    fn serialize_u8(self, v: u8) -> Result<(), Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<(), Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<(), Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<(), Self::Error> {
        self.emit_display(v)
    }

    fn serialize_f32(self, v: f32) -> Result<(), Self::Error> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), Self::Error> {
        if !v.is_finite() {
            return Err(RenderError(format!("non-finite number {v}")));
        }
        self.emit_display(v)
    }

    fn serialize_char(self, v: char) -> Result<(), Self::Error> {
        self.emit(&quote(v.encode_utf8(&mut [0; 4])))
    }

    fn serialize_str(self, v: &str) -> Result<(), Self::Error> {
        self.emit(&quote(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Self::Error> {
        Err(RenderError("bytes not supported".into()))
    }

    fn serialize_none(self) -> Result<(), Self::Error> {
        Err(RenderError("optional values not supported".into()))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Self::Error> {
        self.emit("()")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Self::Error> {
        self.emit("()")
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), Self::Error> {
        self.emit(variant)
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
        variant: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        let mut application = self.open_application(variant);
        ser::SerializeTupleVariant::serialize_field(&mut application, value)?;
        ser::SerializeTupleVariant::end(application)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        self.out.push('[');
        Ok(ListRenderer {
            out: self.out,
            first: true,
            close: ']',
        })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.out.push('(');
        Ok(ListRenderer {
            out: self.out,
            first: true,
            close: ')',
        })
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_tuple(len)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(self.open_application(variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(RenderError("maps not supported".into()))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        self.out.push_str(name);
        Ok(RecordRenderer {
            out: self.out,
            first: true,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        self.out.push_str(variant);
        Ok(RecordRenderer {
            out: self.out,
            first: true,
        })
    }
}

// -- Compound renderers ---------------------------------------------------

struct ListRenderer<'a> {
    out: &'a mut String,
    first: bool,
    close: char,
}

impl ListRenderer<'_> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), RenderError> {
        if !self.first {
            self.out.push_str(", ");
        }
        self.first = false;
        value.serialize(SourceSerializer {
            out: &mut *self.out,
            argument: false,
        })
    }

    fn finish(self) -> Result<(), RenderError> {
        self.out.push(self.close);
        Ok(())
    }
}

impl ser::SerializeSeq for ListRenderer<'_> {
    type Ok = ();
    type Error = RenderError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.element(value)
    }

    fn end(self) -> Result<(), Self::Error> {
        self.finish()
    }
}

impl ser::SerializeTuple for ListRenderer<'_> {
    type Ok = ();
    type Error = RenderError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.element(value)
    }

    fn end(self) -> Result<(), Self::Error> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for ListRenderer<'_> {
    type Ok = ();
    type Error = RenderError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.element(value)
    }

    fn end(self) -> Result<(), Self::Error> {
        self.finish()
    }
}

/// Constructor followed by space-separated arguments.
struct ApplicationRenderer<'a> {
    out: &'a mut String,
    parenthesized: bool,
}

impl ser::SerializeTupleVariant for ApplicationRenderer<'_> {
    type Ok = ();
    type Error = RenderError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.out.push(' ');
        value.serialize(SourceSerializer {
            out: &mut *self.out,
            argument: true,
        })
    }

    fn end(self) -> Result<(), Self::Error> {
        if self.parenthesized {
            self.out.push(')');
        }
        Ok(())
    }
}

struct RecordRenderer<'a> {
    out: &'a mut String,
    first: bool,
}

impl RecordRenderer<'_> {
    fn field<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), RenderError> {
        self.out.push_str(if self.first { " { " } else { ", " });
        self.first = false;
        self.out.push_str(key);
        self.out.push_str(" = ");
        value.serialize(SourceSerializer {
            out: &mut *self.out,
            argument: false,
        })
    }

    fn finish(self) -> Result<(), RenderError> {
        self.out.push_str(if self.first { " {}" } else { " }" });
        Ok(())
    }
}

impl ser::SerializeStruct for RecordRenderer<'_> {
    type Ok = ();
    type Error = RenderError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), Self::Error> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for RecordRenderer<'_> {
    type Ok = ();
    type Error = RenderError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), Self::Error> {
        self.finish()
    }
}
