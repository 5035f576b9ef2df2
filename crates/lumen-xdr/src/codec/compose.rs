//! Declarative builders for composite codecs.
//!
//! The protocol's message shapes are described as data — an ordered field
//! list, a name/value constant list, or a discriminant-plus-arms list — and
//! the macros here turn each description into a type with an [`XdrCodec`]
//! impl. Field order in a struct description is part of the wire contract:
//! encode and decode walk the fields exactly as declared.
//!
//! [`XdrCodec`]: crate::codec::XdrCodec

/// Defines an XDR struct: an ordered list of named fields, each with its own
/// codec type and a declared JSON key.
///
/// ```
/// use lumen_xdr::xdr_struct;
///
/// xdr_struct! {
///     pub struct Price {
///         n: i32 => "n",
///         d: i32 => "d",
///     }
/// }
/// ```
///
/// The JSON projection is an object keyed by the declared JSON keys, in
/// declaration order.
#[macro_export]
macro_rules! xdr_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $fty:ty => $json:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $fty, )+
        }

        impl $crate::codec::XdrCodec for $name {
            fn encode(
                &self,
                w: &mut $crate::codec::Writer,
            ) -> Result<(), $crate::error::EncodeError> {
                $( $crate::codec::XdrCodec::encode(&self.$field, w)?; )+
                Ok(())
            }

            fn decode(
                r: &mut $crate::codec::Reader<'_>,
            ) -> Result<Self, $crate::error::DecodeError> {
                Ok(Self {
                    $( $field: <$fty as $crate::codec::XdrCodec>::decode(r)?, )+
                })
            }

            fn to_json(&self) -> ::serde_json::Value {
                let mut map = ::serde_json::Map::new();
                $(
                    map.insert(
                        $json.to_string(),
                        $crate::codec::XdrCodec::to_json(&self.$field),
                    );
                )+
                ::serde_json::Value::Object(map)
            }

            fn from_json(v: &::serde_json::Value) -> Result<Self, $crate::error::JsonError> {
                let obj = v.as_object().ok_or($crate::error::JsonError::ExpectedObject {
                    ty: stringify!($name),
                })?;
                Ok(Self {
                    $(
                        $field: <$fty as $crate::codec::XdrCodec>::from_json(obj.get($json).ok_or(
                            $crate::error::JsonError::MissingField {
                                ty: stringify!($name),
                                field: $json,
                            },
                        )?)?,
                    )+
                })
            }
        }
    };
}

/// Defines an XDR enum: a closed mapping of names to 32-bit constants, each
/// with a declared JSON name.
///
/// ```
/// use lumen_xdr::xdr_enum;
///
/// xdr_enum! {
///     pub enum MemoType {
///         MemoNone = 0 => "none",
///         MemoText = 1 => "text",
///     }
/// }
/// ```
///
/// Decoding a discriminant with no matching constant fails; the JSON
/// projection is the declared name string.
#[macro_export]
macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $json:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Creates the constant from its wire discriminant.
            pub fn from_value(value: i32) -> Option<Self> {
                match value {
                    $( $value => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Returns the wire discriminant.
            pub fn value(self) -> i32 {
                self as i32
            }

            /// Returns the JSON name.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $json, )+
                }
            }

            /// Creates the constant from its JSON name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $json => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl $crate::codec::XdrCodec for $name {
            fn encode(
                &self,
                w: &mut $crate::codec::Writer,
            ) -> Result<(), $crate::error::EncodeError> {
                w.write_i32(self.value());
                Ok(())
            }

            fn decode(
                r: &mut $crate::codec::Reader<'_>,
            ) -> Result<Self, $crate::error::DecodeError> {
                let value = r.read_i32(stringify!($name))?;
                Self::from_value(value).ok_or($crate::error::DecodeError::UnknownDiscriminant {
                    ty: stringify!($name),
                    value,
                })
            }

            fn to_json(&self) -> ::serde_json::Value {
                ::serde_json::Value::String(self.name().to_string())
            }

            fn from_json(v: &::serde_json::Value) -> Result<Self, $crate::error::JsonError> {
                let name = v.as_str().ok_or($crate::error::JsonError::ExpectedString {
                    ty: stringify!($name),
                })?;
                Self::from_name(name).ok_or_else(|| $crate::error::JsonError::UnknownEnumName {
                    ty: stringify!($name),
                    name: name.to_string(),
                })
            }
        }
    };
}

/// Defines an XDR tagged union over a discriminant enum declared with
/// [`xdr_enum!`]. Each arm is named after the discriminant constant it
/// matches; a bare name is a void arm, a name with a parenthesized type
/// carries that payload. A source-format arm matching several discriminant
/// values is declared as one arm per value sharing a payload type, which
/// keeps encoding unambiguous.
///
/// ```
/// use lumen_xdr::{xdr_enum, xdr_union, XdrString};
///
/// xdr_enum! {
///     pub enum MemoType {
///         MemoNone = 0 => "none",
///         MemoText = 1 => "text",
///     }
/// }
///
/// xdr_union! {
///     pub enum Memo: MemoType {
///         MemoNone,
///         MemoText(XdrString<28>),
///     }
/// }
/// ```
///
/// Void arms encode only the discriminant. The JSON projection of a void arm
/// is the bare discriminant-name string; a payload arm projects to a
/// single-key object `{ "name": payload }`. Encoding a value with no matching
/// arm is unrepresentable: the generated dispatch is exhaustive over the
/// union's own closed set of variants.
#[macro_export]
macro_rules! xdr_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $disc:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(($pty:ty))?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant $(($pty))?, )+
        }

        impl $name {
            /// Returns the discriminant selecting the active arm.
            pub fn discriminant(&self) -> $disc {
                $( $crate::xdr_union!(@disc_arm self, $name, $disc, $variant $(($pty))?); )+
                unreachable!()
            }
        }

        impl $crate::codec::XdrCodec for $name {
            fn encode(
                &self,
                w: &mut $crate::codec::Writer,
            ) -> Result<(), $crate::error::EncodeError> {
                $crate::codec::XdrCodec::encode(&self.discriminant(), w)?;
                $( $crate::xdr_union!(@encode_arm self, w, $name, $variant $(($pty))?); )+
                Ok(())
            }

            fn decode(
                r: &mut $crate::codec::Reader<'_>,
            ) -> Result<Self, $crate::error::DecodeError> {
                let disc = <$disc as $crate::codec::XdrCodec>::decode(r)?;
                $( $crate::xdr_union!(@decode_arm r, disc, $name, $disc, $variant $(($pty))?); )+
                Err($crate::error::DecodeError::UnknownDiscriminant {
                    ty: stringify!($name),
                    value: disc.value(),
                })
            }

            fn to_json(&self) -> ::serde_json::Value {
                $( $crate::xdr_union!(@json_arm self, $name, $disc, $variant $(($pty))?); )+
                unreachable!()
            }

            fn from_json(v: &::serde_json::Value) -> Result<Self, $crate::error::JsonError> {
                match v {
                    ::serde_json::Value::String(s) => {
                        let disc = <$disc>::from_name(s).ok_or_else(|| {
                            $crate::error::JsonError::UnknownUnionArm {
                                ty: stringify!($name),
                                arm: s.clone(),
                            }
                        })?;
                        $(
                            $crate::xdr_union!(@void_from_json disc, $name, $disc, $variant $(($pty))?);
                        )+
                        Err($crate::error::JsonError::UnionPayloadMismatch {
                            ty: stringify!($name),
                            arm: s.clone(),
                        })
                    }
                    ::serde_json::Value::Object(map) => {
                        let mut entries = map.iter();
                        let (arm, payload) = match (entries.next(), entries.next()) {
                            (Some(entry), None) => entry,
                            _ => {
                                return Err($crate::error::JsonError::ExpectedUnion {
                                    ty: stringify!($name),
                                });
                            }
                        };
                        let disc = <$disc>::from_name(arm).ok_or_else(|| {
                            $crate::error::JsonError::UnknownUnionArm {
                                ty: stringify!($name),
                                arm: arm.clone(),
                            }
                        })?;
                        $(
                            $crate::xdr_union!(@value_from_json disc, payload, $name, $disc, $variant $(($pty))?);
                        )+
                        Err($crate::error::JsonError::UnionPayloadMismatch {
                            ty: stringify!($name),
                            arm: arm.clone(),
                        })
                    }
                    _ => Err($crate::error::JsonError::ExpectedUnion {
                        ty: stringify!($name),
                    }),
                }
            }
        }
    };

    // Internal per-arm rules. The void and payload shapes of an arm expand
    // differently, so each generated method dispatches through these.

    (@disc_arm $self:ident, $name:ident, $disc:ident, $variant:ident) => {
        if let $name::$variant = $self {
            return $disc::$variant;
        }
    };
    (@disc_arm $self:ident, $name:ident, $disc:ident, $variant:ident($pty:ty)) => {
        if let $name::$variant(..) = $self {
            return $disc::$variant;
        }
    };

    (@encode_arm $self:ident, $w:ident, $name:ident, $variant:ident) => {
        ()
    };
    (@encode_arm $self:ident, $w:ident, $name:ident, $variant:ident($pty:ty)) => {
        if let $name::$variant(value) = $self {
            <$pty as $crate::codec::XdrCodec>::encode(value, $w)?;
        }
    };

    (@decode_arm $r:ident, $d:ident, $name:ident, $disc:ident, $variant:ident) => {
        if let $disc::$variant = $d {
            return Ok($name::$variant);
        }
    };
    (@decode_arm $r:ident, $d:ident, $name:ident, $disc:ident, $variant:ident($pty:ty)) => {
        if let $disc::$variant = $d {
            return Ok($name::$variant(<$pty as $crate::codec::XdrCodec>::decode($r)?));
        }
    };

    (@json_arm $self:ident, $name:ident, $disc:ident, $variant:ident) => {
        if let $name::$variant = $self {
            return ::serde_json::Value::String($disc::$variant.name().to_string());
        }
    };
    (@json_arm $self:ident, $name:ident, $disc:ident, $variant:ident($pty:ty)) => {
        if let $name::$variant(value) = $self {
            let mut map = ::serde_json::Map::new();
            map.insert(
                $disc::$variant.name().to_string(),
                $crate::codec::XdrCodec::to_json(value),
            );
            return ::serde_json::Value::Object(map);
        }
    };

    (@void_from_json $d:ident, $name:ident, $disc:ident, $variant:ident) => {
        if let $disc::$variant = $d {
            return Ok($name::$variant);
        }
    };
    (@void_from_json $d:ident, $name:ident, $disc:ident, $variant:ident($pty:ty)) => {
        ()
    };

    (@value_from_json $d:ident, $p:ident, $name:ident, $disc:ident, $variant:ident) => {
        ()
    };
    (@value_from_json $d:ident, $p:ident, $name:ident, $disc:ident, $variant:ident($pty:ty)) => {
        if let $disc::$variant = $d {
            return Ok($name::$variant(<$pty as $crate::codec::XdrCodec>::from_json($p)?));
        }
    };
}
