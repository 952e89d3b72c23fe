//! Enumerations that are stored as fixed strings in `.dspreset` attributes.

/// A closed set of values with a fixed XML spelling.
pub trait WireValue: Sized + Copy + Default {
    /// Parse the XML spelling (case-insensitive).
    fn from_wire(value: &str) -> Option<Self>;

    /// The XML spelling.
    fn as_wire(&self) -> &'static str;
}

/// Declares an enum together with its XML spelling, serde names and
/// [`WireValue`] implementation.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::wire::WireValue for $name {
            fn from_wire(value: &str) -> Option<Self> {
                $(
                    if value.eq_ignore_ascii_case($wire) {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            fn as_wire(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::wire::WireValue::as_wire(self))
            }
        }
    };
}

pub(crate) use wire_enum;
