/// Declares a catalog identifier enum keyed by a lowercase string.
///
/// Every generated enum carries a `Custom(String)` variant so user-entered values
/// survive a round trip through the catalog without being rejected.
#[macro_export]
macro_rules! define_catalog_id {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $key:literal : $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            Custom(String),
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.key())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_key(&s))
            }
        }

        impl $enum_name {
            /// Catalog key, or the raw user value for `Custom`.
            pub fn key(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $key,
                    )*
                    Self::Custom(value) => value,
                }
            }

            pub fn label(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                    Self::Custom(value) => value,
                }
            }

            /// Case-insensitive lookup; anything unrecognised is kept verbatim as `Custom`.
            pub fn from_key(key: &str) -> Self {
                $(
                    if key.eq_ignore_ascii_case($key) {
                        return Self::$variant;
                    }
                )*
                Self::Custom(key.to_string())
            }

            pub fn is_custom(&self) -> bool {
                matches!(self, Self::Custom(_))
            }

            pub fn is_empty(&self) -> bool {
                self.key().trim().is_empty()
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.key())
            }
        }
    };
}
