//! Utility macros for reducing boilerplate

/// Macro to declare a closed vocabulary enum whose variants map one-to-one
/// onto notation codes.
///
/// Generates the enum with serde renames to the codes, an `ALL` slice,
/// `code()`, `from_code()` and a `Display` impl that prints the code.
///
/// # Example
/// ```ignore
/// notation_codes! {
///     /// Who the effect applies to.
///     pub enum Target {
///         Player => "P",
///         Enemy => "E",
///     }
/// }
/// assert_eq!(Target::from_code("P"), Some(Target::Player));
/// ```
macro_rules! notation_codes {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Notation code for this variant.
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Look up a variant by its exact notation code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}
