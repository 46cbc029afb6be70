//! Macros to reduce boilerplate in the codebase

/// Macro to generate `as_str`, Display and FromStr implementations for the
/// lowercase wire enums exchanged with the ticket API.
///
/// Parsing is case-insensitive and ignores surrounding whitespace.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::error::DeskError;
///
/// wire_enum!(
///     MyEnum,
///     DeskError::InvalidStatus,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            /// The value sent to and received from the API
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::DeskError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_variant(s.to_string())),
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use crate::error::DeskError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEnum {
        A,
        B,
        C,
    }

    wire_enum!(TestEnum, DeskError::InvalidStatus, { A => "a", B => "b", C => "c" });

    #[test]
    fn test_display() {
        assert_eq!(TestEnum::A.to_string(), "a");
        assert_eq!(TestEnum::B.to_string(), "b");
        assert_eq!(TestEnum::C.to_string(), "c");
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("B".parse::<TestEnum>().unwrap(), TestEnum::B);
        assert_eq!(" c ".parse::<TestEnum>().unwrap(), TestEnum::C);
        assert!(matches!(
            "d".parse::<TestEnum>(),
            Err(DeskError::InvalidStatus(s)) if s == "d"
        ));
    }

    #[test]
    fn test_all_in_declaration_order() {
        assert_eq!(TestEnum::ALL, &[TestEnum::A, TestEnum::B, TestEnum::C]);
    }
}
