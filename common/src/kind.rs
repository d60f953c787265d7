//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Variants are (de)serialized from/to their `snake_case` names, and stored
/// in databases as `INT2` values.
///
/// # Example
///
/// ```rust
/// # use crate::common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            $crate::private::strum::VariantNames,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Names of all the variants, as accepted by
            /// [`FromStr`](::std::str::FromStr).
            pub const VARIANTS: &'static [&'static str] =
                <Self as $crate::private::strum::VariantNames>::VARIANTS;

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(INT2);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                match u8::try_from(
                    <i16 as $crate::private::postgres_types::FromSql<'a>>::from_sql(
                        ty, raw,
                    )?,
                )? {
                    $(
                        v if Self::$variant.u8() == v => Ok(Self::$variant),
                    )*
                    v => Err(::std::format!(
                        "invalid `{}` value: {v}",
                        ::core::stringify!($name),
                    ).into()),
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(INT2);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                $crate::private::postgres_types::ToSql::to_sql(
                    &i16::from(self.u8()),
                    ty,
                    w,
                )
            }
        }
    };
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use postgres_types::{private::BytesMut, FromSql as _, ToSql as _, Type};

    crate::define_kind! {
        #[doc = "Shape kind."]
        enum Shape {
            #[doc = "A cube"]
            Cube = 1,

            #[doc = "A sphere"]
            Sphere = 2,
        }
    }

    #[test]
    fn reads_from_int2() {
        let raw = 2_i16.to_be_bytes().to_vec();

        assert!(matches!(
            Shape::from_sql(&Type::INT2, &raw),
            Ok(Shape::Sphere),
        ));
        assert!(Shape::from_sql(&Type::INT2, &7_i16.to_be_bytes()).is_err());
    }

    #[test]
    fn writes_as_int2() {
        let mut buf = BytesMut::new();

        _ = Shape::Cube.to_sql(&Type::INT2, &mut buf).unwrap();

        assert_eq!(&buf[..], &1_i16.to_be_bytes());
    }
}
