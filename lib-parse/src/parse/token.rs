/// Define sets of [`Tokens`] to be parsed from a [`TokenBuffer`] of [`CommonToken`]s. These
/// tokens directly correspond to a static string.
///
/// The macro requires a type, which the tokens will derive from. This type must be parsable from
/// [`CommonToken`], and comparable with a `&str`.
///
/// The macro also accepts an optional identifier in square brackets, which it will use as the name
/// of a function which will check if a string matches any of the tokens in a set (this is useful
/// for testing for keywords in identifiers, for example).
///
/// Finally the macro takes pairs of tokens and identifiers, where the token is the raw
/// representation, and the identifier corresponds to a struct which will represent it.
///
/// ```ignore
/// define_tokens! {
///     Ident [is_keyword] {
///         [for] For
///         [let] Let
///     }
/// }
/// ```
///
/// [`Tokens`]: crate::parse::Token
/// [`TokenBuffer`]: crate::buffer::TokenBuffer
/// [`CommonToken`]: crate::common::token::CommonToken
#[macro_export]
macro_rules! define_tokens {
    (@impl $repr:ty $([$is_fn:ident])? { $([$token:tt] $name:ident)* }) => {
        $(
            #[doc = concat!("Token corresponding to `", stringify!($token), "`.")]
            #[derive(::std::clone::Clone, ::std::marker::Copy, ::std::fmt::Debug, ::std::cmp::Eq, ::std::cmp::PartialEq)]
            pub struct $name;

            impl $name {
                pub const TOKEN: &'static str = ::std::stringify!($token);
            }

            impl $crate::parse::Parse<$crate::common::token::CommonToken> for $name {
                fn parse(
                    parser: $crate::parse::BufferParser<'_, $crate::common::token::CommonToken>,
                ) -> ::std::result::Result<Self, ::std::string::String> {
                    parser.step(|cursor| {
                        match cursor.token::<$repr>() {
                            ::std::option::Option::Some((repr, cursor)) if repr == Self::TOKEN => {
                                ::std::result::Result::Ok(($name, cursor))
                            }
                            _ => ::std::result::Result::Err(::std::format!("expected `{}`", Self::TOKEN)),
                        }
                    })
                }
            }

            impl $crate::parse::Token<$crate::common::token::CommonToken> for $name {
                fn peek(cursor: $crate::buffer::Cursor<'_, $crate::common::token::CommonToken>) -> bool {
                    cursor
                        .token::<$repr>()
                        .is_some_and(|(repr, _)| repr == Self::TOKEN)
                }

                fn display() -> &'static str {
                    Self::TOKEN
                }
            }
        )*

        $crate::define_tokens!(@is_fn $($is_fn)? { $($token)* });
    };

    (@is_fn { $($token:tt)* }) => {};

    (@is_fn $is_fn:ident { $($token:tt)* }) => {
        pub fn $is_fn(s: &str) -> bool {
            [$(::std::stringify!($token)),*]
                .iter()
                .any(|token| token.eq_ignore_ascii_case(s))
        }
    };

    ($($repr:ty $([$is_fn:ident])? { $($tokens:tt)* })*) => {
        $($crate::define_tokens!(@impl $repr $([$is_fn])? { $($tokens)* });)*
    };
}
