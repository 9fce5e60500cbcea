pub mod buffer;
pub mod common;
pub mod parse;
mod util;

pub use self::{parse::entrypoint::*, prelude::*};

pub mod prelude {
    pub use crate::{
        buffer::{BufferToken, Cursor, IntoToken, TokenBuffer},
        parse::{
            BufferParser, FullBufferParser, Parse, Token, lookahead::Lookahead,
            punctuated::Punctuated,
        },
    };
}
