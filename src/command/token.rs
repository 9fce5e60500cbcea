//! Tokens built into the SQL language.

use lib_parse::common::token::{Ident, Punct};

lib_parse::define_tokens! {
    Ident [is_constraint_keyword] {
        [as]                As
        [check]             Check
        [collate]           Collate
        [constraint]        Constraint
        [default]           Default
        [foreign]           Foreign
        [generated]         Generated
        [not]               Not
        [null]              Null
        [primary]           Primary
        [references]        References
        [unique]            Unique
    }

    Ident {
        [create]            Create
        [exists]            Exists
        [from]              From
        [if]                If
        [key]               Key
        [select]            Select
        [table]             Table
        [temp]              Temp
        [temporary]         Temporary
        [using]             Using
        [virtual]           Virtual
        [where]             Where
    }

    Punct {
        [*]                 Asterisk
        [,]                 Comma
        [.]                 Dot
        [=]                 Equals
        [;]                 Semicolon
    }
}

#[macro_export]
macro_rules! Token {
    [as]                => { $crate::command::token::As };
    [check]             => { $crate::command::token::Check };
    [collate]           => { $crate::command::token::Collate };
    [constraint]        => { $crate::command::token::Constraint };
    [create]            => { $crate::command::token::Create };
    [default]           => { $crate::command::token::Default };
    [exists]            => { $crate::command::token::Exists };
    [foreign]           => { $crate::command::token::Foreign };
    [from]              => { $crate::command::token::From };
    [generated]         => { $crate::command::token::Generated };
    [if]                => { $crate::command::token::If };
    [key]               => { $crate::command::token::Key };
    [not]               => { $crate::command::token::Not };
    [null]              => { $crate::command::token::Null };
    [primary]           => { $crate::command::token::Primary };
    [references]        => { $crate::command::token::References };
    [select]            => { $crate::command::token::Select };
    [table]             => { $crate::command::token::Table };
    [temp]              => { $crate::command::token::Temp };
    [temporary]         => { $crate::command::token::Temporary };
    [unique]            => { $crate::command::token::Unique };
    [using]             => { $crate::command::token::Using };
    [virtual]           => { $crate::command::token::Virtual };
    [where]             => { $crate::command::token::Where };
    [*]                 => { $crate::command::token::Asterisk };
    [,]                 => { $crate::command::token::Comma };
    [.]                 => { $crate::command::token::Dot };
    [=]                 => { $crate::command::token::Equals };
    [;]                 => { $crate::command::token::Semicolon };
}
