//! Main module for rix library functionality

pub mod ast;
pub mod lexing;
pub mod parsing;
pub mod symbols;
pub mod testing;
pub mod token;
