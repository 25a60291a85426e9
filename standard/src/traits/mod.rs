//! Exports interfaces to allow developers to adapt their own compression implementations for
//! use with Tessera.

pub mod compression;
