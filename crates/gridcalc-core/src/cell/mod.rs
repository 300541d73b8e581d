//! Cell addressing
//!
//! This module contains [`Address`], a cell's location by column and row index.

mod address;

pub use address::Address;
