//! CLI infrastructure for the oxo terminal host
//!
//! The host is a thin driver over the library: it reads moves, asks the
//! engine for replies, and prints the board and status after every move.

pub mod commands;
pub mod logging;
pub mod output;
