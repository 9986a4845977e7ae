//! # Abrigo Server Library
//!
//! Server wiring and startup utilities for the Abrigo application.

pub mod startup;
