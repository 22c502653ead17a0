//! Android JNI bridge module
//!
//! Provides JNI bindings between the Rust game core and the Kotlin
//! presentation shell.

pub mod bridge;

pub use bridge::*;
