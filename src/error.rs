use std::fmt;

use failure::Fail;

use crate::buffer::BufferType;
use crate::shader::ShaderType;

/// The error type returned by every fallible operation in this crate.
///
/// None of these errors are recovered from internally: they are raised at the call site that
/// caused them and propagate to the caller as is.
#[derive(Fail, Clone, PartialEq, Debug)]
pub enum GlError {
    #[fail(display = "Failed to create {} (error code: {})", object, code)]
    CreationFailed { object: &'static str, code: u32 },
    #[fail(display = "Failed to compile shader (error code: {}): {}", code, log)]
    CompilationFailed { code: u32, log: String },
    #[fail(display = "Failed to link program (error code: {}): {}", code, log)]
    LinkFailed { code: u32, log: String },
    #[fail(display = "{}", _0)]
    InvalidState(InvalidState),
    #[fail(display = "Missing WebGL extension: {}", _0)]
    MissingExtension(String),
    #[fail(display = "Unknown uniform: {}", _0)]
    UnknownUniform(String),
    #[fail(
        display = "Uniform `{}` expects {}, but the supplied value is {}",
        name, expected, found
    )]
    UniformTypeMismatch {
        name: String,
        expected: String,
        found: String,
    },
    #[fail(display = "Attribute {} not defined by the layout", _0)]
    AttributeNotInLayout(String),
    #[fail(display = "Invalid attribute GL type {}", _0)]
    InvalidAttributeType(u32),
    #[fail(display = "Unknown GL type: {}", _0)]
    UnknownGlType(u32),
    #[fail(display = "Texture unit {} is out of range", _0)]
    TextureUnitOutOfRange(u32),
    #[fail(
        display = "Expected a {:?} shader, but got a {:?} shader",
        expected, found
    )]
    ShaderTypeMismatch {
        expected: ShaderType,
        found: ShaderType,
    },
    #[fail(
        display = "Expected a {:?} buffer, but got a {:?} buffer",
        expected, found
    )]
    BufferTypeMismatch {
        expected: BufferType,
        found: BufferType,
    },
    #[fail(display = "Failed to create WebGL wrapper: {}", _0)]
    ContextUnavailable(&'static str),
    #[fail(display = "Host call `{}` failed: {}", call, message)]
    HostCall { call: &'static str, message: String },
}

/// The lifecycle condition that was violated when a guarded value was accessed outside of its
/// validity window.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvalidState {
    AlreadyDisposed,
    NotDisposed,
}

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidState::AlreadyDisposed => f.write_str("Invalid state: Already disposed"),
            InvalidState::NotDisposed => f.write_str("Invalid state: Not disposed"),
        }
    }
}

impl From<InvalidState> for GlError {
    fn from(state: InvalidState) -> Self {
        GlError::InvalidState(state)
    }
}
