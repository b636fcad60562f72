//! Disposable, bindable handle wrappers over WebGL 1.0 and WebGL 2.0 rendering contexts.
//!
//! Every wrapper owns exactly one host object (a buffer, shader, program, texture or vertex
//! array) and deletes it exactly once, either when [Disposable::dispose] is called or when the
//! wrapper is dropped. Using a wrapper after it was disposed fails with
//! [GlError::InvalidState] instead of passing a stale handle to the host.
//!
//! Resources that are made "current" in the context implement [Bindable]; [using_bindables]
//! binds a set of them around a closure and unbinds them again on every exit path:
//!
//! ```no_run
//! use webgl_handles::*;
//! use webgl_handles::runtime::ContextOptions;
//! # fn run(canvas: &web_sys::HtmlCanvasElement, vertex_data: &[u8]) -> Result<(), GlError> {
//! let gl = GlWrapper::latest(canvas, &ContextOptions::default())?;
//! let vao = GlVertexArray::create(&gl)?;
//! let vbo = GlBuffer::create(&gl, BufferType::Array, BufferUsage::Static)?;
//!
//! vbo.set_data(vertex_data)?;
//! vao.set_attribute(0, &vbo, 3, DataType::Float, false, 0, 0)?;
//!
//! using_bindables(&[&vao], || {
//!     gl.draw_arrays(DrawMode::Triangles, 0, 3);
//!
//!     Ok::<(), GlError>(())
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! All host calls go through the [runtime::HostContext] trait; [runtime::WebContext] is the
//! implementation for browser canvases.

mod bindable;
pub use self::bindable::{using_bindables, Bindable};

mod disposable;
pub use self::disposable::{using_disposables, DependsOnDisposedState, Disposable, DisposedFlag};

mod error;
pub use self::error::{GlError, InvalidState};

pub mod extensions;

pub mod runtime;

mod wrapper;
pub use self::wrapper::{ClearMask, DrawMode, GlWrapper, IndexType};

mod buffer;
pub use self::buffer::{BufferType, BufferUsage, GlBuffer};

mod shader;
pub use self::shader::{GlShader, ShaderType};

mod info;
pub use self::info::{
    element_size, element_type, AttributeInfo, DataType, ElementType, SamplerType, UniformInfo,
};

mod program;
pub use self::program::{GlProgram, UniformValue};

mod texture;
pub use self::texture::{
    GlTexture, PixelFormat, PixelType, TextureMagFilter, TextureMinFilter, TextureWrap,
    MAX_TEXTURE_UNIT,
};

mod vertex_array;
pub use self::vertex_array::GlVertexArray;

mod layout;
pub use self::layout::{GlBufferLayout, LayoutConfig};

#[cfg(test)]
mod testing;
