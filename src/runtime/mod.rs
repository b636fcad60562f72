//! The boundary between this crate and the host-provided graphics context.
//!
//! Every wrapper in this crate talks to the host through the [HostContext] trait. The browser
//! implementation is [WebContext], which forwards to either a WebGL 1.0 or a WebGL 2.0 rendering
//! context obtained from a canvas element.

mod context_options;
pub use self::context_options::{ContextOptions, ContextOptionsBuilder, PowerPreference};

mod web;
pub use self::web::WebContext;

use std::fmt::Debug;

use crate::error::GlError;
use crate::extensions::ExtensionFunctions;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GlVersion {
    WebGl1,
    WebGl2,
}

/// The host's reflection record for one active uniform or attribute of a linked program.
#[derive(Clone, PartialEq, Debug)]
pub struct ActiveInfo {
    pub name: String,
    pub size: i32,
    pub gl_type: u32,
}

/// Pixel data for a 2D texture upload.
pub enum TextureSource<'a, I: ?Sized> {
    /// An image element owned by the host; its dimensions are taken from the image.
    Image(&'a I),
    /// Raw pixel data. A `None` data allocates storage without initializing it.
    Pixels {
        width: i32,
        height: i32,
        data: Option<&'a [u8]>,
    },
}

/// A host graphics context.
///
/// Handles are opaque: the crate never inspects them, it only passes them back to the host. A
/// creation call that returns `None` corresponds to the host returning a null handle, in which
/// case [get_error](HostContext::get_error) is queried for the failure code.
///
/// All calls are synchronous and the context is single threaded: it represents one ambient
/// register of "currently bound resource per target" that every wrapper shares.
pub trait HostContext: 'static {
    type Buffer: Clone + Debug + 'static;

    type Shader: Clone + Debug + 'static;

    type Program: Clone + Debug + 'static;

    type Texture: Clone + Debug + 'static;

    type VertexArray: Clone + Debug + 'static;

    type UniformLocation: Clone + Debug + 'static;

    type Image: ?Sized;

    fn version(&self) -> GlVersion;

    fn get_error(&self) -> u32;

    /// Looks up the capability registered under the exact extension `name`.
    ///
    /// Returns `None` when the host does not support the extension, or when this crate has no
    /// function set for it.
    fn get_extension(&self, name: &str) -> Option<ExtensionFunctions<Self::VertexArray>>;

    fn create_buffer(&self) -> Option<Self::Buffer>;

    fn bind_buffer(&self, target: u32, buffer: Option<&Self::Buffer>);

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);

    fn delete_buffer(&self, buffer: Option<&Self::Buffer>);

    fn create_shader(&self, shader_type: u32) -> Option<Self::Shader>;

    fn shader_source(&self, shader: &Self::Shader, source: &str);

    fn compile_shader(&self, shader: &Self::Shader);

    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    fn delete_shader(&self, shader: Option<&Self::Shader>);

    fn create_program(&self) -> Option<Self::Program>;

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn detach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn link_program(&self, program: &Self::Program);

    fn program_link_status(&self, program: &Self::Program) -> bool;

    fn program_info_log(&self, program: &Self::Program) -> Option<String>;

    fn active_uniform_count(&self, program: &Self::Program) -> u32;

    fn active_attribute_count(&self, program: &Self::Program) -> u32;

    fn get_active_uniform(&self, program: &Self::Program, index: u32) -> Option<ActiveInfo>;

    fn get_active_attrib(&self, program: &Self::Program, index: u32) -> Option<ActiveInfo>;

    fn get_uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn get_attrib_location(&self, program: &Self::Program, name: &str) -> i32;

    fn use_program(&self, program: Option<&Self::Program>);

    fn delete_program(&self, program: Option<&Self::Program>);

    /// Uploads float uniform data with `components` (1 through 4) components per element.
    ///
    /// Any other component count is a caller error: implementations may panic in debug builds
    /// and upload nothing otherwise.
    fn uniform_f32v(&self, location: &Self::UniformLocation, components: u8, data: &[f32]);

    /// Uploads integer (or boolean, or sampler) uniform data with `components` (1 through 4)
    /// components per element. Other component counts are a caller error, as for
    /// [uniform_f32v](HostContext::uniform_f32v).
    fn uniform_i32v(&self, location: &Self::UniformLocation, components: u8, data: &[i32]);

    /// Uploads column-major square matrices of the given `dimension` (2 through 4). Other
    /// dimensions are a caller error, as for [uniform_f32v](HostContext::uniform_f32v).
    fn uniform_matrix_f32v(&self, location: &Self::UniformLocation, dimension: u8, data: &[f32]);

    fn create_texture(&self) -> Option<Self::Texture>;

    fn active_texture(&self, unit: u32);

    fn bind_texture(&self, target: u32, texture: Option<&Self::Texture>);

    fn pixel_store_i(&self, parameter: u32, value: i32);

    fn tex_image_2d(
        &self,
        target: u32,
        internal_format: i32,
        format: u32,
        data_type: u32,
        source: TextureSource<Self::Image>,
    ) -> Result<(), GlError>;

    fn tex_parameter_i(&self, target: u32, parameter: u32, value: i32);

    fn generate_mipmap(&self, target: u32);

    fn delete_texture(&self, texture: Option<&Self::Texture>);

    fn enable_vertex_attrib_array(&self, index: u32);

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);

    fn clear(&self, mask: u32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    fn draw_arrays(&self, mode: u32, first: i32, count: i32);

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: i32);
}

/// Installs a `console_log` backed logger so that this crate's `log` records show up in the
/// browser console.
#[cfg(feature = "console-log")]
pub fn init_console_logger(level: log::Level) -> Result<(), GlError> {
    console_log::init_with_level(level).map_err(|err| GlError::HostCall {
        call: "console_log::init_with_level",
        message: err.to_string(),
    })
}
