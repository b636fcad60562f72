use std::ops::BitOr;
use std::rc::Rc;

use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as Gl};

use crate::error::GlError;
use crate::extensions::Extensions;
use crate::runtime::{ContextOptions, GlVersion, HostContext, WebContext};

/// A shared handle to one host context and the extensions loaded for it.
///
/// Cloning a wrapper is cheap; all clones refer to the same context. Every resource wrapper keeps
/// a clone of the wrapper it was created with.
pub struct GlWrapper<H>
where
    H: HostContext,
{
    data: Rc<GlWrapperData<H>>,
}

struct GlWrapperData<H>
where
    H: HostContext,
{
    host: H,
    extensions: Extensions<H::VertexArray>,
}

impl<H> Clone for GlWrapper<H>
where
    H: HostContext,
{
    fn clone(&self) -> Self {
        GlWrapper {
            data: self.data.clone(),
        }
    }
}

impl<H> GlWrapper<H>
where
    H: HostContext,
{
    /// Wraps `host` and loads its extensions.
    pub fn new(host: H) -> Self {
        let extensions = Extensions::load(&host);

        log::info!("Created wrapper for a {:?} context", host.version());

        GlWrapper {
            data: Rc::new(GlWrapperData { host, extensions }),
        }
    }

    pub fn version(&self) -> GlVersion {
        self.data.host.version()
    }

    pub fn host(&self) -> &H {
        &self.data.host
    }

    pub fn extensions(&self) -> &Extensions<H::VertexArray> {
        &self.data.extensions
    }

    pub(crate) fn last_error(&self) -> u32 {
        self.data.host.get_error()
    }

    pub fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.data.host.clear_color(red, green, blue, alpha);
    }

    pub fn clear(&self, mask: ClearMask) {
        self.data.host.clear(mask.bits());
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.data.host.viewport(x, y, width, height);
    }

    /// Draws `count` vertices starting at `first` from the currently bound vertex array.
    pub fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        self.data.host.draw_arrays(mode.gl_id(), first, count);
    }

    /// Draws `count` indexed vertices, reading indices from the currently bound element buffer
    /// starting at byte `offset`.
    pub fn draw_elements(&self, mode: DrawMode, count: i32, index_type: IndexType, offset: i32) {
        self.data
            .host
            .draw_elements(mode.gl_id(), count, index_type.gl_id(), offset);
    }

    pub fn draw_arrays_instanced(
        &self,
        mode: DrawMode,
        first: i32,
        count: i32,
        instance_count: i32,
    ) -> Result<(), GlError> {
        let instanced_arrays = self.extensions().instanced_arrays()?;

        instanced_arrays.draw_arrays_instanced(mode.gl_id(), first, count, instance_count);

        Ok(())
    }

    pub fn draw_elements_instanced(
        &self,
        mode: DrawMode,
        count: i32,
        index_type: IndexType,
        offset: i32,
        instance_count: i32,
    ) -> Result<(), GlError> {
        let instanced_arrays = self.extensions().instanced_arrays()?;

        instanced_arrays.draw_elements_instanced(
            mode.gl_id(),
            count,
            index_type.gl_id(),
            offset,
            instance_count,
        );

        Ok(())
    }
}

impl GlWrapper<WebContext> {
    /// Creates a wrapper for the newest WebGL version the `canvas` supports.
    pub fn latest(canvas: &HtmlCanvasElement, options: &ContextOptions) -> Result<Self, GlError> {
        WebContext::latest(canvas, options).map(GlWrapper::new)
    }

    /// Creates a wrapper for exactly the requested WebGL `version`.
    pub fn of_version(
        canvas: &HtmlCanvasElement,
        version: GlVersion,
        options: &ContextOptions,
    ) -> Result<Self, GlError> {
        WebContext::of_version(canvas, version, options).map(GlWrapper::new)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl DrawMode {
    pub(crate) fn gl_id(&self) -> u32 {
        match self {
            DrawMode::Points => Gl::POINTS,
            DrawMode::Lines => Gl::LINES,
            DrawMode::LineLoop => Gl::LINE_LOOP,
            DrawMode::LineStrip => Gl::LINE_STRIP,
            DrawMode::Triangles => Gl::TRIANGLES,
            DrawMode::TriangleStrip => Gl::TRIANGLE_STRIP,
            DrawMode::TriangleFan => Gl::TRIANGLE_FAN,
        }
    }
}

/// The type of the indices in an element buffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexType {
    UnsignedByte,
    UnsignedShort,
    /// Requires WebGL 2.0, or the `OES_element_index_uint` extension on WebGL 1.0.
    UnsignedInt,
}

impl IndexType {
    pub(crate) fn gl_id(&self) -> u32 {
        match self {
            IndexType::UnsignedByte => Gl::UNSIGNED_BYTE,
            IndexType::UnsignedShort => Gl::UNSIGNED_SHORT,
            IndexType::UnsignedInt => Gl::UNSIGNED_INT,
        }
    }
}

/// The buffers cleared by [GlWrapper::clear]; combine with `|`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClearMask(u32);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(Gl::COLOR_BUFFER_BIT);
    pub const DEPTH: ClearMask = ClearMask(Gl::DEPTH_BUFFER_BIT);
    pub const STENCIL: ClearMask = ClearMask(Gl::STENCIL_BUFFER_BIT);

    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl BitOr for ClearMask {
    type Output = ClearMask;

    fn bitor(self, rhs: ClearMask) -> ClearMask {
        ClearMask(self.0 | rhs.0)
    }
}
