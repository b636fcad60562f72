use web_sys::WebGl2RenderingContext as Gl;

use crate::disposable::{DependsOnDisposedState, Disposable, DisposedFlag};
use crate::error::GlError;
use crate::runtime::HostContext;
use crate::wrapper::GlWrapper;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    pub(crate) fn gl_id(&self) -> u32 {
        match self {
            ShaderType::Vertex => Gl::VERTEX_SHADER,
            ShaderType::Fragment => Gl::FRAGMENT_SHADER,
        }
    }
}

/// A compiled shader object.
pub struct GlShader<H>
where
    H: HostContext,
{
    wrapper: GlWrapper<H>,
    disposed: DisposedFlag,
    shader_type: ShaderType,
    handle: DependsOnDisposedState<H::Shader>,
}

impl<H> GlShader<H>
where
    H: HostContext,
{
    /// Creates a shader object of the given type and compiles `source` into it.
    ///
    /// When compilation fails the shader object is deleted again and the host's info log is
    /// returned in the error.
    pub fn create(
        wrapper: &GlWrapper<H>,
        shader_type: ShaderType,
        source: &str,
    ) -> Result<Self, GlError> {
        let host = wrapper.host();

        let shader = host
            .create_shader(shader_type.gl_id())
            .ok_or_else(|| GlError::CreationFailed {
                object: "shader",
                code: wrapper.last_error(),
            })?;

        host.shader_source(&shader, source);
        host.compile_shader(&shader);

        if !host.shader_compile_status(&shader) {
            let code = wrapper.last_error();
            let log = host.shader_info_log(&shader).unwrap_or_default();

            log::warn!("Failed to compile {:?} shader: {}", shader_type, log);

            host.delete_shader(Some(&shader));

            return Err(GlError::CompilationFailed { code, log });
        }

        log::debug!("Compiled {:?} shader {:?}", shader_type, shader);

        let disposed = DisposedFlag::new();
        let handle = DependsOnDisposedState::valid_before_disposed(&disposed, shader);

        Ok(GlShader {
            wrapper: wrapper.clone(),
            disposed,
            shader_type,
            handle,
        })
    }

    pub fn shader_type(&self) -> ShaderType {
        self.shader_type
    }

    /// The wrapper of the context this shader belongs to.
    pub fn wrapper(&self) -> &GlWrapper<H> {
        &self.wrapper
    }

    pub fn handle(&self) -> Result<&H::Shader, GlError> {
        self.handle.get()
    }
}

impl<H> Disposable for GlShader<H>
where
    H: HostContext,
{
    fn is_disposed(&self) -> bool {
        self.disposed.is_set()
    }

    fn dispose(&self) {
        if let Ok(handle) = self.handle.get() {
            log::debug!("Deleting shader {:?}", handle);

            self.wrapper.host().delete_shader(Some(handle));
            self.disposed.set();
        }
    }
}

impl<H> Drop for GlShader<H>
where
    H: HostContext,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
