use web_sys::WebGl2RenderingContext as Gl;

use crate::bindable::{using_bindables, Bindable};
use crate::disposable::{DependsOnDisposedState, Disposable, DisposedFlag};
use crate::error::GlError;
use crate::runtime::HostContext;
use crate::wrapper::GlWrapper;

/// The binding target a buffer is used with.
///
/// The tag is fixed when the buffer is created; a buffer is only ever bound to the target of its
/// tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BufferType {
    /// Vertex attribute data (`ARRAY_BUFFER`).
    Array,
    /// Vertex indices (`ELEMENT_ARRAY_BUFFER`).
    Element,
}

impl BufferType {
    pub(crate) fn gl_id(&self) -> u32 {
        match self {
            BufferType::Array => Gl::ARRAY_BUFFER,
            BufferType::Element => Gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Hints to the host how often the data in a buffer will change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BufferUsage {
    Static,
    Dynamic,
    Stream,
}

impl BufferUsage {
    pub(crate) fn gl_id(&self) -> u32 {
        match self {
            BufferUsage::Static => Gl::STATIC_DRAW,
            BufferUsage::Dynamic => Gl::DYNAMIC_DRAW,
            BufferUsage::Stream => Gl::STREAM_DRAW,
        }
    }
}

/// A buffer object.
///
/// The buffer object is deleted when [dispose](Disposable::dispose) is called, or when the
/// `GlBuffer` is dropped.
pub struct GlBuffer<H>
where
    H: HostContext,
{
    wrapper: GlWrapper<H>,
    disposed: DisposedFlag,
    buffer_type: BufferType,
    usage: BufferUsage,
    handle: DependsOnDisposedState<H::Buffer>,
}

impl<H> GlBuffer<H>
where
    H: HostContext,
{
    pub fn create(
        wrapper: &GlWrapper<H>,
        buffer_type: BufferType,
        usage: BufferUsage,
    ) -> Result<Self, GlError> {
        let buffer = wrapper
            .host()
            .create_buffer()
            .ok_or_else(|| GlError::CreationFailed {
                object: "buffer object",
                code: wrapper.last_error(),
            })?;

        log::debug!("Created {:?} buffer {:?}", buffer_type, buffer);

        let disposed = DisposedFlag::new();
        let handle = DependsOnDisposedState::valid_before_disposed(&disposed, buffer);

        Ok(GlBuffer {
            wrapper: wrapper.clone(),
            disposed,
            buffer_type,
            usage,
            handle,
        })
    }

    pub fn buffer_type(&self) -> BufferType {
        self.buffer_type
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// The wrapper of the context this buffer belongs to.
    pub fn wrapper(&self) -> &GlWrapper<H> {
        &self.wrapper
    }

    /// The host's buffer object. Fails once the buffer has been disposed.
    pub fn handle(&self) -> Result<&H::Buffer, GlError> {
        self.handle.get()
    }

    /// Replaces the buffer's data store with a copy of `data`.
    ///
    /// The buffer is bound to its target for the duration of the upload and unbound afterwards.
    pub fn set_data(&self, data: &[u8]) -> Result<(), GlError> {
        using_bindables(&[self], || {
            self.wrapper
                .host()
                .buffer_data(self.buffer_type.gl_id(), data, self.usage.gl_id());

            Ok(())
        })
    }
}

impl<H> Bindable for GlBuffer<H>
where
    H: HostContext,
{
    fn bind(&self) -> Result<(), GlError> {
        let handle = self.handle.get()?;

        self.wrapper
            .host()
            .bind_buffer(self.buffer_type.gl_id(), Some(handle));

        Ok(())
    }

    fn unbind(&self) {
        self.wrapper
            .host()
            .bind_buffer(self.buffer_type.gl_id(), None);
    }
}

impl<H> Disposable for GlBuffer<H>
where
    H: HostContext,
{
    fn is_disposed(&self) -> bool {
        self.disposed.is_set()
    }

    fn dispose(&self) {
        if let Ok(handle) = self.handle.get() {
            log::debug!("Deleting buffer {:?}", handle);

            self.wrapper.host().delete_buffer(Some(handle));
            self.disposed.set();
        }
    }
}

impl<H> Drop for GlBuffer<H>
where
    H: HostContext,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
