use std::rc::Rc;

use crate::bindable::{using_bindables, Bindable};
use crate::buffer::{BufferType, GlBuffer};
use crate::disposable::{DependsOnDisposedState, Disposable, DisposedFlag};
use crate::error::GlError;
use crate::extensions::VertexArrayFunctions;
use crate::info::DataType;
use crate::runtime::HostContext;
use crate::wrapper::GlWrapper;

/// A vertex array object.
///
/// Creating one requires the vertex array capability: core functionality on WebGL 2.0, the
/// `OES_vertex_array_object` extension on WebGL 1.0.
pub struct GlVertexArray<H>
where
    H: HostContext,
{
    wrapper: GlWrapper<H>,
    functions: Rc<dyn VertexArrayFunctions<H::VertexArray>>,
    disposed: DisposedFlag,
    handle: DependsOnDisposedState<H::VertexArray>,
}

impl<H> GlVertexArray<H>
where
    H: HostContext,
{
    pub fn create(wrapper: &GlWrapper<H>) -> Result<Self, GlError> {
        let functions = wrapper.extensions().vertex_array()?;

        let vertex_array =
            functions
                .create_vertex_array()
                .ok_or_else(|| GlError::CreationFailed {
                    object: "vertex array object",
                    code: wrapper.last_error(),
                })?;

        log::debug!("Created vertex array {:?}", vertex_array);

        let disposed = DisposedFlag::new();
        let handle = DependsOnDisposedState::valid_before_disposed(&disposed, vertex_array);

        Ok(GlVertexArray {
            wrapper: wrapper.clone(),
            functions,
            disposed,
            handle,
        })
    }

    /// The wrapper of the context this vertex array belongs to.
    pub fn wrapper(&self) -> &GlWrapper<H> {
        &self.wrapper
    }

    pub fn handle(&self) -> Result<&H::VertexArray, GlError> {
        self.handle.get()
    }

    /// Records in this vertex array that attribute `location` is read from `vbo`.
    ///
    /// `vbo` must be an [Array](BufferType::Array) buffer. `size` is the number of components
    /// per vertex, `stride` and `offset` are in bytes.
    pub fn set_attribute(
        &self,
        location: u32,
        vbo: &GlBuffer<H>,
        size: i32,
        data_type: DataType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) -> Result<(), GlError> {
        expect_buffer_type(vbo, BufferType::Array)?;

        using_bindables(&[self, vbo], || {
            let host = self.wrapper.host();

            host.enable_vertex_attrib_array(location);
            host.vertex_attrib_pointer(
                location,
                size,
                data_type.gl_id(),
                normalized,
                stride,
                offset,
            );

            Ok(())
        })
    }

    /// Makes attribute `location` advance once per `divisor` instances rather than once per
    /// vertex. Requires the instanced arrays capability.
    pub fn set_attribute_divisor(&self, location: u32, divisor: u32) -> Result<(), GlError> {
        let instanced_arrays = self.wrapper.extensions().instanced_arrays()?;

        using_bindables(&[self], || {
            instanced_arrays.vertex_attrib_divisor(location, divisor);

            Ok(())
        })
    }

    /// Records `ebo` as the element buffer of this vertex array.
    ///
    /// The element buffer is left bound while the vertex array is unbound, which stores the
    /// binding in the vertex array.
    pub fn bind_element_buffer(&self, ebo: &GlBuffer<H>) -> Result<(), GlError> {
        expect_buffer_type(ebo, BufferType::Element)?;

        using_bindables(&[self], || ebo.bind())
    }
}

fn expect_buffer_type<H>(buffer: &GlBuffer<H>, expected: BufferType) -> Result<(), GlError>
where
    H: HostContext,
{
    let found = buffer.buffer_type();

    if found != expected {
        return Err(GlError::BufferTypeMismatch { expected, found });
    }

    Ok(())
}

impl<H> Bindable for GlVertexArray<H>
where
    H: HostContext,
{
    fn bind(&self) -> Result<(), GlError> {
        let handle = self.handle.get()?;

        self.functions.bind_vertex_array(Some(handle));

        Ok(())
    }

    fn unbind(&self) {
        self.functions.bind_vertex_array(None);
    }
}

impl<H> Disposable for GlVertexArray<H>
where
    H: HostContext,
{
    fn is_disposed(&self) -> bool {
        self.disposed.is_set()
    }

    fn dispose(&self) {
        if let Ok(handle) = self.handle.get() {
            log::debug!("Deleting vertex array {:?}", handle);

            self.functions.delete_vertex_array(Some(handle));
            self.disposed.set();
        }
    }
}

impl<H> Drop for GlVertexArray<H>
where
    H: HostContext,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
