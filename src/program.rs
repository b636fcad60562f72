use std::slice;

use fnv::FnvHashMap;

use crate::bindable::Bindable;
use crate::disposable::{DependsOnDisposedState, Disposable, DisposedFlag};
use crate::error::GlError;
use crate::info::{
    base_name, matrix_dimension, AttributeInfo, DataType, ElementType, UniformInfo,
};
use crate::runtime::HostContext;
use crate::shader::{GlShader, ShaderType};
use crate::texture::GlTexture;
use crate::wrapper::GlWrapper;

/// A value for a uniform.
///
/// The slice variants supply every component of a vector, matrix or array uniform in order;
/// matrices are supplied in column-major order.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum UniformValue<'a> {
    Float(f32),
    Floats(&'a [f32]),
    Int(i32),
    Ints(&'a [i32]),
    Bool(bool),
    Bools(&'a [bool]),
}

impl UniformValue<'_> {
    fn data_type(&self) -> DataType {
        match self {
            UniformValue::Float(_) | UniformValue::Floats(_) => DataType::Float,
            UniformValue::Int(_) | UniformValue::Ints(_) => DataType::Int,
            UniformValue::Bool(_) | UniformValue::Bools(_) => DataType::Bool,
        }
    }

    fn len(&self) -> usize {
        match self {
            UniformValue::Floats(values) => values.len(),
            UniformValue::Ints(values) => values.len(),
            UniformValue::Bools(values) => values.len(),
            _ => 1,
        }
    }
}

type UniformMap<L> = FnvHashMap<String, UniformInfo<L>>;

type AttributeMap = FnvHashMap<String, AttributeInfo>;

/// A linked program object.
///
/// The active uniforms and attributes of the program are reflected once, right after linking,
/// and are keyed by name. Array uniforms are keyed by their name without the `[0]` suffix.
pub struct GlProgram<H>
where
    H: HostContext,
{
    wrapper: GlWrapper<H>,
    disposed: DisposedFlag,
    handle: DependsOnDisposedState<H::Program>,
    // Raw handles, only used to detach on dispose. The host keeps a shader that was deleted
    // while attached alive until it is detached, so these stay valid when the shader wrappers
    // are disposed first.
    vertex_shader: H::Shader,
    fragment_shader: H::Shader,
    uniforms: UniformMap<H::UniformLocation>,
    attributes: AttributeMap,
}

impl<H> GlProgram<H>
where
    H: HostContext,
{
    /// Links `vertex` and `fragment` into a new program.
    ///
    /// When linking fails (or the linked program cannot be reflected) the program object is
    /// deleted again.
    pub fn create(
        wrapper: &GlWrapper<H>,
        vertex: &GlShader<H>,
        fragment: &GlShader<H>,
    ) -> Result<Self, GlError> {
        expect_shader_type(vertex, ShaderType::Vertex)?;
        expect_shader_type(fragment, ShaderType::Fragment)?;

        let vertex_shader = vertex.handle()?.clone();
        let fragment_shader = fragment.handle()?.clone();
        let host = wrapper.host();

        let program = host
            .create_program()
            .ok_or_else(|| GlError::CreationFailed {
                object: "program",
                code: wrapper.last_error(),
            })?;

        host.attach_shader(&program, &vertex_shader);
        host.attach_shader(&program, &fragment_shader);
        host.link_program(&program);

        if !host.program_link_status(&program) {
            let code = wrapper.last_error();
            let log = host.program_info_log(&program).unwrap_or_default();

            log::warn!("Failed to link program: {}", log);

            host.delete_program(Some(&program));

            return Err(GlError::LinkFailed { code, log });
        }

        let (uniforms, attributes) = match reflect(host, &program) {
            Ok(reflection) => reflection,
            Err(err) => {
                host.delete_program(Some(&program));

                return Err(err);
            }
        };

        log::debug!(
            "Linked program {:?} ({} uniforms, {} attributes)",
            program,
            uniforms.len(),
            attributes.len()
        );

        let disposed = DisposedFlag::new();
        let handle = DependsOnDisposedState::valid_before_disposed(&disposed, program);

        Ok(GlProgram {
            wrapper: wrapper.clone(),
            disposed,
            handle,
            vertex_shader,
            fragment_shader,
            uniforms,
            attributes,
        })
    }

    /// The wrapper of the context this program belongs to.
    pub fn wrapper(&self) -> &GlWrapper<H> {
        &self.wrapper
    }

    pub fn handle(&self) -> Result<&H::Program, GlError> {
        self.handle.get()
    }

    pub fn uniforms(&self) -> &UniformMap<H::UniformLocation> {
        &self.uniforms
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformInfo<H::UniformLocation>> {
        self.uniforms.get(name)
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.get(name)
    }

    /// Makes this program the current program of the context.
    pub fn use_program(&self) -> Result<(), GlError> {
        let handle = self.handle.get()?;

        self.wrapper.host().use_program(Some(handle));

        Ok(())
    }

    /// Uploads `value` to the uniform called `name`.
    ///
    /// The value goes to the location of the uniform in the current program, so this program
    /// must be in use. The value must match the uniform's element type (`Int` also matches
    /// samplers) and must supply a whole number of elements, at most as many as the uniform's
    /// array size. Nothing is uploaded when the value does not match.
    pub fn set_uniform(&self, name: &str, value: UniformValue) -> Result<(), GlError> {
        self.handle.get()?;

        let info = self.lookup_uniform(name)?;
        let expected = expected_data_type(info.element_type);
        let element_size = info.element_size as usize;
        let max_len = element_size * info.size.max(1) as usize;
        let len = value.len();

        if value.data_type() != expected || len == 0 || len % element_size != 0 || len > max_len {
            return Err(GlError::UniformTypeMismatch {
                name: name.to_string(),
                expected: describe_expected(expected, element_size, max_len),
                found: describe_components(value.data_type(), len),
            });
        }

        let host = self.wrapper.host();
        let location = &info.location;
        let components = element_size as u8;

        match value {
            UniformValue::Float(value) => host.uniform_f32v(location, 1, slice::from_ref(&value)),
            UniformValue::Floats(values) => match matrix_dimension(info.gl_type) {
                Some(dimension) => host.uniform_matrix_f32v(location, dimension, values),
                None => host.uniform_f32v(location, components, values),
            },
            UniformValue::Int(value) => host.uniform_i32v(location, 1, slice::from_ref(&value)),
            UniformValue::Ints(values) => host.uniform_i32v(location, components, values),
            UniformValue::Bool(value) => host.uniform_i32v(location, 1, &[value as i32]),
            UniformValue::Bools(values) => {
                let values: Vec<i32> = values.iter().map(|&value| value as i32).collect();

                host.uniform_i32v(location, components, &values)
            }
        }

        Ok(())
    }

    /// Points the sampler uniform called `name` at the texture unit of `texture`.
    pub fn set_uniform_texture(&self, name: &str, texture: &GlTexture<H>) -> Result<(), GlError> {
        self.handle.get()?;
        texture.handle()?;

        let info = self.lookup_uniform(name)?;

        if let ElementType::Data(data_type) = info.element_type {
            return Err(GlError::UniformTypeMismatch {
                name: name.to_string(),
                expected: "a sampler".to_string(),
                found: format!("a {:?} uniform", data_type),
            });
        }

        self.wrapper
            .host()
            .uniform_i32v(&info.location, 1, &[texture.unit() as i32]);

        Ok(())
    }

    fn lookup_uniform(&self, name: &str) -> Result<&UniformInfo<H::UniformLocation>, GlError> {
        self.uniforms
            .get(name)
            .ok_or_else(|| GlError::UnknownUniform(name.to_string()))
    }
}

fn expect_shader_type<H>(shader: &GlShader<H>, expected: ShaderType) -> Result<(), GlError>
where
    H: HostContext,
{
    let found = shader.shader_type();

    if found != expected {
        return Err(GlError::ShaderTypeMismatch { expected, found });
    }

    Ok(())
}

fn reflect<H>(
    host: &H,
    program: &H::Program,
) -> Result<(UniformMap<H::UniformLocation>, AttributeMap), GlError>
where
    H: HostContext,
{
    let mut uniforms = FnvHashMap::default();

    for index in 0..host.active_uniform_count(program) {
        let info = match host.get_active_uniform(program, index) {
            Some(info) => info,
            None => continue,
        };

        let location = match host.get_uniform_location(program, &info.name) {
            Some(location) => location,
            None => continue,
        };

        let key = base_name(&info.name).to_string();

        uniforms.insert(key, UniformInfo::new(info, location)?);
    }

    let mut attributes = FnvHashMap::default();

    for index in 0..host.active_attribute_count(program) {
        let info = match host.get_active_attrib(program, index) {
            Some(info) => info,
            None => continue,
        };

        let location = host.get_attrib_location(program, &info.name);

        // Built-in inputs such as `gl_VertexID` are active but have no location.
        if location < 0 {
            continue;
        }

        let key = base_name(&info.name).to_string();

        attributes.insert(key, AttributeInfo::new(info, location as u32)?);
    }

    Ok((uniforms, attributes))
}

fn expected_data_type(element_type: ElementType) -> DataType {
    match element_type {
        ElementType::Data(data_type) => data_type,
        ElementType::Sampler(_) => DataType::Int,
    }
}

fn describe_components(data_type: DataType, count: usize) -> String {
    format!("{} {:?} component(s)", count, data_type)
}

fn describe_expected(data_type: DataType, element_size: usize, max_len: usize) -> String {
    if element_size == max_len {
        describe_components(data_type, element_size)
    } else {
        format!(
            "a multiple of {} {:?} components, up to {}",
            element_size, data_type, max_len
        )
    }
}

impl<H> Bindable for GlProgram<H>
where
    H: HostContext,
{
    fn bind(&self) -> Result<(), GlError> {
        self.use_program()
    }

    fn unbind(&self) {
        self.wrapper.host().use_program(None);
    }
}

impl<H> Disposable for GlProgram<H>
where
    H: HostContext,
{
    fn is_disposed(&self) -> bool {
        self.disposed.is_set()
    }

    fn dispose(&self) {
        if let Ok(handle) = self.handle.get() {
            log::debug!("Deleting program {:?}", handle);

            let host = self.wrapper.host();

            host.detach_shader(handle, &self.vertex_shader);
            host.detach_shader(handle, &self.fragment_shader);
            host.delete_program(Some(handle));

            self.disposed.set();
        }
    }
}

impl<H> Drop for GlProgram<H>
where
    H: HostContext,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
