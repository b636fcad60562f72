//! A host context that records every call, for unit tests that run outside of a browser.
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::GlError;
use crate::extensions::{
    instanced_arrays, vertex_array_object, ExtensionFunctions, InstancedArraysFunctions,
    VertexArrayFunctions,
};
use crate::runtime::{ActiveInfo, GlVersion, HostContext, TextureSource};

#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Upload {
    Image(String),
    Pixels(i32, i32, Option<Vec<u8>>),
}

#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Call {
    GetExtension(String),
    CreateBuffer,
    BindBuffer(u32, Option<u32>),
    BufferData(u32, Vec<u8>, u32),
    DeleteBuffer(Option<u32>),
    CreateShader(u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(Option<u32>),
    CreateProgram,
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(Option<u32>),
    UniformF32(u32, u8, Vec<f32>),
    UniformI32(u32, u8, Vec<i32>),
    UniformMatrix(u32, u8, Vec<f32>),
    CreateTexture,
    ActiveTexture(u32),
    BindTexture(u32, Option<u32>),
    PixelStore(u32, i32),
    TexImage2D(u32, i32, u32, u32, Upload),
    TexParameter(u32, u32, i32),
    GenerateMipmap(u32),
    DeleteTexture(Option<u32>),
    EnableVertexAttribArray(u32),
    VertexAttribPointer(u32, i32, u32, bool, i32, i32),
    ClearColor(f32, f32, f32, f32),
    Clear(u32),
    Viewport(i32, i32, i32, i32),
    DrawArrays(u32, i32, i32),
    DrawElements(u32, i32, u32, i32),
    CreateVertexArray,
    BindVertexArray(Option<u32>),
    DeleteVertexArray(Option<u32>),
    VertexAttribDivisor(u32, u32),
    DrawArraysInstanced(u32, i32, i32, i32),
    DrawElementsInstanced(u32, i32, u32, i32, i32),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_id: u32,
    error_code: u32,
    fail_creation: bool,
    compile_error: Option<String>,
    link_error: Option<String>,
    uniforms: Vec<ActiveInfo>,
    attributes: Vec<ActiveInfo>,
}

impl State {
    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }

    fn allocate(&mut self, call: Call) -> Option<u32> {
        self.record(call);

        if self.fail_creation {
            None
        } else {
            self.next_id += 1;

            Some(self.next_id)
        }
    }
}

pub(crate) struct RecordingContext {
    version: GlVersion,
    supported_extensions: Vec<&'static str>,
    state: Rc<RefCell<State>>,
}

impl RecordingContext {
    pub(crate) fn webgl1(supported_extensions: &[&'static str]) -> Self {
        RecordingContext {
            version: GlVersion::WebGl1,
            supported_extensions: supported_extensions.to_vec(),
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    pub(crate) fn webgl2() -> Self {
        RecordingContext {
            version: GlVersion::WebGl2,
            supported_extensions: Vec::new(),
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    /// Makes every creation call return a null handle and report `error_code`.
    pub(crate) fn fail_creation(&self, error_code: u32) {
        let mut state = self.state.borrow_mut();

        state.fail_creation = true;
        state.error_code = error_code;
    }

    pub(crate) fn fail_compilation(&self, error_code: u32, log: &str) {
        let mut state = self.state.borrow_mut();

        state.compile_error = Some(log.to_string());
        state.error_code = error_code;
    }

    pub(crate) fn fail_linking(&self, error_code: u32, log: &str) {
        let mut state = self.state.borrow_mut();

        state.link_error = Some(log.to_string());
        state.error_code = error_code;
    }

    /// Sets the active uniforms reported for any linked program. A uniform's location is its
    /// index in `uniforms`.
    pub(crate) fn set_active_uniforms(&self, uniforms: Vec<ActiveInfo>) {
        self.state.borrow_mut().uniforms = uniforms;
    }

    /// Sets the active attributes reported for any linked program. An attribute's location is
    /// its index in `attributes`.
    pub(crate) fn set_active_attributes(&self, attributes: Vec<ActiveInfo>) {
        self.state.borrow_mut().attributes = attributes;
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().record(call);
    }
}

pub(crate) fn active_info(name: &str, size: i32, gl_type: u32) -> ActiveInfo {
    ActiveInfo {
        name: name.to_string(),
        size,
        gl_type,
    }
}

struct RecordingVertexArrays {
    state: Rc<RefCell<State>>,
}

impl VertexArrayFunctions<u32> for RecordingVertexArrays {
    fn create_vertex_array(&self) -> Option<u32> {
        self.state.borrow_mut().allocate(Call::CreateVertexArray)
    }

    fn bind_vertex_array(&self, vertex_array: Option<&u32>) {
        self.state
            .borrow_mut()
            .record(Call::BindVertexArray(vertex_array.copied()));
    }

    fn delete_vertex_array(&self, vertex_array: Option<&u32>) {
        self.state
            .borrow_mut()
            .record(Call::DeleteVertexArray(vertex_array.copied()));
    }

    fn is_vertex_array(&self, vertex_array: Option<&u32>) -> bool {
        vertex_array.is_some()
    }
}

struct RecordingInstancedArrays {
    state: Rc<RefCell<State>>,
}

impl InstancedArraysFunctions for RecordingInstancedArrays {
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        self.state
            .borrow_mut()
            .record(Call::VertexAttribDivisor(index, divisor));
    }

    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instance_count: i32) {
        self.state
            .borrow_mut()
            .record(Call::DrawArraysInstanced(mode, first, count, instance_count));
    }

    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: i32,
        instance_count: i32,
    ) {
        self.state.borrow_mut().record(Call::DrawElementsInstanced(
            mode,
            count,
            index_type,
            offset,
            instance_count,
        ));
    }
}

impl HostContext for RecordingContext {
    type Buffer = u32;

    type Shader = u32;

    type Program = u32;

    type Texture = u32;

    type VertexArray = u32;

    type UniformLocation = u32;

    type Image = str;

    fn version(&self) -> GlVersion {
        self.version
    }

    fn get_error(&self) -> u32 {
        self.state.borrow().error_code
    }

    fn get_extension(&self, name: &str) -> Option<ExtensionFunctions<u32>> {
        self.record(Call::GetExtension(name.to_string()));

        let available = match self.version {
            GlVersion::WebGl1 => self.supported_extensions.contains(&name),
            GlVersion::WebGl2 => true,
        };

        if !available {
            return None;
        }

        match name {
            vertex_array_object::NAME => Some(ExtensionFunctions::VertexArray(Rc::new(
                RecordingVertexArrays {
                    state: self.state.clone(),
                },
            ))),
            instanced_arrays::NAME => Some(ExtensionFunctions::InstancedArrays(Rc::new(
                RecordingInstancedArrays {
                    state: self.state.clone(),
                },
            ))),
            _ => None,
        }
    }

    fn create_buffer(&self) -> Option<u32> {
        self.state.borrow_mut().allocate(Call::CreateBuffer)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<&u32>) {
        self.record(Call::BindBuffer(target, buffer.copied()));
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData(target, data.to_vec(), usage));
    }

    fn delete_buffer(&self, buffer: Option<&u32>) {
        self.record(Call::DeleteBuffer(buffer.copied()));
    }

    fn create_shader(&self, shader_type: u32) -> Option<u32> {
        self.state
            .borrow_mut()
            .allocate(Call::CreateShader(shader_type))
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        self.record(Call::ShaderSource(*shader, source.to_string()));
    }

    fn compile_shader(&self, shader: &u32) {
        self.record(Call::CompileShader(*shader));
    }

    fn shader_compile_status(&self, _shader: &u32) -> bool {
        self.state.borrow().compile_error.is_none()
    }

    fn shader_info_log(&self, _shader: &u32) -> Option<String> {
        self.state.borrow().compile_error.clone()
    }

    fn delete_shader(&self, shader: Option<&u32>) {
        self.record(Call::DeleteShader(shader.copied()));
    }

    fn create_program(&self) -> Option<u32> {
        self.state.borrow_mut().allocate(Call::CreateProgram)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::AttachShader(*program, *shader));
    }

    fn detach_shader(&self, program: &u32, shader: &u32) {
        self.record(Call::DetachShader(*program, *shader));
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
    }

    fn program_link_status(&self, _program: &u32) -> bool {
        self.state.borrow().link_error.is_none()
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        self.state.borrow().link_error.clone()
    }

    fn active_uniform_count(&self, _program: &u32) -> u32 {
        self.state.borrow().uniforms.len() as u32
    }

    fn active_attribute_count(&self, _program: &u32) -> u32 {
        self.state.borrow().attributes.len() as u32
    }

    fn get_active_uniform(&self, _program: &u32, index: u32) -> Option<ActiveInfo> {
        self.state.borrow().uniforms.get(index as usize).cloned()
    }

    fn get_active_attrib(&self, _program: &u32, index: u32) -> Option<ActiveInfo> {
        self.state.borrow().attributes.get(index as usize).cloned()
    }

    fn get_uniform_location(&self, _program: &u32, name: &str) -> Option<u32> {
        self.state
            .borrow()
            .uniforms
            .iter()
            .position(|info| info.name == name)
            .map(|index| index as u32)
    }

    fn get_attrib_location(&self, _program: &u32, name: &str) -> i32 {
        self.state
            .borrow()
            .attributes
            .iter()
            .position(|info| info.name == name)
            .map(|index| index as i32)
            .unwrap_or(-1)
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(Call::UseProgram(program.copied()));
    }

    fn delete_program(&self, program: Option<&u32>) {
        self.record(Call::DeleteProgram(program.copied()));
    }

    fn uniform_f32v(&self, location: &u32, components: u8, data: &[f32]) {
        self.record(Call::UniformF32(*location, components, data.to_vec()));
    }

    fn uniform_i32v(&self, location: &u32, components: u8, data: &[i32]) {
        self.record(Call::UniformI32(*location, components, data.to_vec()));
    }

    fn uniform_matrix_f32v(&self, location: &u32, dimension: u8, data: &[f32]) {
        self.record(Call::UniformMatrix(*location, dimension, data.to_vec()));
    }

    fn create_texture(&self) -> Option<u32> {
        self.state.borrow_mut().allocate(Call::CreateTexture)
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, target: u32, texture: Option<&u32>) {
        self.record(Call::BindTexture(target, texture.copied()));
    }

    fn pixel_store_i(&self, parameter: u32, value: i32) {
        self.record(Call::PixelStore(parameter, value));
    }

    fn tex_image_2d(
        &self,
        target: u32,
        internal_format: i32,
        format: u32,
        data_type: u32,
        source: TextureSource<str>,
    ) -> Result<(), GlError> {
        let upload = match source {
            TextureSource::Image(image) => Upload::Image(image.to_string()),
            TextureSource::Pixels {
                width,
                height,
                data,
            } => Upload::Pixels(width, height, data.map(|data| data.to_vec())),
        };

        self.record(Call::TexImage2D(
            target,
            internal_format,
            format,
            data_type,
            upload,
        ));

        Ok(())
    }

    fn tex_parameter_i(&self, target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter(target, parameter, value));
    }

    fn generate_mipmap(&self, target: u32) {
        self.record(Call::GenerateMipmap(target));
    }

    fn delete_texture(&self, texture: Option<&u32>) {
        self.record(Call::DeleteTexture(texture.copied()));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer(
            index, size, data_type, normalized, stride, offset,
        ));
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor(red, green, blue, alpha));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: i32) {
        self.record(Call::DrawElements(mode, count, index_type, offset));
    }
}
