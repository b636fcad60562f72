use std::rc::Rc;

use js_sys::Object;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AngleInstancedArrays, HtmlCanvasElement, HtmlImageElement, OesVertexArrayObject,
    WebGl2RenderingContext as Gl, WebGlActiveInfo, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::GlError;
use crate::extensions::{
    instanced_arrays, vertex_array_object, ExtensionFunctions, InstancedArraysFunctions,
    VertexArrayFunctions,
};
use crate::runtime::{ActiveInfo, ContextOptions, GlVersion, HostContext, TextureSource};

/// A browser rendering context of either WebGL version.
#[derive(Clone, Debug)]
pub enum WebContext {
    WebGl1(web_sys::WebGlRenderingContext),
    WebGl2(Gl),
}

// Both context types expose the WebGL 1.0 API under the same method names, so most calls are
// forwarded with the same expression on either variant.
macro_rules! forward {
    ($context:expr, $gl:ident => $body:expr) => {
        match $context {
            WebContext::WebGl1($gl) => $body,
            WebContext::WebGl2($gl) => $body,
        }
    };
}

impl WebContext {
    /// Requests a WebGL 2.0 context from the `canvas`, falling back to WebGL 1.0.
    pub fn latest(canvas: &HtmlCanvasElement, options: &ContextOptions) -> Result<Self, GlError> {
        if let Some(context) = request_context(canvas, "webgl2", options) {
            return Ok(WebContext::WebGl2(context.unchecked_into()));
        }

        if let Some(context) = request_context(canvas, "webgl", options) {
            return Ok(WebContext::WebGl1(context.unchecked_into()));
        }

        Err(GlError::ContextUnavailable("WebGL not supported"))
    }

    /// Requests a context of exactly the given `version` from the `canvas`.
    pub fn of_version(
        canvas: &HtmlCanvasElement,
        version: GlVersion,
        options: &ContextOptions,
    ) -> Result<Self, GlError> {
        let context = match version {
            GlVersion::WebGl1 => request_context(canvas, "webgl", options)
                .map(|context| WebContext::WebGl1(context.unchecked_into())),
            GlVersion::WebGl2 => request_context(canvas, "webgl2", options)
                .map(|context| WebContext::WebGl2(context.unchecked_into())),
        };

        context.ok_or(GlError::ContextUnavailable("Version not supported"))
    }
}

fn request_context(
    canvas: &HtmlCanvasElement,
    context_id: &str,
    options: &ContextOptions,
) -> Option<Object> {
    #[allow(deprecated)]
    let attributes = JsValue::from_serde(options).ok()?;

    canvas
        .get_context_with_context_options(context_id, &attributes)
        .ok()
        .flatten()
}

fn active_info(info: WebGlActiveInfo) -> ActiveInfo {
    ActiveInfo {
        name: info.name(),
        size: info.size(),
        gl_type: info.type_(),
    }
}

fn host_call_error(call: &'static str, error: JsValue) -> GlError {
    GlError::HostCall {
        call,
        message: error
            .as_string()
            .unwrap_or_else(|| format!("{:?}", error)),
    }
}

impl HostContext for WebContext {
    type Buffer = WebGlBuffer;

    type Shader = WebGlShader;

    type Program = WebGlProgram;

    type Texture = WebGlTexture;

    type VertexArray = WebGlVertexArrayObject;

    type UniformLocation = WebGlUniformLocation;

    type Image = HtmlImageElement;

    fn version(&self) -> GlVersion {
        match self {
            WebContext::WebGl1(_) => GlVersion::WebGl1,
            WebContext::WebGl2(_) => GlVersion::WebGl2,
        }
    }

    fn get_error(&self) -> u32 {
        forward!(self, gl => gl.get_error())
    }

    fn get_extension(&self, name: &str) -> Option<ExtensionFunctions<WebGlVertexArrayObject>> {
        match self {
            WebContext::WebGl1(gl) => match name {
                vertex_array_object::NAME => {
                    let extension = gl.get_extension(name).ok().flatten()?;

                    Some(ExtensionFunctions::VertexArray(Rc::new(
                        extension.unchecked_into::<OesVertexArrayObject>(),
                    )))
                }
                instanced_arrays::NAME => {
                    let extension = gl.get_extension(name).ok().flatten()?;

                    Some(ExtensionFunctions::InstancedArrays(Rc::new(
                        extension.unchecked_into::<AngleInstancedArrays>(),
                    )))
                }
                _ => None,
            },
            WebContext::WebGl2(gl) => match name {
                vertex_array_object::NAME => {
                    Some(ExtensionFunctions::VertexArray(Rc::new(gl.clone())))
                }
                instanced_arrays::NAME => {
                    Some(ExtensionFunctions::InstancedArrays(Rc::new(gl.clone())))
                }
                _ => None,
            },
        }
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        forward!(self, gl => gl.create_buffer())
    }

    fn bind_buffer(&self, target: u32, buffer: Option<&WebGlBuffer>) {
        forward!(self, gl => gl.bind_buffer(target, buffer))
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        forward!(self, gl => gl.buffer_data_with_u8_array(target, data, usage))
    }

    fn delete_buffer(&self, buffer: Option<&WebGlBuffer>) {
        forward!(self, gl => gl.delete_buffer(buffer))
    }

    fn create_shader(&self, shader_type: u32) -> Option<WebGlShader> {
        forward!(self, gl => gl.create_shader(shader_type))
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        forward!(self, gl => gl.shader_source(shader, source))
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        forward!(self, gl => gl.compile_shader(shader))
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        forward!(self, gl => gl.get_shader_parameter(shader, Gl::COMPILE_STATUS))
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        forward!(self, gl => gl.get_shader_info_log(shader))
    }

    fn delete_shader(&self, shader: Option<&WebGlShader>) {
        forward!(self, gl => gl.delete_shader(shader))
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        forward!(self, gl => gl.create_program())
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        forward!(self, gl => gl.attach_shader(program, shader))
    }

    fn detach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        forward!(self, gl => gl.detach_shader(program, shader))
    }

    fn link_program(&self, program: &WebGlProgram) {
        forward!(self, gl => gl.link_program(program))
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        forward!(self, gl => gl.get_program_parameter(program, Gl::LINK_STATUS))
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        forward!(self, gl => gl.get_program_info_log(program))
    }

    fn active_uniform_count(&self, program: &WebGlProgram) -> u32 {
        forward!(self, gl => gl.get_program_parameter(program, Gl::ACTIVE_UNIFORMS))
            .as_f64()
            .map(|count| count as u32)
            .unwrap_or(0)
    }

    fn active_attribute_count(&self, program: &WebGlProgram) -> u32 {
        forward!(self, gl => gl.get_program_parameter(program, Gl::ACTIVE_ATTRIBUTES))
            .as_f64()
            .map(|count| count as u32)
            .unwrap_or(0)
    }

    fn get_active_uniform(&self, program: &WebGlProgram, index: u32) -> Option<ActiveInfo> {
        forward!(self, gl => gl.get_active_uniform(program, index)).map(active_info)
    }

    fn get_active_attrib(&self, program: &WebGlProgram, index: u32) -> Option<ActiveInfo> {
        forward!(self, gl => gl.get_active_attrib(program, index)).map(active_info)
    }

    fn get_uniform_location(
        &self,
        program: &WebGlProgram,
        name: &str,
    ) -> Option<WebGlUniformLocation> {
        forward!(self, gl => gl.get_uniform_location(program, name))
    }

    fn get_attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        forward!(self, gl => gl.get_attrib_location(program, name))
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        forward!(self, gl => gl.use_program(program))
    }

    fn delete_program(&self, program: Option<&WebGlProgram>) {
        forward!(self, gl => gl.delete_program(program))
    }

    fn uniform_f32v(&self, location: &WebGlUniformLocation, components: u8, data: &[f32]) {
        let location = Some(location);

        match components {
            1 => forward!(self, gl => gl.uniform1fv_with_f32_array(location, data)),
            2 => forward!(self, gl => gl.uniform2fv_with_f32_array(location, data)),
            3 => forward!(self, gl => gl.uniform3fv_with_f32_array(location, data)),
            4 => forward!(self, gl => gl.uniform4fv_with_f32_array(location, data)),
            other => {
                debug_assert!(false, "float uniform upload with {} components", other);
                log::error!("Dropped float uniform upload with {} components", other);
            }
        }
    }

    fn uniform_i32v(&self, location: &WebGlUniformLocation, components: u8, data: &[i32]) {
        let location = Some(location);

        match components {
            1 => forward!(self, gl => gl.uniform1iv_with_i32_array(location, data)),
            2 => forward!(self, gl => gl.uniform2iv_with_i32_array(location, data)),
            3 => forward!(self, gl => gl.uniform3iv_with_i32_array(location, data)),
            4 => forward!(self, gl => gl.uniform4iv_with_i32_array(location, data)),
            other => {
                debug_assert!(false, "integer uniform upload with {} components", other);
                log::error!("Dropped integer uniform upload with {} components", other);
            }
        }
    }

    fn uniform_matrix_f32v(&self, location: &WebGlUniformLocation, dimension: u8, data: &[f32]) {
        let location = Some(location);

        match dimension {
            2 => forward!(self, gl => gl.uniform_matrix2fv_with_f32_array(location, false, data)),
            3 => forward!(self, gl => gl.uniform_matrix3fv_with_f32_array(location, false, data)),
            4 => forward!(self, gl => gl.uniform_matrix4fv_with_f32_array(location, false, data)),
            other => {
                debug_assert!(false, "matrix uniform upload of dimension {}", other);
                log::error!("Dropped matrix uniform upload of dimension {}", other);
            }
        }
    }

    fn create_texture(&self) -> Option<WebGlTexture> {
        forward!(self, gl => gl.create_texture())
    }

    fn active_texture(&self, unit: u32) {
        forward!(self, gl => gl.active_texture(unit))
    }

    fn bind_texture(&self, target: u32, texture: Option<&WebGlTexture>) {
        forward!(self, gl => gl.bind_texture(target, texture))
    }

    fn pixel_store_i(&self, parameter: u32, value: i32) {
        forward!(self, gl => gl.pixel_storei(parameter, value))
    }

    fn tex_image_2d(
        &self,
        target: u32,
        internal_format: i32,
        format: u32,
        data_type: u32,
        source: TextureSource<HtmlImageElement>,
    ) -> Result<(), GlError> {
        let result = match source {
            // The two bindings name the image overload differently.
            TextureSource::Image(image) => match self {
                WebContext::WebGl1(gl) => gl.tex_image_2d_with_u32_and_u32_and_image(
                    target,
                    0,
                    internal_format,
                    format,
                    data_type,
                    image,
                ),
                WebContext::WebGl2(gl) => gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                    target,
                    0,
                    internal_format,
                    format,
                    data_type,
                    image,
                ),
            },
            TextureSource::Pixels {
                width,
                height,
                data,
            } => forward!(self, gl => gl
                .tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
                    target,
                    0,
                    internal_format,
                    width,
                    height,
                    0,
                    format,
                    data_type,
                    data,
                )),
        };

        result.map_err(|err| host_call_error("texImage2D", err))
    }

    fn tex_parameter_i(&self, target: u32, parameter: u32, value: i32) {
        forward!(self, gl => gl.tex_parameteri(target, parameter, value))
    }

    fn generate_mipmap(&self, target: u32) {
        forward!(self, gl => gl.generate_mipmap(target))
    }

    fn delete_texture(&self, texture: Option<&WebGlTexture>) {
        forward!(self, gl => gl.delete_texture(texture))
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        forward!(self, gl => gl.enable_vertex_attrib_array(index))
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
        forward!(self, gl => gl.vertex_attrib_pointer_with_i32(
            index, size, data_type, normalized, stride, offset,
        ))
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        forward!(self, gl => gl.clear_color(red, green, blue, alpha))
    }

    fn clear(&self, mask: u32) {
        forward!(self, gl => gl.clear(mask))
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        forward!(self, gl => gl.viewport(x, y, width, height))
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        forward!(self, gl => gl.draw_arrays(mode, first, count))
    }

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: i32) {
        forward!(self, gl => gl.draw_elements_with_i32(mode, count, index_type, offset))
    }
}

impl VertexArrayFunctions<WebGlVertexArrayObject> for OesVertexArrayObject {
    fn create_vertex_array(&self) -> Option<WebGlVertexArrayObject> {
        self.create_vertex_array_oes()
    }

    fn bind_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) {
        self.bind_vertex_array_oes(vertex_array)
    }

    fn delete_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) {
        self.delete_vertex_array_oes(vertex_array)
    }

    fn is_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) -> bool {
        self.is_vertex_array_oes(vertex_array)
    }
}

impl VertexArrayFunctions<WebGlVertexArrayObject> for Gl {
    fn create_vertex_array(&self) -> Option<WebGlVertexArrayObject> {
        Gl::create_vertex_array(self)
    }

    fn bind_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) {
        Gl::bind_vertex_array(self, vertex_array)
    }

    fn delete_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) {
        Gl::delete_vertex_array(self, vertex_array)
    }

    fn is_vertex_array(&self, vertex_array: Option<&WebGlVertexArrayObject>) -> bool {
        Gl::is_vertex_array(self, vertex_array)
    }
}

impl InstancedArraysFunctions for AngleInstancedArrays {
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        self.vertex_attrib_divisor_angle(index, divisor)
    }

    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instance_count: i32) {
        self.draw_arrays_instanced_angle(mode, first, count, instance_count)
    }

    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: i32,
        instance_count: i32,
    ) {
        self.draw_elements_instanced_angle_with_i32(mode, count, index_type, offset, instance_count)
    }
}

impl InstancedArraysFunctions for Gl {
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        Gl::vertex_attrib_divisor(self, index, divisor)
    }

    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instance_count: i32) {
        Gl::draw_arrays_instanced(self, mode, first, count, instance_count)
    }

    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: i32,
        instance_count: i32,
    ) {
        Gl::draw_elements_instanced_with_i32(self, mode, count, index_type, offset, instance_count)
    }
}
