use fnv::FnvHashMap;

use crate::buffer::GlBuffer;
use crate::error::GlError;
use crate::info::matrix_dimension;
use crate::program::GlProgram;
use crate::runtime::HostContext;
use crate::vertex_array::GlVertexArray;

/// Where the data for one vertex attribute is read from.
pub struct LayoutConfig<'a, H>
where
    H: HostContext,
{
    pub attribute_name: String,
    pub buffer: &'a GlBuffer<H>,
    pub normalized: bool,
    /// The distance in bytes between the starts of two consecutive vertices.
    pub stride: i32,
    /// The byte offset of the first component of the attribute.
    pub offset: i32,
}

impl<'a, H> LayoutConfig<'a, H>
where
    H: HostContext,
{
    pub fn new(attribute_name: &str, buffer: &'a GlBuffer<H>, stride: i32, offset: i32) -> Self {
        LayoutConfig {
            attribute_name: attribute_name.to_string(),
            buffer,
            normalized: false,
            stride,
            offset,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalized = true;

        self
    }
}

/// Maps attribute names to the buffers their data is read from.
///
/// The component count and type of each attribute are taken from the program that is
/// [configured](GlBufferLayout::configure), so a layout only describes where data lives:
///
/// ```no_run
/// # use webgl_handles::*;
/// # use webgl_handles::runtime::WebContext;
/// # fn setup(
/// #     vao: &GlVertexArray<WebContext>,
/// #     program: &GlProgram<WebContext>,
/// #     vbo: &GlBuffer<WebContext>,
/// # ) -> Result<(), GlError> {
/// let mut layout = GlBufferLayout::new();
///
/// layout.set_attribute(vec![
///     LayoutConfig::new("a_position", vbo, 20, 0),
///     LayoutConfig::new("a_uv", vbo, 20, 12),
/// ]);
///
/// layout.configure(vao, program)?;
/// # Ok(())
/// # }
/// ```
pub struct GlBufferLayout<'a, H>
where
    H: HostContext,
{
    configs: FnvHashMap<String, LayoutConfig<'a, H>>,
}

impl<'a, H> GlBufferLayout<'a, H>
where
    H: HostContext,
{
    pub fn new() -> Self {
        GlBufferLayout {
            configs: FnvHashMap::default(),
        }
    }

    /// Adds the `configs`, replacing earlier configs for the same attribute names.
    pub fn set_attribute<I>(&mut self, configs: I)
    where
        I: IntoIterator<Item = LayoutConfig<'a, H>>,
    {
        for config in configs {
            self.configs.insert(config.attribute_name.clone(), config);
        }
    }

    pub fn config(&self, attribute_name: &str) -> Option<&LayoutConfig<'a, H>> {
        self.configs.get(attribute_name)
    }

    /// Sets up every active attribute of `program` in `vao`.
    ///
    /// Fails with [GlError::AttributeNotInLayout] without touching `vao` when the layout has no
    /// config for one of the attributes. Attributes are set up in order of their location.
    ///
    /// A matrix attribute is read as one vector attribute per column, at consecutive locations
    /// starting at its own; the columns follow each other in the buffer, starting at the
    /// config's offset.
    pub fn configure(
        &self,
        vao: &GlVertexArray<H>,
        program: &GlProgram<H>,
    ) -> Result<(), GlError> {
        let mut attributes = Vec::with_capacity(program.attributes().len());

        for (name, info) in program.attributes() {
            let config = self
                .configs
                .get(name)
                .ok_or_else(|| GlError::AttributeNotInLayout(name.clone()))?;

            attributes.push((info, config));
        }

        attributes.sort_by_key(|(info, _)| info.location);

        for (info, config) in attributes {
            let (columns, components) = match matrix_dimension(info.gl_type) {
                Some(dimension) => (u32::from(dimension), i32::from(dimension)),
                None => (1, info.element_size as i32),
            };

            let column_bytes = components * info.element_type.size_in_bytes();

            for column in 0..columns {
                vao.set_attribute(
                    info.location + column,
                    config.buffer,
                    components,
                    info.element_type,
                    config.normalized,
                    config.stride,
                    config.offset + column as i32 * column_bytes,
                )?;
            }
        }

        Ok(())
    }
}

impl<H> Default for GlBufferLayout<'_, H>
where
    H: HostContext,
{
    fn default() -> Self {
        GlBufferLayout::new()
    }
}
