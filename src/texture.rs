use web_sys::WebGl2RenderingContext as Gl;

use crate::bindable::{using_bindables, Bindable};
use crate::disposable::{DependsOnDisposedState, Disposable, DisposedFlag};
use crate::error::GlError;
use crate::runtime::{HostContext, TextureSource};
use crate::wrapper::GlWrapper;

/// The highest texture unit a texture may be assigned to (`TEXTURE31`).
pub const MAX_TEXTURE_UNIT: u32 = 31;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TextureMinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl TextureMinFilter {
    fn gl_id(&self) -> u32 {
        match self {
            TextureMinFilter::Nearest => Gl::NEAREST,
            TextureMinFilter::Linear => Gl::LINEAR,
            TextureMinFilter::NearestMipmapNearest => Gl::NEAREST_MIPMAP_NEAREST,
            TextureMinFilter::LinearMipmapNearest => Gl::LINEAR_MIPMAP_NEAREST,
            TextureMinFilter::NearestMipmapLinear => Gl::NEAREST_MIPMAP_LINEAR,
            TextureMinFilter::LinearMipmapLinear => Gl::LINEAR_MIPMAP_LINEAR,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TextureMagFilter {
    Nearest,
    Linear,
}

impl TextureMagFilter {
    fn gl_id(&self) -> u32 {
        match self {
            TextureMagFilter::Nearest => Gl::NEAREST,
            TextureMagFilter::Linear => Gl::LINEAR,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

impl TextureWrap {
    fn gl_id(&self) -> u32 {
        match self {
            TextureWrap::Repeat => Gl::REPEAT,
            TextureWrap::ClampToEdge => Gl::CLAMP_TO_EDGE,
            TextureWrap::MirroredRepeat => Gl::MIRRORED_REPEAT,
        }
    }
}

/// The layout of the components of a pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PixelFormat {
    Alpha,
    Luminance,
    LuminanceAlpha,
    Rgb,
    Rgba,
}

impl PixelFormat {
    fn gl_id(&self) -> u32 {
        match self {
            PixelFormat::Alpha => Gl::ALPHA,
            PixelFormat::Luminance => Gl::LUMINANCE,
            PixelFormat::LuminanceAlpha => Gl::LUMINANCE_ALPHA,
            PixelFormat::Rgb => Gl::RGB,
            PixelFormat::Rgba => Gl::RGBA,
        }
    }
}

/// The data type of the components of a pixel, or of a packed pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PixelType {
    UnsignedByte,
    UnsignedShort565,
    UnsignedShort4444,
    UnsignedShort5551,
    Float,
}

impl PixelType {
    fn gl_id(&self) -> u32 {
        match self {
            PixelType::UnsignedByte => Gl::UNSIGNED_BYTE,
            PixelType::UnsignedShort565 => Gl::UNSIGNED_SHORT_5_6_5,
            PixelType::UnsignedShort4444 => Gl::UNSIGNED_SHORT_4_4_4_4,
            PixelType::UnsignedShort5551 => Gl::UNSIGNED_SHORT_5_5_5_1,
            PixelType::Float => Gl::FLOAT,
        }
    }
}

/// A 2D texture that is assigned to a fixed texture unit.
///
/// Binding the texture activates its unit and binds the texture to that unit's `TEXTURE_2D`
/// target. All configuration methods bind the texture for the duration of the call.
pub struct GlTexture<H>
where
    H: HostContext,
{
    wrapper: GlWrapper<H>,
    disposed: DisposedFlag,
    unit: u32,
    handle: DependsOnDisposedState<H::Texture>,
}

impl<H> GlTexture<H>
where
    H: HostContext,
{
    /// Creates a texture for texture unit `unit`, which must not exceed [MAX_TEXTURE_UNIT].
    pub fn create(wrapper: &GlWrapper<H>, unit: u32) -> Result<Self, GlError> {
        if unit > MAX_TEXTURE_UNIT {
            return Err(GlError::TextureUnitOutOfRange(unit));
        }

        let texture = wrapper
            .host()
            .create_texture()
            .ok_or_else(|| GlError::CreationFailed {
                object: "texture object",
                code: wrapper.last_error(),
            })?;

        log::debug!("Created texture {:?} on unit {}", texture, unit);

        let disposed = DisposedFlag::new();
        let handle = DependsOnDisposedState::valid_before_disposed(&disposed, texture);

        Ok(GlTexture {
            wrapper: wrapper.clone(),
            disposed,
            unit,
            handle,
        })
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// The wrapper of the context this texture belongs to.
    pub fn wrapper(&self) -> &GlWrapper<H> {
        &self.wrapper
    }

    pub fn handle(&self) -> Result<&H::Texture, GlError> {
        self.handle.get()
    }

    /// Uploads the level 0 image of the texture.
    ///
    /// Rows of pixel data are read without padding (an unpack alignment of 1).
    pub fn set_data(
        &self,
        source: TextureSource<H::Image>,
        format: PixelFormat,
        internal_format: PixelFormat,
        pixel_type: PixelType,
    ) -> Result<(), GlError> {
        using_bindables(&[self], || {
            let host = self.wrapper.host();

            host.pixel_store_i(Gl::UNPACK_ALIGNMENT, 1);
            host.tex_image_2d(
                Gl::TEXTURE_2D,
                internal_format.gl_id() as i32,
                format.gl_id(),
                pixel_type.gl_id(),
                source,
            )
        })
    }

    pub fn set_min_filter(&self, filter: TextureMinFilter) -> Result<(), GlError> {
        self.set_parameter(Gl::TEXTURE_MIN_FILTER, filter.gl_id())
    }

    pub fn set_mag_filter(&self, filter: TextureMagFilter) -> Result<(), GlError> {
        self.set_parameter(Gl::TEXTURE_MAG_FILTER, filter.gl_id())
    }

    pub fn set_filter(
        &self,
        min_filter: TextureMinFilter,
        mag_filter: TextureMagFilter,
    ) -> Result<(), GlError> {
        self.set_min_filter(min_filter)?;
        self.set_mag_filter(mag_filter)
    }

    pub fn set_wrap_s(&self, wrap: TextureWrap) -> Result<(), GlError> {
        self.set_parameter(Gl::TEXTURE_WRAP_S, wrap.gl_id())
    }

    pub fn set_wrap_t(&self, wrap: TextureWrap) -> Result<(), GlError> {
        self.set_parameter(Gl::TEXTURE_WRAP_T, wrap.gl_id())
    }

    pub fn set_wrap(&self, wrap_s: TextureWrap, wrap_t: TextureWrap) -> Result<(), GlError> {
        self.set_wrap_s(wrap_s)?;
        self.set_wrap_t(wrap_t)
    }

    pub fn generate_mipmap(&self) -> Result<(), GlError> {
        using_bindables(&[self], || {
            self.wrapper.host().generate_mipmap(Gl::TEXTURE_2D);

            Ok(())
        })
    }

    fn set_parameter(&self, parameter: u32, value: u32) -> Result<(), GlError> {
        using_bindables(&[self], || {
            self.wrapper
                .host()
                .tex_parameter_i(Gl::TEXTURE_2D, parameter, value as i32);

            Ok(())
        })
    }
}

impl<H> Bindable for GlTexture<H>
where
    H: HostContext,
{
    fn bind(&self) -> Result<(), GlError> {
        let handle = self.handle.get()?;
        let host = self.wrapper.host();

        host.active_texture(Gl::TEXTURE0 + self.unit);
        host.bind_texture(Gl::TEXTURE_2D, Some(handle));

        Ok(())
    }

    fn unbind(&self) {
        let host = self.wrapper.host();

        host.active_texture(Gl::TEXTURE0 + self.unit);
        host.bind_texture(Gl::TEXTURE_2D, None);
    }
}

impl<H> Disposable for GlTexture<H>
where
    H: HostContext,
{
    fn is_disposed(&self) -> bool {
        self.disposed.is_set()
    }

    fn dispose(&self) {
        if let Ok(handle) = self.handle.get() {
            log::debug!("Deleting texture {:?}", handle);

            self.wrapper.host().delete_texture(Some(handle));
            self.disposed.set();
        }
    }
}

impl<H> Drop for GlTexture<H>
where
    H: HostContext,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{Call, RecordingContext, Upload};

    #[test]
    fn test_unit_out_of_range() {
        let gl = GlWrapper::new(RecordingContext::webgl2());

        gl.host().clear_calls();

        let error = GlTexture::create(&gl, 32).err().unwrap();

        assert_eq!(error, GlError::TextureUnitOutOfRange(32));
        assert_eq!(error.to_string(), "Texture unit 32 is out of range");
        assert!(gl.host().calls().is_empty());
        assert!(GlTexture::create(&gl, MAX_TEXTURE_UNIT).is_ok());
    }

    #[test]
    fn test_set_pixels() {
        let gl = GlWrapper::new(RecordingContext::webgl2());
        let texture = GlTexture::create(&gl, 2).unwrap();
        let handle = *texture.handle().unwrap();
        let pixels = [255, 0, 0, 255];

        gl.host().clear_calls();

        texture
            .set_data(
                TextureSource::Pixels {
                    width: 1,
                    height: 1,
                    data: Some(&pixels),
                },
                PixelFormat::Rgba,
                PixelFormat::Rgba,
                PixelType::UnsignedByte,
            )
            .unwrap();

        assert_eq!(
            gl.host().calls(),
            vec![
                Call::ActiveTexture(Gl::TEXTURE2),
                Call::BindTexture(Gl::TEXTURE_2D, Some(handle)),
                Call::PixelStore(Gl::UNPACK_ALIGNMENT, 1),
                Call::TexImage2D(
                    Gl::TEXTURE_2D,
                    Gl::RGBA as i32,
                    Gl::RGBA,
                    Gl::UNSIGNED_BYTE,
                    Upload::Pixels(1, 1, Some(vec![255, 0, 0, 255])),
                ),
                Call::ActiveTexture(Gl::TEXTURE2),
                Call::BindTexture(Gl::TEXTURE_2D, None),
            ]
        );
    }

    #[test]
    fn test_set_image() {
        let gl = GlWrapper::new(RecordingContext::webgl2());
        let texture = GlTexture::create(&gl, 0).unwrap();

        gl.host().clear_calls();

        texture
            .set_data(
                TextureSource::Image("brick.png"),
                PixelFormat::Rgb,
                PixelFormat::Rgb,
                PixelType::UnsignedShort565,
            )
            .unwrap();

        assert!(gl.host().calls().contains(&Call::TexImage2D(
            Gl::TEXTURE_2D,
            Gl::RGB as i32,
            Gl::RGB,
            Gl::UNSIGNED_SHORT_5_6_5,
            Upload::Image("brick.png".to_string()),
        )));
    }

    #[test]
    fn test_parameters() {
        let gl = GlWrapper::new(RecordingContext::webgl2());
        let texture = GlTexture::create(&gl, 0).unwrap();

        texture
            .set_filter(TextureMinFilter::LinearMipmapLinear, TextureMagFilter::Nearest)
            .unwrap();
        texture
            .set_wrap(TextureWrap::ClampToEdge, TextureWrap::MirroredRepeat)
            .unwrap();
        texture.generate_mipmap().unwrap();

        let parameters: Vec<Call> = gl
            .host()
            .calls()
            .into_iter()
            .filter(|call| match call {
                Call::TexParameter(..) | Call::GenerateMipmap(_) => true,
                _ => false,
            })
            .collect();

        assert_eq!(
            parameters,
            vec![
                Call::TexParameter(
                    Gl::TEXTURE_2D,
                    Gl::TEXTURE_MIN_FILTER,
                    Gl::LINEAR_MIPMAP_LINEAR as i32
                ),
                Call::TexParameter(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::NEAREST as i32),
                Call::TexParameter(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::CLAMP_TO_EDGE as i32),
                Call::TexParameter(
                    Gl::TEXTURE_2D,
                    Gl::TEXTURE_WRAP_T,
                    Gl::MIRRORED_REPEAT as i32
                ),
                Call::GenerateMipmap(Gl::TEXTURE_2D),
            ]
        );
    }

    #[test]
    fn test_disposed_texture_is_not_bound() {
        let gl = GlWrapper::new(RecordingContext::webgl2());
        let texture = GlTexture::create(&gl, 1).unwrap();
        let handle = *texture.handle().unwrap();

        texture.dispose();

        assert_eq!(gl.host().count(&Call::DeleteTexture(Some(handle))), 1);

        gl.host().clear_calls();

        assert!(texture.set_wrap_s(TextureWrap::Repeat).is_err());
        assert!(gl.host().calls().is_empty());

        drop(texture);

        assert!(gl.host().calls().is_empty());
    }
}
