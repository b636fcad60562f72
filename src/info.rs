//! Reflection records for the active uniforms and attributes of a linked program.
//!
//! The host reports the type of a uniform or attribute as a single GL enum value that combines
//! the element type with the number of components (`FLOAT_VEC3` is three `FLOAT` components).
//! [element_size] and [element_type] split such a value into its two parts.
use web_sys::WebGl2RenderingContext as Gl;

use crate::error::GlError;
use crate::runtime::ActiveInfo;

/// A scalar GL data type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DataType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
    Bool,
}

impl DataType {
    pub fn gl_id(&self) -> u32 {
        match self {
            DataType::Byte => Gl::BYTE,
            DataType::UnsignedByte => Gl::UNSIGNED_BYTE,
            DataType::Short => Gl::SHORT,
            DataType::UnsignedShort => Gl::UNSIGNED_SHORT,
            DataType::Int => Gl::INT,
            DataType::UnsignedInt => Gl::UNSIGNED_INT,
            DataType::Float => Gl::FLOAT,
            DataType::Bool => Gl::BOOL,
        }
    }

    /// The size of one component of this type in vertex data.
    pub fn size_in_bytes(&self) -> i32 {
        match self {
            DataType::Byte | DataType::UnsignedByte => 1,
            DataType::Short | DataType::UnsignedShort => 2,
            DataType::Int | DataType::UnsignedInt | DataType::Float | DataType::Bool => 4,
        }
    }

    pub fn from_gl_id(id: u32) -> Option<Self> {
        match id {
            Gl::BYTE => Some(DataType::Byte),
            Gl::UNSIGNED_BYTE => Some(DataType::UnsignedByte),
            Gl::SHORT => Some(DataType::Short),
            Gl::UNSIGNED_SHORT => Some(DataType::UnsignedShort),
            Gl::INT => Some(DataType::Int),
            Gl::UNSIGNED_INT => Some(DataType::UnsignedInt),
            Gl::FLOAT => Some(DataType::Float),
            Gl::BOOL => Some(DataType::Bool),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SamplerType {
    Sampler2D,
    SamplerCube,
}

/// The type of a single component of a uniform or attribute.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ElementType {
    Data(DataType),
    Sampler(SamplerType),
}

/// Returns the number of components in one element of `gl_type`.
pub fn element_size(gl_type: u32) -> Result<u32, GlError> {
    match gl_type {
        Gl::FLOAT_VEC2 | Gl::INT_VEC2 | Gl::BOOL_VEC2 => Ok(2),
        Gl::FLOAT_VEC3 | Gl::INT_VEC3 | Gl::BOOL_VEC3 => Ok(3),
        Gl::FLOAT_VEC4 | Gl::INT_VEC4 | Gl::BOOL_VEC4 | Gl::FLOAT_MAT2 => Ok(4),
        Gl::FLOAT_MAT3 => Ok(9),
        Gl::FLOAT_MAT4 => Ok(16),
        Gl::SAMPLER_2D | Gl::SAMPLER_CUBE => Ok(1),
        other if DataType::from_gl_id(other).is_some() => Ok(1),
        other => Err(GlError::UnknownGlType(other)),
    }
}

/// Returns the type of the components that make up `gl_type`.
pub fn element_type(gl_type: u32) -> Result<ElementType, GlError> {
    match gl_type {
        Gl::FLOAT_VEC2
        | Gl::FLOAT_VEC3
        | Gl::FLOAT_VEC4
        | Gl::FLOAT_MAT2
        | Gl::FLOAT_MAT3
        | Gl::FLOAT_MAT4 => Ok(ElementType::Data(DataType::Float)),
        Gl::BOOL_VEC2 | Gl::BOOL_VEC3 | Gl::BOOL_VEC4 => Ok(ElementType::Data(DataType::Bool)),
        Gl::INT_VEC2 | Gl::INT_VEC3 | Gl::INT_VEC4 => Ok(ElementType::Data(DataType::Int)),
        Gl::SAMPLER_2D => Ok(ElementType::Sampler(SamplerType::Sampler2D)),
        Gl::SAMPLER_CUBE => Ok(ElementType::Sampler(SamplerType::SamplerCube)),
        other => DataType::from_gl_id(other)
            .map(ElementType::Data)
            .ok_or(GlError::UnknownGlType(other)),
    }
}

/// The number of columns (and rows) of `gl_type` if it is one of the square float matrix types.
pub(crate) fn matrix_dimension(gl_type: u32) -> Option<u8> {
    match gl_type {
        Gl::FLOAT_MAT2 => Some(2),
        Gl::FLOAT_MAT3 => Some(3),
        Gl::FLOAT_MAT4 => Some(4),
        _ => None,
    }
}

/// Strips the `[0]` suffix the host appends to the names of array uniforms and attributes.
pub(crate) fn base_name(name: &str) -> &str {
    if name.ends_with("[0]") {
        &name[..name.len() - 3]
    } else {
        name
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct UniformInfo<L> {
    pub name: String,
    /// The array length of the uniform, `1` for non-array uniforms.
    pub size: i32,
    pub gl_type: u32,
    pub element_size: u32,
    pub element_type: ElementType,
    pub location: L,
}

impl<L> UniformInfo<L> {
    pub fn new(info: ActiveInfo, location: L) -> Result<Self, GlError> {
        let element_size = element_size(info.gl_type)?;
        let element_type = element_type(info.gl_type)?;

        Ok(UniformInfo {
            name: info.name,
            size: info.size,
            gl_type: info.gl_type,
            element_size,
            element_type,
            location,
        })
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct AttributeInfo {
    pub name: String,
    pub size: i32,
    pub gl_type: u32,
    pub element_size: u32,
    pub element_type: DataType,
    pub location: u32,
}

impl AttributeInfo {
    /// Fails with [GlError::InvalidAttributeType] when the element type is not a scalar data
    /// type.
    pub fn new(info: ActiveInfo, location: u32) -> Result<Self, GlError> {
        let element_size = element_size(info.gl_type)?;

        let element_type = match element_type(info.gl_type)? {
            ElementType::Data(data_type) => data_type,
            ElementType::Sampler(_) => return Err(GlError::InvalidAttributeType(info.gl_type)),
        };

        Ok(AttributeInfo {
            name: info.name,
            size: info.size,
            gl_type: info.gl_type,
            element_size,
            element_type,
            location,
        })
    }
}
