//! Functionality that is an extension on WebGL 1.0 and core functionality on WebGL 2.0.
//!
//! The registry is filled once, when a [GlWrapper](crate::GlWrapper) is created: every known
//! extension is requested from the host by its exact name. Code that needs a capability asks the
//! registry for it afterwards, which fails with [GlError::MissingExtension] when the capability
//! was never loaded:
//!
//! ```no_run
//! # use webgl_handles::{GlWrapper, runtime::WebContext};
//! # fn wrapper(gl: &GlWrapper<WebContext>) -> Result<(), webgl_handles::GlError> {
//! let vertex_arrays = gl.extensions().vertex_array()?;
//! let vao = vertex_arrays.create_vertex_array();
//! # Ok(())
//! # }
//! ```
use std::fmt;
use std::rc::Rc;

use fnv::FnvHashMap;

use crate::error::GlError;
use crate::runtime::{GlVersion, HostContext};

pub mod instanced_arrays;
pub use self::instanced_arrays::InstancedArraysFunctions;

pub mod vertex_array_object;
pub use self::vertex_array_object::VertexArrayFunctions;

/// The names of all extensions that are requested when the registry is loaded.
pub const KNOWN_EXTENSIONS: [&str; 2] = [vertex_array_object::NAME, instanced_arrays::NAME];

/// The function set a host returns for a known extension name.
pub enum ExtensionFunctions<V> {
    VertexArray(Rc<dyn VertexArrayFunctions<V>>),
    InstancedArrays(Rc<dyn InstancedArraysFunctions>),
}

impl<V> Clone for ExtensionFunctions<V> {
    fn clone(&self) -> Self {
        match self {
            ExtensionFunctions::VertexArray(functions) => {
                ExtensionFunctions::VertexArray(functions.clone())
            }
            ExtensionFunctions::InstancedArrays(functions) => {
                ExtensionFunctions::InstancedArrays(functions.clone())
            }
        }
    }
}

impl<V> fmt::Debug for ExtensionFunctions<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtensionFunctions::VertexArray(_) => f.write_str("VertexArray"),
            ExtensionFunctions::InstancedArrays(_) => f.write_str("InstancedArrays"),
        }
    }
}

/// Whether a capability is provided by a real extension object or by the context itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExtensionSource {
    Core,
    Extension,
}

struct LoadedExtension<V> {
    source: ExtensionSource,
    functions: ExtensionFunctions<V>,
}

/// The capabilities that were successfully loaded for a context.
pub struct Extensions<V> {
    loaded: FnvHashMap<&'static str, LoadedExtension<V>>,
}

impl<V> Extensions<V> {
    /// Requests every name in [KNOWN_EXTENSIONS] from `host`, exactly once each.
    pub fn load<H>(host: &H) -> Self
    where
        H: HostContext<VertexArray = V>,
    {
        let source = match host.version() {
            GlVersion::WebGl1 => ExtensionSource::Extension,
            GlVersion::WebGl2 => ExtensionSource::Core,
        };

        let mut loaded = FnvHashMap::default();

        for &name in KNOWN_EXTENSIONS.iter() {
            match host.get_extension(name) {
                Some(functions) => {
                    log::info!("Loaded `{}` ({:?})", name, source);

                    loaded.insert(name, LoadedExtension { source, functions });
                }
                None => log::debug!("Extension `{}` is not available", name),
            }
        }

        Extensions { loaded }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Returns the functions loaded under `name`, or [GlError::MissingExtension] naming it.
    pub fn get(&self, name: &str) -> Result<&ExtensionFunctions<V>, GlError> {
        self.loaded
            .get(name)
            .map(|extension| &extension.functions)
            .ok_or_else(|| GlError::MissingExtension(name.to_string()))
    }

    pub fn vertex_array(&self) -> Result<Rc<dyn VertexArrayFunctions<V>>, GlError> {
        match self.get(vertex_array_object::NAME)? {
            ExtensionFunctions::VertexArray(functions) => Ok(functions.clone()),
            _ => Err(GlError::MissingExtension(
                vertex_array_object::NAME.to_string(),
            )),
        }
    }

    pub fn instanced_arrays(&self) -> Result<Rc<dyn InstancedArraysFunctions>, GlError> {
        match self.get(instanced_arrays::NAME)? {
            ExtensionFunctions::InstancedArrays(functions) => Ok(functions.clone()),
            _ => Err(GlError::MissingExtension(instanced_arrays::NAME.to_string())),
        }
    }

    /// The names of the capabilities served by actual extension objects, in alphabetical order.
    ///
    /// Capabilities that are core functionality of the context are not included.
    pub fn loaded_extensions(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .loaded
            .iter()
            .filter(|(_, extension)| extension.source == ExtensionSource::Extension)
            .map(|(name, _)| *name)
            .collect();

        names.sort();

        names
    }
}
