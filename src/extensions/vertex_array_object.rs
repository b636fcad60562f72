//! Vertex array objects: `OES_vertex_array_object` on WebGL 1.0, core functionality on WebGL 2.0.

/// The exact name under which the capability is requested from the host.
pub const NAME: &str = "OES_vertex_array_object";

/// Vertex array object functions with their vendor suffix removed, so that WebGL 1.0 extension
/// objects and WebGL 2.0 contexts expose the same method set.
pub trait VertexArrayFunctions<V> {
    fn create_vertex_array(&self) -> Option<V>;

    fn bind_vertex_array(&self, vertex_array: Option<&V>);

    fn delete_vertex_array(&self, vertex_array: Option<&V>);

    fn is_vertex_array(&self, vertex_array: Option<&V>) -> bool;
}
