//! Instanced drawing: `ANGLE_instanced_arrays` on WebGL 1.0, core functionality on WebGL 2.0.

pub const NAME: &str = "ANGLE_instanced_arrays";

pub trait InstancedArraysFunctions {
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32);

    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instance_count: i32);

    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: i32,
        instance_count: i32,
    );
}
