// src/wgpu_utils/uniform_buffer.rs - Typed uniform and geometry buffers
use std::marker::PhantomData;

fn short_type_name<Content>() -> &'static str {
    let type_name = std::any::type_name::<Content>();
    let pos = type_name.rfind(':').unwrap_or(0);
    if pos > 0 {
        &type_name[(pos + 1)..]
    } else {
        type_name
    }
}

/// Uniform buffer holding a single `Content` value
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Create buffer with initial data
    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: true,
        });

        let mapped_memory = buffer.slice(..);
        mapped_memory
            .get_mapped_range_mut()
            .clone_from_slice(bytemuck::bytes_of(initial_content));
        buffer.unmap();

        UniformBuffer {
            buffer,
            content_type: PhantomData,
        }
    }

    /// Get binding resource
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Vertex or index buffer filled once from a slice
pub struct GeometryBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    len: usize,
}

impl<Content: bytemuck::Pod> GeometryBuffer<Content> {
    /// Create a buffer with `usage` (VERTEX or INDEX) holding `data`
    pub fn new_with_data(device: &wgpu::Device, data: &[Content], usage: wgpu::BufferUsages) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("GeometryBuffer<{}>", short_type_name::<Content>())),
            size: bytes.len() as u64,
            usage,
            mapped_at_creation: true,
        });

        let mapped_memory = buffer.slice(..);
        mapped_memory.get_mapped_range_mut().clone_from_slice(bytes);
        buffer.unmap();

        GeometryBuffer {
            buffer,
            content_type: PhantomData,
            len: data.len(),
        }
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    /// Get current number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
