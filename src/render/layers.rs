use super::helpers::{self, LayerDesc, ADDITIVE};
use crate::core::particles::TreePoint;
use crate::core::snow::SnowFlake;
use crate::core::star::{MeshVertex, StarGeometry};
use std::ops::Range;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) tree_model: [[f32; 4]; 4],
    pub(crate) star_model: [[f32; 4]; 4],
    pub(crate) resolution_time: [f32; 4],
    pub(crate) params: [f32; 4],
    pub(crate) fog_color: [f32; 4],
    pub(crate) star_color: [f32; 4],
}

const TREE_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x3];
const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

// corners per billboard quad (two triangles)
const QUAD_VERTICES: u32 = 6;

struct IndexedMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl IndexedMesh {
    fn upload(device: &wgpu::Device, label: &str, vertices: &[MeshVertex], indices: &[u16]) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // index buffers must be a multiple of 4 bytes
        let mut padded = indices.to_vec();
        if padded.len() % 2 == 1 {
            padded.push(0);
        }
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&padded),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices: index_buf,
            index_count: indices.len() as u32,
        }
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Pipelines and buffers for the tree, snow and star.
pub(crate) struct SceneLayers {
    pub(crate) uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    tree_pipeline: wgpu::RenderPipeline,
    snow_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    edges_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,

    pub(crate) tree_buffer: wgpu::Buffer,
    pub(crate) snow_buffer: wgpu::Buffer,
    star_body: IndexedMesh,
    star_glow: IndexedMesh,
    star_edges: wgpu::Buffer,
    star_edge_count: u32,
}

pub(crate) fn create_scene_layers(
    device: &wgpu::Device,
    hdr_format: wgpu::TextureFormat,
    tree: &[TreePoint],
    snow: &[SnowFlake],
    star: &StarGeometry,
) -> SceneLayers {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let tree_layout = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TreePoint>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &TREE_ATTRS,
    }];
    let snow_layout = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SnowFlake>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &POSITION_ATTRS,
    }];
    let mesh_layout = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }];
    let pipeline = |desc: LayerDesc| helpers::make_scene_pipeline(device, &pl, &shader, hdr_format, &desc);

    let star_pipeline = pipeline(LayerDesc {
        label: "star_pipeline",
        vs_entry: "vs_star",
        fs_entry: "fs_star",
        buffers: &mesh_layout,
        topology: wgpu::PrimitiveTopology::TriangleList,
        blend: wgpu::BlendState::REPLACE,
        depth_write: true,
    });
    let tree_pipeline = pipeline(LayerDesc {
        label: "tree_pipeline",
        vs_entry: "vs_tree",
        fs_entry: "fs_tree",
        buffers: &tree_layout,
        topology: wgpu::PrimitiveTopology::TriangleList,
        blend: ADDITIVE,
        depth_write: false,
    });
    let glow_pipeline = pipeline(LayerDesc {
        label: "glow_pipeline",
        vs_entry: "vs_star",
        fs_entry: "fs_star_glow",
        buffers: &mesh_layout,
        topology: wgpu::PrimitiveTopology::TriangleList,
        blend: ADDITIVE,
        depth_write: false,
    });
    let edges_pipeline = pipeline(LayerDesc {
        label: "edges_pipeline",
        vs_entry: "vs_star",
        fs_entry: "fs_star_edges",
        buffers: &mesh_layout,
        topology: wgpu::PrimitiveTopology::LineList,
        blend: wgpu::BlendState::ALPHA_BLENDING,
        depth_write: false,
    });
    let snow_pipeline = pipeline(LayerDesc {
        label: "snow_pipeline",
        vs_entry: "vs_snow",
        fs_entry: "fs_snow",
        buffers: &snow_layout,
        topology: wgpu::PrimitiveTopology::TriangleList,
        blend: ADDITIVE,
        depth_write: false,
    });

    let tree_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("tree_points"),
        contents: bytemuck::cast_slice(tree),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let snow_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("snow_flakes"),
        contents: bytemuck::cast_slice(snow),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let star_edges = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("star_edges"),
        contents: bytemuck::cast_slice(&star.edges),
        usage: wgpu::BufferUsages::VERTEX,
    });

    SceneLayers {
        uniform_buffer,
        bind_group,
        tree_pipeline,
        snow_pipeline,
        star_pipeline,
        edges_pipeline,
        glow_pipeline,
        tree_buffer,
        snow_buffer,
        star_body: IndexedMesh::upload(device, "star_body", &star.body.vertices, &star.body.indices),
        star_glow: IndexedMesh::upload(device, "star_glow", &star.glow.vertices, &star.glow.indices),
        star_edges,
        star_edge_count: star.edges.len() as u32,
    }
}

impl SceneLayers {
    /// Opaque star first, then the blended layers.
    pub(crate) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        tree_range: Range<u32>,
        snow_range: Range<u32>,
    ) {
        rpass.set_bind_group(0, &self.bind_group, &[]);

        rpass.set_pipeline(&self.star_pipeline);
        self.star_body.draw(rpass);

        if !tree_range.is_empty() {
            rpass.set_pipeline(&self.tree_pipeline);
            rpass.set_vertex_buffer(0, self.tree_buffer.slice(..));
            rpass.draw(0..QUAD_VERTICES, tree_range);
        }

        rpass.set_pipeline(&self.glow_pipeline);
        self.star_glow.draw(rpass);

        rpass.set_pipeline(&self.edges_pipeline);
        rpass.set_vertex_buffer(0, self.star_edges.slice(..));
        rpass.draw(0..self.star_edge_count, 0..1);

        if !snow_range.is_empty() {
            rpass.set_pipeline(&self.snow_pipeline);
            rpass.set_vertex_buffer(0, self.snow_buffer.slice(..));
            rpass.draw(0..QUAD_VERTICES, snow_range);
        }
    }
}
