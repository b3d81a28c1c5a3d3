use crate::constants::{CLEAR_COLOR, FOG_DENSITY, FOG_SRGB, TONE_MAPPING_EXPOSURE};
use crate::core::{star, Dirty, Rgb, Scene, TWINKLE_AMPLITUDE};
use web_sys as web;

mod helpers;
mod layers;
mod post;
mod targets;

pub use post::BloomSettings;
use layers::{create_scene_layers, SceneLayers, SceneUniforms};
use post::{PostBindGroups, PostResources};
use targets::{RenderTargets, HDR_FORMAT};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    layers: SceneLayers,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
    fog_color: Rgb,
    star_color: Rgb,
    bloom: BloomSettings,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let layers = create_scene_layers(
            &device,
            HDR_FORMAT,
            scene.tree().points().all(),
            scene.snow().flakes().all(),
            &star::build_star(),
        );

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let post_groups = post::create_bind_groups(
            &device,
            &post,
            &linear_sampler,
            &targets.hdr_view,
            &targets.bloom_a_view,
            &targets.bloom_b_view,
        );

        let params = scene.params();
        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            layers,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
            fog_color: Rgb::from_srgb8(FOG_SRGB[0], FOG_SRGB[1], FOG_SRGB[2]),
            star_color: params.light_color,
            bloom: BloomSettings {
                strength: params.bloom_strength,
                radius: params.bloom_radius,
                threshold: params.bloom_threshold,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        // Recreate offscreen render targets and the bind groups that sample them
        self.targets.recreate(&self.device, width, height);
        self.post_groups = post::create_bind_groups(
            &self.device,
            &self.post,
            &self.linear_sampler,
            &self.targets.hdr_view,
            &self.targets.bloom_a_view,
            &self.targets.bloom_b_view,
        );
        true
    }

    /// Push whatever the scene marked as changed since the last frame.
    fn sync_dirty(&mut self, scene: &Scene, dirty: Dirty) {
        let params = scene.params();
        if dirty.tree_colors {
            self.queue.write_buffer(
                &self.layers.tree_buffer,
                0,
                bytemuck::cast_slice(scene.tree().points().all()),
            );
        }
        if dirty.star_color {
            self.star_color = params.light_color;
        }
        if dirty.bloom {
            self.bloom = BloomSettings {
                strength: params.bloom_strength,
                radius: params.bloom_radius,
                threshold: params.bloom_threshold,
            };
        }
    }

    /// Base render into HDR, bloom, then tone-mapped output to the canvas.
    pub fn render(&mut self, scene: &Scene, dirty: Dirty) -> Result<(), wgpu::SurfaceError> {
        self.sync_dirty(scene, dirty);

        let anim = scene.animator();
        let params = scene.params();
        let cam = &anim.camera;
        let uniforms = SceneUniforms {
            view: cam.view_matrix().to_cols_array_2d(),
            proj: cam.projection_matrix().to_cols_array_2d(),
            tree_model: anim.tree_model().to_cols_array_2d(),
            star_model: anim.star_model().to_cols_array_2d(),
            resolution_time: [
                self.width as f32,
                self.height as f32,
                anim.time(),
                params.twinkle_speed,
            ],
            params: [anim.size_scale(), FOG_DENSITY, TWINKLE_AMPLITUDE, 0.0],
            fog_color: self.fog_color.with_alpha(1.0),
            star_color: self.star_color.with_alpha(1.0),
        };
        self.queue
            .write_buffer(&self.layers.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        // only the drawn prefix has to reach the GPU
        let visible_snow = scene.snow().flakes().visible_slice();
        if !visible_snow.is_empty() {
            self.queue
                .write_buffer(&self.layers.snow_buffer, 0, bytemuck::cast_slice(visible_snow));
        }

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.surface.configure(&self.device, &self.config);
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.layers.draw(
                &mut rpass,
                scene.tree().points().draw_range(),
                scene.snow().flakes().draw_range(),
            );
        }

        let (bw, bh) = self.targets.bloom_size;
        post::write_post_uniforms(
            &self.queue,
            &self.post,
            [bw as f32, bh as f32],
            anim.time(),
            TONE_MAPPING_EXPOSURE,
            &self.bloom,
        );

        // bright pass → bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright_from_hdr,
            None,
        );
        // blur horizontal bloom_a → bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h_from_a,
            None,
        );
        // blur vertical bloom_b → bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v_from_b,
            None,
        );
        // composite + tone map to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            CLEAR_COLOR,
            &self.post.composite_pipeline,
            &self.post_groups.composite_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
