use crate::camera::{Camera, Viewport};
use crate::color::shifted_hue;
use crate::config::{ColorRefreshPolicy, FieldConfig};
use crate::curve::{taper, Curve};
use crate::error::FieldResult;
use crate::interaction::Interaction;
use crate::noise::NoiseField;
use crate::surface::FrameView;
use rand::prelude::*;

/// Which GPU-side buffers need re-uploading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub positions: bool,
    pub colors: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    pub frame: u64,
    pub dt_ms: f64,
    pub color_refreshed: bool,
    pub offset: f32,
    pub velocity: f32,
}

/// Per-instance animation state: curves, noise, pointer interaction and timing.
pub struct Animation {
    config: FieldConfig,
    noise: NoiseField,
    curves: Vec<Curve>,
    interaction: Interaction,
    camera: Camera,
    viewport: Viewport,
    start_ms: Option<f64>,
    prev_frame_ms: Option<f64>,
    last_color_ms: f64,
    rotation_x: f32,
    dirty: DirtyFlags,
    frames: u64,
}

impl Animation {
    pub fn new(config: FieldConfig, viewport: Viewport) -> FieldResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let noise = NoiseField::new(rng.gen());
        let curves = (0..config.curve_count)
            .map(|i| Curve::new(i, &config, &mut rng))
            .collect();
        let interaction = Interaction::new(&config);
        Ok(Self {
            camera: Camera::for_viewport(&viewport),
            viewport,
            noise,
            curves,
            interaction,
            config,
            start_ms: None,
            prev_frame_ms: None,
            last_color_ms: 0.0,
            rotation_x: 0.0,
            // First draw uploads everything.
            dirty: DirtyFlags {
                positions: true,
                colors: true,
            },
            frames: 0,
        })
    }

    /// Advance the field to host time `now_ms`.
    ///
    /// Displacement uses the offset accumulated up to the previous frame; the
    /// interaction step runs last so this frame's pointer state feeds the next.
    pub fn advance(&mut self, now_ms: f64) -> FrameStats {
        let start = *self.start_ms.get_or_insert(now_ms);
        let dt_ms = self.prev_frame_ms.map(|p| now_ms - p).unwrap_or(0.0);
        self.prev_frame_ms = Some(now_ms);
        self.frames += 1;

        self.displace(now_ms);
        self.rotation_x = ((now_ms - start) * self.config.rotation_rate as f64) as f32;

        let color_refreshed = self.should_refresh_colors(now_ms);
        if color_refreshed {
            self.refresh_colors();
            self.last_color_ms = now_ms;
            log::trace!("[field] colour refresh at {:.1}ms", now_ms);
        }

        self.interaction.step();

        FrameStats {
            frame: self.frames,
            dt_ms,
            color_refreshed,
            offset: self.interaction.offset(),
            velocity: self.interaction.velocity(),
        }
    }

    fn displace(&mut self, now_ms: f64) {
        let cfg = &self.config;
        let noise = &self.noise;
        let offset = self.interaction.offset();
        for (i, curve) in self.curves.iter_mut().enumerate() {
            let t = (now_ms * curve.speed() as f64) as f32;
            let fi = i as f32;
            curve.displace(|j, x| {
                let k = taper(x, cfg.half_span) * cfg.amplitude;
                let y = noise.sample(j as f32 * cfg.index_noise_scale + fi - offset, t);
                let z = noise.sample(x * cfg.base_x_noise_scale + fi + cfg.depth_sample_shift, t);
                (y * k, z * k)
            });
        }
        self.dirty.positions = true;
    }

    fn should_refresh_colors(&self, now_ms: f64) -> bool {
        let due = now_ms - self.last_color_ms > self.config.color_refresh_ms;
        match self.config.color_policy {
            ColorRefreshPolicy::WhilePressed => due && self.interaction.pressed(),
            ColorRefreshPolicy::Always => due,
        }
    }

    fn refresh_colors(&mut self) {
        let offset = self.interaction.offset();
        for curve in &mut self.curves {
            curve.recolor(shifted_hue(curve.hue_seed(), offset));
        }
        self.dirty.colors = true;
    }

    pub fn press(&mut self) {
        self.interaction.press();
    }

    pub fn release(&mut self) {
        self.interaction.release();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            curves: &self.curves,
            camera: &self.camera,
            rotation_x: self.rotation_x,
            dirty: self.dirty,
        }
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::default();
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }
}
