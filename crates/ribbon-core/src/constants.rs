// Shared tuning constants for the ribbon field, used by both web and native frontends.
// Time-based rates are per millisecond of host frame time.

// Field layout
pub const CURVE_COUNT: usize = 12;
pub const VERTEX_COUNT: usize = 180;
pub const HALF_SPAN: f32 = 30.0; // curves span [-HALF_SPAN, HALF_SPAN) on X

// Displacement
pub const AMPLITUDE: f32 = 8.0;
pub const INDEX_NOISE_SCALE: f32 = 0.05; // vertex index -> noise x (vertical sample)
pub const BASE_X_NOISE_SCALE: f32 = 0.05; // base x -> noise x (depth sample)
pub const DEPTH_SAMPLE_SHIFT: f32 = 97.31; // keeps the depth sample away from the vertical one

// Per-curve animation speed band: (r + SPEED_FLOOR) * SPEED_SCALE for r in [0, 1)
pub const SPEED_FLOOR: f32 = 0.1;
pub const SPEED_SCALE: f32 = 0.0002;

// Scene rotation about X (radians per ms since start)
pub const ROTATION_RATE: f32 = 0.0003;

// Pointer-driven offset velocity
pub const VELOCITY_STEP: f32 = 0.001;
pub const VELOCITY_MAX: f32 = 0.07;
pub const OFFSET_FLOOR: f32 = 0.0;

// Colour
pub const HUE_SEED_MIN: f32 = 180.0;
pub const HUE_SEED_SPAN: f32 = 80.0;
pub const HUE_PER_VERTEX: f32 = 0.6; // degrees
pub const HUE_PER_OFFSET: f32 = 10.0; // degrees per unit of offset
pub const SATURATION: f32 = 0.7;
pub const LIGHTNESS: f32 = 0.7;
pub const COLOR_REFRESH_MS: f64 = 100.0;

// Camera
pub const CAMERA_Z: f32 = 60.0;
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 1.0;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Surface
pub const MAX_PIXEL_RATIO: f32 = 2.0;
pub const MSAA_SAMPLES: u32 = 4;
pub const CLEAR_RGB: [f32; 3] = [0.0, 0.0, 0.0];
