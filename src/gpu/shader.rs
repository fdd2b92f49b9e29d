//! WGSL for the presenter's single fullscreen pass.
//!
//! Layers, back to front: the day backdrop with a vertical fade, the particle
//! canvas (straight alpha), the card panel with its optional golden glow, and
//! the navigation curtain.

pub const PRESENT_SHADER: &str = r#"
struct Uniforms {
    background: vec4<f32>,
    accent: vec4<f32>,
    card: vec4<f32>,
    viewport: vec2<f32>,
    time: f32,
    glow: f32,
    curtain: f32,
    squeeze: f32,
    shake: f32,
    _pad: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0)
var layer: texture_2d<f32>;
@group(0) @binding(1)
var layer_sampler: sampler;
@group(0) @binding(2)
var<uniform> u: Uniforms;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    var uvs = array<vec2<f32>, 3>(
        vec2<f32>(0.0, 1.0),
        vec2<f32>(2.0, 1.0),
        vec2<f32>(0.0, -1.0),
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(positions[vertex_index], 0.0, 1.0);
    out.uv = uvs[vertex_index];
    return out;
}

fn rounded_box(p: vec2<f32>, half_size: vec2<f32>, radius: f32) -> f32 {
    let q = abs(p) - half_size + vec2<f32>(radius);
    return length(max(q, vec2<f32>(0.0))) + min(max(q.x, q.y), 0.0) - radius;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let px = in.uv * u.viewport;
    var color = u.background.rgb * mix(1.0, 0.55, in.uv.y);

    let layer_color = textureSample(layer, layer_sampler, in.uv);
    color = mix(color, layer_color.rgb, layer_color.a);

    let center = (u.card.xy + u.card.zw) * 0.5 + vec2<f32>(u.shake, 0.0);
    let half_size = (u.card.zw - u.card.xy) * 0.5 * u.squeeze;
    let d = rounded_box(px - center, half_size, 24.0);
    let inside = 1.0 - smoothstep(-1.0, 1.0, d);
    let border = 1.0 - smoothstep(0.0, 1.5, abs(d));

    let pulse = 0.75 + 0.25 * sin(u.time * 3.0);
    let halo = u.glow * exp(-max(d, 0.0) / 40.0) * pulse * (1.0 - inside);
    color = mix(color, vec3<f32>(1.0, 0.84, 0.0), halo * 0.6);

    let panel = select(vec3<f32>(1.0), vec3<f32>(0.45, 0.07, 0.2), u.glow > 0.5);
    color = mix(color, panel, inside * 0.12);
    color = mix(color, u.accent.rgb, border * 0.5);

    color = mix(color, vec3<f32>(1.0, 0.945, 0.949), u.curtain);
    return vec4<f32>(color, 1.0);
}
"#;
