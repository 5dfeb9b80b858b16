//! Compositor - One Self-Contained Document
//!
//! palette -> anchor -> container -> face -> shadow group -> defs -> markup.
//! The canvas is always `0 0 100 100`; only `width`/`height` follow the
//! requested pixel size.

use tracing::debug;
use uuid::Uuid;

use crate::anchor::anchor_for;
use crate::container::{render_container, PaintIds};
use crate::face::render_face;
use crate::hashing::sha256_hex;
use crate::palette::{resolve_with_accent, ColorStops};
use crate::svg::{linear_gradient, stop, url, Element};
use crate::traits::AvatarConfig;

pub const CANVAS: f64 = 100.0;
const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Instance id used to namespace every declared id in one document.
///
/// Seeded configs get a stable id derived from the full config, so equal
/// configs produce byte-identical documents. Unseeded configs get a fresh
/// random suffix so several can share a page.
pub fn instance_id(config: &AvatarConfig) -> String {
    let suffix = match &config.seed {
        Some(_) => sha256_hex(identity_key(config).as_bytes())[..12].to_string(),
        None => random_suffix(),
    };
    format!("tk-{suffix}")
}

/// Every trait name plus the seed. The seed goes last so no separator
/// inside it can shift the other fields.
fn identity_key(config: &AvatarConfig) -> String {
    let accent = config.accent_palette.map_or("none", |p| p.as_str());
    format!(
        "{}|{}|{}|{}|{}",
        config.container,
        config.expression,
        config.palette,
        accent,
        config.seed.as_deref().unwrap_or_default(),
    )
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Gradients and filter shared by every container.
fn shared_defs(colors: &ColorStops, paints: &PaintIds) -> Vec<Element> {
    let body = linear_gradient(
        &paints.body,
        true,
        vec![
            stop(0.0, colors.dark),
            stop(0.2, colors.base),
            stop(0.42, colors.light),
            stop(0.55, colors.highlight),
            stop(0.72, colors.base),
            stop(1.0, colors.dark),
        ],
    );
    let cap = linear_gradient(
        &paints.cap,
        false,
        vec![stop(0.0, colors.light), stop(1.0, colors.dark)],
    );
    let shine = linear_gradient(
        &paints.shine,
        false,
        vec![
            stop(0.0, colors.reflection).num("stop-opacity", 0.9),
            stop(1.0, colors.reflection).num("stop-opacity", 0.15),
        ],
    );
    let shadow = Element::new("filter")
        .attr("id", paints.shadow.as_str())
        .attr("x", "-20%")
        .attr("y", "-20%")
        .attr("width", "140%")
        .attr("height", "140%")
        .child(
            Element::new("feDropShadow")
                .attr("dx", "0")
                .attr("dy", "1.5")
                .attr("stdDeviation", "1.2")
                .attr("flood-color", "#000000")
                .attr("flood-opacity", "0.35"),
        );
    vec![body, cap, shine, shadow]
}

/// Render `config` into a document using an explicit instance id.
pub fn compose_with_id(config: &AvatarConfig, size_px: u32, instance_id: &str) -> String {
    let colors = resolve_with_accent(config.palette, config.accent_palette);
    let anchor = anchor_for(config.container);
    let paints = PaintIds::new(instance_id);

    let mut fragment = render_container(config.container, &colors, instance_id);
    fragment.append(render_face(config.expression, &anchor));
    let (own_defs, body) = fragment.into_parts();

    let mut defs = shared_defs(&colors, &paints);
    defs.extend(own_defs);

    let svg = Element::new("svg")
        .attr("xmlns", SVG_NS)
        .attr("width", size_px.to_string())
        .attr("height", size_px.to_string())
        .attr("viewBox", format!("0 0 {CANVAS} {CANVAS}"))
        .attr("role", "img")
        .attr("data-container", config.container.as_str())
        .attr("data-expression", config.expression.as_str())
        .child(Element::new("defs").children(defs))
        .child(
            Element::new("g")
                .attr("filter", url(&paints.shadow))
                .children(body),
        );

    debug!(
        instance_id,
        size_px,
        container = %config.container,
        expression = %config.expression,
        "composed avatar"
    );
    svg.to_string()
}

/// Render `config` at `size_px` x `size_px`.
pub fn compose(config: &AvatarConfig, size_px: u32) -> String {
    compose_with_id(config, size_px, &instance_id(config))
}
