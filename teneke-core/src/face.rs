//! Face Rendering
//!
//! Eyes carry `class="eye"`, mouths `class="mouth"`, decorations
//! `class="extra"`. All geometry is an offset from the anchor, multiplied by
//! `anchor.scale`, so the same routine fits every container.

use crate::anchor::FaceAnchor;
use crate::palette::INK;
use crate::svg::{circle, ellipse, line, path, rect};
use crate::svg::{Element, Fragment, PathData};
use crate::traits::ExpressionVariant;

const WHITE: &str = "#FFFFFF";
const SWEAT: &str = "#85C1E9";
const TONGUE: &str = "#E91E63";

/// Anchor-relative coordinate helper.
struct Geo {
    lx: f64,
    rx: f64,
    ey: f64,
    my: f64,
    cx: f64,
    s: f64,
}

impl Geo {
    fn new(anchor: &FaceAnchor) -> Self {
        Self {
            lx: anchor.left_eye_x,
            rx: anchor.right_eye_x,
            ey: anchor.eye_y,
            my: anchor.mouth_y,
            cx: anchor.center_x(),
            s: anchor.scale,
        }
    }

    fn k(&self, v: f64) -> f64 {
        v * self.s
    }

    fn eyes(&self) -> [f64; 2] {
        [self.lx, self.rx]
    }
}

pub fn render_face(expression: ExpressionVariant, anchor: &FaceAnchor) -> Fragment {
    let g = Geo::new(anchor);
    let mut f = Fragment::new();
    match expression {
        ExpressionVariant::Grin => grin(&mut f, &g),
        ExpressionVariant::Neutral => neutral(&mut f, &g),
        ExpressionVariant::CrossEyed => cross_eyed(&mut f, &g),
        ExpressionVariant::Angry => angry(&mut f, &g),
        ExpressionVariant::VisorCool => visor_cool(&mut f, &g),
        ExpressionVariant::Worried => worried(&mut f, &g),
        ExpressionVariant::Sleepy => sleepy(&mut f, &g),
        ExpressionVariant::Excited => excited(&mut f, &g),
    }
    f
}

fn stroke_only(el: Element, g: &Geo, width: f64) -> Element {
    el.fill("none").stroke(INK, g.k(width)).round_caps()
}

/// White eyeballs with pupils offset by `(dx, dy)` toward the inside for the
/// left eye and mirrored for the right one.
fn round_eyes(f: &mut Fragment, g: &Geo, r: f64, pupil_r: f64, dx: f64, dy: f64) {
    for (i, x) in g.eyes().into_iter().enumerate() {
        let mirror = if i == 0 { 1.0 } else { -1.0 };
        f.push(
            circle(x, g.ey, g.k(r))
                .fill(WHITE)
                .stroke(INK, g.k(2.0))
                .class("eye"),
        );
        f.push(
            circle(x + g.k(dx * mirror), g.ey + g.k(dy), g.k(pupil_r))
                .fill(INK)
                .class("pupil"),
        );
    }
}

fn glints(f: &mut Fragment, g: &Geo, dx: f64, dy: f64, r: f64) {
    for x in g.eyes() {
        f.push(
            circle(x + g.k(dx), g.ey + g.k(dy), g.k(r))
                .fill(WHITE)
                .class("glint"),
        );
    }
}

fn grin(f: &mut Fragment, g: &Geo) {
    round_eyes(f, g, 6.5, 3.5, 1.0, 1.0);
    glints(f, g, 1.5, -0.5, 1.2);

    let smile = PathData::new()
        .m(g.cx - g.k(13.0), g.my - g.k(3.0))
        .q(g.cx, g.my + g.k(13.0), g.cx + g.k(13.0), g.my - g.k(3.0))
        .z()
        .build();
    f.push(
        path(smile)
            .fill(WHITE)
            .stroke(INK, g.k(2.5))
            .attr("stroke-linejoin", "round")
            .class("mouth"),
    );
    f.push(
        line(g.cx - g.k(9.0), g.my + g.k(1.5), g.cx + g.k(9.0), g.my + g.k(1.5))
            .stroke(INK, g.k(1.2))
            .class("teeth"),
    );
}

fn neutral(f: &mut Fragment, g: &Geo) {
    round_eyes(f, g, 6.0, 3.2, 0.0, 0.5);
    f.push(
        stroke_only(line(g.cx - g.k(10.0), g.my, g.cx + g.k(10.0), g.my), g, 2.5)
            .class("mouth"),
    );
}

fn cross_eyed(f: &mut Fragment, g: &Geo) {
    round_eyes(f, g, 6.5, 3.0, 3.0, 0.5);

    let wobble = PathData::new()
        .m(g.cx - g.k(11.0), g.my)
        .q(g.cx - g.k(5.5), g.my - g.k(4.0), g.cx, g.my)
        .q(g.cx + g.k(5.5), g.my + g.k(4.0), g.cx + g.k(11.0), g.my)
        .build();
    f.push(stroke_only(path(wobble), g, 2.5).class("mouth"));
}

fn angry(f: &mut Fragment, g: &Geo) {
    round_eyes(f, g, 6.0, 3.0, 0.0, 1.5);

    for (i, x) in g.eyes().into_iter().enumerate() {
        let m = if i == 0 { 1.0 } else { -1.0 };
        f.push(
            stroke_only(
                line(
                    x - g.k(7.0 * m),
                    g.ey - g.k(10.0),
                    x + g.k(6.0 * m),
                    g.ey - g.k(6.0),
                ),
                g,
                3.0,
            )
            .class("extra"),
        );
    }

    let frown = PathData::new()
        .m(g.cx - g.k(11.0), g.my + g.k(5.0))
        .q(g.cx, g.my - g.k(6.0), g.cx + g.k(11.0), g.my + g.k(5.0))
        .build();
    f.push(stroke_only(path(frown), g, 3.0).class("mouth"));
}

fn visor_cool(f: &mut Fragment, g: &Geo) {
    let left = g.lx - g.k(9.0);
    let width = (g.rx - g.lx) + g.k(18.0);
    f.push(
        rect(left, g.ey - g.k(5.0), width, g.k(10.0))
            .num("rx", g.k(3.0))
            .fill(INK)
            .stroke(INK, g.k(1.5))
            .class("eye"),
    );
    f.push(
        line(g.lx - g.k(5.0), g.ey - g.k(2.0), g.lx + g.k(1.0), g.ey - g.k(2.0))
            .stroke(WHITE, g.k(1.5))
            .round_caps()
            .opacity(0.7)
            .class("glint"),
    );

    let smirk = PathData::new()
        .m(g.cx - g.k(8.0), g.my + g.k(2.0))
        .q(g.cx + g.k(4.0), g.my + g.k(3.0), g.cx + g.k(11.0), g.my - g.k(4.0))
        .build();
    f.push(stroke_only(path(smirk), g, 2.5).class("mouth"));
}

fn worried(f: &mut Fragment, g: &Geo) {
    round_eyes(f, g, 6.0, 2.5, 0.0, -1.0);

    for (i, x) in g.eyes().into_iter().enumerate() {
        let m = if i == 0 { 1.0 } else { -1.0 };
        f.push(
            stroke_only(
                line(
                    x - g.k(6.0 * m),
                    g.ey - g.k(8.0),
                    x + g.k(5.0 * m),
                    g.ey - g.k(11.0),
                ),
                g,
                2.5,
            )
            .class("extra"),
        );
    }

    let wobble = PathData::new()
        .m(g.cx - g.k(10.0), g.my + g.k(3.0))
        .q(g.cx - g.k(5.0), g.my - g.k(2.0), g.cx, g.my + g.k(2.0))
        .q(g.cx + g.k(5.0), g.my + g.k(6.0), g.cx + g.k(10.0), g.my + g.k(1.0))
        .build();
    f.push(stroke_only(path(wobble), g, 2.5).class("mouth"));

    let (x, y) = (g.rx + g.k(9.0), g.ey - g.k(6.0));
    let drop = PathData::new()
        .m(x, y - g.k(4.0))
        .q(x + g.k(3.0), y + g.k(1.0), x, y + g.k(2.0))
        .q(x - g.k(3.0), y + g.k(1.0), x, y - g.k(4.0))
        .z()
        .build();
    f.push(
        path(drop)
            .fill(SWEAT)
            .stroke(INK, g.k(1.0))
            .class("extra"),
    );
}

fn sleepy(f: &mut Fragment, g: &Geo) {
    for x in g.eyes() {
        let lid = PathData::new()
            .m(x - g.k(6.0), g.ey)
            .q(x, g.ey + g.k(5.0), x + g.k(6.0), g.ey)
            .build();
        f.push(stroke_only(path(lid), g, 2.5).class("eye"));
    }

    f.push(
        ellipse(g.cx, g.my + g.k(1.0), g.k(3.0), g.k(4.0))
            .fill(INK)
            .class("mouth"),
    );

    // Two "z" marks drifting up and to the right.
    for (ox, oy, size) in [(7.0, -12.0, 5.0), (13.0, -18.0, 3.5)] {
        let (x, y) = (g.rx + g.k(ox), g.ey + g.k(oy));
        let z = PathData::new()
            .m(x, y)
            .l(x + g.k(size), y)
            .l(x, y + g.k(size))
            .l(x + g.k(size), y + g.k(size))
            .build();
        f.push(stroke_only(path(z), g, 1.5).class("extra"));
    }
}

fn excited(f: &mut Fragment, g: &Geo) {
    round_eyes(f, g, 7.5, 4.5, 0.0, 0.0);
    glints(f, g, 1.8, -1.8, 1.6);
    glints(f, g, -1.5, 1.5, 0.8);

    let open = PathData::new()
        .m(g.cx - g.k(12.0), g.my - g.k(2.0))
        .q(g.cx, g.my + g.k(16.0), g.cx + g.k(12.0), g.my - g.k(2.0))
        .z()
        .build();
    f.push(
        path(open)
            .fill(INK)
            .stroke(INK, g.k(2.0))
            .attr("stroke-linejoin", "round")
            .class("mouth"),
    );
    f.push(
        ellipse(g.cx, g.my + g.k(4.5), g.k(5.0), g.k(2.5))
            .fill(TONGUE)
            .class("tongue"),
    );

    // Sparkle ticks off the outer corner of each eye.
    for (i, x) in g.eyes().into_iter().enumerate() {
        let m = if i == 0 { -1.0 } else { 1.0 };
        let (bx, by) = (x + g.k(10.0 * m), g.ey - g.k(10.0));
        f.push(
            stroke_only(line(bx, by, bx + g.k(3.0 * m), by - g.k(3.0)), g, 1.5)
                .class("extra"),
        );
        let tick = line(
            bx + g.k(1.0 * m),
            by + g.k(3.5),
            bx + g.k(4.5 * m),
            by + g.k(3.0),
        );
        f.push(stroke_only(tick, g, 1.5).class("extra"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::anchor_for;
    use crate::traits::ContainerVariant;

    #[test]
    fn test_every_expression_has_eyes_and_mouth() {
        let anchor = anchor_for(ContainerVariant::Classic);
        for e in ExpressionVariant::ALL {
            let frag = render_face(*e, &anchor);
            assert!(frag.count_class("eye") >= 1, "{e}: no eye");
            assert!(frag.count_class("mouth") >= 1, "{e}: no mouth");
            assert!(frag.defs().is_empty(), "{e}: faces declare no defs");
        }
    }

    #[test]
    fn test_face_follows_anchor() {
        let anchor = FaceAnchor {
            eye_y: 40.0,
            mouth_y: 60.0,
            left_eye_x: 30.0,
            right_eye_x: 70.0,
            scale: 1.0,
        };
        let frag = render_face(ExpressionVariant::Neutral, &anchor);
        let eyes: Vec<_> = frag
            .body()
            .iter()
            .filter(|e| e.get("class") == Some("eye"))
            .collect();
        assert_eq!(eyes.len(), 2);
        assert_eq!(eyes[0].get("cx"), Some("30"));
        assert_eq!(eyes[1].get("cx"), Some("70"));
        assert_eq!(eyes[0].get("cy"), Some("40"));
    }

    #[test]
    fn test_scale_shrinks_geometry() {
        let mut anchor = anchor_for(ContainerVariant::Classic);
        anchor.scale = 1.0;
        let big = render_face(ExpressionVariant::Grin, &anchor);
        anchor.scale = 0.5;
        let small = render_face(ExpressionVariant::Grin, &anchor);

        let radius = |f: &Fragment| -> f64 {
            f.body()
                .iter()
                .find(|e| e.get("class") == Some("eye"))
                .and_then(|e| e.get("r"))
                .and_then(|r| r.parse().ok())
                .unwrap_or_default()
        };
        assert_eq!(radius(&big), 6.5);
        assert_eq!(radius(&small), 3.25);
    }

    #[test]
    fn test_cross_eyed_pupils_point_inward() {
        let anchor = anchor_for(ContainerVariant::Classic);
        let frag = render_face(ExpressionVariant::CrossEyed, &anchor);
        let pupils: Vec<f64> = frag
            .body()
            .iter()
            .filter(|e| e.get("class") == Some("pupil"))
            .filter_map(|e| e.get("cx").and_then(|v| v.parse().ok()))
            .collect();
        assert_eq!(pupils, vec![anchor.left_eye_x + 3.0, anchor.right_eye_x - 3.0]);
    }
}
