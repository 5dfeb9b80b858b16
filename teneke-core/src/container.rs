//! Container Rendering
//!
//! One fixed drawing routine per container variant, on a 0-100 canvas.
//! Every routine emits a body (`class="body"`), a cap or closure
//! (`class="cap"`) and at least one highlight (`class="highlight"`).

use crate::palette::{ColorStops, INK};
use crate::svg::{circle, ellipse, line, linear_gradient, path, radial_gradient, rect, stop, url};
use crate::svg::{Element, Fragment, PathData};
use crate::traits::ContainerVariant;

const SW: f64 = 2.5;
const THIN: f64 = 1.5;

/// Instance-namespaced ids of the paints every container shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintIds {
    pub body: String,
    pub cap: String,
    pub shine: String,
    pub shadow: String,
}

impl PaintIds {
    pub fn new(instance_id: &str) -> Self {
        Self {
            body: format!("body-{instance_id}"),
            cap: format!("cap-{instance_id}"),
            shine: format!("shine-{instance_id}"),
            shadow: format!("shadow-{instance_id}"),
        }
    }
}

pub fn render_container(
    variant: ContainerVariant,
    colors: &ColorStops,
    instance_id: &str,
) -> Fragment {
    let paints = PaintIds::new(instance_id);
    let mut f = Fragment::new();
    match variant {
        ContainerVariant::Classic => classic(&mut f, colors, &paints),
        ContainerVariant::Crushed => crushed(&mut f, colors, &paints),
        ContainerVariant::TallEnergy => tall_energy(&mut f, colors, &paints),
        ContainerVariant::Vintage => vintage(&mut f, colors, &paints),
        ContainerVariant::Handled => handled(&mut f, colors, &paints),
        ContainerVariant::Aerosol => aerosol(&mut f, colors, &paints, instance_id),
        ContainerVariant::Barrel => barrel(&mut f, colors, &paints),
        ContainerVariant::FlatTin => flat_tin(&mut f, colors, &paints),
        ContainerVariant::Bucket => bucket(&mut f, colors, &paints),
        ContainerVariant::Labeled => labeled(&mut f, colors, &paints, instance_id),
        ContainerVariant::Rounded => rounded(&mut f, colors, &paints),
        ContainerVariant::Bottle => bottle(&mut f, colors, &paints),
    }
    f
}

fn body(el: Element, p: &PaintIds) -> Element {
    el.fill(url(&p.body)).stroke(INK, SW).class("body")
}

fn cap(el: Element, p: &PaintIds) -> Element {
    el.fill(url(&p.cap)).stroke(INK, THIN).class("cap")
}

fn shine(el: Element, p: &PaintIds) -> Element {
    el.fill(url(&p.shine)).class("highlight")
}

fn accent(el: Element, c: &ColorStops) -> Element {
    el.fill(c.accent).stroke(INK, THIN).class("accent")
}

/// Ring-pull tab sitting on a top rim.
fn pull_tab(cx: f64, top: f64, c: &ColorStops) -> Element {
    rect(cx - 4.0, top, 8.0, 4.5)
        .num("rx", 2.0)
        .fill(c.accent)
        .stroke(INK, THIN)
        .class("cap")
}

fn classic(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    f.push(ellipse(50.0, 84.0, 20.0, 3.5).fill(c.dark).stroke(INK, THIN));
    f.push(body(rect(30.0, 24.0, 40.0, 60.0).num("rx", 4.0), p));
    f.push(cap(ellipse(50.0, 24.0, 20.0, 4.0), p));
    f.push(pull_tab(50.0, 18.5, c));
    f.push(shine(rect(35.0, 29.0, 4.0, 50.0).num("rx", 2.0), p));
}

fn crushed(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    let outline = PathData::new()
        .m(32.0, 80.0)
        .q(42.0, 86.0, 50.0, 82.0)
        .q(58.0, 86.0, 68.0, 80.0)
        .l(72.0, 40.0)
        .q(62.0, 34.0, 50.0, 38.0)
        .q(38.0, 34.0, 28.0, 40.0)
        .z()
        .build();
    f.push(body(path(outline), p));

    let dented_top = PathData::new()
        .m(28.0, 40.0)
        .q(38.0, 33.0, 50.0, 37.0)
        .q(62.0, 31.0, 72.0, 40.0)
        .q(62.0, 44.0, 50.0, 41.0)
        .q(38.0, 45.0, 28.0, 40.0)
        .z()
        .build();
    f.push(cap(path(dented_top), p));

    let crease = PathData::new()
        .m(31.0, 74.0)
        .l(36.0, 70.0)
        .l(33.5, 64.0)
        .build();
    f.push(
        path(crease)
            .fill("none")
            .stroke(c.dark, THIN)
            .round_caps()
            .class("detail"),
    );

    let streak = PathData::new()
        .m(32.0, 46.0)
        .l(35.0, 45.0)
        .l(33.0, 60.0)
        .l(30.0, 61.0)
        .z()
        .build();
    f.push(shine(path(streak), p));
}

fn tall_energy(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    f.push(body(rect(35.0, 12.0, 30.0, 76.0).num("rx", 3.0), p));
    f.push(cap(ellipse(50.0, 12.0, 15.0, 3.0), p));
    f.push(pull_tab(50.0, 7.5, c));

    let bolt = PathData::new()
        .m(52.0, 66.0)
        .l(46.0, 76.0)
        .l(51.0, 76.0)
        .l(47.0, 86.0)
        .l(56.0, 73.0)
        .l(51.0, 73.0)
        .l(55.0, 66.0)
        .z()
        .build();
    f.push(accent(path(bolt), c).attr("stroke-linejoin", "round"));
    f.push(shine(rect(38.0, 16.0, 3.0, 66.0).num("rx", 1.5), p));
}

fn vintage(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    let shoulder = PathData::new()
        .m(30.0, 37.0)
        .l(42.0, 21.0)
        .l(58.0, 21.0)
        .l(70.0, 37.0)
        .z()
        .build();
    f.push(path(shoulder).fill(url(&p.body)).stroke(INK, SW));
    f.push(body(rect(30.0, 34.0, 40.0, 52.0).num("rx", 3.0), p));
    f.push(cap(rect(41.0, 13.0, 18.0, 8.0).num("rx", 1.5), p));
    for x in [44.0, 47.0, 50.0, 53.0, 56.0] {
        f.push(line(x, 13.5, x, 20.5).stroke(c.dark, 1.0));
    }
    f.push(accent(rect(30.0, 76.0, 40.0, 5.0), c));
    f.push(shine(rect(34.0, 38.0, 4.0, 44.0).num("rx", 2.0), p));
}

fn handled(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    let bail = PathData::new().m(27.0, 40.0).q(50.0, 4.0, 73.0, 40.0).build();
    f.push(
        path(bail)
            .fill("none")
            .stroke(INK, SW)
            .round_caps()
            .class("accessory"),
    );
    f.push(body(rect(26.0, 34.0, 48.0, 50.0).num("rx", 3.0), p));
    f.push(cap(ellipse(50.0, 34.0, 24.0, 5.0), p));
    f.push(ellipse(50.0, 34.0, 19.0, 3.0).fill("none").stroke(c.dark, 1.0));
    f.push(accent(circle(27.0, 40.0, 2.5), c));
    f.push(accent(circle(73.0, 40.0, 2.5), c));
    f.push(shine(rect(30.0, 40.0, 4.0, 40.0).num("rx", 2.0), p));
}

fn aerosol(f: &mut Fragment, c: &ColorStops, p: &PaintIds, instance_id: &str) {
    let spray_id = format!("spray-{instance_id}");
    f.push_def(radial_gradient(
        &spray_id,
        vec![
            stop(0.0, c.reflection),
            stop(1.0, c.accent).num("stop-opacity", 0.4),
        ],
    ));

    f.push(body(rect(34.0, 30.0, 32.0, 58.0).num("rx", 6.0), p));
    let dome = PathData::new()
        .m(34.0, 35.0)
        .q(34.0, 22.0, 50.0, 22.0)
        .q(66.0, 22.0, 66.0, 35.0)
        .z()
        .build();
    f.push(cap(path(dome), p));
    f.push(cap(rect(43.0, 12.0, 14.0, 11.0).num("rx", 2.0), p));
    f.push(accent(rect(57.0, 14.5, 5.0, 3.0).num("rx", 1.0), c));
    for (cx, cy, r) in [(66.0, 16.0, 1.6), (69.5, 12.5, 1.2), (69.5, 19.5, 1.2)] {
        f.push(circle(cx, cy, r).fill(url(&spray_id)).class("accent"));
    }
    f.push(shine(rect(37.5, 36.0, 3.0, 46.0).num("rx", 1.5), p));
}

fn barrel(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    f.push(body(ellipse(50.0, 56.0, 26.0, 30.0), p));
    f.push(cap(ellipse(50.0, 30.5, 18.0, 5.0), p));
    let upper = PathData::new().m(29.2, 38.0).q(50.0, 43.0, 70.8, 38.0).build();
    let lower = PathData::new().m(30.6, 76.0).q(50.0, 81.0, 69.4, 76.0).build();
    for hoop in [upper, lower] {
        f.push(
            path(hoop)
                .fill("none")
                .stroke(c.accent, 3.0)
                .round_caps()
                .class("accent"),
        );
    }
    f.push(shine(ellipse(35.0, 54.0, 3.0, 15.0), p));
}

fn flat_tin(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    f.push(body(rect(16.0, 42.0, 68.0, 34.0).num("rx", 10.0), p));
    f.push(cap(rect(14.0, 37.0, 72.0, 10.0).num("rx", 5.0), p));
    f.push(
        circle(78.0, 33.0, 4.0)
            .fill("none")
            .stroke(c.accent, 2.5)
            .class("accent"),
    );
    f.push(line(75.0, 36.0, 72.0, 38.5).stroke(INK, THIN).round_caps());
    f.push(shine(rect(22.0, 50.0, 56.0, 2.5).num("rx", 1.25), p));
}

fn bucket(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    let bail = PathData::new().m(26.0, 34.0).q(50.0, 0.0, 74.0, 34.0).build();
    f.push(
        path(bail)
            .fill("none")
            .stroke(INK, SW)
            .round_caps()
            .class("accessory"),
    );
    let pail = PathData::new()
        .m(26.0, 32.0)
        .l(74.0, 32.0)
        .l(68.0, 86.0)
        .l(32.0, 86.0)
        .z()
        .build();
    f.push(body(path(pail), p));
    f.push(cap(rect(23.0, 28.0, 54.0, 7.0).num("rx", 3.0), p));
    let band = PathData::new()
        .m(31.0, 76.0)
        .l(69.0, 76.0)
        .l(68.3, 84.0)
        .l(31.7, 84.0)
        .z()
        .build();
    f.push(accent(path(band), c));
    let streak = PathData::new()
        .m(31.0, 38.0)
        .l(35.0, 38.0)
        .l(37.0, 72.0)
        .l(33.0, 72.0)
        .z()
        .build();
    f.push(shine(path(streak), p));
}

fn labeled(f: &mut Fragment, c: &ColorStops, p: &PaintIds, instance_id: &str) {
    let label_id = format!("label-{instance_id}");
    f.push_def(linear_gradient(
        &label_id,
        true,
        vec![
            stop(0.0, c.light),
            stop(0.45, c.reflection),
            stop(1.0, c.light),
        ],
    ));

    f.push(ellipse(50.0, 86.0, 20.0, 3.5).fill(c.dark).stroke(INK, THIN));
    f.push(body(rect(30.0, 22.0, 40.0, 64.0).num("rx", 4.0), p));
    f.push(
        rect(30.0, 38.0, 40.0, 36.0)
            .fill(url(&label_id))
            .stroke(INK, THIN)
            .class("label"),
    );
    f.push(accent(rect(30.0, 38.0, 40.0, 2.5), c));
    f.push(accent(rect(30.0, 71.5, 40.0, 2.5), c));
    f.push(cap(ellipse(50.0, 22.0, 20.0, 4.0), p));
    f.push(pull_tab(50.0, 16.5, c));
    f.push(shine(rect(34.0, 26.0, 3.5, 56.0).num("rx", 1.75), p));
}

fn rounded(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    f.push(body(circle(50.0, 57.0, 29.0), p));
    f.push(cap(ellipse(50.0, 30.0, 13.0, 5.0), p));
    f.push(
        circle(50.0, 24.0, 3.0)
            .fill(c.accent)
            .stroke(INK, THIN)
            .class("cap"),
    );
    f.push(shine(ellipse(37.0, 48.0, 4.0, 9.0), p));
}

fn bottle(f: &mut Fragment, c: &ColorStops, p: &PaintIds) {
    let outline = PathData::new()
        .m(30.0, 42.0)
        .q(30.0, 32.0, 42.0, 28.0)
        .l(42.0, 19.0)
        .l(58.0, 19.0)
        .l(58.0, 28.0)
        .q(70.0, 32.0, 70.0, 42.0)
        .l(70.0, 84.0)
        .q(70.0, 88.0, 66.0, 88.0)
        .l(34.0, 88.0)
        .q(30.0, 88.0, 30.0, 84.0)
        .z()
        .build();
    f.push(body(path(outline), p));
    f.push(cap(rect(40.5, 10.0, 19.0, 9.5).num("rx", 2.0), p));
    for x in [44.0, 48.0, 52.0, 56.0] {
        f.push(line(x, 11.5, x, 18.0).stroke(c.dark, 1.0));
    }
    f.push(accent(rect(30.0, 76.0, 40.0, 6.0), c));
    f.push(shine(rect(33.5, 42.0, 3.5, 32.0).num("rx", 1.75), p));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::resolve;
    use crate::traits::PaletteVariant;

    fn render(variant: ContainerVariant) -> Fragment {
        render_container(variant, &resolve(PaletteVariant::Cobalt), "tk-test")
    }

    #[test]
    fn test_every_container_is_structurally_complete() {
        for variant in ContainerVariant::ALL {
            let frag = render(*variant);
            assert!(frag.count_class("body") >= 1, "{variant}: no body");
            assert!(frag.count_class("cap") >= 1, "{variant}: no cap");
            assert!(frag.count_class("highlight") >= 1, "{variant}: no highlight");
        }
    }

    #[test]
    fn test_body_uses_namespaced_gradient() {
        for variant in ContainerVariant::ALL {
            let frag = render(*variant);
            let markup: String = frag.body().iter().map(|e| e.to_string()).collect();
            assert!(markup.contains("url(#body-tk-test)"), "{variant}");
            assert!(markup.contains("url(#shine-tk-test)"), "{variant}");
        }
    }

    #[test]
    fn test_own_defs_are_namespaced() {
        for variant in ContainerVariant::ALL {
            for def in render(*variant).defs() {
                let id = def.get("id").unwrap_or_default();
                assert!(id.ends_with("tk-test"), "{variant}: {id}");
            }
        }
        assert_eq!(render(ContainerVariant::Aerosol).defs().len(), 1);
        assert_eq!(render(ContainerVariant::Labeled).defs().len(), 1);
    }

    #[test]
    fn test_routines_are_distinct() {
        let classic = render(ContainerVariant::Classic);
        for variant in &ContainerVariant::ALL[1..] {
            assert_ne!(render(*variant), classic, "{variant}");
        }
    }

    #[test]
    fn test_accent_color_is_used() {
        let colors = resolve(PaletteVariant::Ruby);
        let frag = render_container(ContainerVariant::Vintage, &colors, "x");
        let markup: String = frag.body().iter().map(|e| e.to_string()).collect();
        assert!(markup.contains(colors.accent));
    }
}
