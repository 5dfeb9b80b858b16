//! SVG Markup Builder
//!
//! Pure string building. Elements are plain values assembled with a builder
//! API and serialized once by the compositor.

use std::fmt;

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A single SVG element with ordered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    pub fn num(self, key: &'static str, value: f64) -> Self {
        self.attr(key, num(value))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn fill(self, fill: impl Into<String>) -> Self {
        self.attr("fill", fill)
    }

    pub fn stroke(self, color: &str, width: f64) -> Self {
        self.attr("stroke", color).num("stroke-width", width)
    }

    /// Rounded line caps and joins, for hand-drawn strokes.
    pub fn round_caps(self) -> Self {
        self.attr("stroke-linecap", "round")
            .attr("stroke-linejoin", "round")
    }

    pub fn opacity(self, opacity: f64) -> Self {
        self.num("opacity", opacity)
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape_attr(v));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Element {
    Element::new("rect")
        .num("x", x)
        .num("y", y)
        .num("width", width)
        .num("height", height)
}

pub fn circle(cx: f64, cy: f64, r: f64) -> Element {
    Element::new("circle").num("cx", cx).num("cy", cy).num("r", r)
}

pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Element {
    Element::new("ellipse")
        .num("cx", cx)
        .num("cy", cy)
        .num("rx", rx)
        .num("ry", ry)
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
    Element::new("line")
        .num("x1", x1)
        .num("y1", y1)
        .num("x2", x2)
        .num("y2", y2)
}

pub fn path(d: impl Into<String>) -> Element {
    Element::new("path").attr("d", d)
}

/// Builder for path `d` strings from computed coordinates.
#[derive(Debug, Default, Clone)]
pub struct PathData {
    parts: Vec<String>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, cmd: &str, coords: &[f64]) -> Self {
        let mut part = cmd.to_string();
        for c in coords {
            part.push(' ');
            part.push_str(&num(*c));
        }
        self.parts.push(part);
        self
    }

    pub fn m(self, x: f64, y: f64) -> Self {
        self.push("M", &[x, y])
    }

    pub fn l(self, x: f64, y: f64) -> Self {
        self.push("L", &[x, y])
    }

    pub fn q(self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.push("Q", &[cx, cy, x, y])
    }

    pub fn z(mut self) -> Self {
        self.parts.push("Z".to_string());
        self
    }

    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

/// One gradient stop: offset in `0..=1`, color, optional opacity.
pub fn stop(offset: f64, color: &str) -> Element {
    Element::new("stop")
        .num("offset", offset)
        .attr("stop-color", color)
}

/// Left-to-right gradient when `horizontal`, otherwise top-to-bottom.
pub fn linear_gradient(id: &str, horizontal: bool, stops: Vec<Element>) -> Element {
    let (x2, y2) = if horizontal { ("1", "0") } else { ("0", "1") };
    Element::new("linearGradient")
        .attr("id", id)
        .attr("x1", "0")
        .attr("y1", "0")
        .attr("x2", x2)
        .attr("y2", y2)
        .children(stops)
}

pub fn radial_gradient(id: &str, stops: Vec<Element>) -> Element {
    Element::new("radialGradient")
        .attr("id", id)
        .attr("cx", "0.5")
        .attr("cy", "0.5")
        .attr("r", "0.5")
        .children(stops)
}

/// `url(#id)` paint reference.
pub fn url(id: &str) -> String {
    format!("url(#{id})")
}

/// Output of a renderer: definitions plus drawable primitives.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fragment {
    defs: Vec<Element>,
    body: Vec<Element>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.body.push(element);
    }

    pub fn push_def(&mut self, element: Element) {
        self.defs.push(element);
    }

    pub fn append(&mut self, other: Fragment) {
        self.defs.extend(other.defs);
        self.body.extend(other.body);
    }

    pub fn defs(&self) -> &[Element] {
        &self.defs
    }

    pub fn body(&self) -> &[Element] {
        &self.body
    }

    /// Body elements carrying `class`, searched recursively.
    pub fn count_class(&self, class: &str) -> usize {
        fn walk(el: &Element, class: &str) -> usize {
            let own = usize::from(el.get("class") == Some(class));
            own + el.children.iter().map(|c| walk(c, class)).sum::<usize>()
        }
        self.body.iter().map(|el| walk(el, class)).sum()
    }

    pub fn into_parts(self) -> (Vec<Element>, Vec<Element>) {
        (self.defs, self.body)
    }
}
