//! Document Validation - Rule/Policy Separation
//!
//! Rules inspect a rendered document and produce structured violations.
//! Policy (`FailureMode`) maps violations to a verdict.

use regex::Regex;
use roxmltree::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::config::FailureMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

impl ValidationViolation {
    fn error(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity: ViolationSeverity::Error,
            message: message.into(),
            expected: None,
            actual: None,
            remediation: vec![],
        }
    }

    fn expected(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    fn remedy(mut self, remediation: &str) -> Self {
        self.remediation.push(remediation.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
    pub instance_id: String,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error)
    }
}

/// What a rule needs to know about the document it inspects.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub instance_id: String,
    pub size: u32,
    pub max_primitives: usize,
}

/// Validation rule trait - produces violations
pub trait DocumentRule {
    fn name(&self) -> &'static str;
    fn validate(&self, doc: &str, ctx: &DocumentContext) -> Vec<ValidationViolation>;
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern is valid"))
}

fn href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r#"\b(?:xlink:)?href="([^"]*)""#)
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"url\(([^)]*)\)")
}

fn id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r#"\sid="([^"]+)""#)
}

// --- Concrete Rules ---

/// Parses as XML with an `<svg>` root.
pub struct WellFormedRule;

impl DocumentRule for WellFormedRule {
    fn name(&self) -> &'static str { "well_formed" }

    fn validate(&self, doc: &str, _ctx: &DocumentContext) -> Vec<ValidationViolation> {
        let parsed = match Document::parse(doc) {
            Ok(parsed) => parsed,
            Err(e) => {
                return vec![
                    ValidationViolation::error(self.name(), "Document is not well-formed XML")
                        .expected("well-formed XML", e.to_string())
                        .remedy("Serialize through the compositor"),
                ];
            }
        };

        let root = parsed.root_element().tag_name().name();
        if root != "svg" {
            return vec![
                ValidationViolation::error(self.name(), "Document is not a single <svg> element")
                    .expected("<svg>", format!("<{root}>")),
            ];
        }
        vec![]
    }
}

/// Normalized coordinate space and the requested pixel size.
pub struct CanvasRule;

impl DocumentRule for CanvasRule {
    fn name(&self) -> &'static str { "canvas" }

    fn validate(&self, doc: &str, ctx: &DocumentContext) -> Vec<ValidationViolation> {
        // Unparseable documents are reported by `WellFormedRule`.
        let Ok(parsed) = Document::parse(doc) else {
            return vec![];
        };
        let root = parsed.root_element();
        let mut violations = vec![];

        let view_box = root.attribute("viewBox").unwrap_or("missing");
        if view_box != "0 0 100 100" {
            violations.push(
                ValidationViolation::error(self.name(), "Root must use the 0-100 canvas")
                    .expected("0 0 100 100", view_box),
            );
        }
        let wanted = ctx.size.to_string();
        for attr in ["width", "height"] {
            let actual = root.attribute(attr).unwrap_or("missing");
            if actual != wanted {
                let message = format!("Root {attr} does not match requested size");
                violations.push(
                    ValidationViolation::error(self.name(), message).expected(wanted.clone(), actual),
                );
            }
        }
        violations
    }
}

/// The document must be self-contained.
pub struct ExternalReferenceRule;

impl DocumentRule for ExternalReferenceRule {
    fn name(&self) -> &'static str { "external_reference" }

    fn validate(&self, doc: &str, _ctx: &DocumentContext) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        for cap in href_re().captures_iter(doc) {
            if !cap[1].starts_with('#') {
                violations.push(
                    ValidationViolation::error(self.name(), "External href")
                        .expected("#fragment", cap[1].to_string())
                        .remedy("Inline the resource or drop the reference"),
                );
            }
        }
        for cap in url_re().captures_iter(doc) {
            if !cap[1].starts_with('#') {
                violations.push(
                    ValidationViolation::error(self.name(), "External url() paint")
                        .expected("url(#fragment)", cap[0].to_string()),
                );
            }
        }
        for tag in ["<script", "<image", "<foreignObject", "<use"] {
            if doc.contains(tag) {
                violations.push(
                    ValidationViolation::error(self.name(), "Embedded content is not allowed")
                        .expected("none", tag.to_string()),
                );
            }
        }
        violations
    }
}

/// Every `url(#x)` resolves, ids are unique and carry the instance id.
pub struct ReferenceIntegrityRule;

impl DocumentRule for ReferenceIntegrityRule {
    fn name(&self) -> &'static str { "reference_integrity" }

    fn validate(&self, doc: &str, ctx: &DocumentContext) -> Vec<ValidationViolation> {
        let mut violations = vec![];
        let mut declared = HashSet::new();

        for cap in id_re().captures_iter(doc) {
            let id = cap[1].to_string();
            if !id.ends_with(&ctx.instance_id) {
                violations.push(
                    ValidationViolation::error(self.name(), "Id is not namespaced to this instance")
                        .expected(format!("*-{}", ctx.instance_id), id.clone())
                        .remedy("Derive every declared id from the instance id"),
                );
            }
            if !declared.insert(id.clone()) {
                violations.push(
                    ValidationViolation::error(self.name(), "Duplicate id").expected("unique", id),
                );
            }
        }

        for cap in url_re().captures_iter(doc) {
            if let Some(target) = cap[1].strip_prefix('#') {
                if !declared.contains(target) {
                    violations.push(
                        ValidationViolation::error(self.name(), "Dangling paint reference")
                            .expected("declared id", target.to_string()),
                    );
                }
            }
        }
        violations
    }
}

/// At least one eye-bearing and one mouth-bearing primitive.
pub struct FaceFeatureRule;

impl DocumentRule for FaceFeatureRule {
    fn name(&self) -> &'static str { "face_features" }

    fn validate(&self, doc: &str, _ctx: &DocumentContext) -> Vec<ValidationViolation> {
        ["eye", "mouth"]
            .into_iter()
            .filter(|class| !doc.contains(&format!(r#"class="{class}""#)))
            .map(|class| {
                ValidationViolation::error(self.name(), format!("Face has no {class}"))
                    .expected(format!("class=\"{class}\""), "missing")
            })
            .collect()
    }
}

/// Soft bound on document complexity.
pub struct PrimitiveBudgetRule;

impl DocumentRule for PrimitiveBudgetRule {
    fn name(&self) -> &'static str { "primitive_budget" }

    fn validate(&self, doc: &str, ctx: &DocumentContext) -> Vec<ValidationViolation> {
        const SHAPES: [&str; 7] = ["rect", "circle", "ellipse", "line", "path", "polygon", "polyline"];
        let Ok(parsed) = Document::parse(doc) else {
            return vec![];
        };
        let count = parsed
            .descendants()
            .filter(|node| node.is_element() && SHAPES.contains(&node.tag_name().name()))
            .count();

        if count > ctx.max_primitives {
            vec![ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Warning,
                message: "Document exceeds primitive budget".to_string(),
                expected: Some(format!("{} primitives max", ctx.max_primitives)),
                actual: Some(format!("{count} primitives")),
                remediation: vec!["Simplify the container or face routine".to_string()],
            }]
        } else {
            vec![]
        }
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn DocumentRule + Send + Sync>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(WellFormedRule),
                Box::new(CanvasRule),
                Box::new(ExternalReferenceRule),
                Box::new(ReferenceIntegrityRule),
                Box::new(FaceFeatureRule),
                Box::new(PrimitiveBudgetRule),
            ],
        }
    }

    pub fn validate(&self, doc: &str, ctx: &DocumentContext, mode: FailureMode) -> ValidationResult {
        let mut all_violations = vec![];
        for rule in &self.rules {
            all_violations.extend(rule.validate(doc, ctx));
        }

        let has_errors = all_violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        match mode {
            FailureMode::Block => ValidationResult {
                valid: !has_errors,
                violations: all_violations,
                instance_id: ctx.instance_id.clone(),
            },
            FailureMode::Warn | FailureMode::Log => {
                for v in &all_violations {
                    if mode == FailureMode::Warn {
                        warn!(rule = %v.rule, message = %v.message, "document violation");
                    } else {
                        debug!(rule = %v.rule, message = %v.message, "document violation");
                    }
                }
                // Never block, just record
                ValidationResult {
                    valid: true,
                    violations: all_violations,
                    instance_id: ctx.instance_id.clone(),
                }
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
