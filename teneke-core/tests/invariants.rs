//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use std::collections::HashSet;
use std::thread;

use teneke_core::{
    generate_from_seed, generate_random, list_container_options, list_expression_options,
    list_palette_options, render_svg, AvatarConfig, AvatarPipeline, CompileRequest,
    ContainerVariant, EngineConfig, ExpressionVariant, FailureMode, PaletteVariant,
    TOTAL_COMBINATIONS,
};

fn strip_size(doc: &str, size: u32) -> String {
    doc.replacen(&format!(r#"width="{size}" height="{size}""#), "", 1)
}

fn strip_instance_ids(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut rest = doc;
    while let Some(pos) = rest.find("tk-") {
        out.push_str(&rest[..pos]);
        out.push_str("tk-ID");
        rest = &rest[(pos + 15).min(rest.len())..];
    }
    out.push_str(rest);
    out
}

#[test]
fn invariant_seed_is_deterministic() {
    for seed in ["abc", "alice", "ülkü", "🚀 launch", ""] {
        let a = generate_from_seed(seed);
        let b = generate_from_seed(seed);
        assert_eq!(a, b);
        assert_eq!(render_svg(&a, 64).unwrap(), render_svg(&b, 64).unwrap());
    }
}

#[test]
fn invariant_empty_seed_is_valid() {
    let config = generate_from_seed("");
    assert_eq!(config.container, ContainerVariant::Classic);
    assert_eq!(config.expression, ExpressionVariant::Grin);
    assert_eq!(config.palette, PaletteVariant::Aluminum);
    assert_eq!(config.seed.as_deref(), Some(""));

    let svg = render_svg(&config, 48).unwrap();
    assert!(svg.contains(r#"class="eye""#));
}

#[test]
fn invariant_abc_scenario_is_stable() {
    // hash("abc") = 96354 -> 96354 % 12, (>> 4) % 8, (>> 8) % 12, (>> 12) % 12
    let config = generate_from_seed("abc");
    assert_eq!(
        config,
        AvatarConfig::new(
            ContainerVariant::Barrel,
            ExpressionVariant::Sleepy,
            PaletteVariant::Bronze,
        )
        .with_accent(PaletteVariant::Tangerine)
        .with_seed("abc")
    );

    let hello = generate_from_seed("hello");
    assert_eq!(hello.container, ContainerVariant::Rounded);
    assert_eq!(hello.expression, ExpressionVariant::Worried);
    assert_eq!(hello.palette, PaletteVariant::Bronze);
    assert_eq!(hello.accent_palette, Some(PaletteVariant::Rust));
}

#[test]
fn invariant_seeds_spread_across_every_category() {
    let mut containers = HashSet::new();
    let mut expressions = HashSet::new();
    let mut palettes = HashSet::new();
    let mut accents = HashSet::new();

    for i in 0..1000 {
        let config = generate_from_seed(&format!("{i}@teneke.dev"));
        containers.insert(config.container);
        expressions.insert(config.expression);
        palettes.insert(config.palette);
        accents.extend(config.accent_palette);
    }

    assert_eq!(containers.len(), ContainerVariant::ALL.len());
    assert_eq!(expressions.len(), ExpressionVariant::ALL.len());
    assert_eq!(palettes.len(), PaletteVariant::ALL.len());
    assert_eq!(accents.len(), PaletteVariant::ALL.len());
}

#[test]
fn invariant_combination_count() {
    let total = list_container_options().len()
        * list_expression_options().len()
        * list_palette_options().len()
        * list_palette_options().len();
    assert_eq!(total, TOTAL_COMBINATIONS);
    assert_eq!(total, 13_824);
}

#[test]
fn invariant_options_match_dispatch() {
    assert_eq!(list_container_options(), ContainerVariant::ALL);
    assert_eq!(list_expression_options(), ExpressionVariant::ALL);
    assert_eq!(list_palette_options(), PaletteVariant::ALL);
}

#[test]
fn invariant_every_pair_renders_complete() {
    let pipeline = AvatarPipeline::default();

    for container in list_container_options() {
        for expression in list_expression_options() {
            let config = AvatarConfig::new(container, expression, PaletteVariant::Copper)
                .with_seed(format!("{container}/{expression}"));
            let svg = render_svg(&config, 96).unwrap();

            assert!(svg.contains(r#"class="body""#), "{container}/{expression}");
            assert!(svg.contains(r#"class="cap""#), "{container}/{expression}");
            assert!(svg.contains(r#"class="highlight""#), "{container}/{expression}");
            assert!(svg.contains(r#"class="eye""#), "{container}/{expression}");
            assert!(svg.contains(r#"class="mouth""#), "{container}/{expression}");

            let id = teneke_core::compositor::instance_id(&config);
            let result = pipeline.validate_document(&svg, &id, 96);
            assert!(result.valid, "{container}/{expression}: {:?}", result.violations);
            assert!(result.violations.is_empty(), "{container}/{expression}: {:?}", result.violations);
        }
    }
}

#[test]
fn invariant_every_palette_renders_valid() {
    let pipeline = AvatarPipeline::default();
    for palette in list_palette_options() {
        let request = CompileRequest {
            config: Some(
                AvatarConfig::new(ContainerVariant::Aerosol, ExpressionVariant::Excited, palette)
                    .with_accent(PaletteVariant::Obsidian),
            ),
            ..Default::default()
        };
        let asset = pipeline.compile(&request).unwrap();
        assert!(asset.svg.contains(teneke_core::resolve(palette).base));
    }
}

#[test]
fn invariant_scale_invariance() {
    let config = generate_from_seed("scale-check");
    let small = render_svg(&config, 24).unwrap();
    let large = render_svg(&config, 240).unwrap();

    assert!(small.contains(r#"width="24" height="24""#));
    assert!(large.contains(r#"width="240" height="240""#));
    assert_eq!(strip_size(&small, 24), strip_size(&large, 240));
}

#[test]
fn invariant_unseeded_differs_only_in_instance_ids() {
    let config = AvatarConfig::new(
        ContainerVariant::Vintage,
        ExpressionVariant::VisorCool,
        PaletteVariant::Gold,
    );
    let a = render_svg(&config, 48).unwrap();
    let b = render_svg(&config, 48).unwrap();

    assert_ne!(a, b);
    assert_eq!(strip_instance_ids(&a), strip_instance_ids(&b));
}

#[test]
fn invariant_avatars_on_one_page_do_not_collide() {
    let docs: Vec<String> = ["alice", "bob", "carol"]
        .iter()
        .map(|s| render_svg(&generate_from_seed(s), 48).unwrap())
        .collect();

    let ids = |doc: &str| -> HashSet<String> {
        doc.split(" id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    };
    let (a, b, c) = (ids(&docs[0]), ids(&docs[1]), ids(&docs[2]));
    assert!(!a.is_empty());
    assert!(a.is_disjoint(&b));
    assert!(a.is_disjoint(&c));
    assert!(b.is_disjoint(&c));
}

#[test]
fn invariant_document_is_self_contained() {
    let svg = render_svg(&generate_random(), 48).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert!(!svg.contains("href="));
    assert!(!svg.contains("url(http"));
}

#[test]
fn invariant_compile_validates_and_hashes_stably() {
    let pipeline = AvatarPipeline::default();
    let request = CompileRequest {
        username: Some("stable".to_string()),
        size: Some(128),
        ..Default::default()
    };

    let first = pipeline.compile(&request).unwrap();
    let second = pipeline.compile(&request).unwrap();

    assert!(first.validation.valid);
    assert_eq!(first.validation.instance_id, first.instance_id);
    assert_eq!(first.config_hash, second.config_hash);
    assert_eq!(first.svg_hash, second.svg_hash);
    assert_eq!(first.svg, second.svg);
    assert_eq!(first.engine_version, teneke_core::ENGINE_VERSION);
    assert!(first.badge.ring_visible);
}

#[test]
fn invariant_tampered_document_fails_validation() {
    let pipeline = AvatarPipeline::default();
    let config = generate_from_seed("tamper");
    let id = teneke_core::compositor::instance_id(&config);
    let svg = render_svg(&config, 48).unwrap();

    let tampered = svg.replacen("<g ", r#"<image href="https://cdn.example/x.png"/><g "#, 1);
    let result = pipeline.validate_document(&tampered, &id, 48);
    assert!(!result.valid);
    assert!(result.violations.iter().any(|v| v.rule == "external_reference"));

    let lenient = AvatarPipeline::new(EngineConfig {
        failure_mode: FailureMode::Log,
        ..EngineConfig::default()
    });
    let result = lenient.validate_document(&tampered, &id, 48);
    assert!(result.valid);
    assert!(result.has_errors());
}

#[test]
fn invariant_generation_is_thread_safe() {
    let expected = render_svg(&generate_from_seed("shared"), 64).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| render_svg(&generate_from_seed("shared"), 64).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
