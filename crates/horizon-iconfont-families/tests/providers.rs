//! Families and providers working against a real registry.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use horizon_iconfont::testing::{fixture_font, TestFont, TestShape, SQUARE, TRIANGLE};
use horizon_iconfont::{FontProvider, IconError, IconRegistry};
use horizon_iconfont_families::tooling::{glyph_map_from_font_file, write_glyph_map};
use horizon_iconfont_families::{
    DirectoryProvider, EmbeddedProvider, FamilyError, IconFamily, MultiStyleProvider,
};
use include_dir::{include_dir, Dir};

static EMBEDDED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/embedded");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_iconfont=debug,horizon_iconfont_families=trace")
        .with_test_writer()
        .try_init();
}

/// A Bootstrap-style directory: `house` is a square, `house-fill` a triangle.
fn bootstrap_dir(root: &Path) {
    fs::write(root.join("bootstrap.ttf"), fixture_font()).unwrap();
    fs::write(
        root.join("glyphmap.json"),
        format!(
            r#"{{"house": "{:x}", "house-fill": "{:x}"}}"#,
            SQUARE as u32, TRIANGLE as u32
        ),
    )
    .unwrap();
}

#[test]
fn bootstrap_names_render_from_directory() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    bootstrap_dir(dir.path());

    let registry = IconRegistry::new();
    let provider = DirectoryProvider::new("bootstrap", dir.path());
    let set = registry.activate(&provider, None).unwrap();

    let outline = IconFamily::Bootstrap.resolve("house", None, set.glyph_map()).unwrap();
    let fill = IconFamily::Bootstrap.resolve("house", Some("fill"), set.glyph_map()).unwrap();
    assert_eq!(outline, "house");
    assert_eq!(fill, "house-fill");

    let outline = registry.render(&set, &outline, 32, "black").unwrap();
    let fill = registry.render(&set, &fill, 32, "black").unwrap();
    assert!(!outline.is_placeholder());
    assert!(!fill.is_placeholder());
    assert_ne!(outline.as_rgba(), fill.as_rgba());

    let err = IconFamily::Bootstrap
        .resolve("house-fill", Some("outline"), set.glyph_map())
        .unwrap_err();
    assert!(matches!(err, FamilyError::StyleConflict { .. }));

    registry.cleanup().unwrap();
}

#[test]
fn multi_style_sets_render_side_by_side() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let regular = TestFont::new()
        .named_glyph(
            '\u{e001}',
            "ic_fluent_settings_16_regular",
            TestShape::Rect {
                x_min: 100,
                y_min: 0,
                x_max: 300,
                y_max: 600,
            },
        )
        .build();
    let filled = TestFont::new()
        .named_glyph(
            '\u{e001}',
            "ic_fluent_settings_16_filled",
            TestShape::Rect {
                x_min: 0,
                y_min: -200,
                x_max: 1000,
                y_max: 800,
            },
        )
        .build();
    fs::write(root.join("Regular.ttf"), &regular).unwrap();
    fs::write(root.join("Filled.ttf"), &filled).unwrap();

    // Style-specific glyph maps generated from the fonts themselves.
    for style in ["regular", "filled"] {
        let font = root.join(if style == "regular" { "Regular.ttf" } else { "Filled.ttf" });
        let map = glyph_map_from_font_file(&font).unwrap();
        write_glyph_map(root.join(format!("glyphmap-{style}.json")), &map).unwrap();
    }

    let provider = MultiStyleProvider::new("fluent", root)
        .with_style("regular", "Regular.ttf")
        .with_style("filled", "Filled.ttf")
        .with_style("light", "Light.ttf")
        .with_default_style("regular");
    assert_eq!(provider.list_styles(), vec!["filled", "regular"]);

    let registry = IconRegistry::new();
    let regular_set = registry.activate(&provider, None).unwrap();
    let filled_set = registry.activate(&provider, Some("filled")).unwrap();
    assert_eq!(registry.icon_set_count(), 2);
    assert_eq!(registry.persisted_font_count(), 2);

    let err = registry.activate(&provider, Some("light")).unwrap_err();
    assert!(matches!(err, IconError::UnknownStyle { .. }));

    let fluent = IconFamily::Fluent;
    let regular_name = fluent.resolve("settings-16", None, regular_set.glyph_map()).unwrap();
    let filled_name = fluent
        .resolve("settings-16", Some("filled"), filled_set.glyph_map())
        .unwrap();
    assert_eq!(regular_name, "ic-fluent-settings-16-regular");
    assert_eq!(filled_name, "ic-fluent-settings-16-filled");

    let thin = registry.render(&regular_set, &regular_name, 40, "#0078d4").unwrap();
    let full = registry.render(&filled_set, &filled_name, 40, "#0078d4").unwrap();
    assert!(thin.coverage() > 0);
    assert!(full.coverage() > thin.coverage());

    // A name from the other style is unknown here and renders transparent.
    let crossed = registry.render(&regular_set, &filled_name, 40, "#0078d4").unwrap();
    assert!(crossed.is_placeholder());

    registry.cleanup().unwrap();
}

#[test]
fn embedded_single_style_serves_static_bytes() {
    let provider = EmbeddedProvider::new("embedded", &EMBEDDED);
    assert!(provider.list_styles().is_empty());

    let assets = provider.load_assets(None).unwrap();
    assert!(matches!(assets.font, Cow::Borrowed(_)));
    assert!(matches!(assets.glyph_map, Cow::Borrowed(_)));
    // First font file by name.
    assert_eq!(&*assets.font, include_bytes!("fixtures/embedded/Filled.ttf"));
    assert_eq!(&*assets.glyph_map, include_str!("fixtures/embedded/glyphmap.json"));
}

#[test]
fn embedded_styles_prefer_specific_glyph_maps() {
    let provider = EmbeddedProvider::new("fluent", &EMBEDDED)
        .with_style("regular", "Regular.ttf")
        .with_style("filled", "Filled.ttf");
    assert_eq!(provider.list_styles(), vec!["filled", "regular"]);
    assert_eq!(provider.default_style().as_deref(), Some("regular"));

    let regular = provider.load_assets(None).unwrap();
    assert_eq!(&*regular.font, include_bytes!("fixtures/embedded/Regular.ttf"));
    assert_eq!(&*regular.glyph_map, include_str!("fixtures/embedded/glyphmap.json"));

    let filled = provider.load_assets(Some("filled")).unwrap();
    assert_eq!(&*filled.font, include_bytes!("fixtures/embedded/Filled.ttf"));
    assert_eq!(&*filled.glyph_map, include_str!("fixtures/embedded/glyphmap-filled.json"));

    let err = provider.load_assets(Some("light")).unwrap_err();
    assert!(matches!(err, IconError::UnknownStyle { .. }));

    let missing = EmbeddedProvider::new("broken", &EMBEDDED).with_font("Missing.ttf");
    assert!(matches!(missing.load_assets(None), Err(IconError::FontNotFound { .. })));
}

#[test]
fn corrupt_embedded_font_fails_at_render() {
    init_tracing();
    let registry = IconRegistry::new();
    let provider = EmbeddedProvider::new("embedded", &EMBEDDED).with_font("Regular.ttf");
    let set = registry.activate(&provider, None).unwrap();
    assert!(set.contains("house"));

    let err = registry.render(&set, "house", 24, "black").unwrap_err();
    assert!(matches!(err, IconError::FontParse { .. }));

    // Unknown names never reach the font.
    let blank = registry.render(&set, "nope", 24, "black").unwrap();
    assert!(blank.is_placeholder());

    registry.cleanup().unwrap();
}
