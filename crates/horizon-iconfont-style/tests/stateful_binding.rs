//! Integration tests for binding icons to widget state.

use std::sync::Arc;

use horizon_iconfont::testing::fixture_provider;
use horizon_iconfont::{Icon, IconRegistry, RenderedIcon};
use horizon_iconfont_style::{
    bind, Appearance, HeadlessWidget, IconWidget, StateSpec, ThemeForegrounds, WidgetState,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_iconfont=debug,horizon_iconfont_style=trace")
        .with_test_writer()
        .try_init();
}

fn setup(provider: &str) -> (IconRegistry, Icon) {
    init_tracing();
    let registry = IconRegistry::new();
    registry.activate(&fixture_provider(provider), None).unwrap();
    let icon = Icon::builder("square")
        .size(32)
        .color("black")
        .build_with(&registry)
        .unwrap();
    (registry, icon)
}

fn center_pixel(image: &RenderedIcon) -> [u8; 4] {
    image.image().get_pixel(16, 16).0
}

fn displayed(widget: &HeadlessWidget) -> Arc<RenderedIcon> {
    widget.image().expect("binding sets an image immediately")
}

#[test]
fn last_matching_rule_wins() {
    let (registry, icon) = setup("last-rule");
    let widget = Arc::new(HeadlessWidget::new().with_state(WidgetState::HOVER));
    let rules = StateSpec::new()
        .rule("hover", Appearance::color("red"))
        .unwrap()
        .rule("hover !disabled", Appearance::color("blue"))
        .unwrap();

    let binding = bind(icon, &widget, Some(rules)).unwrap();

    assert_eq!(center_pixel(&displayed(&widget)), [0, 0, 255, 255]);
    assert_eq!(binding.current().color(), "blue");

    widget.set_flag(WidgetState::DISABLED, true);
    assert_eq!(center_pixel(&displayed(&widget)), [255, 0, 0, 255]);
    registry.cleanup().unwrap();
}

#[test]
fn no_match_restores_original() {
    let (registry, icon) = setup("restore");
    let widget = Arc::new(HeadlessWidget::new());
    let rules = StateSpec::new()
        .rule("pressed", Appearance::color("red"))
        .unwrap();
    let binding = bind(icon.clone(), &widget, Some(rules)).unwrap();

    let original = displayed(&widget);
    assert!(Arc::ptr_eq(&original, icon.image()));

    widget.set_state(WidgetState::PRESSED);
    assert_eq!(center_pixel(&displayed(&widget)), [255, 0, 0, 255]);

    widget.set_state(WidgetState::empty());
    assert!(Arc::ptr_eq(&displayed(&widget), &original));
    assert_eq!(binding.current().name(), "square");
    registry.cleanup().unwrap();
}

#[test]
fn glyph_override_keeps_bind_time_color() {
    let (registry, icon) = setup("glyph");
    let widget = Arc::new(HeadlessWidget::new());
    let rules = StateSpec::new()
        .rule("selected", Appearance::color("red"))
        .unwrap()
        .rule("selected hover", Appearance::glyph("triangle"))
        .unwrap();
    let binding = bind(icon, &widget, Some(rules)).unwrap();

    widget.set_state(WidgetState::SELECTED | WidgetState::HOVER);
    let current = binding.current();
    assert_eq!(current.name(), "triangle");
    assert_eq!(current.color(), "black");
    assert_eq!(current.size(), 32);

    widget.set_state(WidgetState::SELECTED);
    assert_eq!(binding.current().name(), "square");
    assert_eq!(binding.current().color(), "red");
    registry.cleanup().unwrap();
}

#[test]
fn unknown_glyph_override_shows_transparent() {
    let (registry, icon) = setup("unknown-glyph");
    let widget = Arc::new(HeadlessWidget::new());
    let rules = StateSpec::new()
        .rule("hover", Appearance::glyph_with_color("no-such-icon", "red"))
        .unwrap();
    let _binding = bind(icon, &widget, Some(rules)).unwrap();

    widget.set_state(WidgetState::HOVER);
    let image = displayed(&widget);
    assert!(image.is_transparent());
    assert_eq!(image.size(), 32);
    registry.cleanup().unwrap();
}

#[test]
fn default_rules_follow_widget_theme() {
    let (registry, icon) = setup("theme");
    let theme = ThemeForegrounds {
        normal: "#000000".into(),
        hover: "#00ff00".into(),
        pressed: "#0000ff".into(),
        disabled: "#ff0000".into(),
    };
    let widget = Arc::new(HeadlessWidget::new().with_theme(theme));
    let _binding = bind(icon, &widget, None).unwrap();

    assert_eq!(center_pixel(&displayed(&widget)), [0, 0, 0, 255]);
    widget.set_state(WidgetState::HOVER);
    assert_eq!(center_pixel(&displayed(&widget)), [0, 255, 0, 255]);
    widget.set_state(WidgetState::HOVER | WidgetState::PRESSED);
    assert_eq!(center_pixel(&displayed(&widget)), [0, 0, 255, 255]);
    widget.set_state(WidgetState::HOVER | WidgetState::PRESSED | WidgetState::DISABLED);
    assert_eq!(center_pixel(&displayed(&widget)), [255, 0, 0, 255]);
    registry.cleanup().unwrap();
}

#[test]
fn every_notification_is_applied_and_cached() {
    let (registry, icon) = setup("storm");
    let widget = Arc::new(HeadlessWidget::new());
    let rules = StateSpec::new()
        .rule("hover", Appearance::color("red"))
        .unwrap();
    let _binding = bind(icon, &widget, Some(rules)).unwrap();
    assert_eq!(widget.image_updates(), 1);

    for _ in 0..5 {
        widget.set_state(WidgetState::HOVER);
        widget.set_state(WidgetState::empty());
    }
    assert_eq!(widget.image_updates(), 11);

    // One render for black at bind time and one for red; the rest are cache hits.
    assert_eq!(registry.stats().renders, 2);
    registry.cleanup().unwrap();
}

#[test]
fn manual_notifications_re_evaluate() {
    let (registry, icon) = setup("manual");
    let widget = Arc::new(HeadlessWidget::new().with_state(WidgetState::PRESSED));
    let rules = StateSpec::new()
        .rule("pressed", Appearance::color("red"))
        .unwrap();
    let binding = bind(icon, &widget, Some(rules)).unwrap();

    // Toolkits may re-emit an unchanged state; each emission re-applies.
    widget.state_changed().emit(widget.current_state());
    assert_eq!(widget.image_updates(), 2);

    binding.refresh().unwrap();
    assert_eq!(widget.image_updates(), 3);

    binding.unbind();
    widget.set_state(WidgetState::empty());
    assert_eq!(widget.image_updates(), 3);
    registry.cleanup().unwrap();
}
