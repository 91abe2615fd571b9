use super::*;

#[test]
fn default_matches_markup_contract() {
    let config = WidgetConfig::default();
    assert_eq!(config.trigger_class, "floating-btn");
    assert_eq!(config.trigger_attr, "data-modal-id");
    assert_eq!(config.modal_class, "modal-overlay");
    assert_eq!(config.active_class, "active");
    assert_eq!(config.dismisser_class, "close-btn");
    assert_eq!(config.shown_event, "modalShown");
    assert_eq!(config.hidden_event, "modalHidden");
    assert_eq!(config.release_delay_ms, 300);
}

#[test]
fn selectors_prefix_class_with_dot() {
    let config = WidgetConfig::default();
    assert_eq!(config.trigger_selector(), ".floating-btn");
    assert_eq!(config.modal_selector(), ".modal-overlay");
    assert_eq!(config.dismisser_selector(), ".close-btn");
}

#[test]
fn from_json_empty_object_is_default() {
    let config = WidgetConfig::from_json("{}").expect("empty object should parse");
    assert_eq!(config, WidgetConfig::default());
}

#[test]
fn from_json_overrides_only_given_fields() {
    let config = WidgetConfig::from_json(r#"{"modalClass":"sheet","releaseDelayMs":0}"#).expect("should parse");
    assert_eq!(config.modal_class, "sheet");
    assert_eq!(config.modal_selector(), ".sheet");
    assert_eq!(config.release_delay_ms, 0);
    assert_eq!(config.trigger_class, "floating-btn");
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = WidgetConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, WidgetError::Config(_)));
}

#[test]
fn from_json_rejects_wrong_types() {
    let err = WidgetConfig::from_json(r#"{"releaseDelayMs":"slow"}"#).unwrap_err();
    assert!(matches!(err, WidgetError::Config(_)));
}

#[test]
fn from_json_rejects_empty_class_name() {
    let err = WidgetConfig::from_json(r#"{"activeClass":"  "}"#).unwrap_err();
    assert!(matches!(err, WidgetError::InvalidConfig(ref msg) if msg.contains("activeClass")));
}

#[test]
fn active_modal_selector_joins_both_classes() {
    let config = WidgetConfig::default();
    assert_eq!(config.active_modal_selector(), ".modal-overlay.active");
}
