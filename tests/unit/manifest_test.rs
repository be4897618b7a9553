use browser_engine_concept::manifest::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;

#[test]
fn test_full_icon_entry() {
    let doc = json!({"icons": [{
        "src": "/a.png",
        "sizes": "48x48 96x96",
        "type": "image/png",
        "purpose": "maskable any"
    }]});

    let icons = parse_icons(&doc);

    assert_eq!(
        icons,
        vec![Icon {
            src: "/a.png".to_string(),
            sizes: vec![Size::new(48, 48).unwrap(), Size::new(96, 96).unwrap()],
            icon_type: Some("image/png".to_string()),
            purpose: BTreeSet::from([Purpose::Maskable, Purpose::Any]),
        }]
    );
}

#[test]
fn test_unrecognized_purpose_drops_entry() {
    let doc = json!({"icons": [{"src": "/b.png", "purpose": "nonsense"}]});
    assert!(parse_icons(&doc).is_empty());
}

#[test]
fn test_missing_purpose_defaults_to_any() {
    let doc = json!({"icons": [{"src": "/c.png"}]});

    let icons = parse_icons(&doc);

    assert_eq!(icons, vec![Icon::new("/c.png")]);
    assert!(icons[0].sizes.is_empty());
    assert_eq!(icons[0].icon_type, None);
    assert_eq!(icons[0].purpose, BTreeSet::from([Purpose::Any]));
}

#[test]
fn test_sizes_string_and_array_agree() {
    let as_string = json!({"icons": [{"src": "/i.png", "sizes": "48x48 96x96"}]});
    let as_array = json!({"icons": [{"src": "/i.png", "sizes": ["48x48", "96x96"]}]});

    assert_eq!(parse_icons(&as_string), parse_icons(&as_array));
    assert_eq!(parse_icons(&as_array)[0].sizes.len(), 2);
}

#[test]
fn test_missing_or_wrong_icons_member() {
    for doc in [
        json!({}),
        json!({"icons": null}),
        json!({"icons": "icon.png"}),
        json!({"icons": {"src": "/x.png"}}),
        json!([1, 2]),
    ] {
        assert!(parse_icons(&doc).is_empty(), "{}", doc);
    }
}

#[test]
fn test_malformed_entry_does_not_abort_parse() {
    let doc = json!({"icons": [
        {"type": "image/png"},
        {"src": "/good.png", "purpose": ["MONOCHROME"]}
    ]});

    let icons = parse_icons(&doc);

    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].src, "/good.png");
    assert_eq!(icons[0].purpose, BTreeSet::from([Purpose::Monochrome]));
}

#[test]
fn test_any_size_round_trip() {
    let doc = json!({"icons": [{"src": "/v.svg", "sizes": "ANY"}]});
    let icons = parse_icons(&doc);

    assert_eq!(icons[0].sizes, vec![Size::Any]);
    assert_eq!(serialize_icons(&icons)[0]["sizes"], json!("any"));
}

#[test]
fn test_serialize_icons() {
    let icon = Icon {
        src: "/a.png".to_string(),
        sizes: vec![Size::new(48, 48).unwrap(), Size::Any],
        icon_type: Some("image/png".to_string()),
        purpose: BTreeSet::from([Purpose::Maskable, Purpose::Monochrome]),
    };

    assert_eq!(
        serialize_icons(&[icon]),
        json!([{
            "src": "/a.png",
            "sizes": "48x48 any",
            "type": "image/png",
            "purpose": "monochrome maskable"
        }])
    );
}

#[test]
fn test_manifest_parser() {
    let manifest = WebAppManifestParser::new()
        .parse(
            r##"{
                "short_name": "Demo",
                "start_url": "/index.html",
                "display": "standalone",
                "theme_color": "#2196F3",
                "icons": [{"src": "/icon-192.png", "sizes": "192x192"}]
            }"##,
        )
        .unwrap();

    assert_eq!(manifest.name, "Demo");
    assert_eq!(manifest.display, DisplayMode::Standalone);
    assert_eq!(manifest.theme_color.as_deref(), Some("#2196F3"));
    assert_eq!(manifest.icons[0].sizes, vec![Size::new(192, 192).unwrap()]);
}

#[test]
fn test_manifest_parser_errors() {
    let parser = WebAppManifestParser::default();

    assert!(matches!(parser.parse("{"), Err(ManifestError::Json(_))));
    assert!(matches!(
        parser.parse(r#"{"start_url": "/"}"#),
        Err(ManifestError::MissingField(field)) if field == "name"
    ));
    assert!(matches!(
        parser.parse(r#"{"name": "App"}"#),
        Err(ManifestError::MissingField(field)) if field == "start_url"
    ));
}

#[test]
fn test_unknown_display_falls_back() {
    let manifest = WebAppManifestParser::new()
        .parse(r#"{"name": "App", "start_url": "/", "display": "kiosk"}"#)
        .unwrap();
    assert_eq!(manifest.display, DisplayMode::Browser);
}

proptest! {
    #[test]
    fn prop_size_token_round_trips(width in 1u32..100_000, height in 1u32..100_000) {
        let token = format!("{}x{}", width, height);
        let size = Size::parse(&token).unwrap();
        prop_assert_eq!(size.to_string(), token);
    }

    #[test]
    fn prop_zero_dimension_rejected(other in 0u32..10_000) {
        let zero_width = format!("0x{}", other);
        let zero_height = format!("{}x0", other);
        prop_assert!(Size::parse(&zero_width).is_none());
        prop_assert!(Size::parse(&zero_height).is_none());
    }

    #[test]
    fn prop_parse_icons_never_panics(src in "[a-z/.]{1,12}", sizes in "[0-9xXany ]{0,20}", purpose in "[a-zA-Z ]{0,20}") {
        let doc = json!({"icons": [{"src": src, "sizes": sizes, "purpose": purpose}]});
        for icon in parse_icons(&doc) {
            prop_assert!(!icon.purpose.is_empty());
            prop_assert!(!icon.src.is_empty());
        }
    }
}
