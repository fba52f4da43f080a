//! Integration tests for blueprint composition.

use std::fs;

use drawscape::layout::{border_box, LegendLayout};
use drawscape::svg::parse_svg;
use drawscape::{
    BlueprintData, ComposeOptions, Composer, LayoutConfig, LegendRow, Orientation, PaperProfile,
    PaperSize, Polyline, StrokeFont,
};
use tempfile::tempdir;

/// Each character is a 10 x 20 box on a 12-unit advance.
struct MockFont;

impl StrokeFont for MockFont {
    fn name(&self) -> &str {
        "mock"
    }

    fn lines_for_text(&self, text: &str) -> Vec<Polyline> {
        text.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| {
                let x = i as f64 * 12.0;
                vec![(x, -10.0), (x + 10.0, -10.0), (x + 10.0, 10.0), (x, 10.0), (x, -10.0)]
            })
            .collect()
    }
}

fn mock() -> Composer<MockFont> {
    Composer::new(MockFont)
}

const SLOOP: &str = r#"{
    "title": "SLOOP",
    "subtitle": "",
    "specifications": [{"label": "LOA", "detail": "32ft"}],
    "paper_size": "a4",
    "orientation": "portrait"
}"#;

// ==================== Examples ====================

#[test]
fn test_sloop_example() {
    let data = BlueprintData::from_json_str(SLOOP).unwrap();
    let composer = Composer::futural();
    let drawing = composer.compose(&data, &ComposeOptions::default()).unwrap();

    let svg = drawing.to_svg();
    assert!(svg.contains(r#"width="210mm""#));
    assert!(svg.contains(r#"height="297mm""#));
    assert_eq!(drawing.group_ids(), vec!["borders", "legend", "title"]);
    assert!(!drawing.has_group("subtitle"));

    let legend = drawing.group("legend").unwrap().element.descendants();
    assert!(legend.iter().any(|e| e.id() == Some("legend-row-divider-0")));
    assert!(!legend.iter().any(|e| e.id() == Some("legend-row-divider-1")));

    let title = &drawing.group("title").unwrap().element;
    let strokes = composer.font().lines_for_text("SLOOP");
    assert_eq!(title.element_children().count(), strokes.len());
}

#[test]
fn test_unknown_paper_size_falls_back_to_a4() {
    let data = BlueprintData::new("Sloop").with_paper_size("a5");
    let drawing = mock().compose(&data, &ComposeOptions::default()).unwrap();
    assert_eq!((drawing.width, drawing.height), (210.0, 297.0));
}

// ==================== Invariants ====================

#[test]
fn test_idempotent_output() {
    let data = BlueprintData::from_json_str(SLOOP)
        .unwrap()
        .with_subtitle("Gaff rig")
        .with_row("Beam", "10ft");

    let first = Composer::futural()
        .compose(&data, &ComposeOptions::default())
        .unwrap()
        .to_svg();
    let second = Composer::futural()
        .compose(&data, &ComposeOptions::default())
        .unwrap()
        .to_svg();
    assert_eq!(first, second);
}

#[test]
fn test_missing_subtitle_keeps_title_position() {
    let composer = mock();
    let plain = BlueprintData::new("Sloop");
    let with_subtitle = plain.clone().with_subtitle("Gaff rig");

    let a = composer.compose(&plain, &ComposeOptions::default()).unwrap();
    let b = composer.compose(&with_subtitle, &ComposeOptions::default()).unwrap();

    assert!(!a.has_group("subtitle"));
    assert!(b.has_group("subtitle"));
    assert_eq!(
        a.group("title").unwrap().element.get_attr("transform"),
        b.group("title").unwrap().element.get_attr("transform")
    );
}

#[test]
fn test_title_right_alignment() {
    let composer = mock();
    for size in PaperSize::ALL {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let paper = PaperProfile::new(size, orientation);
            let config = LayoutConfig::for_class(size.size_class());
            for title in ["A", "SLOOP", "A MUCH LONGER TITLE"] {
                let b = composer.title_box(title, &paper, &config);
                let edge = b.x + b.width + config.title_right_margin();
                assert!((edge - paper.width).abs() < 1e-9, "{} on {}", title, size);
            }
        }
    }
}

#[test]
fn test_border_for_every_size() {
    for size in PaperSize::ALL {
        let (w, h) = size.dimensions_mm();
        let config = LayoutConfig::for_class(size.size_class());

        let portrait = PaperProfile::new(size, Orientation::Portrait);
        let landscape = PaperProfile::new(size, Orientation::Landscape);
        assert_eq!((portrait.width, portrait.height), (w, h));
        assert_eq!((landscape.width, landscape.height), (h, w));

        let b = border_box(&landscape, &config);
        assert_eq!((b.x, b.y), (config.border_inset, config.border_inset));
        assert!((b.width - (h - 2.0 * config.border_inset)).abs() < 1e-9);
        assert!((b.height - (w - 2.0 * config.border_inset)).abs() < 1e-9);
    }
}

#[test]
fn test_legend_height_and_minimum_width() {
    let config = LayoutConfig::large();
    let rows = vec![LegendRow::new("", ""); 4];
    let legend = LegendLayout::measure(&rows, &MockFont, &config);

    assert_eq!(legend.height(), 4.0 * config.legend_cell_height);
    assert_eq!(legend.width(), 2.0 * config.legend_padding);
}

#[test]
fn test_legend_columns_follow_widest_text() {
    let config = LayoutConfig::small();
    let rows = vec![LegendRow::new("LOA", "32ft"), LegendRow::new("Beam", "10ft 6in")];
    let legend = LegendLayout::measure(&rows, &MockFont, &config);

    // "Beam" spans 12 * 3 + 10 units, "10ft 6in" 12 * 7 + 10.
    assert!((legend.name_width - (46.0 * 0.1 + 8.0)).abs() < 1e-9);
    assert!((legend.detail_width - (94.0 * 0.1 + 8.0)).abs() < 1e-9);
}

const FLEET: &str = r#"{
    "title": "Fleet",
    "specifications": [
        {"label": "LOA", "detail": "32ft"},
        {"label": "Beam", "detail": "10ft 6in"},
        {"label": "Draft", "detail": "4ft"}
    ]
}"#;

#[test]
fn test_legend_row_geometry() {
    let data = BlueprintData::from_json_str(FLEET).unwrap();
    let drawing = mock().compose(&data, &ComposeOptions::default()).unwrap();
    let legend = &drawing.group("legend").unwrap().element;

    // A4 is small: origin (14, 14), 6 mm rows. "Draft" is 12 * 4 + 10
    // units wide, so the divider sits at 14 + 5.8 + 8.
    for (i, y) in ["20", "26", "32"].into_iter().enumerate() {
        let divider = legend.find_by_id(&format!("legend-row-divider-{}", i)).unwrap();
        assert_eq!(divider.get_attr("y1"), Some(y));
        assert_eq!(divider.get_attr("y2"), Some(y));
        assert_eq!(divider.get_attr("x1"), Some("14"));
        assert_eq!(divider.get_attr("x2"), Some("45.2"));
    }

    let column = legend.find_by_id("legend-column-divider").unwrap();
    assert_eq!(column.get_attr("x1"), Some("27.8"));

    let name = legend.find_by_id("legend-label-1-name").unwrap();
    assert_eq!(name.get_attr("transform"), Some("translate(16, 23) scale(0.1)"));
    let detail = legend.find_by_id("legend-label-1-detail").unwrap();
    assert_eq!(detail.get_attr("transform"), Some("translate(29.8, 23) scale(0.1)"));
}

#[test]
fn test_legend_rows_keep_input_order() {
    let data = BlueprintData::from_json_str(FLEET).unwrap();
    let drawing = mock().compose(&data, &ComposeOptions::default()).unwrap();
    let legend = &drawing.group("legend").unwrap().element;

    // MockFont draws one stroke per visible character.
    let strokes = |id: String| legend.find_by_id(&id).unwrap().element_children().count();
    let names: Vec<usize> = (0..3).map(|i| strokes(format!("legend-label-{}-name", i))).collect();
    let details: Vec<usize> = (0..3).map(|i| strokes(format!("legend-label-{}-detail", i))).collect();
    assert_eq!(names, vec![3, 4, 5]);
    assert_eq!(details, vec![4, 7, 3]);
    assert!(legend.find_by_id("legend-label-3-name").is_none());
}

#[test]
fn test_orientation_from_json_ignores_case() {
    let json = r#"{"title": "Sloop", "paper_size": "a3", "orientation": "Landscape"}"#;
    let data = BlueprintData::from_json_str(json).unwrap();
    let drawing = mock().compose(&data, &ComposeOptions::default()).unwrap();
    assert_eq!((drawing.width, drawing.height), (420.0, 297.0));
}

#[test]
fn test_orientation_override() {
    let data = BlueprintData::new("Sloop").with_paper_size("a3");
    let drawing = mock()
        .compose(&data, &ComposeOptions::new().landscape())
        .unwrap();
    assert_eq!((drawing.width, drawing.height), (420.0, 297.0));
}

// ==================== Inset ====================

#[test]
fn test_inset_is_centred() {
    let dir = tempdir().unwrap();
    let art = dir.path().join("art.svg");
    fs::write(
        &art,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><path d="M 0 0 L 100 50"/></svg>"#,
    )
    .unwrap();

    let drawing = mock()
        .compose(&BlueprintData::new("Sloop"), &ComposeOptions::new().with_inset(&art))
        .unwrap();

    let inset = &drawing.group("inset").unwrap().element;
    assert_eq!(inset.get_attr("transform"), Some("translate(14, 103) scale(1.82)"));
    assert_eq!(inset.element_children().count(), 1);
}

#[test]
fn test_inset_with_xlink_reparses() {
    let dir = tempdir().unwrap();
    let art = dir.path().join("linked.svg");
    fs::write(
        &art,
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 10 10">
            <defs><path id="a" d="M 0 0 L 10 10" stroke="black"/></defs>
            <use xlink:href="#a"/>
        </svg>"##,
    )
    .unwrap();

    let drawing = mock()
        .compose(&BlueprintData::new("Sloop"), &ComposeOptions::new().with_inset(&art))
        .unwrap();
    let svg = drawing.to_svg();
    assert!(svg.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));

    let reparsed = parse_svg(&svg).unwrap();
    assert!(reparsed
        .descendants()
        .iter()
        .any(|e| e.name == "use" && e.get_attr("xlink:href") == Some("#a")));
}

#[test]
fn test_plain_drawing_has_no_xlink() {
    let drawing = mock().compose(&BlueprintData::new("Sloop"), &ComposeOptions::default()).unwrap();
    assert!(!drawing.to_svg().contains("xmlns:xlink"));
}

#[test]
fn test_inset_with_empty_view_box_uses_size() {
    let dir = tempdir().unwrap();
    let art = dir.path().join("flat.svg");
    fs::write(
        &art,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 0 0" width="200" height="100"><path d="M 0 0 L 200 100"/></svg>"#,
    )
    .unwrap();

    let drawing = mock()
        .compose(&BlueprintData::new("Sloop"), &ComposeOptions::new().with_inset(&art))
        .unwrap();

    // 182 x 269 mm available, so 200 x 100 scales by 0.91.
    let inset = &drawing.group("inset").unwrap().element;
    assert_eq!(inset.get_attr("transform"), Some("translate(14, 103) scale(0.91)"));
}

#[test]
fn test_missing_inset_is_omitted() {
    let dir = tempdir().unwrap();
    let options = ComposeOptions::new().with_inset(dir.path().join("missing.svg"));
    let drawing = mock().compose(&BlueprintData::new("Sloop"), &options).unwrap();

    assert!(!drawing.has_group("inset"));
    assert!(drawing.has_group("title"));
}

#[test]
fn test_unparseable_inset_fails() {
    let dir = tempdir().unwrap();
    let art = dir.path().join("broken.svg");
    fs::write(&art, "<svg><g></svg>").unwrap();

    let result = mock().compose(&BlueprintData::new("Sloop"), &ComposeOptions::new().with_inset(&art));
    assert!(result.is_err());
}

// ==================== Input files ====================

#[test]
fn test_blueprint_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sloop.json");
    fs::write(&path, SLOOP).unwrap();

    let svg = drawscape::blueprint_file(&path, &ComposeOptions::default()).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"id="legend-label-0-detail""#));
}

#[test]
fn test_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    let result = BlueprintData::from_file(&path);
    assert!(matches!(result, Err(drawscape::Error::MalformedInput { .. })));
}
