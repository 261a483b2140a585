use svg2gcode_core::{PathSyntaxError, Point};
use svg2gcode_designer::{ElementKind, ImportError, SvgImporter};

fn import(svg: &str) -> svg2gcode_designer::ImportedDocument {
    SvgImporter::new().import_string(svg).unwrap()
}

#[test]
fn test_group_transform_and_color_cascade() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50">
        <g stroke="#FF0000" transform="translate(10,5)">
            <path d="M0,0 L1,0"/>
            <g transform="translate(1 1)">
                <polyline points="0,0 2,0" stroke="00ff00"/>
            </g>
            <path d="M0 0 L0 1" style="fill:none;stroke:#123456"/>
        </g>
        <polygon points="0,0 1,0 1,1"/>
    </svg>"##;
    let doc = import(svg);
    assert_eq!((doc.width, doc.height), (100.0, 50.0));
    assert_eq!(doc.entities.len(), 4);

    let path = &doc.entities[0];
    assert_eq!(path.points, vec![Point::new(10.0, 5.0), Point::new(11.0, 5.0)]);
    assert_eq!(path.color, "#ff0000");

    let polyline = &doc.entities[1];
    assert_eq!(polyline.points, vec![Point::new(11.0, 6.0), Point::new(13.0, 6.0)]);
    assert_eq!(polyline.color, "#00ff00");
    assert!(!polyline.closed);

    assert_eq!(doc.entities[2].color, "#123456");

    // Group context is popped after </g>.
    let polygon = &doc.entities[3];
    assert!(polygon.closed);
    assert_eq!(polygon.points.len(), 4);
    assert_eq!(polygon.points[3], Point::new(0.0, 0.0));
    assert_eq!(polygon.color, "");
}

#[test]
fn test_group_style_stroke_is_inherited() {
    let svg = r#"<svg><g style="stroke:#AA0000"><g><path d="M0 0 L1 1"/></g></g></svg>"#;
    assert_eq!(import(svg).entities[0].color, "#aa0000");
}

#[test]
fn test_element_transform_applies_after_group() {
    let svg = r#"<svg><g transform="translate(5,0)"><path transform="translate(0,3)" d="M1 1 L2 2"/></g></svg>"#;
    assert_eq!(
        import(svg).entities[0].points,
        vec![Point::new(6.0, 4.0), Point::new(7.0, 5.0)]
    );
}

#[test]
fn test_unsupported_transform_is_identity() {
    let svg = r#"<svg><g transform="rotate(90)"><path d="M1 2 L3 4"/></g></svg>"#;
    assert_eq!(import(svg).entities[0].points[0], Point::new(1.0, 2.0));
}

#[test]
fn test_construction_color_filtered() {
    let svg = r##"<svg>
        <path stroke="#0000FF" d="M0 0 L1 1"/>
        <path stroke="#000000" d="M0 0 L2 2"/>
    </svg>"##;
    let doc = import(svg);
    assert_eq!(doc.entities.len(), 1);
    assert_eq!(doc.filtered, 1);

    let doc = SvgImporter::new()
        .with_construction_color(Some("none"))
        .import_string(svg)
        .unwrap();
    assert_eq!(doc.entities.len(), 2);

    let doc = SvgImporter::new()
        .with_construction_color(Some("000000"))
        .import_string(svg)
        .unwrap();
    assert_eq!(doc.entities.len(), 1);
    assert_eq!(doc.entities[0].color, "#0000ff");
}

#[test]
fn test_unsupported_commands_are_skipped() {
    let svg = r#"<svg>
        <path d="M0 0 A 5 5 0 0 1 10 10"/>
        <path d="M0 0 Q 5 5 10 0"/>
        <path d="M0 0 L1 0"/>
    </svg>"#;
    let doc = import(svg);
    assert_eq!(doc.skipped, 2);
    assert_eq!(doc.entities.len(), 1);
}

#[test]
fn test_empty_geometry_is_skipped() {
    let svg = r#"<svg><path d="  "/><path/><polyline points=""/><path d="Z"/></svg>"#;
    let doc = import(svg);
    assert!(doc.is_empty());
    assert_eq!(doc.skipped, 0);
}

#[test]
fn test_path_syntax_error_reports_element() {
    let svg = r#"<svg><path d="M0 0 L1 1"/><path d="M0 0 L 5"/></svg>"#;
    match SvgImporter::new().import_string(svg) {
        Err(ImportError::Syntax {
            element,
            index,
            excerpt,
            source,
        }) => {
            assert_eq!(element, ElementKind::Path);
            assert_eq!(index, 1);
            assert_eq!(excerpt, "M0 0 L 5");
            assert_eq!(
                source,
                PathSyntaxError::MissingCoordinates {
                    command: 'L',
                    expected: 2,
                    found: 1
                }
            );
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_excerpt_is_truncated() {
    let long = format!("M0 0 {} L", "L1 1 ".repeat(20));
    let svg = format!(r#"<svg><path d="{long}"/></svg>"#);
    let err = SvgImporter::new().import_string(&svg).unwrap_err();
    let ImportError::Syntax { excerpt, .. } = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(excerpt.chars().count(), 43);
    assert!(excerpt.ends_with("..."));
    assert!(err.to_string().starts_with("<path> #0"));
}

#[test]
fn test_points_list_errors() {
    let svg = r#"<svg><polygon points="0,0 1,0 1"/></svg>"#;
    assert!(matches!(
        SvgImporter::new().import_string(svg),
        Err(ImportError::Syntax {
            element: ElementKind::Polygon,
            source: PathSyntaxError::OddCoordinateCount { found: 5 },
            ..
        })
    ));
}

#[test]
fn test_malformed_xml() {
    assert!(matches!(
        SvgImporter::new().import_string("<svg><path d='M0 0'></svg>"),
        Err(ImportError::Xml(_))
    ));
}

#[test]
fn test_closed_polyline_detected() {
    let svg = r#"<svg><polyline points="0,0 4,0 4,4 0,0"/></svg>"#;
    assert!(import(svg).entities[0].closed);
}

#[test]
fn test_sibling_groups_do_not_leak_context() {
    let svg = r##"<svg>
        <g transform="translate(10,0)" stroke="#111111"><path d="M0 0 L1 0"/></g>
        <g transform="translate(0,20)"><a><polyline points="0,0 1,0"/></a></g>
        <path d="M0 0 L1 0"/>
    </svg>"##;
    let doc = import(svg);
    assert_eq!(doc.entities.len(), 3);
    assert_eq!(doc.entities[0].points[0], Point::new(10.0, 0.0));
    // Nested inside a non-group container, still under the second group only.
    assert_eq!(doc.entities[1].points[0], Point::new(0.0, 20.0));
    assert_eq!(doc.entities[1].color, "");
    assert_eq!(doc.entities[2].points[0], Point::new(0.0, 0.0));
}

#[test]
fn test_syntax_error_index_counts_across_groups() {
    let svg = r#"<svg><g><path d="M0 0 L1 1"/></g><g><g><polyline points="1,2,3"/></g></g></svg>"#;
    match SvgImporter::new().import_string(svg).unwrap_err() {
        ImportError::Syntax { element, index, .. } => {
            assert_eq!(element, ElementKind::Polyline);
            assert_eq!(index, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_import_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("square.svg");
    std::fs::write(&path, r#"<svg viewBox="0 0 5 5"><polygon points="0,0 1,0 1,1"/></svg>"#).unwrap();

    let doc = SvgImporter::new().import_file(&path).unwrap();
    assert_eq!(doc.height, 5.0);
    assert_eq!(doc.entities.len(), 1);

    let missing = SvgImporter::new().import_file(dir.path().join("missing.svg"));
    assert!(matches!(missing, Err(ImportError::Io(_))));
}
