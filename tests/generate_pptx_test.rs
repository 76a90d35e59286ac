use md2pptx::{generate_pptx, parse_markdown, ContentItem, PptxConfig, SlideRecord};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;

fn read_part(pptx_path: &Path, name: &str) -> String {
    let file = fs::File::open(pptx_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    let mut content = String::new();
    archive
        .by_name(name)
        .expect("Missing part in PPTX")
        .read_to_string(&mut content)
        .expect("Failed to read part");
    content
}

fn part_names(pptx_path: &Path) -> Vec<String> {
    let file = fs::File::open(pptx_path).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .collect()
}

// Collect the text of every <a:t> run in document order
fn text_runs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut texts = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_text = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"a:t" => in_text = false,
            Ok(Event::Text(t)) if in_text => {
                texts.push(t.unescape().expect("Failed to unescape text").into_owned())
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("Invalid XML: {}", e),
            _ => {}
        }
    }

    texts
}

#[test]
fn test_one_slide_part_per_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.pptx");

    let slides = vec![
        SlideRecord::new("First"),
        SlideRecord::new("Second"),
        SlideRecord::new("Third"),
    ];
    generate_pptx(&slides, &output_path, &PptxConfig::default()).expect("Failed to generate PPTX");

    let slide_files: Vec<String> = part_names(&output_path)
        .into_iter()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .collect();

    assert_eq!(slide_files.len(), slides.len());
    for n in 1..=3 {
        assert!(slide_files.contains(&format!("ppt/slides/slide{}.xml", n)));
    }

    let app = read_part(&output_path, "docProps/app.xml");
    assert!(app.contains("<Slides>3</Slides>"));
}

#[test]
fn test_package_contains_master_layout_and_theme() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.pptx");

    generate_pptx(&[SlideRecord::new("Only")], &output_path, &PptxConfig::default())
        .expect("Failed to generate PPTX");

    let names = part_names(&output_path);
    for required in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/_rels/slide1.xml.rels",
    ] {
        assert!(names.contains(&required.to_string()), "Missing part {}", required);
    }

    // Every generated part must be well-formed XML
    for name in names {
        let xml = read_part(&output_path, &name);
        text_runs(&xml);
    }
}

#[test]
fn test_slide_text_and_styles() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.pptx");

    let slides = parse_markdown(
        "## Slide 1: Status & Plans\n### Done\n**Highlights**\n- shipped <v2>\nPlain note\n```\n",
    );
    assert_eq!(
        slides[0].content,
        vec![
            ContentItem::Header("Done".to_string()),
            ContentItem::Bold("Highlights".to_string()),
            ContentItem::Bullet("shipped <v2>".to_string()),
            ContentItem::PlainText("Plain note".to_string()),
        ]
    );

    generate_pptx(&slides, &output_path, &PptxConfig::default()).expect("Failed to generate PPTX");

    let slide_xml = read_part(&output_path, "ppt/slides/slide1.xml");
    assert_eq!(
        text_runs(&slide_xml),
        vec!["Status & Plans", "Done", "Highlights", "shipped <v2>", "Plain note"]
    );

    assert!(slide_xml.contains(r#"sz="3200" b="1""#));
    assert!(slide_xml.contains(r#"sz="2000" b="1""#));
    assert!(slide_xml.contains(r#"sz="1800" b="1""#));
    assert!(slide_xml.contains(r#"sz="1600" b="0""#));
    assert!(slide_xml.contains(r#"sz="1400" b="0""#));
    assert_eq!(slide_xml.matches("<a:buChar").count(), 1);
    assert!(slide_xml.contains(r#"wrap="square""#));
}

#[test]
fn test_document_properties_and_aspect_ratio() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("wide.pptx");

    let config = PptxConfig {
        title: "Team <Update>".to_string(),
        aspect_ratio: "16:9".to_string(),
        ..PptxConfig::default()
    };
    generate_pptx(&[SlideRecord::new("Only")], &output_path, &config)
        .expect("Failed to generate PPTX");

    let core = read_part(&output_path, "docProps/core.xml");
    assert!(core.contains("<dc:title>Team &lt;Update&gt;</dc:title>"));

    let presentation = read_part(&output_path, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500" type="screen16x9"/>"#));
}

#[test]
fn test_empty_deck_is_still_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("empty.pptx");

    generate_pptx(&[], &output_path, &PptxConfig::default()).expect("Failed to generate PPTX");

    let names = part_names(&output_path);
    assert!(!names.iter().any(|name| name.starts_with("ppt/slides/")));
    assert!(read_part(&output_path, "docProps/app.xml").contains("<Slides>0</Slides>"));
}
