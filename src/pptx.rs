// ABOUTME: PPTX generation module for the md2pptx application
// ABOUTME: Writes parsed slide records into a PowerPoint package, one slide per record

use crate::errors::Result;
use crate::slide::{ContentItem, SlideRecord};
use crate::template;
use crate::utils::{self, escape_xml};
use log::{debug, info, warn};
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use zip::{write::FileOptions, ZipWriter};

/// Configuration for PPTX generation
pub struct PptxConfig {
    pub title: String,
    pub aspect_ratio: String, // "4:3" or "16:9"
    /// Font size of slide titles in points
    pub title_font_size: u32,
}

impl Default for PptxConfig {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            aspect_ratio: "4:3".to_string(),
            title_font_size: 32,
        }
    }
}

/// Slide width, height (EMU) and the `sldSz` type for an aspect ratio
pub fn slide_dimensions(aspect_ratio: &str) -> (u64, u64, &'static str) {
    match aspect_ratio {
        "4:3" => (9144000, 6858000, "screen4x3"),
        "16:9" => (9144000, 5143500, "screen16x9"),
        _ => {
            warn!(
                "Unsupported aspect ratio: {}. Using 4:3 instead.",
                aspect_ratio
            );
            (9144000, 6858000, "screen4x3")
        }
    }
}

/// Generate a PPTX presentation with one slide per record
pub fn generate_pptx(
    slides: &[SlideRecord],
    output_file: &Path,
    config: &PptxConfig,
) -> Result<()> {
    info!(
        "Generating PPTX with {} slides at {:?}",
        slides.len(),
        output_file
    );

    utils::ensure_parent_directory_exists(output_file)?;

    let file = fs::File::create(output_file)?;
    let mut zip = ZipWriter::new(file);

    let (cx, cy, size_type) = slide_dimensions(&config.aspect_ratio);

    write_part(&mut zip, "[Content_Types].xml", &content_types_xml(slides.len()))?;
    write_part(&mut zip, "_rels/.rels", PACKAGE_RELS)?;
    write_part(&mut zip, "docProps/app.xml", &app_xml(slides.len()))?;
    write_part(&mut zip, "docProps/core.xml", &core_xml(&config.title))?;

    write_part(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels_xml(slides.len()),
    )?;
    write_part(
        &mut zip,
        "ppt/presentation.xml",
        &presentation_xml(slides.len(), cx, cy, size_type),
    )?;
    write_part(&mut zip, "ppt/presProps.xml", &template::pres_props_xml())?;
    write_part(&mut zip, "ppt/viewProps.xml", &template::view_props_xml())?;
    write_part(&mut zip, "ppt/tableStyles.xml", template::table_styles_xml())?;
    write_part(&mut zip, "ppt/theme/theme1.xml", template::theme_xml())?;
    write_part(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        &template::slide_master_xml(cx, cy),
    )?;
    write_part(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        template::slide_master_rels_xml(),
    )?;
    write_part(
        &mut zip,
        "ppt/slideLayouts/slideLayout1.xml",
        &template::title_and_content_layout_xml(),
    )?;
    write_part(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        template::slide_layout_rels_xml(),
    )?;

    for (i, slide) in slides.iter().enumerate() {
        let slide_num = i + 1;
        info!("Processing slide {}: {}", slide_num, slide.title);

        write_part(
            &mut zip,
            &format!("ppt/slides/slide{}.xml", slide_num),
            &render_slide_xml(slide, config),
        )?;
        write_part(
            &mut zip,
            &format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            template::slide_rels_xml(),
        )?;
    }

    info!("Finalizing PPTX file");
    zip.finish()?;

    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &str,
) -> Result<()> {
    debug!("Writing part: {}", name);
    zip.start_file(name, FileOptions::default())?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

/// Render the slide part for one record: a title placeholder and a body placeholder
pub fn render_slide_xml(slide: &SlideRecord, config: &PptxConfig) -> String {
    let mut shapes = String::new();

    shapes.push_str(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>"#,
    );
    shapes.push_str("<p:txBody><a:bodyPr/><a:lstStyle/><a:p>");
    shapes.push_str(&format!(
        r#"<a:r><a:rPr lang="en-US" sz="{}" b="1" dirty="0"/><a:t>{}</a:t></a:r>"#,
        config.title_font_size * 100,
        escape_xml(&slide.title)
    ));
    shapes.push_str("</a:p></p:txBody></p:sp>\n");

    shapes.push_str(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>"#,
    );
    shapes.push_str(
        r#"<p:txBody><a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
    );

    let paragraphs: Vec<String> = slide
        .content
        .iter()
        .filter(|item| is_renderable(item))
        .map(render_paragraph)
        .collect();

    if paragraphs.is_empty() {
        // A text body needs at least one paragraph
        shapes.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    } else {
        shapes.push_str(&paragraphs.join(""));
    }
    shapes.push_str("</p:txBody></p:sp>");

    template::slide_xml(&shapes)
}

/// Empty items and code fences never reach the slide body
fn is_renderable(item: &ContentItem) -> bool {
    let text = item.text();
    !text.is_empty() && !text.starts_with("```")
}

/// Render one content item as a body paragraph styled by its tag
pub fn render_paragraph(item: &ContentItem) -> String {
    let style = item.style();

    let bullet = if style.bulleted {
        r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#
    } else {
        "<a:buNone/>"
    };
    let (margin, indent) = if style.bulleted {
        (342900, -342900)
    } else {
        (0, 0)
    };

    format!(
        r#"<a:p><a:pPr marL="{margin}" indent="{indent}"><a:spcAft><a:spcPts val="{space_after}"/></a:spcAft>{bullet}</a:pPr><a:r><a:rPr lang="en-US" sz="{size}" b="{bold}" dirty="0"/><a:t>{text}</a:t></a:r></a:p>"#,
        margin = margin,
        indent = indent,
        space_after = style.space_after_pt * 100,
        bullet = bullet,
        size = style.size_pt * 100,
        bold = if style.bold { 1 } else { 0 },
        text = escape_xml(item.text()),
    )
}

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

/// Relationship ids below this are taken by the master, theme and property parts
const FIRST_SLIDE_RID: usize = 6;

fn content_types_xml(slide_count: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
    <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
    <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
    <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
    <Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/>
    <Override PartName="/ppt/tableStyles.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
{slides}
</Types>"#,
        slides = (1..=slide_count)
            .map(|n| {
                format!(
                    r#"    <Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                    n
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    )
}

fn app_xml(slide_count: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>md2pptx</Application>
    <Slides>{}</Slides>
</Properties>"#,
        slide_count
    )
}

fn core_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{}</dc:title>
    <dc:creator>md2pptx</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
        escape_xml(title),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut pres_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps" Target="viewProps.xml"/>
    <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
    <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles" Target="tableStyles.xml"/>
"#,
    );

    for n in 1..=slide_count {
        pres_rels.push_str(&format!(
            r#"    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            FIRST_SLIDE_RID + n - 1,
            n
        ));
        pres_rels.push('\n');
    }

    pres_rels.push_str("</Relationships>");
    pres_rels
}

fn presentation_xml(slide_count: usize, cx: u64, cy: u64, size_type: &str) -> String {
    let slide_ids = if slide_count == 0 {
        String::new()
    } else {
        format!(
            "    <p:sldIdLst>\n{}\n    </p:sldIdLst>\n",
            (0..slide_count)
                .map(|i| format!(
                    r#"        <p:sldId id="{}" r:id="rId{}"/>"#,
                    256 + i,
                    FIRST_SLIDE_RID + i
                ))
                .collect::<Vec<String>>()
                .join("\n")
        )
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
    <p:sldMasterIdLst>
        <p:sldMasterId id="2147483648" r:id="rId1"/>
    </p:sldMasterIdLst>
{slide_ids}    <p:sldSz cx="{cx}" cy="{cy}" type="{size_type}"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
        slide_ids = slide_ids,
        cx = cx,
        cy = cy,
        size_type = size_type
    )
}
