//! Library API integration tests
use colligo_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_collection_page_fixture() {
    let html = std::fs::read_to_string(get_fixture_path("collection_page.html")).unwrap();
    let page = CollectionPage::parse(&html);

    assert_eq!(page.collection_key().unwrap(), "pkey55-coll77");

    let sections = page.sections().unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].name, "Handwashing");
    assert_eq!(sections[0].section_key, "sec-handwash");
    assert_eq!(sections[2].id, 262354);
}

#[test]
fn test_excluded_sections_are_in_default_config() {
    let html = std::fs::read_to_string(get_fixture_path("collection_page.html")).unwrap();
    let page = CollectionPage::parse(&html);
    let config = ImportConfig::default();

    let kept: Vec<Section> = page
        .sections()
        .unwrap()
        .into_iter()
        .filter(|s| !config.excluded_section_ids.contains(&s.id))
        .collect();

    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|s| s.name != "Internal Drafts"));
}

#[test]
fn test_multilanguage_page_fixture() {
    let html = std::fs::read_to_string(get_fixture_path("multilanguage_page.html")).unwrap();
    let page = CollectionPage::parse(&html);

    assert_eq!(page.collection_key().unwrap(), "qac6i4-foozd4-68u325");

    let sections = page.sections().unwrap();
    let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["French", "Spanish", "Tetun", "isiZulu"]);

    // Known languages resolve to native names, unknown ones pass through
    assert_eq!(display_title("French"), "Français");
    assert_eq!(display_title("Tetun"), "Tetun");
    assert_eq!(Language::lookup("isiZulu").unwrap().code, "zul");
}

#[test]
fn test_channel_assembly_and_validation() {
    let config = ImportConfig::default();
    let mut channel = config.channel_skeleton();

    let license = License::cc_by_sa("Stanford Center for Health Education");
    channel.add_child(ContentNode::Topic(TopicNode {
        source_id: "sec-handwash".to_string(),
        title: "Handwashing".to_string(),
        children: vec![
            ContentNode::Video(VideoNode {
                source_id: "https://cdn.example.com/videos/wash.mp4".to_string(),
                title: "How to wash your hands".to_string(),
                license: license.clone(),
                url: "https://cdn.example.com/videos/wash.mp4".to_string(),
                thumbnail_url: None,
            }),
            ContentNode::Slideshow(SlideshowNode {
                source_id: "https://brandfolder.com/api/v4/collections/c/sections/sec-handwash/assets".to_string(),
                title: "Handwashing".to_string(),
                language: Some("en".to_string()),
                license: license.clone(),
                thumbnail_url: "https://cdn.example.com/a/view@2x.png".to_string(),
                slides: vec![Slide {
                    url: "https://cdn.example.com/a/view@2x.png".to_string(),
                    caption: Some("Wash your hands".to_string()),
                }],
            }),
        ],
    }));

    assert!(channel.validate().is_ok());

    let summary = channel.summary();
    assert_eq!(summary.topics, 1);
    assert_eq!(summary.videos, 1);
    assert_eq!(summary.slideshows, 1);
    assert_eq!(summary.total(), 3);

    let json = serde_json::to_value(&channel).unwrap();
    assert_eq!(json["children"][0]["kind"], "topic");
    assert_eq!(json["children"][0]["children"][0]["kind"], "video");
}

#[test]
fn test_offline_document_pipeline() {
    // image bytes -> PDF on disk -> document node -> written package
    let tmp = tempfile::TempDir::new().unwrap();
    let documents_dir = tmp.path().join("documents");
    std::fs::create_dir_all(&documents_dir).unwrap();

    let img = image::RgbImage::from_pixel(6, 4, image::Rgb([0, 100, 200]));
    let mut jpeg = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90);
    img.write_with_encoder(encoder).unwrap();

    let source_id = "https://brandfolder.com/api/v4/collections/c/sections/sec-masks/assets";
    let pdf_path = document_path(&documents_dir, source_id);
    assemble_pdf(&[PdfPage { jpeg, width: 6, height: 4 }], &pdf_path).unwrap();
    assert!(pdf_path.exists());

    let config = ImportConfig::default();
    let mut channel = config.channel_skeleton();
    channel.add_child(ContentNode::Document(DocumentNode {
        source_id: source_id.to_string(),
        title: "Mask Wearing".to_string(),
        language: Some("en".to_string()),
        license: License::cc_by_sa(&config.copyright_holder),
        thumbnail_url: "https://cdn.example.com/m/view@2x.png".to_string(),
        path: pdf_path,
        digest: None,
    }));
    channel.validate().unwrap();

    let out = tmp.path().join("channel");
    let report = write_package(channel, &out).unwrap();

    assert_eq!(report.files_copied, 1);
    assert!(out.join(MANIFEST_NAME).exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(report.manifest_path).unwrap()).unwrap();
    let doc = &manifest["children"][0];
    assert_eq!(doc["kind"], "document");
    assert_eq!(doc["digest"].as_str().unwrap().len(), 64);

    let packaged = out.join(doc["path"].as_str().unwrap());
    let bytes = std::fs::read(packaged).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_default_config_urls() {
    let config = ImportConfig::default();
    assert!(config.english_collection_url.starts_with("https://brandfolder.com/"));
    assert!(config.slideshows_url.contains("multiple-languages"));
}
