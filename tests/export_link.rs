// tests/export_link.rs
//
// Export link discovery against page snippets shaped like the ones the site
// serves in its different page builds.
//
use listing_watch::config::consts::EXPORT_API_FRAGMENT;
use listing_watch::specs::export_link::{absolutize, ExportLinkExtractor, LinkStrategy};

const PAGE: &str = "https://www.redfin.com/zipcode/38104/filter/remarks=assumable";

fn extractor() -> ExportLinkExtractor {
    ExportLinkExtractor::new(EXPORT_API_FRAGMENT).unwrap()
}

#[test]
fn export_api_link_beats_generic_csv_link() {
    let html = r#"<a href="/files/sample.csv">sample</a>
        <a id="download" href="/stingray/api/gis-csv?al=1&amp;region_id=5">Download All</a>"#;
    assert_eq!(
        extractor().extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/stingray/api/gis-csv?al=1&region_id=5")
    );
}

#[test]
fn download_endpoint_with_csv_format() {
    let html = r#"<a class="dl" href="https://www.redfin.com/download?id=3&format=csv">CSV</a>"#;
    assert_eq!(
        extractor().extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/download?id=3&format=csv")
    );
}

#[test]
fn data_attribute_on_button() {
    let html = r#"<button data-href="/stingray/api/gis-csv?al=1&num_homes=350">Download</button>"#;
    assert_eq!(
        extractor().extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/stingray/api/gis-csv?al=1&num_homes=350")
    );
}

#[test]
fn export_api_button_beats_download_link() {
    // data-href counts as an href: the export button outranks a format=csv link
    let html = r#"<a href="/download?id=3&format=csv">x</a>
        <button data-href="/stingray/api/gis-csv?al=1">Download All</button>"#;
    assert_eq!(
        extractor().extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/stingray/api/gis-csv?al=1")
    );
}

#[test]
fn relative_csv_link_resolves_against_page() {
    let html = r#"<a href="exports/list.csv">list</a>"#;
    assert_eq!(
        extractor().extract(html, "https://www.redfin.com/city/1/TN/Memphis").as_deref(),
        Some("https://www.redfin.com/city/1/TN/exports/list.csv")
    );
}

#[test]
fn single_quoted_markup() {
    let html = "<a href='/stingray/api/gis-csv?al=2'>Download</a>";
    assert_eq!(
        extractor().extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/stingray/api/gis-csv?al=2")
    );
}

#[test]
fn json_escaped_link_is_unescaped() {
    let html = r#"<script>window.__data={"downloadUrl":"\/stingray\/api\/gis-csv?al=1&num_homes=350"}</script>"#;
    assert_eq!(
        extractor().extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/stingray/api/gis-csv?al=1&num_homes=350")
    );
}

#[test]
fn page_without_any_link() {
    let html = "<html><body><p>No results</p></body></html>";
    assert_eq!(extractor().extract(html, PAGE), None);
}

#[test]
fn strategies_run_in_fixed_order() {
    assert_eq!(
        extractor().strategy_names(),
        vec![
            "href-export-api",
            "href-download-csv",
            "data-attr-export-api",
            "href-dot-csv",
            "single-quoted-export-api",
            "single-quoted-dot-csv",
            "json-escaped-export-api",
        ]
    );
}

struct Fixed;
impl LinkStrategy for Fixed {
    fn name(&self) -> &str { "fixed" }
    fn attempt(&self, _html: &str) -> Option<String> { Some("/fallback.csv".into()) }
}

#[test]
fn pushed_strategy_is_last_resort() {
    let mut ex = extractor();
    ex.push(Box::new(Fixed));
    assert_eq!(
        ex.extract("<p>nothing</p>", PAGE).as_deref(),
        Some("https://www.redfin.com/fallback.csv")
    );
    // Built-in strategies still win when they hit
    let html = r#"<a href="/stingray/api/gis-csv?al=9">x</a>"#;
    assert_eq!(
        ex.extract(html, PAGE).as_deref(),
        Some("https://www.redfin.com/stingray/api/gis-csv?al=9")
    );
}

#[test]
fn direct_export_urls() {
    let ex = extractor();
    assert!(ex.is_direct_export("https://www.redfin.com/stingray/api/gis-csv?al=1"));
    assert!(ex.is_direct_export("https://example.com/exports/list.CSV"));
    assert!(!ex.is_direct_export(PAGE));
}

#[test]
fn absolutize_keeps_href_on_bad_base() {
    assert_eq!(absolutize("/a.csv", "not a url"), "/a.csv");
    assert_eq!(absolutize("https://x.com/a.csv", PAGE), "https://x.com/a.csv");
}
