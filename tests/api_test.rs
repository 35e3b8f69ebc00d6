//! HTTP surface tests: error paths plus the full extraction flow
//! against small in-memory PDF fixtures.

use axum_test::TestServer;
use serde_json::Value;

use toolbox_server::config::Config;
use toolbox_server::routes::app_router;
use toolbox_server::state::AppState;

fn test_server() -> TestServer {
    let mut config = Config::default();
    config.media.converter_endpoint = "https://convert.example/apis/button".to_string();
    let state = AppState::new(config);
    TestServer::new(app_router(state)).expect("failed to start test server")
}

#[tokio::test]
async fn health_reports_healthy() {
    let server = test_server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn youtube_lookup_builds_deterministic_links() {
    let server = test_server();
    let response = server
        .get("/api/v1/media/youtube")
        .add_query_param("url", "https://www.youtube.com/watch?v=abc123")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["cover"],
        "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
    );
    let formats = body["formats"].as_array().unwrap();
    assert_eq!(formats.len(), 3);
    assert_eq!(
        formats[0]["url"],
        "https://convert.example/apis/button/mp4/abc123"
    );
    assert_eq!(
        formats[2]["url"],
        "https://convert.example/apis/button/mp3/abc123"
    );
    assert_eq!(formats[2]["kind"], "audio");
}

#[tokio::test]
async fn youtube_lookup_rejects_invalid_links() {
    let server = test_server();
    let response = server
        .get("/api/v1/media/youtube")
        .add_query_param("url", "https://vimeo.com/12345")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_url");
}

#[tokio::test]
async fn unknown_extraction_run_is_not_found() {
    let server = test_server();
    let response = server
        .get("/api/v1/pdf/00000000-0000-0000-0000-000000000000")
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

const BOUNDARY: &str = "test-boundary";

fn multipart_file(file_name: &str, contents: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}

/// Build a well-formed PDF with `page_count` empty 72x72pt pages.
///
/// Objects are written in order and the xref offsets computed from the
/// buffer, so MuPDF opens it without repair.
fn minimal_pdf(page_count: usize) -> Vec<u8> {
    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i + 3)).collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
    ];
    for _ in 0..page_count {
        objects.push("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 72 72] >>".to_string());
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    pdf
}

#[tokio::test]
async fn extraction_flow_serves_pages_and_toggles_selection() {
    let server = test_server();
    let (content_type, body) = multipart_file("fixture.pdf", &minimal_pdf(1));

    let response = server
        .post("/api/v1/pdf/extract")
        .content_type(&content_type)
        .bytes(body.into())
        .await;
    response.assert_status_ok();
    let run: Value = response.json();
    assert_eq!(run["fileName"], "fixture");
    assert_eq!(run["pageCount"], 1);
    assert_eq!(run["pages"][0]["index"], 1);
    assert_eq!(run["pages"][0]["selected"], true);
    // 72pt page at the default 2.0 scale
    assert_eq!(run["pages"][0]["width"], 144);
    let id = run["id"].as_str().unwrap().to_string();

    let response = server.get(&format!("/api/v1/pdf/{}", id)).await;
    response.assert_status_ok();
    let stored: Value = response.json();
    assert_eq!(stored["pageCount"], 1);

    let response = server.get(&format!("/api/v1/pdf/{}/pages/1", id)).await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type").to_str().unwrap(), "image/png");
    let image = response.as_bytes().to_vec();
    assert_eq!(&image[..4], b"\x89PNG");

    let response = server
        .post(&format!("/api/v1/pdf/{}/pages/9/toggle", id))
        .await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");

    let response = server
        .post(&format!("/api/v1/pdf/{}/pages/1/toggle", id))
        .await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["selected"], false);

    let response = server
        .post(&format!("/api/v1/pdf/{}/pages/1/toggle", id))
        .await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["selected"], true);

    // One selected page downloads as the raw image, not a ZIP
    let response = server.get(&format!("/api/v1/pdf/{}/archive", id)).await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type").to_str().unwrap(), "image/png");
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("fixture_page_1.png"));
    assert_eq!(response.as_bytes().to_vec(), image);
}

#[tokio::test]
async fn archive_bundles_every_selected_page() {
    let server = test_server();
    let (content_type, body) = multipart_file("pair.pdf", &minimal_pdf(2));

    let response = server
        .post("/api/v1/pdf/extract")
        .content_type(&content_type)
        .bytes(body.into())
        .await;
    response.assert_status_ok();
    let run: Value = response.json();
    assert_eq!(run["pageCount"], 2);
    let id = run["id"].as_str().unwrap().to_string();

    let response = server.get(&format!("/api/v1/pdf/{}/archive", id)).await;
    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/zip"
    );
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("pair_images.zip"));

    let data = response.as_bytes().to_vec();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["pair_page_1.png", "pair_page_2.png"]);
}

#[tokio::test]
async fn extraction_rejects_unknown_output_format() {
    let server = test_server();
    let (content_type, body) = multipart_file("junk.pdf", b"irrelevant");
    let response = server
        .post("/api/v1/pdf/extract")
        .add_query_param("format", "webp")
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn unreadable_upload_fails_with_a_single_read_error() {
    let server = test_server();
    let (content_type, body) = multipart_file("junk.pdf", b"definitely not a pdf");
    let response = server
        .post("/api/v1/pdf/extract")
        .content_type(&content_type)
        .bytes(body.into())
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "unreadable_document");
}
