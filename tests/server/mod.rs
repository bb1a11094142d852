use actix_web::{App, HttpResponse, HttpServer, web};

/// A healthy server-rendered page: substantial copy, every SEO signal set.
pub const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Fixture product page</title>
    <meta name="description" content="A thorough description of the fixture product.">
    <link rel="canonical" href="https://fixture.test/product">
    <link rel="alternate" hreflang="en" href="https://fixture.test/en/product">
</head>
<body>
    <h1>Fixture product</h1>
    <main>
        <p>This opening paragraph carries plenty of honest server-rendered copy
        so the extractor has something substantial to measure. It keeps going
        for a while to stay well above every minimum-length filter.</p>
        <p>A second paragraph follows with more details about the product, its
        provenance and the way it is meant to be used by discerning readers.</p>
        <p>The closing paragraph rounds the page off with a final thought and
        a gentle call to action for anyone still reading.</p>
    </main>
</body>
</html>"#;

/// A client-side-rendered shell: almost no raw text, no heading.
pub const SHELL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Shell</title><meta name="description" content="shell"></head>
<body><div id="root"></div><script src="/bundle.js"></script></body>
</html>"#;

/// A page missing its title but carrying everything else.
pub const NO_TITLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta name="description" content="Described but untitled fixture page."></head>
<body>
    <h1>Untitled fixture</h1>
    <p>This page intentionally ships without a title tag while keeping a body
    long enough that coverage alone would grade it as low risk.</p>
    <p>Another comfortable paragraph keeps the text length respectable so the
    only defect the diagnoser can find is the missing title.</p>
</body>
</html>"#;

/// A page with content trapped in hidden elements.
pub const HIDDEN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Hidden fixture</title><meta name="description" content="Hides things."></head>
<body>
    <h1>Hidden fixture</h1>
    <p>The visible paragraph is perfectly ordinary and long enough to count.</p>
    <div style="display:none">Secret hidden content exceeding ten chars</div>
    <div aria-hidden="true">Another hidden block with enough text inside</div>
</body>
</html>"#;

/// Starts a fixture server on an ephemeral port and returns its base URL.
pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route("/full", web::get().to(full_page))
            .route("/shell", web::get().to(shell_page))
            .route("/no-title", web::get().to(no_title_page))
            .route("/hidden", web::get().to(hidden_page))
    })
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

async fn full_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header(("X-Robots-Tag", "index, follow"))
        .insert_header(("Content-Language", "en"))
        .body(FULL_PAGE)
}

async fn shell_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(SHELL_PAGE)
}

async fn no_title_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(NO_TITLE_PAGE)
}

async fn hidden_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(HIDDEN_PAGE)
}
