use std::io;
use std::sync::Arc;

use ntex::http::{Method, StatusCode};
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use percent_encoding::percent_decode_str;
use spdlog::{info, warn};

use crate::page_sink::PageSink;
use crate::routes::RouteTable;
use crate::site::Site;

pub struct AppState {
    pub site: Site,
    pub routes: RouteTable,
}

/// Collects the page and turns it into an ntex response.
#[derive(Default)]
pub struct HttpSink {
    status: Option<StatusCode>,
    body: Vec<u8>,
}

impl PageSink for HttpSink {
    fn write_header(&mut self, status: u16) {
        if self.status.is_none() {
            self.status = Some(StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
        }
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }
}

impl HttpSink {
    pub fn into_response(self) -> web::HttpResponse {
        let status = self.status.unwrap_or(StatusCode::OK);
        let content_type = if status.is_success() {
            "text/html; charset=utf-8"
        } else {
            "text/plain; charset=utf-8"
        };
        web::HttpResponse::build(status)
            .content_type(content_type)
            .body(self.body)
    }
}

#[web::get("/static/{file_name}*")]
async fn static_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.site.paths.static_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

/// Everything that is not a static file goes through the route table.
async fn dispatch(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    if req.method() != Method::GET {
        return web::HttpResponse::MethodNotAllowed().finish();
    }

    // Slugs are file names, the request path is percent-encoded
    let path = percent_decode_str(req.path()).decode_utf8_lossy();
    let mut sink = HttpSink::default();
    if let Err(err) = state.routes.dispatch(&state.site, &path, &mut sink) {
        warn!("{} {} -> {}: {:#}", req.method(), req.path(), err.status(), err);
    }
    sink.into_response()
}

pub async fn server_run(state: AppState, address: String, port: u16) -> io::Result<()> {
    info!("Listening on {}:{}", address, port);
    let state = Arc::new(state);

    web::HttpServer::new(move || {
        web::App::new()
            .state(state.clone())
            .service(static_files)
            .default_service(web::route().to(dispatch))
    })
        .bind((address, port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ntex::web::test;
    use tempfile::TempDir;

    use super::*;
    use crate::test_data::{fixed_mtime, test_site, write_markdown, write_templates};

    fn state(root: &std::path::Path) -> Arc<AppState> {
        write_templates(root);
        write_markdown(&root.join("posts"), "hello-world.md", "hi", fixed_mtime());
        write_markdown(&root.join("thoughts"), "aside.md", "aside", fixed_mtime());
        write_markdown(&root.join("posts"), "my post.md", "spaced", fixed_mtime());
        write_markdown(&root.join("posts"), "café.md", "accented", fixed_mtime());
        fs::create_dir_all(root.join("static")).unwrap();
        fs::write(root.join("static").join("site.css"), "body {}").unwrap();

        Arc::new(AppState {
            site: test_site(root),
            routes: RouteTable::default(),
        })
    }

    #[test]
    fn test_http_sink() {
        let mut sink = HttpSink::default();
        sink.write_header(404);
        sink.write_body(b"Post not found");
        let resp = sink.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[ntex::test]
    async fn test_routes_over_http() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());
        let app = test::init_service(
            web::App::new()
                .state(state)
                .service(static_files)
                .default_service(web::route().to(dispatch))
        ).await;

        let req = test::TestRequest::with_uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("/post/hello-world"));

        let req = test::TestRequest::with_uri("/post/aside").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::with_uri("/post/my%20post").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("<echo>spaced</echo>"));

        let req = test::TestRequest::with_uri("/post/caf%C3%A9").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::with_uri("/post/..%2Fnav%2Fabout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::with_uri("/post/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::with_uri("/about").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = test::TestRequest::with_uri("/static/site.css").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::with_uri("/").method(Method::POST).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
