use http::{HeaderValue, Method, StatusCode, header};
use routelamb::core::config::AdapterConfig;
use routelamb::request::CanonicalRequest;
use routelamb::response::ResponseSink;

fn greet(sink: &mut dyn ResponseSink, request: CanonicalRequest) {
    let name = match request.path() {
        "/greeting" => Some("World".to_string()),
        path => path
            .strip_prefix("/greeting/")
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .map(ToString::to_string),
    };

    sink.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    match name {
        Some(name) if *request.method() == Method::GET => {
            sink.write_status(StatusCode::OK);
            sink.write(format!("Hello, {}!", name).as_bytes());
        }
        Some(_) => sink.write_status(StatusCode::METHOD_NOT_ALLOWED),
        None => {
            sink.write_status(StatusCode::NOT_FOUND);
            sink.write(b"404 page not found");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    routelamb::setup_logging();
    let config = AdapterConfig::from_env()?;
    routelamb::start_with_config(greet, config).await
}
