//! A basic server demonstrating slug routes, context injection and gzip.

use exprego::{HttpRequest, HttpResponse, HttpServer, Method, MimeType, ServerConfig, StatusCode};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Pet {
    name: String,
    kind: String,
}

fn list_pets(_req: &HttpRequest) -> HttpResponse {
    let pets = vec![
        Pet { name: "Rex".to_string(), kind: "dog".to_string() },
        Pet { name: "Tom".to_string(), kind: "cat".to_string() },
    ];

    HttpResponse::new(StatusCode::OK)
        .with_json(&pets)
        .unwrap_or_else(|_| HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let mut server = HttpServer::new(ServerConfig::default().with_port(8081));
    server.add_context("service", "petstore");

    server
        .add_route(Method::GET, "/", |req: &HttpRequest| {
            let service = req.get_context("service").cloned().unwrap_or_default();
            HttpResponse::new(StatusCode::OK).with_body_string(format!("Welcome to {service}!"))
        })?
        // Registered before the wildcard route, so it is never shadowed by it
        .add_route(Method::GET, "/pets", list_pets)?
        .add_route(Method::GET, "/[page]", |req: &HttpRequest| {
            let page = req.get_param("page").cloned().unwrap_or_default();
            HttpResponse::new(StatusCode::OK).with_body_string(format!("You asked for {page}"))
        })?
        .add_route(Method::GET, "/pets/[name]", |req: &HttpRequest| {
            let name = req.get_param("name").cloned().unwrap_or_default();
            HttpResponse::new(StatusCode::OK).with_body_string(format!("Pet: {name}"))
        })?
        .add_route(Method::POST, "/pets", |req: &HttpRequest| match req.json::<Pet>() {
            Ok(pet) => HttpResponse::new(StatusCode::CREATED)
                .with_content_type(MimeType::Json)
                .with_body_bytes(req.body.clone())
                .with_header("Location", format!("/pets/{}", pet.name)),
            Err(e) => HttpResponse::new(StatusCode::BAD_REQUEST).with_body_string(e.to_string()),
        })?;

    server.set_not_found(|req: &HttpRequest| {
        HttpResponse::new(StatusCode::NOT_FOUND).with_body_string(format!("Nothing at {}", req.path))
    });

    info!("Try: curl -H 'Accept-Encoding: gzip' --compressed http://127.0.0.1:8081/pets");

    server.start().await?;

    Ok(())
}
