//! OpenAPI document for the API routes.

use utoipa::OpenApi;

use super::handlers::{self, GreetingResponse};
use crate::matrix::Matrices;

#[derive(OpenApi)]
#[openapi(
    info(title = "spaceship", description = "Greeting and random dot product API"),
    paths(handlers::hello_world, handlers::matrices),
    components(schemas(GreetingResponse, Matrices))
)]
struct ApiDoc;

/// Join a route path onto the mount prefix.
fn mount(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path) {
        (true, _) => path.to_string(),
        (false, "/") => prefix.to_string(),
        (false, _) => format!("{prefix}{path}"),
    }
}

/// Build the OpenAPI document with every path mounted under `prefix`.
pub fn openapi(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| (mount(prefix, &path), item))
        .collect();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_handles_root_and_empty_prefix() {
        assert_eq!(mount("/api", "/"), "/api");
        assert_eq!(mount("/api", "/matrices"), "/api/matrices");
        assert_eq!(mount("", "/"), "/");
        assert_eq!(mount("", "/matrices"), "/matrices");
    }

    #[test]
    fn document_lists_prefixed_paths() {
        let doc = openapi("/v1");
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/v1", "/v1/matrices"]);
    }
}
