use std::path::PathBuf;
use std::sync::Mutex;
use std::{fs, io};

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use tracing::info;

use charlm_core::model::language_model::LanguageModel;

/// Directory holding the corpus files served by this instance.
const DATA_DIR: &str = "./data";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed_text: String,
	length: usize,
}

/// Struct representing query parameters for the `/v1/model` endpoint
#[derive(Deserialize)]
struct ModelParams {
	corpus: String,
	window: usize,
	seed: Option<u64>,
}

struct SharedData {
	model: Option<LanguageModel>,
}

/// Resolves a corpus name to its file path under the data directory.
///
/// Names are bare file stems; separators and parent references are
/// rejected so a request cannot escape the data directory.
fn corpus_path(name: &str) -> Result<PathBuf, String> {
	let name = name.trim();
	if name.is_empty() {
		return Err("Missing or empty corpus name".to_owned());
	}
	if name.contains('/') || name.contains('\\') || name.contains("..") {
		return Err(format!("Invalid corpus name: {name}"));
	}
	Ok(PathBuf::from(format!("{DATA_DIR}/{name}.txt")))
}

/// Lists all corpus files in the data directory.
///
/// Returns file stems only (no paths, no extension).
fn list_corpora() -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(DATA_DIR)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new("txt")) {
			if let Some(stem) = path.file_stem() {
				names.push(stem.to_string_lossy().to_string());
			}
		}
	}

	Ok(names)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Extends the given seed text up to the requested length using the
/// currently loaded model. Returns the generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.as_mut() {
		Some(model) => HttpResponse::Ok().body(model.generate(&query.seed_text, query.length)),
		None => HttpResponse::Conflict().body("No model loaded, PUT /v1/model first"),
	}
}

/// HTTP GET endpoint `/v1/dump`
///
/// Renders the learned table, one window per line. Diagnostic only.
#[get("/v1/dump")]
async fn get_dump(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.as_ref() {
		Some(model) => HttpResponse::Ok().body(format!("{model}")),
		None => HttpResponse::Conflict().body("No model loaded, PUT /v1/model first"),
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_corpora() {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// HTTP PUT endpoint `/v1/model`
///
/// Builds a fresh model from the named corpus file and replaces the shared
/// one. An explicit `seed` makes later generations reproducible.
#[put("/v1/model")]
async fn put_model(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelParams>) -> impl Responder {
	let path = match corpus_path(&query.corpus) {
		Ok(p) => p,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let corpus = match fs::read_to_string(&path) {
		Ok(text) => text,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to read corpus: {e}")),
	};

	let build = match query.seed {
		Some(seed) => LanguageModel::with_seed(query.window, seed),
		None => LanguageModel::new(query.window),
	};
	let mut model = match build {
		Ok(m) => m,
		Err(e) => return HttpResponse::BadRequest().body(format!("{e}")),
	};
	model.train(&corpus);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	info!("model trained on {} ({} windows)", path.display(), model.table().len());
	shared_data.model = Some(model);

	HttpResponse::Ok().body("Model trained successfully")
}

/// Main entry point for the server.
///
/// Starts without a model; a model is built on demand through
/// `PUT /v1/model` and shared behind a `Mutex`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Corpus files are read from `./data/<name>.txt`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	tracing_subscriber::fmt::init();

	let shared_data = SharedData { model: None };
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_dump)
			.service(get_corpora)
			.service(put_model)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
