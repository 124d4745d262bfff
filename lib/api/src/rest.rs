use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use vendx_pipeline::engine::QualificationEngine;
use vendx_pipeline::rank::RankedVendor;

#[derive(Deserialize)]
struct QualificationRequest {
    software_category: String,
    #[serde(default)]
    capabilities: Vec<String>,
}

#[derive(Serialize)]
struct VendorResult {
    product_name: String,
    rating: Option<f32>,
    seller: String,
    main_category: String,
    #[serde(rename = "Features")]
    features: String,
    avg_similarity_score: f32,
    final_score: f32,
    rank: usize,
}

impl From<RankedVendor> for VendorResult {
    fn from(v: RankedVendor) -> Self {
        Self {
            product_name: v.record.product_name,
            rating: v.record.rating,
            seller: v.record.seller,
            main_category: v.record.main_category,
            features: v.record.features_raw,
            avg_similarity_score: v.avg_similarity_score,
            final_score: v.final_score,
            rank: v.rank,
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<QualificationEngine>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .route("/vendor_qualification", web::post().to(qualify_vendors))
                .route("/healthz", web::get().to(healthz))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn qualify_vendors(
    engine: web::Data<Arc<QualificationEngine>>,
    req: web::Json<QualificationRequest>,
) -> ActixResult<HttpResponse> {
    if req.software_category.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "'software_category' must not be empty"
        })));
    }

    match engine.qualify(&req.software_category, &req.capabilities) {
        Ok(ranked) => {
            info!(
                category = %req.software_category,
                capabilities = req.capabilities.len(),
                results = ranked.len(),
                "qualification request served"
            );

            if ranked.is_empty() {
                return Ok(HttpResponse::Ok().json(serde_json::json!({
                    "message": "No vendors matched the requested category and capabilities",
                    "results": []
                })));
            }

            let results: Vec<VendorResult> =
                ranked.into_iter().map(VendorResult::from).collect();
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": "Qualified vendors ranked by relevance",
                "results": results
            })))
        }
        Err(e) => {
            error!(error = %e, "qualification request failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn healthz(engine: web::Data<Arc<QualificationEngine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "records": engine.record_count()
    })))
}
