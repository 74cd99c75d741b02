use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{dedupe_prospects, Prospect};
use crate::scoring::{
    analyze_competition, apply_scores_to_prospect, classify_industry, filter_prospects,
    rank_prospects, score_prospect,
};

#[derive(Deserialize)]
struct ScoreBatchRequest {
    #[serde(default)]
    search_query: String,
    #[serde(default)]
    search_location: String,
    #[serde(default)]
    strict: bool,
    search_results: Option<Value>,
    prospects: Vec<Prospect>,
}

#[derive(Serialize)]
struct ScoreBatchResponse {
    received: usize,
    kept: usize,
    prospects: Vec<Prospect>,
}

#[post("")]
async fn score_batch(body: web::Json<ScoreBatchRequest>) -> HttpResponse {
    let request = body.into_inner();
    let run_id = Uuid::new_v4();
    let received = request.prospects.len();

    log::info!(
        "[{}] Scoring {} prospects for query: {}",
        run_id,
        received,
        request.search_query
    );

    let mut prospects = request.prospects;
    for prospect in prospects.iter_mut() {
        prospect.ensure_domain();
    }

    let prospects = filter_prospects(prospects, &request.search_query, request.strict);
    let mut prospects = dedupe_prospects(prospects);

    for prospect in prospects.iter_mut() {
        let score = score_prospect(
            prospect,
            request.search_results.as_ref(),
            &request.search_query,
            &request.search_location,
        );
        apply_scores_to_prospect(prospect, &score);
    }

    rank_prospects(&mut prospects);

    log::info!(
        "[{}] Ranked {} of {} prospects",
        run_id,
        prospects.len(),
        received
    );

    HttpResponse::Ok().json(ScoreBatchResponse {
        received,
        kept: prospects.len(),
        prospects,
    })
}

#[post("/competition")]
async fn competition(body: web::Json<Value>) -> HttpResponse {
    let analysis = analyze_competition(&body.into_inner());

    HttpResponse::Ok().json(analysis)
}

#[derive(Deserialize)]
struct ClassifyIndustryQuery {
    business_type: String,
    business_name: Option<String>,
}

#[get("/industry")]
async fn industry(query: web::Query<ClassifyIndustryQuery>) -> HttpResponse {
    let classification =
        classify_industry(&query.business_type, query.business_name.as_deref());

    HttpResponse::Ok().json(classification)
}
