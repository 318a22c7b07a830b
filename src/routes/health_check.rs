use actix_web::HttpResponse;

/// `GET /health_check`
///
/// 200 with an empty body, for load balancers and uptime probes.
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
