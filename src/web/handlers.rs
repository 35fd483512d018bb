use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::conversation::{InboundRequest, OutboundResponse};
use crate::error::HandlerError;
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Conversation endpoint, serves both POST and the OPTIONS preflight.
// The body is read here rather than through `web::Bytes` so that an
// oversized request still gets the JSON error body and CORS headers.
pub async fn conversation(
    data: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> HttpResponse {
    let method = req.method().clone();

    let response = if method == Method::OPTIONS {
        data.conversation.handle(InboundRequest::new(method, Vec::new())).await
    } else {
        match payload.to_bytes_limited(data.max_body_bytes).await {
            Ok(Ok(body)) => {
                data.conversation
                    .handle(InboundRequest::new(method, body.to_vec()))
                    .await
            }
            Ok(Err(e)) => data
                .conversation
                .reject(HandlerError::Payload(e.to_string())),
            Err(_) => data.conversation.reject(HandlerError::PayloadTooLarge {
                limit: data.max_body_bytes,
            }),
        }
    };

    into_http(response)
}

fn into_http(response: OutboundResponse) -> HttpResponse {
    let mut builder = HttpResponse::build(response.status);
    for header in response.headers {
        builder.insert_header(header);
    }
    builder.body(response.body)
}
