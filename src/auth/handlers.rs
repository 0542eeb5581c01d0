use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::auth::dto::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::error::{AppError, AuthError};
use crate::AppState;

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);
    let result = state.auth_service.register(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);
    let result = state.auth_service.login(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn refresh(
    req: web::Json<RefreshRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = state.auth_service.refresh(&req.token).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Message patterns accepted on the `/rpc` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MessagePattern {
    #[serde(rename = "auth.register.user")]
    RegisterUser,
    #[serde(rename = "auth.login.user")]
    LoginUser,
    #[serde(rename = "auth.refresh.user")]
    RefreshUser,
}

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub pattern: MessagePattern,
    #[serde(default)]
    pub data: Value,
}

/// Dispatches `{pattern, data}` envelopes. For `auth.refresh.user`, `data` is the bare token string.
pub async fn rpc(
    req: web::Json<RpcRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RpcRequest { pattern, data } = req.into_inner();
    info!("Received rpc message: {:?}", pattern);

    let result = match pattern {
        MessagePattern::RegisterUser => {
            state.auth_service.register(parse_payload(data)?).await?
        }
        MessagePattern::LoginUser => state.auth_service.login(parse_payload(data)?).await?,
        MessagePattern::RefreshUser => {
            let token: String = parse_payload(data)?;
            state.auth_service.refresh(&token).await?
        }
    };

    Ok(HttpResponse::Ok().json(result))
}

fn parse_payload<T: serde::de::DeserializeOwned>(data: Value) -> Result<T, AuthError> {
    serde_json::from_value(data).map_err(|e| {
        warn!("Malformed rpc payload: {}", e);
        AuthError::Validation("malformed payload".into())
    })
}
