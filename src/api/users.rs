use actix_web::{web, HttpResponse};

use crate::database::{accounts::AccountStore, MongoDB};
use crate::models::{Account, AccountStatus};
use crate::services::account_service::{
    self, BulkIdsRequest, DeleteSummary, InsertAck, LoginRequest, UpdateSummary,
};
use crate::utils::error::AppError;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 201, description = "Account created", body = InsertAck),
        (status = 400, description = "Email already registered"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn register(db: web::Data<MongoDB>, account: web::Json<Account>) -> HttpResponse {
    let account = account.into_inner();
    log::info!("📝 POST /users - email: {}", account.email);

    let store = AccountStore::new(&db);
    match account_service::register(&store, account).await {
        Ok(ack) => {
            log::info!("✅ Account registered: {}", ack.inserted_id);
            HttpResponse::Created().json(ack)
        }
        Err(AppError::DuplicateEmail) => {
            log::warn!("❌ Registration rejected, email already registered");
            HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Email already registered"
            }))
        }
        Err(e) => {
            log::error!("❌ Error inserting user: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal Server Error"
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "User is blocked")
    )
)]
pub async fn login(db: web::Data<MongoDB>, request: web::Json<LoginRequest>) -> HttpResponse {
    log::info!("🔐 POST /login - email: {}", request.email);

    let store = AccountStore::new(&db);
    match account_service::login(&store, &request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Login successful",
                "user": user
            }))
        }
        Err(AppError::AccountBlocked) => {
            log::warn!("❌ Login rejected, user is blocked: {}", request.email);
            HttpResponse::Forbidden().json(serde_json::json!({
                "message": "User is blocked"
            }))
        }
        Err(AppError::InvalidCredentials) => {
            log::warn!("❌ Login failed: {}", request.email);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "message": "Invalid email or password"
            }))
        }
        Err(e) => {
            log::error!("❌ Login error: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal Server Error"
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every persisted account, verbatim"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /users");

    let store = AccountStore::new(&db);
    match account_service::list_accounts(&store).await {
        Ok(accounts) => HttpResponse::Ok().json(accounts),
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal Server Error"
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/users/block",
    tag = "Users",
    request_body = BulkIdsRequest,
    responses(
        (status = 200, description = "Users blocked", body = UpdateSummary),
        (status = 500, description = "Store or id-parse failure")
    )
)]
pub async fn block_users(db: web::Data<MongoDB>, request: web::Json<BulkIdsRequest>) -> HttpResponse {
    log::info!("🚫 POST /users/block - {} ids", request.user_ids.len());

    let store = AccountStore::new(&db);
    match account_service::set_status(&store, &request.user_ids, AccountStatus::Blocked).await {
        Ok(result) => {
            log::info!("✅ Blocked {} of {} matched users", result.modified_count, result.matched_count);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Users blocked successfully",
                "result": result
            }))
        }
        Err(e) => {
            log::error!("❌ Error blocking users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to block users"
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/users/unblock",
    tag = "Users",
    request_body = BulkIdsRequest,
    responses(
        (status = 200, description = "Users unblocked", body = UpdateSummary),
        (status = 500, description = "Store or id-parse failure")
    )
)]
pub async fn unblock_users(db: web::Data<MongoDB>, request: web::Json<BulkIdsRequest>) -> HttpResponse {
    log::info!("♻️ POST /users/unblock - {} ids", request.user_ids.len());

    let store = AccountStore::new(&db);
    match account_service::set_status(&store, &request.user_ids, AccountStatus::Active).await {
        Ok(result) => {
            log::info!("✅ Unblocked {} of {} matched users", result.modified_count, result.matched_count);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Users unblocked successfully",
                "result": result
            }))
        }
        Err(e) => {
            log::error!("❌ Error unblocking users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to unblock users"
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/users/delete",
    tag = "Users",
    request_body = BulkIdsRequest,
    responses(
        (status = 200, description = "Users deleted", body = DeleteSummary),
        (status = 500, description = "Store or id-parse failure")
    )
)]
pub async fn delete_users(db: web::Data<MongoDB>, request: web::Json<BulkIdsRequest>) -> HttpResponse {
    log::info!("🗑️ POST /users/delete - {} ids", request.user_ids.len());

    let store = AccountStore::new(&db);
    match account_service::delete_accounts(&store, &request.user_ids).await {
        Ok(result) => {
            log::info!("✅ Deleted {} users", result.deleted_count);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Users deleted successfully",
                "result": result
            }))
        }
        Err(e) => {
            log::error!("❌ Error deleting users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to delete users"
            }))
        }
    }
}
