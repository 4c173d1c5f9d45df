use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service API",
        version = "1.0.0",
        description = "User-management API backed by MongoDB.\n\n**Features:**\n- Registration with unique email\n- Email/password login with blocked-status gating\n- Full account listing\n- Bulk block/unblock/delete by id"
    ),
    paths(
        // User endpoints
        crate::api::users::register,
        crate::api::users::login,
        crate::api::users::list_users,
        crate::api::users::block_users,
        crate::api::users::unblock_users,
        crate::api::users::delete_users,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::account_service::LoginRequest,
            crate::services::account_service::BulkIdsRequest,
            crate::services::account_service::AccountSummary,
            crate::services::account_service::InsertAck,
            crate::services::account_service::UpdateSummary,
            crate::services::account_service::DeleteSummary,

            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login, listing and bulk status/delete operations."),
        (name = "Health", description = "Health check endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
