//! Social login session entity <-> model mapper

use quizhub_core::entities::SocialLoginSession;

use crate::models::LoginSessionModel;

impl From<LoginSessionModel> for SocialLoginSession {
    fn from(model: LoginSessionModel) -> Self {
        SocialLoginSession {
            id: model.id,
            session_id: model.session_id,
            social_account_id: model.social_account_id,
            ip: model.ip,
            user_agent: model.user_agent,
            is_successful: model.is_successful,
            error_message: model.error_message,
            created_at: model.created_at,
        }
    }
}
