//! Site admin entity <-> model mapper

use quizhub_core::entities::SiteAdmin;

use crate::models::SiteAdminModel;

impl From<SiteAdminModel> for SiteAdmin {
    fn from(model: SiteAdminModel) -> Self {
        SiteAdmin {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_superuser: model.is_superuser,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
