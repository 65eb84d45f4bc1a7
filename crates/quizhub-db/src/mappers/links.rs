//! Social-link column packing

use quizhub_core::entities::SocialLinks;

/// Borrowed view of the seven social-link columns for binding
pub struct SocialLinkColumns<'a> {
    pub telegram: Option<&'a str>,
    pub github: Option<&'a str>,
    pub instagram: Option<&'a str>,
    pub facebook: Option<&'a str>,
    pub linkedin: Option<&'a str>,
    pub youtube: Option<&'a str>,
    pub website: Option<&'a str>,
}

impl<'a> SocialLinkColumns<'a> {
    #[must_use]
    pub fn new(links: &'a SocialLinks) -> Self {
        Self {
            telegram: links.telegram.as_deref(),
            github: links.github.as_deref(),
            instagram: links.instagram.as_deref(),
            facebook: links.facebook.as_deref(),
            linkedin: links.linkedin.as_deref(),
            youtube: links.youtube.as_deref(),
            website: links.website.as_deref(),
        }
    }
}

/// Rebuild a `SocialLinks` from the seven link columns
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn links_from_columns(
    telegram: Option<String>,
    github: Option<String>,
    instagram: Option<String>,
    facebook: Option<String>,
    linkedin: Option<String>,
    youtube: Option<String>,
    website: Option<String>,
) -> SocialLinks {
    SocialLinks {
        telegram,
        github,
        instagram,
        facebook,
        linkedin,
        youtube,
        website,
    }
}
