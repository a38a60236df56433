//! Static site information used for page metadata and links

/// Social profile links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Socials {
    pub twitter: &'static str,
    pub github: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub domain: &'static str,
    pub url: &'static str,
    pub socials: Socials,
}

pub const SITE: SiteInfo = SiteInfo {
    id: "museroom",
    name: "MuseRoom",
    description: "The Future of Music Creation",
    domain: "museroomlanding.netlify.app",
    url: "https://museroomlanding.netlify.app",
    socials: Socials {
        twitter: "https://twitter.com/museroom",
        github: "https://github.com/bmichals25/MR-website",
    },
};

impl SiteInfo {
    /// Document title: `"{name} | {description}"`
    pub fn title(&self) -> String {
        format!("{} | {}", self.name, self.description)
    }

    /// Absolute URL for a site path
    pub fn absolute(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert_eq!(SITE.title(), "MuseRoom | The Future of Music Creation");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(SITE.absolute("/"), "https://museroomlanding.netlify.app/");
        assert_eq!(
            SITE.absolute("api/waitlist"),
            "https://museroomlanding.netlify.app/api/waitlist"
        );
    }

    #[test]
    fn test_url_matches_domain() {
        assert!(SITE.url.ends_with(SITE.domain));
    }
}
