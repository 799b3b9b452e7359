//! Content categories and age groups.

/// Storage category. Each category owns exactly one directory under the upload root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Animated videos for ages 1-5
    EarlyChildhoodVideo,
    /// Videos for ages 6-18
    SchoolAgeVideo,
    /// Project submissions for ages 19-25
    Project,
    /// Generated submission certificates
    Certificate,
}

impl Category {
    /// All categories, in directory creation order.
    pub const ALL: [Category; 4] = [
        Category::EarlyChildhoodVideo,
        Category::SchoolAgeVideo,
        Category::Project,
        Category::Certificate,
    ];

    /// Directory name under the upload root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::EarlyChildhoodVideo => "videos_1_5",
            Self::SchoolAgeVideo => "videos_6_18",
            Self::Project => "projects",
            Self::Certificate => "certificates",
        }
    }

    /// URL prefix that serves files of this category, if any.
    ///
    /// Project submissions are stored but never served back.
    pub fn serve_prefix(&self) -> Option<&'static str> {
        match self {
            Self::EarlyChildhoodVideo => Some("/videos/1-5/"),
            Self::SchoolAgeVideo => Some("/videos/6-18/"),
            Self::Project => None,
            Self::Certificate => Some("/cert/"),
        }
    }

    /// Serving URL for a stored filename, with the name percent-encoded.
    pub fn serve_url(&self, filename: &str) -> Option<String> {
        self.serve_prefix()
            .map(|prefix| format!("{}{}", prefix, urlencoding::encode(filename)))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Audience age group used by the informational pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    EarlyChildhood,
    SchoolAge,
    YoungAdult,
}

impl AgeGroup {
    /// Parse the `/age/{group}` path segment. Only exact matches are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1-5" => Some(Self::EarlyChildhood),
            "6-18" => Some(Self::SchoolAge),
            "19-25" => Some(Self::YoungAdult),
            _ => None,
        }
    }

    /// Path segment for this group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyChildhood => "1-5",
            Self::SchoolAge => "6-18",
            Self::YoungAdult => "19-25",
        }
    }

    /// Human-readable range, as shown on pages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EarlyChildhood => "1–5",
            Self::SchoolAge => "6–18",
            Self::YoungAdult => "19–25",
        }
    }

    /// Video category uploaded from this group's page, if the group has one.
    pub fn video_category(&self) -> Option<Category> {
        match self {
            Self::EarlyChildhood => Some(Category::EarlyChildhoodVideo),
            Self::SchoolAge => Some(Category::SchoolAgeVideo),
            Self::YoungAdult => None,
        }
    }
}
