/// Resolves the relative image paths handed out by the catalog.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base: String,
}

const POSTER_SIZE: &str = "w500";
const PROFILE_SIZE: &str = "w200";

impl ImageUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn poster(&self, path: Option<&str>) -> Option<String> {
        self.resolve(POSTER_SIZE, path)
    }

    pub fn profile(&self, path: Option<&str>) -> Option<String> {
        self.resolve(PROFILE_SIZE, path)
    }

    fn resolve(&self, size: &str, path: Option<&str>) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        if path.starts_with('/') {
            Some(format!("{}/{}{}", self.base, size, path))
        } else {
            Some(format!("{}/{}/{}", self.base, size, path))
        }
    }
}
