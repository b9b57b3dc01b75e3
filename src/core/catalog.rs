/// Two-line caption drawn under an image tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caption {
    pub location: String,
    pub date: String,
}

impl Caption {
    pub fn lines(&self) -> [&str; 2] {
        [&self.location, &self.date]
    }
}

/// Ordered image references plus optional caption metadata, indexed alike.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageCatalog {
    paths: Vec<String>,
    captions: Vec<Option<Caption>>,
}

impl ImageCatalog {
    /// Blank paths are dropped; captions follow the surviving paths.
    pub fn new<F>(paths: Vec<String>, mut caption_for: F) -> Self
    where
        F: FnMut(&str) -> Option<Caption>,
    {
        let paths: Vec<String> = paths
            .into_iter()
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty())
            .collect();
        let captions = paths.iter().map(|p| caption_for(p)).collect();
        Self { paths, captions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn path(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    pub fn caption(&self, index: usize) -> Option<&Caption> {
        self.captions.get(index).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, Option<&Caption>)> {
        self.paths
            .iter()
            .zip(&self.captions)
            .enumerate()
            .map(|(i, (p, c))| (i, p.as_str(), c.as_ref()))
    }
}
